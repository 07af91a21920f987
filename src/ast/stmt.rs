use crate::ast::expr::Expr;
use crate::token::Span;

pub type Block = Vec<Stmt>;
pub type Program = Vec<Stmt>;

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionParam {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    Property { name: String },
    Method { name: String, params: Vec<FunctionParam>, body: Block },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl { name: String, value: Expr, is_constant: bool, span: Span },
    Assignment { name: String, value: Expr, span: Span },
    PropertyAssignment { property: String, value: Expr, span: Span },

    Print { values: Vec<Expr>, span: Span },
    Input { prompt: Option<Expr>, variable: String, span: Span },

    If {
        condition: Expr,
        then_block: Block,
        elif_blocks: Vec<(Expr, Block)>,
        else_block: Option<Block>,
        span: Span,
    },
    While { condition: Expr, body: Block, span: Span },
    Repeat { count: Expr, body: Block, span: Span },
    ForEach { variable: String, iterable: Expr, body: Block, span: Span },
    Loop { start: Expr, end: Expr, step: Option<Expr>, body: Block, span: Span },
    Break(Span),
    Continue(Span),

    FunctionDef { name: String, params: Vec<FunctionParam>, body: Block, span: Span },
    Return { value: Option<Expr>, span: Span },
    ExprStmt(Expr),
    FunctionCall { name: String, args: Vec<Expr>, store_as: Option<String>, span: Span },

    CreateList { name: String, span: Span },
    CreateMap { name: String, span: Span },

    ClassDef {
        name: String,
        parent: Option<String>,
        members: Vec<ClassMember>,
        is_abstract: bool,
        span: Span,
    },
    ContractDef { name: String, required_methods: Vec<String>, span: Span },
    CreateInstance { class_name: String, args: Vec<Expr>, variable: String, span: Span },
    MethodCall {
        object: String,
        method: String,
        args: Vec<Expr>,
        store_as: Option<String>,
        span: Span,
    },

    Comment(Span),
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::VarDecl { span, .. }
            | Stmt::Assignment { span, .. }
            | Stmt::PropertyAssignment { span, .. }
            | Stmt::Print { span, .. }
            | Stmt::Input { span, .. }
            | Stmt::If { span, .. }
            | Stmt::While { span, .. }
            | Stmt::Repeat { span, .. }
            | Stmt::ForEach { span, .. }
            | Stmt::Loop { span, .. }
            | Stmt::Break(span)
            | Stmt::Continue(span)
            | Stmt::FunctionDef { span, .. }
            | Stmt::Return { span, .. }
            | Stmt::FunctionCall { span, .. }
            | Stmt::CreateList { span, .. }
            | Stmt::CreateMap { span, .. }
            | Stmt::ClassDef { span, .. }
            | Stmt::ContractDef { span, .. }
            | Stmt::CreateInstance { span, .. }
            | Stmt::MethodCall { span, .. }
            | Stmt::Comment(span) => *span,
            Stmt::ExprStmt(expr) => expr.span(),
        }
    }
}
