mod expression;
mod oop;

use crate::ast::expr::Expr;
use crate::ast::stmt::{Block, FunctionParam, Program, Stmt};
use crate::error::KaynatError;
use crate::token::{Span, Token, TokenType};

pub(super) type ParseResult<T> = Result<T, KaynatError>;

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    /// Non-zero while parsing a `with` argument list. Per the spec's
    /// Open Question (b), `and` is a separator there, never the logical
    /// connective — `parse_logical_and` checks this to leave a trailing
    /// `and` (e.g. before `store as`, or the next argument) unconsumed.
    arg_list_depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0, arg_list_depth: 0 }
    }

    pub fn parse(mut self) -> ParseResult<Program> {
        // `begin program .` is an optional framing the parser simply consumes.
        if self.check(&TokenType::Begin) {
            self.advance();
            self.expect(&TokenType::Program)?;
            self.expect(&TokenType::Period)?;
        }

        let mut statements = Vec::new();
        while !self.is_at_end() {
            if self.check(&TokenType::End) && self.peek_ahead_is_program() {
                self.advance();
                self.advance();
                self.expect(&TokenType::Period)?;
                break;
            }
            statements.push(self.parse_statement()?);
        }
        log::debug!("parsed {} top-level statements", statements.len());
        Ok(statements)
    }

    fn peek_ahead_is_program(&self) -> bool {
        matches!(self.tokens.get(self.current + 1).map(|t| &t.kind), Some(TokenType::Program))
    }

    // -- token-stream primitives --------------------------------------

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenType::Eof)
    }

    fn check(&self, kind: &TokenType) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.current].clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        tok
    }

    fn match_token(&mut self, kind: &TokenType) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenType) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let found = self.peek().kind.clone();
            let span = self.peek().span;
            Err(KaynatError::parser(format!("expected {kind}, found {found}"), span))
        }
    }

    fn expect_identifier(&mut self) -> ParseResult<String> {
        match self.peek().kind.clone() {
            TokenType::Identifier(name) => {
                self.advance();
                Ok(name)
            }
            other => Err(KaynatError::parser(format!("expected identifier, found {other}"), self.peek().span)),
        }
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    fn in_arg_list(&self) -> bool {
        self.arg_list_depth > 0
    }

    // -- statement dispatch ---------------------------------------------

    fn parse_statement(&mut self) -> ParseResult<Stmt> {
        let span = self.current_span();
        match self.peek().kind.clone() {
            TokenType::Set | TokenType::Let => self.parse_var_decl(span),
            TokenType::Always => self.parse_constant_decl(span),
            TokenType::Change => self.parse_assignment(span),
            TokenType::Say | TokenType::Print | TokenType::Show => self.parse_print(span),
            TokenType::Ask => self.parse_input(span),
            TokenType::If => self.parse_if(span),
            TokenType::While => self.parse_while(span),
            TokenType::Repeat => self.parse_repeat(span),
            TokenType::For => self.parse_for_each(span),
            TokenType::Loop => self.parse_loop(span),
            TokenType::Define => self.parse_define(span),
            TokenType::Create => self.parse_create(span),
            TokenType::Call => self.parse_call_statement(span),
            TokenType::Give => self.parse_return(span),
            TokenType::Stop => {
                self.advance();
                self.expect(&TokenType::Period)?;
                Ok(Stmt::Break(span))
            }
            TokenType::Skip => {
                self.advance();
                self.expect(&TokenType::Period)?;
                Ok(Stmt::Continue(span))
            }
            TokenType::Add | TokenType::Subtract => self.parse_add_subtract(span),
            TokenType::Note => {
                self.advance();
                self.expect(&TokenType::Period)?;
                Ok(Stmt::Comment(span))
            }
            other => Err(KaynatError::parser(format!("expected a statement, found {other}"), span)),
        }
    }

    fn parse_block_until(&mut self, terminators: &[TokenType]) -> ParseResult<Block> {
        let mut statements = Vec::new();
        while !self.is_at_end() && !terminators.iter().any(|t| self.check(t)) {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    fn parse_var_decl(&mut self, span: Span) -> ParseResult<Stmt> {
        self.advance(); // set / let
        if self.match_token(&TokenType::My) {
            let property = self.expect_identifier()?;
            self.expect(&TokenType::To)?;
            let value = self.parse_expression()?;
            self.expect(&TokenType::Period)?;
            return Ok(Stmt::PropertyAssignment { property, value, span });
        }
        let name = self.expect_identifier()?;
        self.expect(&TokenType::To)?;
        let value = self.parse_expression()?;
        self.expect(&TokenType::Period)?;
        Ok(Stmt::VarDecl { name, value, is_constant: false, span })
    }

    fn parse_constant_decl(&mut self, span: Span) -> ParseResult<Stmt> {
        self.advance(); // always
        self.expect(&TokenType::Set)?;
        let name = self.expect_identifier()?;
        self.expect(&TokenType::As)?;
        let value = self.parse_expression()?;
        self.expect(&TokenType::Period)?;
        Ok(Stmt::VarDecl { name, value, is_constant: true, span })
    }

    fn parse_assignment(&mut self, span: Span) -> ParseResult<Stmt> {
        self.advance(); // change
        if self.match_token(&TokenType::My) {
            let property = self.expect_identifier()?;
            self.expect(&TokenType::To)?;
            let value = self.parse_expression()?;
            self.expect(&TokenType::Period)?;
            return Ok(Stmt::PropertyAssignment { property, value, span });
        }
        let name = self.expect_identifier()?;
        self.expect(&TokenType::To)?;
        let value = self.parse_expression()?;
        self.expect(&TokenType::Period)?;
        Ok(Stmt::Assignment { name, value, span })
    }

    fn parse_add_subtract(&mut self, span: Span) -> ParseResult<Stmt> {
        let is_add = self.check(&TokenType::Add);
        self.advance();
        let amount = self.parse_additive()?;
        if is_add {
            self.expect(&TokenType::To)?;
        } else {
            self.expect(&TokenType::From)?;
        }
        let name = self.expect_identifier()?;
        self.expect(&TokenType::Period)?;
        let op = if is_add { crate::ast::expr::BinaryOp::Add } else { crate::ast::expr::BinaryOp::Subtract };
        let value = Expr::BinaryOp {
            op,
            left: Box::new(Expr::Identifier(name.clone(), span)),
            right: Box::new(amount),
            span,
        };
        Ok(Stmt::Assignment { name, value, span })
    }

    fn parse_print(&mut self, span: Span) -> ParseResult<Stmt> {
        self.advance();
        let mut values = vec![self.parse_print_item()?];
        while self.match_token(&TokenType::Comma) {
            values.push(self.parse_print_item()?);
        }
        self.expect(&TokenType::Period)?;
        Ok(Stmt::Print { values, span })
    }

    /// A bare identifier directly followed by `.` or `,` in a print context
    /// is the identifier's own spelling, not a variable reference: this is
    /// the parser side of the identifier-as-string ambiguity policy. Any
    /// richer expression (numbers, operators, property access) still
    /// parses normally.
    fn parse_print_item(&mut self) -> ParseResult<Expr> {
        if let TokenType::Identifier(name) = self.peek().kind.clone() {
            let span = self.peek().span;
            let next = self.tokens.get(self.current + 1).map(|t| &t.kind);
            if matches!(next, Some(TokenType::Period) | Some(TokenType::Comma)) {
                self.advance();
                return Ok(Expr::Literal(crate::ast::expr::Literal::Text(name), span));
            }
        }
        self.parse_expression()
    }

    fn parse_input(&mut self, span: Span) -> ParseResult<Stmt> {
        self.advance(); // ask
        self.expect(&TokenType::The)?;
        self.expect(&TokenType::User)?;
        self.expect(&TokenType::For)?;
        let variable = self.expect_identifier()?;
        self.expect(&TokenType::Period)?;
        Ok(Stmt::Input { prompt: None, variable, span })
    }

    fn parse_if(&mut self, span: Span) -> ParseResult<Stmt> {
        self.advance(); // if
        let condition = self.parse_expression()?;
        self.match_token(&TokenType::Then);
        self.expect(&TokenType::Period)?;
        let then_block = self.parse_block_until(&[TokenType::Otherwise, TokenType::End])?;

        let mut elif_blocks = Vec::new();
        let mut else_block = None;
        while self.check(&TokenType::Otherwise) {
            self.advance();
            if self.check(&TokenType::If) {
                self.advance();
                let cond = self.parse_expression()?;
                self.match_token(&TokenType::Then);
                self.expect(&TokenType::Period)?;
                let block = self.parse_block_until(&[TokenType::Otherwise, TokenType::End])?;
                elif_blocks.push((cond, block));
            } else {
                self.expect(&TokenType::Period)?;
                else_block = Some(self.parse_block_until(&[TokenType::End])?);
                break;
            }
        }
        self.expect(&TokenType::End)?;
        self.expect(&TokenType::Period)?;
        Ok(Stmt::If { condition, then_block, elif_blocks, else_block, span })
    }

    fn parse_while(&mut self, span: Span) -> ParseResult<Stmt> {
        self.advance();
        let condition = self.parse_expression()?;
        self.match_token(&TokenType::Then);
        self.expect(&TokenType::Period)?;
        let body = self.parse_block_until(&[TokenType::End])?;
        self.expect(&TokenType::End)?;
        self.expect(&TokenType::Period)?;
        Ok(Stmt::While { condition, body, span })
    }

    fn parse_repeat(&mut self, span: Span) -> ParseResult<Stmt> {
        self.advance();
        let count = self.parse_expression()?;
        self.expect(&TokenType::Times)?;
        self.expect(&TokenType::Period)?;
        let body = self.parse_block_until(&[TokenType::End])?;
        self.expect(&TokenType::End)?;
        self.expect(&TokenType::Period)?;
        Ok(Stmt::Repeat { count, body, span })
    }

    fn parse_for_each(&mut self, span: Span) -> ParseResult<Stmt> {
        self.advance(); // for
        self.expect(&TokenType::Each)?;
        let variable = self.expect_identifier()?;
        self.expect(&TokenType::In)?;
        let iterable = self.parse_primary()?;
        self.expect(&TokenType::Period)?;
        let body = self.parse_block_until(&[TokenType::End])?;
        self.expect(&TokenType::End)?;
        self.expect(&TokenType::Period)?;
        Ok(Stmt::ForEach { variable, iterable, body, span })
    }

    fn parse_loop(&mut self, span: Span) -> ParseResult<Stmt> {
        self.advance(); // loop
        self.expect(&TokenType::From)?;
        let start = self.parse_additive()?;
        self.expect(&TokenType::To)?;
        let end = self.parse_additive()?;
        let step = if self.match_token(&TokenType::Stepping) {
            self.expect(&TokenType::By)?;
            Some(self.parse_additive()?)
        } else {
            None
        };
        self.expect(&TokenType::Period)?;
        let body = self.parse_block_until(&[TokenType::End])?;
        self.expect(&TokenType::End)?;
        self.expect(&TokenType::Period)?;
        Ok(Stmt::Loop { start, end, step, body, span })
    }

    fn parse_params(&mut self) -> ParseResult<Vec<FunctionParam>> {
        let mut params = vec![FunctionParam { name: self.expect_identifier()? }];
        loop {
            if self.match_token(&TokenType::Comma) {
                params.push(FunctionParam { name: self.expect_identifier()? });
            } else if self.match_token(&TokenType::And) {
                params.push(FunctionParam { name: self.expect_identifier()? });
            } else {
                break;
            }
        }
        Ok(params)
    }

    fn parse_define(&mut self, span: Span) -> ParseResult<Stmt> {
        self.advance(); // define
        self.match_token(&TokenType::A);
        if self.match_token(&TokenType::Abstract) {
            self.expect(&TokenType::Blueprint)?;
            return self.parse_blueprint_body(span, true);
        }
        if self.match_token(&TokenType::Blueprint) {
            return self.parse_blueprint_body(span, false);
        }
        if self.match_token(&TokenType::Contract) {
            return self.parse_contract_body(span);
        }
        self.expect(&TokenType::Function)?;
        self.expect(&TokenType::Called)?;
        let name = self.expect_identifier()?;
        let params = if self.match_token(&TokenType::That) {
            self.expect(&TokenType::Takes)?;
            self.parse_params()?
        } else {
            Vec::new()
        };
        self.expect(&TokenType::Period)?;
        let body = self.parse_block_until(&[TokenType::End])?;
        self.expect(&TokenType::End)?;
        self.expect(&TokenType::Period)?;
        Ok(Stmt::FunctionDef { name, params, body, span })
    }

    fn parse_create(&mut self, span: Span) -> ParseResult<Stmt> {
        self.advance(); // create
        self.match_token(&TokenType::A);
        if self.match_token(&TokenType::List) {
            self.expect(&TokenType::Called)?;
            let name = self.expect_identifier()?;
            self.expect(&TokenType::Period)?;
            return Ok(Stmt::CreateList { name, span });
        }
        if self.match_token(&TokenType::Map) {
            self.expect(&TokenType::Called)?;
            let name = self.expect_identifier()?;
            self.expect(&TokenType::Period)?;
            return Ok(Stmt::CreateMap { name, span });
        }
        self.match_token(&TokenType::New);
        self.parse_create_instance(span)
    }

    fn parse_return(&mut self, span: Span) -> ParseResult<Stmt> {
        self.advance(); // give
        self.expect(&TokenType::Back)?;
        let value = if self.check(&TokenType::Period) { None } else { Some(self.parse_expression()?) };
        self.expect(&TokenType::Period)?;
        Ok(Stmt::Return { value, span })
    }

    fn parse_call_statement(&mut self, span: Span) -> ParseResult<Stmt> {
        self.advance(); // call
        let first_name = self.expect_identifier()?;
        if self.match_token(&TokenType::On) {
            let object = self.expect_identifier()?;
            let args = self.parse_optional_args()?;
            let store_as = self.parse_optional_store_as()?;
            self.expect(&TokenType::Period)?;
            return Ok(Stmt::MethodCall { object, method: first_name, args, store_as, span });
        }
        let args = self.parse_optional_args()?;
        let store_as = self.parse_optional_store_as()?;
        self.expect(&TokenType::Period)?;
        Ok(Stmt::FunctionCall { name: first_name, args, store_as, span })
    }

    fn parse_optional_args(&mut self) -> ParseResult<Vec<Expr>> {
        if self.match_token(&TokenType::With) {
            self.arg_list_depth += 1;
            let args = self.parse_args_list();
            self.arg_list_depth -= 1;
            args
        } else {
            Ok(Vec::new())
        }
    }

    fn parse_args_list(&mut self) -> ParseResult<Vec<Expr>> {
        let mut args = vec![self.parse_expression()?];
        loop {
            if self.check(&TokenType::Comma) {
                self.advance();
            } else if self.check(&TokenType::And) && !self.next_is(&TokenType::Store) {
                self.advance();
            } else {
                break;
            }
            args.push(self.parse_expression()?);
        }
        Ok(args)
    }

    /// True when the token *after* the current one matches `kind`, used to
    /// tell an `and`-separated next argument apart from the `and store as`
    /// connector without consuming anything.
    fn next_is(&self, kind: &TokenType) -> bool {
        self.tokens.get(self.current + 1).is_some_and(|t| std::mem::discriminant(&t.kind) == std::mem::discriminant(kind))
    }

    fn parse_optional_store_as(&mut self) -> ParseResult<Option<String>> {
        if self.match_token(&TokenType::And) {
            self.expect(&TokenType::Store)?;
            self.expect(&TokenType::As)?;
            Ok(Some(self.expect_identifier()?))
        } else {
            Ok(None)
        }
    }
}
