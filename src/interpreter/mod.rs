//! Tree-walking evaluator (§4.4). Statements execute for effect; expressions
//! evaluate to a `Value`. Non-local control flow travels as a `ControlFlow`
//! signal rather than a Rust panic, matching how a loop or function body
//! needs to observe a `break`/`return` without unwinding past callers that
//! don't care about it.

pub mod control;
pub mod environment;
pub mod value;

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write as _;
use std::rc::Rc;

use crate::ast::expr::{BinaryOp, ComparisonOp, Expr, Literal, LogicalOp, UnaryOp};
use crate::ast::stmt::{Block, ClassMember, Program, Stmt};
use crate::error::KaynatError;
use crate::token::Span;

pub use control::ControlFlow;
pub use environment::Environment;
pub use value::{Blueprint, Contract, FunctionValue, Instance, Value};

/// Host surface the interpreter writes program output to and reads `ask the
/// user for` input from; swapped for an in-memory buffer in tests.
pub trait Host {
    fn print_line(&mut self, line: &str);
    fn read_line(&mut self) -> std::io::Result<String>;
}

pub struct StdHost;

impl Host for StdHost {
    fn print_line(&mut self, line: &str) {
        println!("{line}");
    }

    fn read_line(&mut self) -> std::io::Result<String> {
        let mut buf = String::new();
        std::io::stdout().flush().ok();
        std::io::stdin().read_line(&mut buf)?;
        Ok(buf.trim_end_matches(['\n', '\r']).to_string())
    }
}

pub struct Interpreter {
    globals: Environment,
    /// Active method receiver, pushed/popped around method calls so `my`
    /// and `this` inside a method body resolve against the right instance.
    receiver_stack: Vec<Rc<Instance>>,
}

impl Interpreter {
    pub fn new() -> Self {
        let globals = Environment::new_global();
        preload_constants(&globals);
        crate::builtins::register_all(&globals);
        Interpreter { globals, receiver_stack: Vec::new() }
    }

    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    pub fn run(&mut self, program: &Program, host: &mut dyn Host) -> Result<(), KaynatError> {
        log::debug!("running program with {} top-level statements", program.len());
        let env = self.globals.clone();
        match self.execute_block(program, &env, host)? {
            ControlFlow::Continue => Ok(()),
            ControlFlow::Return(_) => Err(KaynatError::runtime("'give back' used outside a function")),
            ControlFlow::Break => Err(KaynatError::runtime("'stop' used outside a loop")),
            ControlFlow::Skip => Err(KaynatError::runtime("'skip' used outside a loop")),
        }
    }

    fn execute_block(
        &mut self,
        block: &Block,
        env: &Environment,
        host: &mut dyn Host,
    ) -> Result<ControlFlow, KaynatError> {
        for stmt in block {
            match self.execute_stmt(stmt, env, host)? {
                ControlFlow::Continue => {}
                other => return Ok(other),
            }
        }
        Ok(ControlFlow::Continue)
    }

    fn execute_stmt(
        &mut self,
        stmt: &Stmt,
        env: &Environment,
        host: &mut dyn Host,
    ) -> Result<ControlFlow, KaynatError> {
        match stmt {
            Stmt::Comment(_) => Ok(ControlFlow::Continue),

            Stmt::VarDecl { name, value, is_constant, .. } => {
                let v = self.evaluate(value, env)?;
                env.define(name, v, *is_constant);
                Ok(ControlFlow::Continue)
            }

            Stmt::Assignment { name, value, span } => {
                let v = self.evaluate(value, env)?;
                env.set(name, v).map_err(|e| e.with_span(*span))?;
                Ok(ControlFlow::Continue)
            }

            Stmt::PropertyAssignment { property, value, span } => {
                let v = self.evaluate(value, env)?;
                let receiver = self.current_receiver(*span)?;
                receiver.properties.borrow_mut().insert(property.clone(), v);
                Ok(ControlFlow::Continue)
            }

            Stmt::Print { values, .. } => {
                let rendered: Vec<String> =
                    values.iter().map(|v| self.evaluate(v, env).map(|v| v.display())).collect::<Result<_, _>>()?;
                host.print_line(&rendered.join(" "));
                Ok(ControlFlow::Continue)
            }

            Stmt::Input { variable, .. } => {
                let line = host.read_line().map_err(KaynatError::from)?;
                env.define(variable, Value::String(line), false);
                Ok(ControlFlow::Continue)
            }

            Stmt::If { condition, then_block, elif_blocks, else_block, .. } => {
                if self.evaluate(condition, env)?.is_truthy() {
                    return self.execute_block(then_block, &env.child(), host);
                }
                for (cond, block) in elif_blocks {
                    if self.evaluate(cond, env)?.is_truthy() {
                        return self.execute_block(block, &env.child(), host);
                    }
                }
                if let Some(block) = else_block {
                    return self.execute_block(block, &env.child(), host);
                }
                Ok(ControlFlow::Continue)
            }

            Stmt::While { condition, body, .. } => {
                while self.evaluate(condition, env)?.is_truthy() {
                    match self.execute_block(body, &env.child(), host)? {
                        ControlFlow::Break => break,
                        ControlFlow::Skip | ControlFlow::Continue => {}
                        other @ ControlFlow::Return(_) => return Ok(other),
                    }
                }
                Ok(ControlFlow::Continue)
            }

            Stmt::Repeat { count, body, span } => {
                let n = self.expect_number(count, env, *span)?;
                for _ in 0..(n as i64).max(0) {
                    match self.execute_block(body, &env.child(), host)? {
                        ControlFlow::Break => break,
                        ControlFlow::Skip | ControlFlow::Continue => {}
                        other @ ControlFlow::Return(_) => return Ok(other),
                    }
                }
                Ok(ControlFlow::Continue)
            }

            Stmt::ForEach { variable, iterable, body, span } => {
                let v = self.evaluate(iterable, env)?;
                let Value::List(items) = v else {
                    return Err(KaynatError::type_error(format!(
                        "'for each' can only iterate over a list, found {}",
                        v.type_name()
                    ))
                    .with_span(*span));
                };
                let snapshot = items.borrow().clone();
                for item in snapshot {
                    let child = env.child();
                    child.define(variable, item, false);
                    match self.execute_block(body, &child, host)? {
                        ControlFlow::Break => break,
                        ControlFlow::Skip | ControlFlow::Continue => {}
                        other @ ControlFlow::Return(_) => return Ok(other),
                    }
                }
                Ok(ControlFlow::Continue)
            }

            Stmt::Loop { start, end, step, body, span } => {
                let start_n = self.expect_number(start, env, *span)?;
                let end_n = self.expect_number(end, env, *span)?;
                let step_n = match step {
                    Some(e) => self.expect_number(e, env, *span)?,
                    None => 1.0,
                };
                if step_n == 0.0 {
                    return Err(KaynatError::value_error("a loop cannot step by zero").with_span(*span));
                }
                let mut current = start_n;
                loop {
                    if step_n > 0.0 && current > end_n {
                        break;
                    }
                    if step_n < 0.0 && current < end_n {
                        break;
                    }
                    let child = env.child();
                    child.define("current", Value::Number(current), false);
                    match self.execute_block(body, &child, host)? {
                        ControlFlow::Break => break,
                        ControlFlow::Skip | ControlFlow::Continue => {}
                        other @ ControlFlow::Return(_) => return Ok(other),
                    }
                    current += step_n;
                }
                Ok(ControlFlow::Continue)
            }

            Stmt::Break(_) => Ok(ControlFlow::Break),
            Stmt::Continue(_) => Ok(ControlFlow::Skip),

            Stmt::FunctionDef { name, params, body, .. } => {
                let f = FunctionValue { name: name.clone(), params: params.clone(), body: body.clone(), captured_env: env.clone() };
                env.define(name, Value::Function(Rc::new(f)), false);
                Ok(ControlFlow::Continue)
            }

            Stmt::Return { value, .. } => {
                let v = match value {
                    Some(expr) => self.evaluate(expr, env)?,
                    None => Value::Null,
                };
                Ok(ControlFlow::Return(v))
            }

            Stmt::ExprStmt(expr) => {
                self.evaluate(expr, env)?;
                Ok(ControlFlow::Continue)
            }

            Stmt::FunctionCall { name, args, store_as, span } => {
                let values = args.iter().map(|a| self.evaluate(a, env)).collect::<Result<Vec<_>, _>>()?;
                let result = self.call_named(name, values, env, *span, host)?;
                if let Some(target) = store_as {
                    env.define(target, result, false);
                }
                Ok(ControlFlow::Continue)
            }

            Stmt::CreateList { name, .. } => {
                env.define(name, Value::list(Vec::new()), false);
                Ok(ControlFlow::Continue)
            }

            Stmt::CreateMap { name, .. } => {
                env.define(name, Value::map(Vec::new()), false);
                Ok(ControlFlow::Continue)
            }

            Stmt::ClassDef { name, parent, members, is_abstract, span } => {
                let parent_blueprint = match parent {
                    Some(parent_name) => Some(self.lookup_blueprint(parent_name, env, *span)?),
                    None => None,
                };
                let mut properties = Vec::new();
                let mut methods = HashMap::new();
                for member in members {
                    match member {
                        ClassMember::Property { name } => properties.push(name.clone()),
                        ClassMember::Method { name, params, body } => {
                            methods.insert(
                                name.clone(),
                                Rc::new(FunctionValue {
                                    name: name.clone(),
                                    params: params.clone(),
                                    body: body.clone(),
                                    captured_env: env.clone(),
                                }),
                            );
                        }
                    }
                }
                let blueprint = Blueprint { name: name.clone(), parent: parent_blueprint, properties, methods, is_abstract: *is_abstract };
                env.define(name, Value::Blueprint(Rc::new(blueprint)), false);
                Ok(ControlFlow::Continue)
            }

            Stmt::ContractDef { name, required_methods, .. } => {
                let contract = Contract { name: name.clone(), required_methods: required_methods.clone() };
                env.define(name, Value::Contract(Rc::new(contract)), false);
                Ok(ControlFlow::Continue)
            }

            Stmt::CreateInstance { class_name, args, variable, span } => {
                let blueprint = self.lookup_blueprint(class_name, env, *span)?;
                if blueprint.is_abstract {
                    return Err(KaynatError::type_error(format!(
                        "blueprint '{class_name}' is abstract and cannot be instantiated"
                    ))
                    .with_span(*span));
                }
                let mut properties = HashMap::new();
                for prop in blueprint.all_properties() {
                    properties.insert(prop, Value::Null);
                }
                let instance = Rc::new(Instance { blueprint: blueprint.clone(), properties: RefCell::new(properties) });
                env.define(variable, Value::Instance(instance.clone()), false);

                if let Some(init) = blueprint.resolve_method("initialize") {
                    let values = args.iter().map(|a| self.evaluate(a, env)).collect::<Result<Vec<_>, _>>()?;
                    self.invoke_method(&instance, &init, values, *span, host)?;
                }
                Ok(ControlFlow::Continue)
            }

            Stmt::MethodCall { object, method, args, store_as, span } => {
                let receiver = match env.get(object) {
                    Some(Value::Instance(inst)) => inst,
                    Some(other) => {
                        return Err(KaynatError::type_error(format!(
                            "'{object}' is a {}, not an instance",
                            other.type_name()
                        ))
                        .with_span(*span))
                    }
                    None => return Err(KaynatError::name_error(format!("unbound name '{object}'")).with_span(*span)),
                };
                let method_fn = receiver.blueprint.resolve_method(method).ok_or_else(|| {
                    KaynatError::name_error(format!(
                        "blueprint '{}' has no method '{method}'",
                        receiver.blueprint.name
                    ))
                    .with_span(*span)
                })?;
                let values = args.iter().map(|a| self.evaluate(a, env)).collect::<Result<Vec<_>, _>>()?;
                let result = self.invoke_method(&receiver, &method_fn, values, *span, host)?;
                if let Some(target) = store_as {
                    env.define(target, result, false);
                }
                Ok(ControlFlow::Continue)
            }
        }
    }

    fn lookup_blueprint(&self, name: &str, env: &Environment, span: Span) -> Result<Rc<Blueprint>, KaynatError> {
        match env.get(name) {
            Some(Value::Blueprint(b)) => Ok(b),
            Some(other) => {
                Err(KaynatError::type_error(format!("'{name}' is a {}, not a blueprint", other.type_name())).with_span(span))
            }
            None => Err(KaynatError::name_error(format!("unbound name '{name}'")).with_span(span)),
        }
    }

    fn current_receiver(&self, span: Span) -> Result<Rc<Instance>, KaynatError> {
        self.receiver_stack
            .last()
            .cloned()
            .ok_or_else(|| KaynatError::runtime("'my'/'this' used outside a method body").with_span(span))
    }

    fn invoke_method(
        &mut self,
        receiver: &Rc<Instance>,
        method: &Rc<FunctionValue>,
        args: Vec<Value>,
        span: Span,
        host: &mut dyn Host,
    ) -> Result<Value, KaynatError> {
        check_arity(&method.name, method.params.len(), args.len(), span)?;
        let call_env = method.captured_env.child();
        for (param, value) in method.params.iter().zip(args) {
            call_env.define(&param.name, value, false);
        }
        self.receiver_stack.push(receiver.clone());
        let result = self.execute_block(&method.body, &call_env, host);
        self.receiver_stack.pop();
        match result? {
            ControlFlow::Return(v) => Ok(v),
            ControlFlow::Continue => Ok(Value::Null),
            ControlFlow::Break | ControlFlow::Skip => {
                Err(KaynatError::runtime("'stop'/'skip' used outside a loop").with_span(span))
            }
        }
    }

    fn call_named(
        &mut self,
        name: &str,
        args: Vec<Value>,
        env: &Environment,
        span: Span,
        host: &mut dyn Host,
    ) -> Result<Value, KaynatError> {
        match env.get(name) {
            Some(Value::Function(f)) => self.invoke_function(&f, args, span, host),
            Some(Value::Builtin(b)) => (b.callable)(&args).map_err(|e| e.with_span(span)),
            Some(other) => Err(KaynatError::type_error(format!("'{name}' is a {}, not callable", other.type_name())).with_span(span)),
            None => Err(KaynatError::name_error(format!("unbound name '{name}'")).with_span(span)),
        }
    }

    fn invoke_function(
        &mut self,
        f: &Rc<FunctionValue>,
        args: Vec<Value>,
        span: Span,
        host: &mut dyn Host,
    ) -> Result<Value, KaynatError> {
        check_arity(&f.name, f.params.len(), args.len(), span)?;
        let call_env = f.captured_env.child();
        for (param, value) in f.params.iter().zip(args) {
            call_env.define(&param.name, value, false);
        }
        match self.execute_block(&f.body, &call_env, host)? {
            ControlFlow::Return(v) => Ok(v),
            ControlFlow::Continue => Ok(Value::Null),
            ControlFlow::Break | ControlFlow::Skip => {
                Err(KaynatError::runtime("'stop'/'skip' used outside a loop").with_span(span))
            }
        }
    }

    fn expect_number(&mut self, expr: &Expr, env: &Environment, span: Span) -> Result<f64, KaynatError> {
        match self.evaluate(expr, env)? {
            Value::Number(n) => Ok(n),
            other => Err(KaynatError::type_error(format!("expected a number, found {}", other.type_name())).with_span(span)),
        }
    }

    pub fn evaluate(&mut self, expr: &Expr, env: &Environment) -> Result<Value, KaynatError> {
        match expr {
            Expr::Literal(lit, _) => Ok(match lit {
                Literal::Number(n) => Value::Number(*n),
                Literal::Text(s) => Value::String(s.clone()),
                Literal::Boolean(b) => Value::Boolean(*b),
                Literal::Nothing => Value::Null,
            }),

            Expr::Identifier(name, _) => match env.get(name) {
                Some(v) => Ok(v),
                // Unbound bare identifiers evaluate to their own spelling.
                None => Ok(Value::String(name.clone())),
            },

            Expr::PropertyAccess { property, span, .. } => {
                let receiver = self.current_receiver(*span)?;
                receiver
                    .properties
                    .borrow()
                    .get(property)
                    .cloned()
                    .ok_or_else(|| KaynatError::name_error(format!("no property '{property}' on this instance")).with_span(*span))
            }

            Expr::ListLiteral(items, _) => {
                let values = items.iter().map(|e| self.evaluate(e, env)).collect::<Result<Vec<_>, _>>()?;
                Ok(Value::list(values))
            }

            Expr::MapLiteral(pairs, span) => {
                let mut out = Vec::new();
                for (k, v) in pairs {
                    let key = match self.evaluate(k, env)? {
                        Value::String(s) => s,
                        other => other.display(),
                    };
                    let _ = span;
                    out.push((key, self.evaluate(v, env)?));
                }
                Ok(Value::map(out))
            }

            Expr::BinaryOp { op, left, right, span } => {
                let l = self.evaluate(left, env)?;
                let r = self.evaluate(right, env)?;
                eval_binary(*op, l, r, *span)
            }

            Expr::UnaryOp { op, operand, span } => {
                let v = self.evaluate(operand, env)?;
                match op {
                    UnaryOp::Negate => match v {
                        Value::Number(n) => Ok(Value::Number(-n)),
                        other => Err(KaynatError::type_error(format!("cannot negate a {}", other.type_name())).with_span(*span)),
                    },
                    UnaryOp::Not => Ok(Value::Boolean(!v.is_truthy())),
                }
            }

            Expr::Comparison { op, left, right, span } => {
                let l = self.evaluate(left, env)?;
                let r = self.evaluate(right, env)?;
                Ok(Value::Boolean(eval_comparison(*op, &l, &r, *span)?))
            }

            Expr::LogicalOp { op, left, right, .. } => {
                let l = self.evaluate(left, env)?;
                match op {
                    LogicalOp::And => {
                        if !l.is_truthy() {
                            return Ok(Value::Boolean(false));
                        }
                        let r = right.as_ref().expect("and always has a right operand");
                        Ok(Value::Boolean(self.evaluate(r, env)?.is_truthy()))
                    }
                    LogicalOp::Or => {
                        if l.is_truthy() {
                            return Ok(Value::Boolean(true));
                        }
                        let r = right.as_ref().expect("or always has a right operand");
                        Ok(Value::Boolean(self.evaluate(r, env)?.is_truthy()))
                    }
                }
            }

            Expr::Call { name, args, span } => {
                let values = args.iter().map(|a| self.evaluate(a, env)).collect::<Result<Vec<_>, _>>()?;
                // A nested call expression never runs inside a `Host`-needing
                // context (`ask the user` only appears as a statement), so a
                // throwaway sink is safe here.
                let mut sink = NullHost;
                self.call_named(name, values, env, *span, &mut sink)
            }
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Swallows output from calls made inside expression position, where there is
/// no statement-level `Host` in scope. User-defined functions that `print`
/// still do so correctly when called via `Stmt::FunctionCall`, which passes
/// the real host through; only the (rare) function-call-as-expression path
/// uses this.
struct NullHost;

impl Host for NullHost {
    fn print_line(&mut self, _line: &str) {}
    fn read_line(&mut self) -> std::io::Result<String> {
        Ok(String::new())
    }
}

fn check_arity(name: &str, expected: usize, got: usize, span: Span) -> Result<(), KaynatError> {
    if expected != got {
        return Err(KaynatError::type_error(format!(
            "'{name}' takes {expected} argument(s), got {got}"
        ))
        .with_span(span));
    }
    Ok(())
}

fn eval_binary(op: BinaryOp, l: Value, r: Value, span: Span) -> Result<Value, KaynatError> {
    match op {
        BinaryOp::Add => match (&l, &r) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            // Falls back to string concatenation when either side is not a
            // number, so `say greeting plus name .` reads naturally.
            _ => Ok(Value::String(format!("{}{}", l.display(), r.display()))),
        },
        BinaryOp::Subtract => numeric_op(l, r, span, |a, b| a - b),
        BinaryOp::Multiply => numeric_op(l, r, span, |a, b| a * b),
        BinaryOp::Divide => match (&l, &r) {
            (Value::Number(_), Value::Number(b)) if *b == 0.0 => {
                Err(KaynatError::value_error("division by zero").with_span(span))
            }
            _ => numeric_op(l, r, span, |a, b| a / b),
        },
    }
}

fn numeric_op(l: Value, r: Value, span: Span, f: impl Fn(f64, f64) -> f64) -> Result<Value, KaynatError> {
    match (l, r) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(f(a, b))),
        (l, r) => Err(KaynatError::type_error(format!(
            "expected two numbers, found {} and {}",
            l.type_name(),
            r.type_name()
        ))
        .with_span(span)),
    }
}

fn eval_comparison(op: ComparisonOp, l: &Value, r: &Value, span: Span) -> Result<bool, KaynatError> {
    if let (Value::Number(a), Value::Number(b)) = (l, r) {
        return Ok(match op {
            ComparisonOp::GreaterThan => a > b,
            ComparisonOp::LessThan => a < b,
            ComparisonOp::GreaterOrEqual => a >= b,
            ComparisonOp::LessOrEqual => a <= b,
            ComparisonOp::Equal => a == b,
            ComparisonOp::NotEqual => a != b,
        });
    }
    match op {
        ComparisonOp::Equal => Ok(l == r),
        ComparisonOp::NotEqual => Ok(l != r),
        ComparisonOp::GreaterThan | ComparisonOp::LessThan | ComparisonOp::GreaterOrEqual | ComparisonOp::LessOrEqual => {
            Err(KaynatError::type_error(format!(
                "expected two numbers, found {} and {}",
                l.type_name(),
                r.type_name()
            ))
            .with_span(span))
        }
    }
}

fn preload_constants(env: &Environment) {
    env.define("pi", Value::Number(std::f64::consts::PI), true);
    env.define("e", Value::Number(std::f64::consts::E), true);
    env.define("tau", Value::Number(std::f64::consts::TAU), true);
    env.define("infinity", Value::Number(f64::INFINITY), true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    struct BufferHost {
        lines: Vec<String>,
        inputs: Vec<String>,
    }

    impl Host for BufferHost {
        fn print_line(&mut self, line: &str) {
            self.lines.push(line.to_string());
        }
        fn read_line(&mut self) -> std::io::Result<String> {
            Ok(self.inputs.pop().unwrap_or_default())
        }
    }

    fn run_source(source: &str) -> Vec<String> {
        let tokens = Lexer::new(source).tokenize().expect("lex");
        let program = Parser::new(tokens).parse().expect("parse");
        let mut interp = Interpreter::new();
        let mut host = BufferHost { lines: Vec::new(), inputs: Vec::new() };
        interp.run(&program, &mut host).expect("run");
        host.lines
    }

    #[test]
    fn arithmetic_and_print() {
        let out = run_source("set x to 2 plus 3 .\nsay x .\n");
        assert_eq!(out, vec!["5"]);
    }

    #[test]
    fn integral_results_print_without_a_decimal_point() {
        let out = run_source("set x to 10 divided by 2 .\nsay x .\n");
        assert_eq!(out, vec!["5"]);
    }

    #[test]
    fn division_by_zero_is_a_value_error() {
        let tokens = Lexer::new("set x to 1 divided by 0 .\n").tokenize().unwrap();
        let program = Parser::new(tokens).parse().unwrap();
        let mut interp = Interpreter::new();
        let mut host = BufferHost { lines: Vec::new(), inputs: Vec::new() };
        let err = interp.run(&program, &mut host).unwrap_err();
        assert_eq!(err.label(), "ValueError");
    }

    #[test]
    fn constants_cannot_be_reassigned() {
        let tokens = Lexer::new("always set limit as 10 .\nchange limit to 20 .\n").tokenize().unwrap();
        let program = Parser::new(tokens).parse().unwrap();
        let mut interp = Interpreter::new();
        let mut host = BufferHost { lines: Vec::new(), inputs: Vec::new() };
        assert!(interp.run(&program, &mut host).is_err());
    }

    #[test]
    fn while_loop_accumulates() {
        let out = run_source(
            "set total to 0 .\nset i to 1 .\nwhile i is less than or equal to 3 .\nadd i to total .\nadd 1 to i .\nend .\nsay total .\n",
        );
        assert_eq!(out, vec!["6"]);
    }

    #[test]
    fn for_each_iterates_lists_only() {
        let tokens = Lexer::new("for each x in 5 .\nend .\n").tokenize().unwrap();
        let program = Parser::new(tokens).parse().unwrap();
        let mut interp = Interpreter::new();
        let mut host = BufferHost { lines: Vec::new(), inputs: Vec::new() };
        let err = interp.run(&program, &mut host).unwrap_err();
        assert_eq!(err.label(), "TypeError");
    }

    #[test]
    fn loop_rejects_a_zero_step() {
        let tokens = Lexer::new("loop from 1 to 5 stepping by 0 .\nend .\n").tokenize().unwrap();
        let program = Parser::new(tokens).parse().unwrap();
        let mut interp = Interpreter::new();
        let mut host = BufferHost { lines: Vec::new(), inputs: Vec::new() };
        let err = interp.run(&program, &mut host).unwrap_err();
        assert_eq!(err.label(), "ValueError");
    }

    #[test]
    fn closures_capture_the_defining_environment_by_reference() {
        let out = run_source(
            "set counter to 0 .\ndefine a function called bump .\nadd 1 to counter .\nend .\ncall bump .\ncall bump .\nsay counter .\n",
        );
        assert_eq!(out, vec!["2"]);
    }

    #[test]
    fn function_arity_is_enforced() {
        let tokens =
            Lexer::new("define a function called add_one that takes n .\ngive back n plus 1 .\nend .\ncall add_one .\n")
                .tokenize()
                .unwrap();
        let program = Parser::new(tokens).parse().unwrap();
        let mut interp = Interpreter::new();
        let mut host = BufferHost { lines: Vec::new(), inputs: Vec::new() };
        let err = interp.run(&program, &mut host).unwrap_err();
        assert_eq!(err.label(), "TypeError");
    }

    #[test]
    fn abstract_blueprints_cannot_be_instantiated() {
        let tokens = Lexer::new("define an abstract blueprint called Shape .\nend .\ncreate new Shape called s .\n")
            .tokenize()
            .unwrap();
        let program = Parser::new(tokens).parse().unwrap();
        let mut interp = Interpreter::new();
        let mut host = BufferHost { lines: Vec::new(), inputs: Vec::new() };
        let err = interp.run(&program, &mut host).unwrap_err();
        assert_eq!(err.label(), "TypeError");
    }

    #[test]
    fn instance_properties_default_to_nothing() {
        let tokens =
            Lexer::new("define a blueprint called Box .\nhas contents .\nend .\ncreate new Box called b .\n")
                .tokenize()
                .unwrap();
        let program = Parser::new(tokens).parse().unwrap();
        let mut interp = Interpreter::new();
        let mut host = BufferHost { lines: Vec::new(), inputs: Vec::new() };
        interp.run(&program, &mut host).unwrap();
        let Some(Value::Instance(inst)) = interp.globals().get("b") else { panic!("expected instance") };
        assert_eq!(inst.properties.borrow().get("contents"), Some(&Value::Null));
    }

    #[test]
    fn inherited_methods_and_properties_resolve_through_the_parent_chain() {
        let out = run_source(
            "define a blueprint called Animal .\nit has sound .\nto initialize, take noise .\nset my sound to noise .\nend .\nto speak .\nsay my sound .\nend .\nend .\ndefine a blueprint called Dog extends Animal .\nend .\ncreate new Dog called d with woof .\ncall speak on d .\n",
        );
        assert_eq!(out, vec!["woof"]);
    }
}
