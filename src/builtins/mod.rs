//! The built-in function library (§4.5, §6.3-§6.6): every name here is
//! registered into the global environment as a non-constant `Builtin`
//! value, so a Kaynat program that shadows one (`set sqrt to 5 .`) is free
//! to do so.
//!
//! Each domain gets its own module, mirroring the distilled reference's own
//! `stdlib/` package layout one file per concern.

mod crypto;
mod date;
mod file;
mod json;
mod list;
mod math;
mod network;
mod pattern;
mod random;
mod string;

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::KaynatError;
use crate::interpreter::environment::Environment;
use crate::interpreter::value::{Builtin, Value};

pub fn register_all(env: &Environment) {
    math::register(env);
    string::register(env);
    list::register(env);
    file::register(env);
    date::register(env);
    random::register(env);
    json::register(env);
    crypto::register(env);
    pattern::register(env);
    network::register(env);
}

/// Wraps `f` as a `Builtin` and defines it (non-constant) in `env`.
fn def(env: &Environment, name: &'static str, f: impl Fn(&[Value]) -> Result<Value, KaynatError> + 'static) {
    env.define(name, Value::Builtin(Builtin { name: name.to_string(), callable: Rc::new(f) }), false);
}

fn get<'a>(args: &'a [Value], i: usize, fname: &str) -> Result<&'a Value, KaynatError> {
    args.get(i).ok_or_else(|| KaynatError::type_error(format!("'{fname}' expects an argument at position {}", i + 1)))
}

fn number(args: &[Value], i: usize, fname: &str) -> Result<f64, KaynatError> {
    match get(args, i, fname)? {
        Value::Number(n) => Ok(*n),
        other => Err(KaynatError::type_error(format!("'{fname}' expects a number, found {}", other.type_name()))),
    }
}

fn optional_number(args: &[Value], i: usize, default: f64) -> f64 {
    match args.get(i) {
        Some(Value::Number(n)) => *n,
        _ => default,
    }
}

fn string(args: &[Value], i: usize, fname: &str) -> Result<String, KaynatError> {
    match get(args, i, fname)? {
        Value::String(s) => Ok(s.clone()),
        other => Err(KaynatError::type_error(format!("'{fname}' expects a string, found {}", other.type_name()))),
    }
}

/// Secondary/tertiary text-like arguments are coerced with the same
/// display rendering used by `say`, rather than type-checked, matching the
/// distilled reference's `x.value if isinstance(x, KaynatString) else str(x)`
/// fallback used throughout its stdlib.
fn text_arg(args: &[Value], i: usize, default: &str) -> String {
    match args.get(i) {
        Some(v) => v.display(),
        None => default.to_string(),
    }
}

fn boolean(args: &[Value], i: usize, default: bool) -> bool {
    match args.get(i) {
        Some(Value::Boolean(b)) => *b,
        _ => default,
    }
}

fn list(args: &[Value], i: usize, fname: &str) -> Result<Rc<RefCell<Vec<Value>>>, KaynatError> {
    match get(args, i, fname)? {
        Value::List(items) => Ok(items.clone()),
        other => Err(KaynatError::type_error(format!("'{fname}' expects a list, found {}", other.type_name()))),
    }
}
