//! Runtime value representation (§3: closed sum type).

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::ast::stmt::{Block, FunctionParam};
use crate::error::KaynatError;
use crate::interpreter::environment::Environment;

pub struct Blueprint {
    pub name: String,
    pub parent: Option<Rc<Blueprint>>,
    pub properties: Vec<String>,
    pub methods: HashMap<String, Rc<FunctionValue>>,
    pub is_abstract: bool,
}

impl Blueprint {
    /// Properties declared anywhere on the parent chain, own properties last
    /// so a child's own declarations are not shadowed by parent iteration order.
    pub fn all_properties(&self) -> Vec<String> {
        let mut props = match &self.parent {
            Some(parent) => parent.all_properties(),
            None => Vec::new(),
        };
        for p in &self.properties {
            if !props.contains(p) {
                props.push(p.clone());
            }
        }
        props
    }

    /// Resolve a method by walking from this blueprint up through its
    /// ancestors; the first (most-derived) definition wins, which is what
    /// gives child overrides priority over inherited implementations.
    pub fn resolve_method(&self, name: &str) -> Option<Rc<FunctionValue>> {
        if let Some(f) = self.methods.get(name) {
            return Some(f.clone());
        }
        self.parent.as_ref().and_then(|p| p.resolve_method(name))
    }
}

pub struct Instance {
    pub blueprint: Rc<Blueprint>,
    pub properties: RefCell<HashMap<String, Value>>,
}

pub struct Contract {
    pub name: String,
    pub required_methods: Vec<String>,
}

pub struct FunctionValue {
    pub name: String,
    pub params: Vec<FunctionParam>,
    pub body: Block,
    pub captured_env: Environment,
}

pub type HostFn = Rc<dyn Fn(&[Value]) -> Result<Value, KaynatError>>;

#[derive(Clone)]
pub struct Builtin {
    pub name: String,
    pub callable: HostFn,
}

#[derive(Clone)]
pub enum Value {
    Number(f64),
    String(String),
    Boolean(bool),
    Null,
    List(Rc<RefCell<Vec<Value>>>),
    Map(Rc<RefCell<Vec<(String, Value)>>>),
    Function(Rc<FunctionValue>),
    Builtin(Builtin),
    Blueprint(Rc<Blueprint>),
    Instance(Rc<Instance>),
    Contract(Rc<Contract>),
}

impl Value {
    pub fn list(items: Vec<Value>) -> Value {
        Value::List(Rc::new(RefCell::new(items)))
    }

    pub fn map(pairs: Vec<(String, Value)>) -> Value {
        Value::Map(Rc::new(RefCell::new(pairs)))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Null => "nothing",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Function(_) => "function",
            Value::Builtin(_) => "builtin",
            Value::Blueprint(_) => "blueprint",
            Value::Instance(_) => "instance",
            Value::Contract(_) => "contract",
        }
    }

    /// Truthiness table (§3 invariants, §8 "Truthiness table"): `nothing`,
    /// `false`, `0`, `""`, and the empty list are falsy; everything else,
    /// including an empty map, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::List(items) => !items.borrow().is_empty(),
            _ => true,
        }
    }

    /// Render for `say`/`print`/string-concatenation purposes (§4.4 Print).
    pub fn display(&self) -> String {
        match self {
            Value::Number(n) => format_number(*n),
            Value::String(s) => s.clone(),
            Value::Boolean(b) => b.to_string(),
            Value::Null => "nothing".to_string(),
            Value::List(items) => {
                let parts: Vec<String> = items.borrow().iter().map(Value::display).collect();
                format!("[{}]", parts.join(", "))
            }
            Value::Map(pairs) => {
                let parts: Vec<String> =
                    pairs.borrow().iter().map(|(k, v)| format!("{}: {}", k, v.display())).collect();
                format!("{{{}}}", parts.join(", "))
            }
            Value::Function(f) => format!("<function {}>", f.name),
            Value::Builtin(b) => format!("<builtin {}>", b.name),
            Value::Blueprint(b) => format!("<blueprint {}>", b.name),
            Value::Instance(i) => format!("<instance of {}>", i.blueprint.name),
            Value::Contract(c) => format!("<contract {}>", c.name),
        }
    }
}

/// Numbers that are mathematically integral render without a decimal point
/// (§3 invariants, §8 "Integral rendering").
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{n:.0}")
    } else {
        let s = format!("{n:.6}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl PartialEq for Value {
    /// Underlying-primitive equality (§4.4 Comparison): two values of
    /// different runtime kinds are simply unequal rather than a type error.
    /// Lists and maps compare structurally, element by element / key by
    /// key, matching the built-in library's own equality contract (§6.3).
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::List(a), Value::List(b)) => *a.borrow() == *b.borrow(),
            (Value::Map(a), Value::Map(b)) => {
                let a = a.borrow();
                let b = b.borrow();
                a.len() == b.len()
                    && a.iter().all(|(k, v)| b.iter().any(|(k2, v2)| k == k2 && v == v2))
            }
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            (Value::Blueprint(a), Value::Blueprint(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness_table() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Boolean(false).is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(!Value::String(String::new()).is_truthy());
        assert!(!Value::list(vec![]).is_truthy());
        assert!(Value::Boolean(true).is_truthy());
        assert!(Value::Number(1.0).is_truthy());
        assert!(Value::String("x".to_string()).is_truthy());
        assert!(Value::list(vec![Value::Number(1.0)]).is_truthy());
        assert!(Value::map(vec![]).is_truthy());
    }

    #[test]
    fn integral_numbers_render_without_a_decimal_point() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(-3.0), "-3");
    }

    #[test]
    fn non_integral_numbers_render_with_exactly_one_decimal_point() {
        let rendered = format_number(3.5);
        assert_eq!(rendered.matches('.').count(), 1);
        assert_eq!(rendered, "3.5");
    }

    #[test]
    fn lists_render_with_brackets_and_commas() {
        let list = Value::list(vec![Value::Number(1.0), Value::Number(2.0)]);
        assert_eq!(list.display(), "[1, 2]");
    }

    #[test]
    fn different_kinds_are_never_equal() {
        assert_ne!(Value::Number(0.0), Value::Boolean(false));
        assert_ne!(Value::Null, Value::String(String::new()));
    }

    #[test]
    fn lists_compare_structurally_not_by_identity() {
        let a = Value::list(vec![Value::Number(1.0)]);
        let b = Value::list(vec![Value::Number(1.0)]);
        assert_eq!(a, b);
    }
}
