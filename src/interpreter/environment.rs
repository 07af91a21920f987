//! Lexical scope chain. Frames are shared by reference (`Rc<RefCell<..>>`)
//! so a closure capturing a frame at its definition site observes later
//! mutations made through any other handle to that frame.

use std::cell::RefCell;
use std::collections::HashMap;
use std::collections::HashSet;
use std::rc::Rc;

use super::value::Value;
use crate::error::KaynatError;

#[derive(Default)]
struct Frame {
    bindings: HashMap<String, Value>,
    constants: HashSet<String>,
    parent: Option<Environment>,
}

#[derive(Clone)]
pub struct Environment(Rc<RefCell<Frame>>);

impl Environment {
    pub fn new_global() -> Self {
        Environment(Rc::new(RefCell::new(Frame::default())))
    }

    pub fn child(&self) -> Self {
        log::trace!("pushing environment frame");
        let mut frame = Frame::default();
        frame.parent = Some(self.clone());
        Environment(Rc::new(RefCell::new(frame)))
    }

    pub fn define(&self, name: &str, value: Value, is_constant: bool) {
        let mut frame = self.0.borrow_mut();
        frame.bindings.insert(name.to_string(), value);
        if is_constant {
            frame.constants.insert(name.to_string());
        } else {
            frame.constants.remove(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        let frame = self.0.borrow();
        if let Some(v) = frame.bindings.get(name) {
            return Some(v.clone());
        }
        frame.parent.as_ref().and_then(|p| p.get(name))
    }

    pub fn exists(&self, name: &str) -> bool {
        let frame = self.0.borrow();
        frame.bindings.contains_key(name) || frame.parent.as_ref().is_some_and(|p| p.exists(name))
    }

    /// Walk up the chain and update the innermost frame containing `name`.
    pub fn set(&self, name: &str, value: Value) -> Result<(), KaynatError> {
        let mut frame = self.0.borrow_mut();
        if frame.bindings.contains_key(name) {
            if frame.constants.contains(name) {
                return Err(KaynatError::name_error(format!("cannot reassign constant '{name}'")));
            }
            frame.bindings.insert(name.to_string(), value);
            return Ok(());
        }
        match &frame.parent {
            Some(parent) => parent.set(name, value),
            None => Err(KaynatError::name_error(format!("unbound name '{name}'"))),
        }
    }

    pub fn delete(&self, name: &str) -> Result<(), KaynatError> {
        let mut frame = self.0.borrow_mut();
        if frame.bindings.contains_key(name) {
            if frame.constants.contains(name) {
                return Err(KaynatError::name_error(format!("cannot delete constant '{name}'")));
            }
            frame.bindings.remove(name);
            return Ok(());
        }
        match &frame.parent {
            Some(parent) => parent.delete(name),
            None => Err(KaynatError::name_error(format!("unbound name '{name}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_up_the_chain() {
        let global = Environment::new_global();
        global.define("x", Value::Number(1.0), false);
        let child = global.child();
        assert_eq!(child.get("x"), Some(Value::Number(1.0)));
    }

    #[test]
    fn set_never_promotes_into_an_outer_frame() {
        let global = Environment::new_global();
        let child = global.child();
        child.define("y", Value::Number(1.0), false);
        assert!(global.get("y").is_none());
    }

    #[test]
    fn set_updates_innermost_frame_that_defines_the_name() {
        let global = Environment::new_global();
        global.define("x", Value::Number(1.0), false);
        let child = global.child();
        child.set("x", Value::Number(2.0)).unwrap();
        assert_eq!(global.get("x"), Some(Value::Number(2.0)));
    }

    #[test]
    fn constant_cannot_be_reassigned() {
        let global = Environment::new_global();
        global.define("k", Value::Number(1.0), true);
        assert!(global.set("k", Value::Number(2.0)).is_err());
        assert_eq!(global.get("k"), Some(Value::Number(1.0)));
    }

    #[test]
    fn constant_cannot_be_deleted() {
        let global = Environment::new_global();
        global.define("k", Value::Number(1.0), true);
        assert!(global.delete("k").is_err());
    }

    #[test]
    fn shared_frame_mutation_is_visible_through_every_handle() {
        let global = Environment::new_global();
        global.define("counter", Value::Number(0.0), false);
        let handle_a = global.clone();
        let handle_b = global.clone();
        handle_a.set("counter", Value::Number(5.0)).unwrap();
        assert_eq!(handle_b.get("counter"), Some(Value::Number(5.0)));
    }

    #[test]
    fn unbound_set_fails() {
        let global = Environment::new_global();
        assert!(global.set("missing", Value::Number(1.0)).is_err());
    }
}
