//! Random built-ins (§6.5), grounded in the distilled reference's
//! `stdlib/random_tools.py`.

use rand::seq::SliceRandom;
use rand::Rng;

use super::{def, list, number};
use crate::error::KaynatError;
use crate::interpreter::environment::Environment;
use crate::interpreter::value::Value;

const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub fn register(env: &Environment) {
    def(env, "random_integer", |args| {
        let min = number(args, 0, "random_integer")? as i64;
        let max = number(args, 1, "random_integer")? as i64;
        Ok(Value::Number(rand::thread_rng().gen_range(min..=max) as f64))
    });

    def(env, "random_float", |_args| Ok(Value::Number(rand::thread_rng().gen_range(0.0..1.0))));
    def(env, "random_boolean", |_args| Ok(Value::Boolean(rand::thread_rng().gen_bool(0.5))));

    def(env, "random_choice", |args| {
        let items = list(args, 0, "random_choice")?;
        let items = items.borrow();
        items
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| KaynatError::type_error("cannot choose from an empty list"))
    });

    def(env, "shuffle_list", |args| {
        let items = list(args, 0, "shuffle_list")?;
        items.borrow_mut().shuffle(&mut rand::thread_rng());
        Ok(Value::List(items))
    });

    def(env, "random_string", |args| {
        let length = number(args, 0, "random_string")?.max(0.0) as usize;
        let mut rng = rand::thread_rng();
        let s: String = (0..length).map(|_| ALPHANUMERIC[rng.gen_range(0..ALPHANUMERIC.len())] as char).collect();
        Ok(Value::String(s))
    });
}
