//! JSON built-ins (§6.5), grounded in the distilled reference's
//! `stdlib/json_tools.py`.

use serde::Serialize;

use super::{def, get, optional_number, string};
use crate::error::KaynatError;
use crate::interpreter::environment::Environment;
use crate::interpreter::value::Value;

pub fn register(env: &Environment) {
    def(env, "parse_json", |args| {
        let text = string(args, 0, "parse_json")?;
        let parsed: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| KaynatError::value_error(format!("invalid JSON: {e}")))?;
        Ok(json_to_value(&parsed))
    });

    def(env, "generate_json", |args| {
        let value = get(args, 0, "generate_json")?;
        let json = value_to_json(value);
        Ok(Value::String(serde_json::to_string(&json).expect("json values always serialize")))
    });

    def(env, "format_json", |args| {
        let value = get(args, 0, "format_json")?;
        let json = value_to_json(value);
        let indent = optional_number(args, 1, 2.0).max(0.0) as usize;
        let buf = Vec::new();
        let indent_bytes = " ".repeat(indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent_bytes.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(buf, formatter);
        json.serialize(&mut serializer).expect("json values always serialize");
        Ok(Value::String(String::from_utf8(serializer.into_inner()).expect("json output is valid utf-8")))
    });
}

fn value_to_json(v: &Value) -> serde_json::Value {
    match v {
        Value::Number(n) => serde_json::Number::from_f64(*n).map(serde_json::Value::Number).unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Null => serde_json::Value::Null,
        Value::List(items) => serde_json::Value::Array(items.borrow().iter().map(value_to_json).collect()),
        Value::Map(pairs) => {
            let mut map = serde_json::Map::new();
            for (k, v) in pairs.borrow().iter() {
                map.insert(k.clone(), value_to_json(v));
            }
            serde_json::Value::Object(map)
        }
        other => serde_json::Value::String(other.display()),
    }
}

fn json_to_value(j: &serde_json::Value) -> Value {
    match j {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(*b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(0.0)),
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(items) => Value::list(items.iter().map(json_to_value).collect()),
        serde_json::Value::Object(map) => Value::map(map.iter().map(|(k, v)| (k.clone(), json_to_value(v))).collect()),
    }
}
