//! List built-ins (§6.3), grounded in the distilled reference's
//! `stdlib/list_tools.py`. `remove`/`contains`/`index_of`/`count` all
//! compare by the same structural equality `Value`'s `PartialEq`
//! already gives every other part of the interpreter (§6.3).

use super::{boolean, def, get, list, number};
use crate::error::KaynatError;
use crate::interpreter::environment::Environment;
use crate::interpreter::value::Value;

pub fn register(env: &Environment) {
    def(env, "list_append", |args| {
        let items = list(args, 0, "list_append")?;
        let item = get(args, 1, "list_append")?.clone();
        items.borrow_mut().push(item);
        Ok(Value::List(items))
    });

    def(env, "list_prepend", |args| {
        let items = list(args, 0, "list_prepend")?;
        let item = get(args, 1, "list_prepend")?.clone();
        items.borrow_mut().insert(0, item);
        Ok(Value::List(items))
    });

    def(env, "list_insert", |args| {
        let items = list(args, 0, "list_insert")?;
        let idx = number(args, 1, "list_insert")? as usize;
        let item = get(args, 2, "list_insert")?.clone();
        let mut items_mut = items.borrow_mut();
        let idx = idx.min(items_mut.len());
        items_mut.insert(idx, item);
        drop(items_mut);
        Ok(Value::List(items))
    });

    def(env, "list_remove", |args| {
        let items = list(args, 0, "list_remove")?;
        let item = get(args, 1, "list_remove")?.clone();
        let mut items_mut = items.borrow_mut();
        let pos = items_mut.iter().position(|v| *v == item);
        match pos {
            Some(i) => {
                items_mut.remove(i);
                drop(items_mut);
                Ok(Value::List(items))
            }
            None => Err(KaynatError::value_error("item not found in list")),
        }
    });

    def(env, "list_remove_at", |args| {
        let items = list(args, 0, "list_remove_at")?;
        let idx = number(args, 1, "list_remove_at")? as i64;
        let mut items_mut = items.borrow_mut();
        if idx < 0 || idx as usize >= items_mut.len() {
            return Err(KaynatError::value_error(format!("index {idx} out of range")));
        }
        Ok(items_mut.remove(idx as usize))
    });

    def(env, "list_get", |args| {
        let items = list(args, 0, "list_get")?;
        let idx = number(args, 1, "list_get")? as i64;
        let items = items.borrow();
        if idx < 0 || idx as usize >= items.len() {
            return Err(KaynatError::value_error(format!("index {idx} out of range")));
        }
        Ok(items[idx as usize].clone())
    });

    def(env, "list_slice", |args| {
        let items = list(args, 0, "list_slice")?;
        let items = items.borrow();
        let len = items.len() as i64;
        let start = number(args, 1, "list_slice")? as i64;
        let end = match args.get(2) {
            Some(Value::Number(n)) => *n as i64,
            _ => len,
        };
        let clamp = |i: i64| i.max(0).min(len) as usize;
        let (start, end) = (clamp(start), clamp(end));
        if start >= end {
            return Ok(Value::list(Vec::new()));
        }
        Ok(Value::list(items[start..end].to_vec()))
    });

    def(env, "list_length", |args| Ok(Value::Number(list(args, 0, "list_length")?.borrow().len() as f64)));
    def(env, "list_is_empty", |args| Ok(Value::Boolean(list(args, 0, "list_is_empty")?.borrow().is_empty())));

    def(env, "list_contains", |args| {
        let items = list(args, 0, "list_contains")?;
        let item = get(args, 1, "list_contains")?.clone();
        Ok(Value::Boolean(items.borrow().iter().any(|v| *v == item)))
    });

    def(env, "list_index_of", |args| {
        let items = list(args, 0, "list_index_of")?;
        let item = get(args, 1, "list_index_of")?.clone();
        let position = items.borrow().iter().position(|v| *v == item);
        Ok(Value::Number(position.map(|i| i as f64).unwrap_or(-1.0)))
    });

    def(env, "list_count", |args| {
        let items = list(args, 0, "list_count")?;
        let item = get(args, 1, "list_count")?.clone();
        Ok(Value::Number(items.borrow().iter().filter(|v| **v == item).count() as f64))
    });

    def(env, "list_sort", |args| {
        let items = list(args, 0, "list_sort")?;
        let reverse = boolean(args, 1, false);
        let mut items_mut = items.borrow_mut();
        items_mut.sort_by(|a, b| compare_values(a, b));
        if reverse {
            items_mut.reverse();
        }
        drop(items_mut);
        Ok(Value::List(items))
    });

    def(env, "list_reverse", |args| {
        let items = list(args, 0, "list_reverse")?;
        items.borrow_mut().reverse();
        Ok(Value::List(items))
    });

    def(env, "list_copy", |args| Ok(Value::list(list(args, 0, "list_copy")?.borrow().clone())));

    def(env, "list_clear", |args| {
        let items = list(args, 0, "list_clear")?;
        items.borrow_mut().clear();
        Ok(Value::List(items))
    });

    def(env, "list_extend", |args| {
        let items = list(args, 0, "list_extend")?;
        let other = list(args, 1, "list_extend")?;
        let extra = other.borrow().clone();
        items.borrow_mut().extend(extra);
        Ok(Value::List(items))
    });

    def(env, "list_min", |args| {
        let items = list(args, 0, "list_min")?;
        let items = items.borrow();
        items
            .iter()
            .min_by(|a, b| compare_values(a, b))
            .cloned()
            .ok_or_else(|| KaynatError::value_error("cannot find min of an empty list"))
    });

    def(env, "list_max", |args| {
        let items = list(args, 0, "list_max")?;
        let items = items.borrow();
        items
            .iter()
            .max_by(|a, b| compare_values(a, b))
            .cloned()
            .ok_or_else(|| KaynatError::value_error("cannot find max of an empty list"))
    });

    def(env, "list_sum", |args| {
        let items = list(args, 0, "list_sum")?;
        let mut total = 0.0;
        for item in items.borrow().iter() {
            total += as_number(item)?;
        }
        Ok(Value::Number(total))
    });

    def(env, "list_average", |args| {
        let items = list(args, 0, "list_average")?;
        let items = items.borrow();
        if items.is_empty() {
            return Err(KaynatError::value_error("cannot calculate average of an empty list"));
        }
        let mut total = 0.0;
        for item in items.iter() {
            total += as_number(item)?;
        }
        Ok(Value::Number(total / items.len() as f64))
    });
}

fn as_number(v: &Value) -> Result<f64, KaynatError> {
    match v {
        Value::Number(n) => Ok(*n),
        other => Err(KaynatError::type_error(format!("expected a number, found {}", other.type_name()))),
    }
}

/// Orders numbers numerically and falls back to display-string order for
/// any other kind, which keeps a list of mixed strings sortable without
/// making `list_sort`/`list_min`/`list_max` reject non-numeric lists.
fn compare_values(a: &Value, b: &Value) -> std::cmp::Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.partial_cmp(y).unwrap_or(std::cmp::Ordering::Equal),
        _ => a.display().cmp(&b.display()),
    }
}
