//! String built-ins (§6.3), grounded in the distilled reference's
//! `stdlib/string_tools.py`.

use super::{def, list, number, optional_number, string, text_arg};
use crate::error::KaynatError;
use crate::interpreter::environment::Environment;
use crate::interpreter::value::Value;

pub fn register(env: &Environment) {
    def(env, "to_uppercase", |args| Ok(Value::String(string(args, 0, "to_uppercase")?.to_uppercase())));
    def(env, "to_lowercase", |args| Ok(Value::String(string(args, 0, "to_lowercase")?.to_lowercase())));
    def(env, "to_titlecase", |args| Ok(Value::String(titlecase(&string(args, 0, "to_titlecase")?))));

    def(env, "trim", |args| Ok(Value::String(string(args, 0, "trim")?.trim().to_string())));
    def(env, "trim_left", |args| Ok(Value::String(string(args, 0, "trim_left")?.trim_start().to_string())));
    def(env, "trim_right", |args| Ok(Value::String(string(args, 0, "trim_right")?.trim_end().to_string())));

    def(env, "starts_with", |args| {
        let s = string(args, 0, "starts_with")?;
        let prefix = text_arg(args, 1, "");
        Ok(Value::Boolean(s.starts_with(&prefix)))
    });

    def(env, "ends_with", |args| {
        let s = string(args, 0, "ends_with")?;
        let suffix = text_arg(args, 1, "");
        Ok(Value::Boolean(s.ends_with(&suffix)))
    });

    def(env, "contains", |args| {
        let s = string(args, 0, "contains")?;
        let needle = text_arg(args, 1, "");
        Ok(Value::Boolean(s.contains(&needle)))
    });

    def(env, "find_position", |args| {
        let s = string(args, 0, "find_position")?;
        let needle = text_arg(args, 1, "");
        let position = s.find(&needle).map(|byte| s[..byte].chars().count() as f64).unwrap_or(-1.0);
        Ok(Value::Number(position))
    });

    def(env, "replace_text", |args| {
        let s = string(args, 0, "replace_text")?;
        let old = text_arg(args, 1, "");
        let new = text_arg(args, 2, "");
        Ok(Value::String(s.replace(&old, &new)))
    });

    def(env, "split_string", |args| {
        let s = string(args, 0, "split_string")?;
        let delim = text_arg(args, 1, " ");
        let parts: Vec<Value> = s.split(delim.as_str()).map(|p| Value::String(p.to_string())).collect();
        Ok(Value::list(parts))
    });

    def(env, "join_strings", |args| {
        let items = list(args, 0, "join_strings")?;
        let sep = text_arg(args, 1, "");
        let parts: Vec<String> = items.borrow().iter().map(Value::display).collect();
        Ok(Value::String(parts.join(&sep)))
    });

    def(env, "substring", |args| {
        let s = string(args, 0, "substring")?;
        let chars: Vec<char> = s.chars().collect();
        let start = number(args, 1, "substring")? as i64;
        let end = match args.get(2) {
            Some(Value::Number(n)) => *n as i64,
            _ => chars.len() as i64,
        };
        Ok(Value::String(slice_chars(&chars, start, end)))
    });

    def(env, "reverse_string", |args| {
        Ok(Value::String(string(args, 0, "reverse_string")?.chars().rev().collect()))
    });

    def(env, "repeat_string", |args| {
        let s = string(args, 0, "repeat_string")?;
        let n = number(args, 1, "repeat_string")?.max(0.0) as usize;
        Ok(Value::String(s.repeat(n)))
    });

    def(env, "string_length", |args| Ok(Value::Number(string(args, 0, "string_length")?.chars().count() as f64)));
    def(env, "is_empty", |args| Ok(Value::Boolean(string(args, 0, "is_empty")?.is_empty())));

    def(env, "is_numeric", |args| {
        let s = string(args, 0, "is_numeric")?;
        Ok(Value::Boolean(!s.is_empty() && s.chars().all(|c| c.is_ascii_digit())))
    });

    def(env, "is_alphabetic", |args| {
        let s = string(args, 0, "is_alphabetic")?;
        Ok(Value::Boolean(!s.is_empty() && s.chars().all(|c| c.is_alphabetic())))
    });

    def(env, "is_alphanumeric", |args| {
        let s = string(args, 0, "is_alphanumeric")?;
        Ok(Value::Boolean(!s.is_empty() && s.chars().all(|c| c.is_alphanumeric())))
    });

    def(env, "pad_left", |args| {
        let s = string(args, 0, "pad_left")?;
        let width = optional_number(args, 1, 0.0) as usize;
        let fill = pad_char(args, 2);
        Ok(Value::String(pad(&s, width, fill, true)))
    });

    def(env, "pad_right", |args| {
        let s = string(args, 0, "pad_right")?;
        let width = optional_number(args, 1, 0.0) as usize;
        let fill = pad_char(args, 2);
        Ok(Value::String(pad(&s, width, fill, false)))
    });

    def(env, "center_string", |args| {
        let s = string(args, 0, "center_string")?;
        let width = optional_number(args, 1, 0.0) as usize;
        let fill = pad_char(args, 2);
        let len = s.chars().count();
        if len >= width {
            return Ok(Value::String(s));
        }
        let total = width - len;
        let left = total / 2;
        let right = total - left;
        let mut out = String::new();
        out.extend(std::iter::repeat(fill).take(left));
        out.push_str(&s);
        out.extend(std::iter::repeat(fill).take(right));
        Ok(Value::String(out))
    });
}

fn titlecase(s: &str) -> String {
    s.split_inclusive(char::is_whitespace)
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect()
}

fn pad_char(args: &[Value], i: usize) -> char {
    text_arg(args, i, " ").chars().next().unwrap_or(' ')
}

fn pad(s: &str, width: usize, fill: char, left: bool) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    let padding: String = std::iter::repeat(fill).take(width - len).collect();
    if left {
        format!("{padding}{s}")
    } else {
        format!("{s}{padding}")
    }
}

/// Python-style slice clamping: out-of-range indices clamp to the string's
/// bounds rather than erroring, and a start past the end yields "".
fn slice_chars(chars: &[char], start: i64, end: i64) -> String {
    let len = chars.len() as i64;
    let clamp = |i: i64| i.max(0).min(len) as usize;
    let start = clamp(if start < 0 { len + start } else { start });
    let end = clamp(if end < 0 { len + end } else { end });
    if start >= end {
        return String::new();
    }
    chars[start..end].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::environment::Environment;

    fn call(env: &Environment, name: &str, args: &[Value]) -> Value {
        match env.get(name).unwrap() {
            Value::Builtin(b) => (b.callable)(args).unwrap(),
            _ => panic!("{name} is not a builtin"),
        }
    }

    #[test]
    fn find_position_returns_negative_one_on_miss() {
        let env = Environment::new_global();
        register(&env);
        let result = call(&env, "find_position", &[Value::String("hello".into()), Value::String("z".into())]);
        assert_eq!(result, Value::Number(-1.0));
    }

    #[test]
    fn substring_without_end_reads_to_the_end() {
        let env = Environment::new_global();
        register(&env);
        let result = call(&env, "substring", &[Value::String("hello world".into()), Value::Number(6.0)]);
        assert_eq!(result, Value::String("world".into()));
    }

    #[test]
    fn pad_left_uses_the_given_fill_character() {
        let env = Environment::new_global();
        register(&env);
        let result =
            call(&env, "pad_left", &[Value::String("7".into()), Value::Number(3.0), Value::String("0".into())]);
        assert_eq!(result, Value::String("007".into()));
    }
}
