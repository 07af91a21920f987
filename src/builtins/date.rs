//! Date and time built-ins (§6.5), grounded in the distilled reference's
//! `stdlib/date_tools.py`, all operating on the host-local calendar clock.
//!
//! The distilled reference's own `format_date` ignores its first argument
//! entirely and just formats the current moment ("Simplified implementation"
//! per its own comment) — that reads as a shortcut taken under time
//! pressure rather than an intended behavior, so this version actually
//! formats the date it is given.

use chrono::{Local, NaiveDate};

use super::{def, string, text_arg};
use crate::error::KaynatError;
use crate::interpreter::environment::Environment;
use crate::interpreter::value::Value;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn register(env: &Environment) {
    def(env, "current_date", |_args| Ok(Value::String(Local::now().format(DATE_FORMAT).to_string())));
    def(env, "current_time", |_args| Ok(Value::String(Local::now().format("%H:%M:%S").to_string())));
    def(env, "current_timestamp", |_args| Ok(Value::Number(Local::now().timestamp() as f64)));

    def(env, "format_date", |args| {
        let value = string(args, 0, "format_date")?;
        let pattern = text_arg(args, 1, DATE_FORMAT);
        let date = NaiveDate::parse_from_str(&value, DATE_FORMAT)
            .map_err(|e| KaynatError::value_error(format!("invalid date '{value}': {e}")))?;
        Ok(Value::String(date.format(&pattern).to_string()))
    });

    def(env, "parse_date", |args| {
        let text = string(args, 0, "parse_date")?;
        let date = NaiveDate::parse_from_str(&text, DATE_FORMAT)
            .map_err(|e| KaynatError::value_error(format!("invalid date format: {e}")))?;
        Ok(Value::String(date.format(DATE_FORMAT).to_string()))
    });
}
