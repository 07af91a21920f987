//! Regular-expression built-ins (§6.5), grounded in the distilled
//! reference's `stdlib/pattern_tools.py`.

use regex::Regex;

use super::{def, string};
use crate::error::KaynatError;
use crate::interpreter::environment::Environment;
use crate::interpreter::value::Value;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
const URL_PATTERN: &str = r"^https?://[^\s/$.?#][^\s]*$";

pub fn register(env: &Environment) {
    def(env, "find_matches", |args| {
        let pattern = string(args, 0, "find_matches")?;
        let text = string(args, 1, "find_matches")?;
        let re = compile(&pattern)?;
        let matches = re.find_iter(&text).map(|m| Value::String(m.as_str().to_string())).collect();
        Ok(Value::list(matches))
    });

    def(env, "matches_pattern", |args| {
        let text = string(args, 0, "matches_pattern")?;
        let pattern = string(args, 1, "matches_pattern")?;
        let re = compile(&pattern)?;
        // `re.match` in the distilled reference anchors at the start only,
        // not the end, so a bare `find` that begins at position 0 counts.
        Ok(Value::Boolean(re.find(&text).is_some_and(|m| m.start() == 0)))
    });

    def(env, "replace_pattern", |args| {
        let text = string(args, 0, "replace_pattern")?;
        let pattern = string(args, 1, "replace_pattern")?;
        let replacement = string(args, 2, "replace_pattern")?;
        let re = compile(&pattern)?;
        Ok(Value::String(re.replace_all(&text, replacement.as_str()).into_owned()))
    });

    def(env, "split_by_pattern", |args| {
        let text = string(args, 0, "split_by_pattern")?;
        let pattern = string(args, 1, "split_by_pattern")?;
        let re = compile(&pattern)?;
        let parts = re.split(&text).map(|p| Value::String(p.to_string())).collect();
        Ok(Value::list(parts))
    });

    def(env, "is_valid_email", |args| {
        let text = string(args, 0, "is_valid_email")?;
        let re = Regex::new(EMAIL_PATTERN).expect("email pattern is a fixed valid regex");
        Ok(Value::Boolean(re.is_match(&text)))
    });

    def(env, "is_valid_url", |args| {
        let text = string(args, 0, "is_valid_url")?;
        let re = Regex::new(URL_PATTERN).expect("url pattern is a fixed valid regex");
        Ok(Value::Boolean(re.is_match(&text)))
    });
}

fn compile(pattern: &str) -> Result<Regex, KaynatError> {
    Regex::new(pattern).map_err(|e| KaynatError::value_error(format!("invalid pattern: {e}")))
}
