//! Numeric built-ins (§6.3), grounded in the distilled reference's
//! `stdlib/math_tools.py`.

use super::{def, number, optional_number};
use crate::error::KaynatError;
use crate::interpreter::environment::Environment;
use crate::interpreter::value::Value;

pub fn register(env: &Environment) {
    def(env, "sqrt", |args| {
        let n = number(args, 0, "sqrt")?;
        if n < 0.0 {
            return Err(KaynatError::value_error("cannot take square root of a negative number"));
        }
        Ok(Value::Number(n.sqrt()))
    });

    def(env, "abs_value", |args| Ok(Value::Number(number(args, 0, "abs_value")?.abs())));

    def(env, "round_number", |args| {
        let n = number(args, 0, "round_number")?;
        let decimals = optional_number(args, 1, 0.0) as i32;
        let factor = 10f64.powi(decimals);
        Ok(Value::Number((n * factor).round() / factor))
    });

    def(env, "ceiling", |args| Ok(Value::Number(number(args, 0, "ceiling")?.ceil())));
    def(env, "floor", |args| Ok(Value::Number(number(args, 0, "floor")?.floor())));

    def(env, "pow", |args| {
        let base = number(args, 0, "pow")?;
        let exponent = number(args, 1, "pow")?;
        Ok(Value::Number(base.powf(exponent)))
    });

    def(env, "logarithm", |args| {
        let n = number(args, 0, "logarithm")?;
        let base = optional_number(args, 1, std::f64::consts::E);
        if n <= 0.0 {
            return Err(KaynatError::value_error("logarithm requires a positive number"));
        }
        if base == std::f64::consts::E {
            Ok(Value::Number(n.ln()))
        } else {
            Ok(Value::Number(n.log(base)))
        }
    });

    def(env, "sin", |args| Ok(Value::Number(number(args, 0, "sin")?.to_radians().sin())));
    def(env, "cos", |args| Ok(Value::Number(number(args, 0, "cos")?.to_radians().cos())));
    def(env, "tan", |args| Ok(Value::Number(number(args, 0, "tan")?.to_radians().tan())));

    def(env, "asin", |args| {
        let n = number(args, 0, "asin")?;
        if !(-1.0..=1.0).contains(&n) {
            return Err(KaynatError::value_error("asin requires a value between -1 and 1"));
        }
        Ok(Value::Number(n.asin().to_degrees()))
    });

    def(env, "acos", |args| {
        let n = number(args, 0, "acos")?;
        if !(-1.0..=1.0).contains(&n) {
            return Err(KaynatError::value_error("acos requires a value between -1 and 1"));
        }
        Ok(Value::Number(n.acos().to_degrees()))
    });

    def(env, "atan", |args| Ok(Value::Number(number(args, 0, "atan")?.atan().to_degrees())));

    def(env, "factorial", |args| {
        let n = number(args, 0, "factorial")?;
        if n < 0.0 {
            return Err(KaynatError::value_error("factorial requires a non-negative integer"));
        }
        let n = n as u64;
        let mut result: f64 = 1.0;
        for i in 2..=n {
            result *= i as f64;
        }
        Ok(Value::Number(result))
    });

    def(env, "gcd", |args| {
        let a = number(args, 0, "gcd")? as i64;
        let b = number(args, 1, "gcd")? as i64;
        Ok(Value::Number(gcd(a.abs(), b.abs()) as f64))
    });

    def(env, "lcm", |args| {
        let a = number(args, 0, "lcm")? as i64;
        let b = number(args, 1, "lcm")? as i64;
        let g = gcd(a.abs(), b.abs());
        let result = if g == 0 { 0 } else { (a.abs() / g) * b.abs() };
        Ok(Value::Number(result as f64))
    });

    def(env, "is_prime", |args| {
        let n = number(args, 0, "is_prime")? as i64;
        Ok(Value::Boolean(is_prime(n)))
    });

    def(env, "min_value", |args| {
        if args.is_empty() {
            return Err(KaynatError::value_error("min_value requires at least one argument"));
        }
        let mut best = number(args, 0, "min_value")?;
        for i in 1..args.len() {
            best = best.min(number(args, i, "min_value")?);
        }
        Ok(Value::Number(best))
    });

    def(env, "max_value", |args| {
        if args.is_empty() {
            return Err(KaynatError::value_error("max_value requires at least one argument"));
        }
        let mut best = number(args, 0, "max_value")?;
        for i in 1..args.len() {
            best = best.max(number(args, i, "max_value")?);
        }
        Ok(Value::Number(best))
    });

    def(env, "clamp", |args| {
        let v = number(args, 0, "clamp")?;
        let lo = number(args, 1, "clamp")?;
        let hi = number(args, 2, "clamp")?;
        Ok(Value::Number(v.max(lo).min(hi)))
    });
}

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    let mut i = 2;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}
