//! Network built-ins are named in the distilled reference but are a
//! deliberate Non-goal here (§6.5): an interpreter whose ordinary
//! built-ins make outbound network calls is an attack surface this crate
//! does not take on. The names are still registered so calling them
//! produces a clear "disabled" runtime error instead of a confusing
//! `NameError` or, worse, silently doing nothing.

use super::def;
use crate::error::KaynatError;
use crate::interpreter::environment::Environment;

pub fn register(env: &Environment) {
    def(env, "fetch_url", |_args| Err(disabled("fetch_url")));
    def(env, "is_url_reachable", |_args| Err(disabled("is_url_reachable")));
}

fn disabled(name: &str) -> KaynatError {
    KaynatError::runtime(format!("'{name}' is disabled: network access is not a capability this interpreter exposes"))
}
