//! `${VAR}` expansion in `content.root` and `content.href_prefix`.
//!
//! `${VAR}` fails when `VAR` is unset; `${VAR:-fallback}` uses the fallback.
//! Values without `${` are returned as written.

use std::borrow::Cow;

use crate::ConfigError;

/// Expand references in `value` from the process environment.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    expand_with(value, field, |var| std::env::var(var).ok())
}

/// Expand references in `value`, looking variables up with `lookup`.
///
/// `field` names the config key in the error, e.g. `content.root`.
fn expand_with<F>(value: &str, field: &str, lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| {
        lookup(var).map(Some).ok_or_else(|| UnsetVar(var.to_owned()))
    })
    .map(Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Name of a referenced variable that has no value.
struct UnsetVar(String);
