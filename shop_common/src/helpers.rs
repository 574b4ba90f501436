use std::{env, str::FromStr};

use log::*;

/// Parse a boolean flag from a string value, or return the given default value otherwise.
pub fn parse_boolean_flag(value: Option<String>, default: bool) -> bool {
    let value = match value {
        Some(v) => v,
        None => return default,
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

/// Reads `name` from the environment, returning `default` when it is unset.
pub fn env_or_default(name: &str, default: &str) -> String {
    env::var(name).ok().unwrap_or_else(|| {
        debug!("🪛️ {name} is not set. Using the default, {default}.");
        default.to_string()
    })
}

/// Reads and parses `name` from the environment. Unset or unparseable values fall back to `default`, the latter with
/// a warning.
pub fn env_parse_or_default<T>(name: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(s) => s.trim().parse::<T>().unwrap_or_else(|e| {
            warn!("🪛️ {s} is not a valid value for {name}. {e} Using the default, {default}, instead.");
            default
        }),
        Err(_) => default,
    }
}
