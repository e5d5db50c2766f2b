//! crates/stdlog/src/config.rs
//! Environment-derived defaults for the global loggers.

use std::env;
use std::ffi::OsString;

/// Enables one-line JSON encoding for the global loggers when true.
pub const ONELINE_ENV: &str = "OnelineLog";

/// Enables timestamps on the global loggers when true.
pub const TIMESTAMP_ENV: &str = "TimestampLog";

/// Behaviour switches applied when [`crate::out`] and [`crate::err`] are
/// first materialized.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Defaults {
    /// Encode every record as a single-line JSON string.
    pub one_line: bool,
    /// Prefix every record with a timestamp.
    pub timestamp: bool,
}

impl Defaults {
    /// Reads the defaults from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var_os(key))
    }

    /// Reads the defaults through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// Missing, non-UTF-8 and unparseable values all count as `false`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let flag = |key: &str| {
            lookup(key)
                .and_then(|value| value.to_str().and_then(parse_bool))
                .unwrap_or(false)
        };

        Self {
            one_line: flag(ONELINE_ENV),
            timestamp: flag(TIMESTAMP_ENV),
        }
    }
}

/// Parses the boolean spellings accepted for environment switches.
///
/// `1`, `t` and `true` are true; `0`, `f` and `false` are false. Matching is
/// case-insensitive and ignores surrounding whitespace.
pub fn parse_bool(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}
