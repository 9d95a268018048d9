use std::env::VarError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable was present but could not be read.
    #[error("Environment variable error: {0}")]
    EnvVarError(#[from] VarError),

    /// A variable (or its default) did not parse into the expected type.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A variable parsed but holds a value the shortener cannot work with.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}
