use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EnvError {
    #[error("expect env {0}")]
    Missing(String),
    #[error("env {key}={value:?} invalid: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

pub fn get_env(key: &str) -> Result<String, EnvError> {
    std::env::var(key).map_err(|_| EnvError::Missing(key.to_string()))
}

pub fn get_env_or(key: &str, default_value: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default_value.to_string())
}

/// Unset and empty variables are both treated as absent.
pub fn get_env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

pub fn parse_env<T>(key: &str, default_value: Option<T>) -> Result<T, EnvError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match (get_env_opt(key), default_value) {
        (Some(value), _) => parse_value(key, &value),
        (None, Some(default_value)) => Ok(default_value),
        (None, None) => Err(EnvError::Missing(key.to_string())),
    }
}

pub fn parse_value<T>(key: &str, value: &str) -> Result<T, EnvError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|err: T::Err| EnvError::Invalid {
        key: key.to_string(),
        value: value.to_string(),
        reason: err.to_string(),
    })
}
