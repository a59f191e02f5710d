//! Small context-carrying numeric parsers for command arguments.

use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArgParseError {
    #[error("missing argument: {0}")]
    Missing(&'static str),
    #[error("invalid integer '{value}' for {context}: {source}")]
    InvalidInteger {
        value: String,
        context: &'static str,
        source: ParseIntError,
    },
}

pub fn parse_i32(value: &str, context: &'static str) -> Result<i32, ArgParseError> {
    value
        .parse::<i32>()
        .map_err(|source| ArgParseError::InvalidInteger {
            value: value.to_string(),
            context,
            source,
        })
}

pub fn parse_i64(value: &str, context: &'static str) -> Result<i64, ArgParseError> {
    value
        .parse::<i64>()
        .map_err(|source| ArgParseError::InvalidInteger {
            value: value.to_string(),
            context,
            source,
        })
}

pub fn parse_u32(value: &str, context: &'static str) -> Result<u32, ArgParseError> {
    value
        .parse::<u32>()
        .map_err(|source| ArgParseError::InvalidInteger {
            value: value.to_string(),
            context,
            source,
        })
}
