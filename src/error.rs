//! Error taxonomy
//!
//! Two tiers: `FilterError` is what a fallible native reports and callers
//! handle routinely. `ContractViolation` and `ConversionError` mean a native
//! was registered or converted wrongly; `Invoker::invoke` aborts on them.

use crate::types::TypeDesc;
use thiserror::Error;

/// Boxed error as produced by arbitrary native code
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Recoverable failure reported by a native callable
#[derive(Debug, Error)]
#[error("{message}")]
pub struct FilterError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl FilterError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying error, keeping it as the source
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<BoxError> for FilterError {
    fn from(err: BoxError) -> Self {
        Self {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

/// The converter could not produce a value of the target type
#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot convert {from} to {target}: {reason}")]
pub struct ConversionError {
    pub from: &'static str,
    pub target: TypeDesc,
    pub reason: String,
}

impl ConversionError {
    pub fn new(from: &'static str, target: TypeDesc, reason: impl Into<String>) -> Self {
        Self {
            from,
            target,
            reason: reason.into(),
        }
    }
}

/// A native callable was declared or behaved outside the calling contract
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("callable declares no results")]
    NoResults,
    #[error("callable declares {count} results; at most two are allowed")]
    TooManyResults { count: usize },
    #[error("first result slot cannot be an error")]
    LeadingError,
    #[error("second result slot must be an error")]
    SecondResultNotError,
    #[error("body returns {body} result(s) but signature declares {declared}")]
    BodyShapeMismatch { body: usize, declared: usize },
    #[error("second result is a non-error value of type `{type_name}`")]
    NonErrorResult { type_name: &'static str },
}

/// Everything that can come out of an invocation
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error(transparent)]
    Failed(#[from] FilterError),

    #[error("contract violation in `{callable}`: {violation}")]
    Contract {
        callable: String,
        violation: ContractViolation,
    },

    #[error("argument {index} of `{callable}`: {source}")]
    Conversion {
        callable: String,
        index: usize,
        #[source]
        source: ConversionError,
    },

    #[error("no callable named `{name}`")]
    UnknownCallable { name: String },
}

impl InvokeError {
    /// True for registration or conversion defects that must not be
    /// handled as ordinary failures
    #[inline]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Contract { .. } | Self::Conversion { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_filter_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err = FilterError::with_source("read failed", io);
        assert_eq!(err.to_string(), "read failed");
        assert_eq!(err.source().unwrap().to_string(), "disk gone");
    }

    #[test]
    fn test_fatal_classification() {
        let failed = InvokeError::from(FilterError::new("nope"));
        assert!(!failed.is_fatal());

        let contract = InvokeError::Contract {
            callable: "f".into(),
            violation: ContractViolation::NoResults,
        };
        assert!(contract.is_fatal());

        let unknown = InvokeError::UnknownCallable { name: "g".into() };
        assert!(!unknown.is_fatal());
    }

    #[test]
    fn test_conversion_message() {
        let err = ConversionError::new("string", TypeDesc::Int, "not a number");
        assert_eq!(err.to_string(), "cannot convert string to int: not a number");
    }
}
