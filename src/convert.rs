//! Value conversion - dynamic values into declared parameter types
//!
//! The coercion rules themselves belong to the host language. This module
//! only defines the seam the adapter calls through, plus a checker that
//! accepts values already of the requested shape and coerces nothing.

use crate::error::ConversionError;
use crate::logging;
use crate::types::TypeDesc;
use crate::value::Value;

/// Coerces a dynamic value into a specific static type.
///
/// Implementations must be safe to call from several threads at once.
pub trait Converter: Send + Sync {
    fn convert(&self, value: &Value, target: &TypeDesc) -> Result<Value, ConversionError>;
}

impl<F> Converter for F
where
    F: Fn(&Value, &TypeDesc) -> Result<Value, ConversionError> + Send + Sync,
{
    #[inline]
    fn convert(&self, value: &Value, target: &TypeDesc) -> Result<Value, ConversionError> {
        self(value, target)
    }
}

/// Passes through values that already conform and rejects the rest
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeCheckConverter;

impl Converter for TypeCheckConverter {
    fn convert(&self, value: &Value, target: &TypeDesc) -> Result<Value, ConversionError> {
        if target.accepts(value) {
            Ok(value.clone())
        } else {
            Err(ConversionError::new(
                value.type_name(),
                target.clone(),
                "no coercion rule registered",
            ))
        }
    }
}

/// Run the converter and, when `check` is set, hold it to its contract:
/// the result must conform to `target`.
pub(crate) fn convert_checked(
    converter: &dyn Converter,
    value: &Value,
    target: &TypeDesc,
    check: bool,
) -> Result<Value, ConversionError> {
    logging::log_type_conversion(value.type_name(), target);

    let converted = converter.convert(value, target).map_err(|err| {
        logging::log_conversion_failure(&err);
        err
    })?;

    if check && !target.accepts(&converted) {
        let err = ConversionError::new(
            value.type_name(),
            target.clone(),
            format!("converter produced {}", converted.type_name()),
        );
        logging::log_conversion_failure(&err);
        return Err(err);
    }
    Ok(converted)
}
