//! Synthesized block arguments
//!
//! A parameter of type `func(X) -> Y` is a block slot. Callers that pass a
//! plain value get a constant transform; callers that pass nothing get the
//! identity transform.
//!
//! A constant transform converts its value to `Y` each time it is applied,
//! so a native that never runs its block never triggers the conversion.

use crate::convert::{self, Converter};
use crate::error::ConversionError;
use crate::types::TypeDesc;
use crate::value::Value;
use std::fmt;
use std::panic;
use std::sync::Arc;

#[derive(Clone)]
enum TransformKind {
    Identity,
    Constant {
        value: Value,
        converter: Arc<dyn Converter>,
        check: bool,
    },
}

impl fmt::Debug for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("Identity"),
            Self::Constant { value, check, .. } => f
                .debug_struct("Constant")
                .field("value", value)
                .field("check", check)
                .finish_non_exhaustive(),
        }
    }
}

impl PartialEq for TransformKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Identity, Self::Identity) => true,
            (
                Self::Constant { value: a, check: ca, .. },
                Self::Constant { value: b, check: cb, .. },
            ) => a == b && ca == cb,
            _ => false,
        }
    }
}

/// Panic payload raised by [`Transform::apply`] when the lifted value does
/// not convert. The invoker turns it back into a conversion error.
#[derive(Debug)]
pub(crate) struct BlockConversionFailure {
    pub index: usize,
    pub source: ConversionError,
}

/// Single-input, single-output function handed to a native as a block
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    input: TypeDesc,
    output: TypeDesc,
    slot: usize,
    kind: TransformKind,
}

impl Transform {
    /// Run the transform, converting a lifted value to the output type.
    pub fn try_apply(&self, input: &Value) -> Result<Value, ConversionError> {
        match &self.kind {
            TransformKind::Identity => Ok(input.clone()),
            TransformKind::Constant { value, converter, check } => {
                convert::convert_checked(converter.as_ref(), value, &self.output, *check)
            }
        }
    }

    /// Run the transform.
    ///
    /// # Panics
    /// When a lifted value cannot be converted to the output type. Inside
    /// [`Invoker::try_invoke`](super::Invoker::try_invoke) this surfaces as
    /// a fatal `InvokeError::Conversion` for the block's argument index.
    pub fn apply(&self, input: &Value) -> Value {
        match self.try_apply(input) {
            Ok(value) => value,
            Err(source) => panic::panic_any(BlockConversionFailure {
                index: self.slot,
                source,
            }),
        }
    }

    #[inline]
    pub fn input_type(&self) -> &TypeDesc {
        &self.input
    }

    #[inline]
    pub fn output_type(&self) -> &TypeDesc {
        &self.output
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        matches!(self.kind, TransformKind::Identity)
    }

    /// Record which argument slot this transform fills
    pub(crate) fn at_slot(mut self, index: usize) -> Self {
        self.slot = index;
        self
    }
}

/// Lift `value` into a transform of type `ty` that ignores its input.
///
/// Conversion to the output type is deferred to application.
/// Returns `None` if `ty` is not a block type.
pub fn make_constant_function(
    ty: &TypeDesc,
    value: &Value,
    converter: Arc<dyn Converter>,
    check: bool,
) -> Option<Transform> {
    let (input, output) = ty.block_shape()?;
    Some(Transform {
        input: input.clone(),
        output: output.clone(),
        slot: 0,
        kind: TransformKind::Constant {
            value: value.clone(),
            converter,
            check,
        },
    })
}

/// Transform of type `ty` returning its input unchanged.
/// Returns `None` if `ty` is not a block type.
pub fn make_identity_function(ty: &TypeDesc) -> Option<Transform> {
    let (input, output) = ty.block_shape()?;
    Some(Transform {
        input: input.clone(),
        output: output.clone(),
        slot: 0,
        kind: TransformKind::Identity,
    })
}
