//! Result normalization
//!
//! Natives report either one value, or a value plus an error slot. The
//! error slot is untyped: it is only a failure if it holds something
//! error-shaped. Anything else there is a contract violation.

use crate::error::{BoxError, ContractViolation, FilterError};
use crate::value::Value;
use std::any::Any;

/// Anything a native may put in its error slot
pub trait SlotValue: Any + Send {
    /// Concrete type name, for contract diagnostics
    fn type_name(&self) -> &'static str;

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
}

impl<T: Any + Send> SlotValue for T {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }
}

/// Untyped second result of a two-result native
pub type ErrorSlot = Box<dyn SlotValue>;

/// What a native body handed back
pub enum RawResults {
    One(Value),
    Two(Value, Option<ErrorSlot>),
}

impl std::fmt::Debug for RawResults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One(value) => f.debug_tuple("One").field(value).finish(),
            Self::Two(value, slot) => f
                .debug_tuple("Two")
                .field(value)
                .field(&slot.as_ref().map(|_| "<error slot>"))
                .finish(),
        }
    }
}

impl RawResults {
    #[inline]
    pub fn count(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Two(..) => 2,
        }
    }
}

/// Why normalization did not produce a value
#[derive(Debug)]
pub enum ResultError {
    Failed(FilterError),
    Violation(ContractViolation),
}

/// Collapse raw results into a single outcome
pub fn adapt_results(results: RawResults) -> Result<Value, ResultError> {
    match results {
        RawResults::One(value) | RawResults::Two(value, None) => Ok(value),
        RawResults::Two(_, Some(slot)) => Err(classify_error_slot(slot)),
    }
}

fn classify_error_slot(slot: ErrorSlot) -> ResultError {
    // `(*slot)` so the name is the boxed value's, not the box's
    let type_name = (*slot).type_name();
    let slot = match slot.into_any().downcast::<FilterError>() {
        Ok(err) => return ResultError::Failed(*err),
        Err(other) => other,
    };
    match slot.downcast::<BoxError>() {
        Ok(err) => ResultError::Failed(FilterError::from(*err)),
        Err(_) => ResultError::Violation(ContractViolation::NonErrorResult { type_name }),
    }
}
