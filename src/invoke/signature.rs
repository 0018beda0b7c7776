//! Declared shape of a native callable
//!
//! Built once at registration and validated there, so a malformed shape is
//! caught before the first call rather than during one.

use crate::error::ContractViolation;
use crate::types::TypeDesc;

/// One declared result slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnSlot {
    Value(TypeDesc),
    Error,
}

/// Parameter types plus result slots: `[Value]` or `[Value, Error]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    params: Vec<TypeDesc>,
    ret: TypeDesc,
    fallible: bool,
}

impl Signature {
    /// Validate and build a signature from raw slots
    pub fn new(params: Vec<TypeDesc>, returns: Vec<ReturnSlot>) -> Result<Self, ContractViolation> {
        let count = returns.len();
        let mut slots = returns.into_iter();
        let (ret, fallible) = match (slots.next(), slots.next()) {
            (None, _) => return Err(ContractViolation::NoResults),
            (Some(ReturnSlot::Error), _) => return Err(ContractViolation::LeadingError),
            _ if count > 2 => return Err(ContractViolation::TooManyResults { count }),
            (Some(ReturnSlot::Value(_)), Some(ReturnSlot::Value(_))) => {
                return Err(ContractViolation::SecondResultNotError)
            }
            (Some(ReturnSlot::Value(ty)), None) => (ty, false),
            (Some(ReturnSlot::Value(ty)), Some(ReturnSlot::Error)) => (ty, true),
        };
        Ok(Self { params, ret, fallible })
    }

    /// Single value result
    pub fn returning(params: Vec<TypeDesc>, ret: TypeDesc) -> Self {
        Self {
            params,
            ret,
            fallible: false,
        }
    }

    /// Value result plus trailing error slot
    pub fn fallible(params: Vec<TypeDesc>, ret: TypeDesc) -> Self {
        Self {
            params,
            ret,
            fallible: true,
        }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Declared type of parameter `index`; `index` must be below `arity()`
    #[inline]
    pub fn param_type(&self, index: usize) -> &TypeDesc {
        &self.params[index]
    }

    #[inline]
    pub fn params(&self) -> &[TypeDesc] {
        &self.params
    }

    /// True iff a trailing error slot is declared
    #[inline]
    pub fn is_fallible(&self) -> bool {
        self.fallible
    }

    #[inline]
    pub fn result_count(&self) -> usize {
        if self.fallible {
            2
        } else {
            1
        }
    }

    #[inline]
    pub fn return_type(&self) -> &TypeDesc {
        &self.ret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_plain() {
        let sig = Signature::returning(vec![TypeDesc::Int, TypeDesc::Int], TypeDesc::Int);
        assert_eq!(sig.arity(), 2);
        assert_eq!(sig.param_type(1), &TypeDesc::Int);
        assert!(!sig.is_fallible());
        assert_eq!(sig.return_type(), &TypeDesc::Int);
    }

    #[test]
    fn test_inspect_fallible() {
        let sig = Signature::fallible(vec![TypeDesc::String], TypeDesc::String);
        assert!(sig.is_fallible());
        assert_eq!(sig.result_count(), 2);
    }

    #[test]
    fn test_rejects_malformed_results() {
        assert_eq!(
            Signature::new(vec![], vec![]),
            Err(ContractViolation::NoResults)
        );
        assert_eq!(
            Signature::new(vec![], vec![ReturnSlot::Value(TypeDesc::Int), ReturnSlot::Value(TypeDesc::Int)]),
            Err(ContractViolation::SecondResultNotError)
        );
        assert_eq!(
            Signature::new(vec![], vec![ReturnSlot::Error]),
            Err(ContractViolation::LeadingError)
        );
        assert_eq!(
            Signature::new(
                vec![],
                vec![ReturnSlot::Value(TypeDesc::Int), ReturnSlot::Error, ReturnSlot::Error]
            ),
            Err(ContractViolation::TooManyResults { count: 3 })
        );
    }

    #[test]
    fn test_accepts_well_formed() {
        let sig = Signature::new(
            vec![TypeDesc::Any],
            vec![ReturnSlot::Value(TypeDesc::Any), ReturnSlot::Error],
        )
        .unwrap();
        assert!(sig.is_fallible());
    }
}
