//! Argument adaptation - dynamic arguments onto declared parameter slots
//!
//! Per slot `i` with declared type `T`:
//! - supplied, `T` is a block type: lift to a constant transform (converted
//!   to the block's output type only when applied)
//! - supplied nil: zero value of `T`, converter not consulted
//! - supplied otherwise: converter output
//! - missing, `T` is a block type: identity transform
//! - missing otherwise: zero value of `T`
//!
//! Arguments past the declared arity are dropped without complaint.

use super::signature::Signature;
use super::transform::{make_constant_function, make_identity_function, Transform};
use crate::convert::{self, Converter};
use crate::error::ConversionError;
use crate::logging;
use crate::types::TypeDesc;
use crate::value::Value;
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::sync::Arc;

/// One adapted argument
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Value(Value),
    /// Function-typed slot; `None` is the zero function
    Func(Option<Transform>),
}

impl Arg {
    fn zero(ty: &TypeDesc) -> Self {
        match ty {
            TypeDesc::Func { .. } => Self::Func(None),
            _ => Self::Value(ty.zero()),
        }
    }
}

/// Exactly one adapted argument per declared parameter.
///
/// Each value slot conforms to its declared type, so the typed accessors
/// below fall back to the empty value only when asked for the wrong type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Args {
    slots: SmallVec<[Arg; 4]>,
}

impl Args {
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Arg> {
        self.slots.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arg> {
        self.slots.iter()
    }

    /// Dynamic value in slot `index`; nil for function slots
    pub fn value(&self, index: usize) -> &Value {
        const NIL: &Value = &Value::Nil;
        match self.slots.get(index) {
            Some(Arg::Value(v)) => v,
            _ => NIL,
        }
    }

    pub fn boolean(&self, index: usize) -> bool {
        self.value(index).as_bool().unwrap_or_default()
    }

    pub fn int(&self, index: usize) -> i64 {
        self.value(index).as_int().unwrap_or_default()
    }

    pub fn float(&self, index: usize) -> f64 {
        self.value(index).as_float().unwrap_or_default()
    }

    pub fn string(&self, index: usize) -> &str {
        self.value(index).as_str().unwrap_or_default()
    }

    pub fn array(&self, index: usize) -> &[Value] {
        self.value(index).as_array().unwrap_or_default()
    }

    pub fn map(&self, index: usize) -> Option<&BTreeMap<String, Value>> {
        self.value(index).as_map()
    }

    pub fn transform(&self, index: usize) -> Option<&Transform> {
        match self.slots.get(index) {
            Some(Arg::Func(f)) => f.as_ref(),
            _ => None,
        }
    }
}

impl FromIterator<Arg> for Args {
    fn from_iter<I: IntoIterator<Item = Arg>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

/// Failed conversion of the argument at `index`
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptError {
    pub index: usize,
    pub source: ConversionError,
}

/// Shape `args` to `signature`. The result always has `signature.arity()`
/// slots, whatever `args.len()` is.
pub fn adapt(
    signature: &Signature,
    args: &[Value],
    converter: &Arc<dyn Converter>,
    check: bool,
) -> Result<Args, AdaptError> {
    let arity = signature.arity();
    let mut slots = SmallVec::with_capacity(arity);

    for (index, ty) in signature.params().iter().enumerate() {
        let slot = match args.get(index) {
            Some(arg) => adapt_supplied(index, ty, arg, converter, check)?,
            None => adapt_missing(index, ty),
        };
        slots.push(slot);
    }

    Ok(Args { slots })
}

fn adapt_supplied(
    index: usize,
    ty: &TypeDesc,
    arg: &Value,
    converter: &Arc<dyn Converter>,
    check: bool,
) -> Result<Arg, AdaptError> {
    if let Some(lifted) = make_constant_function(ty, arg, Arc::clone(converter), check) {
        logging::log_slot(index, ty, "lifted");
        return Ok(Arg::Func(Some(lifted.at_slot(index))));
    }

    if arg.is_nil() {
        logging::log_slot(index, ty, "zeroed");
        return Ok(Arg::zero(ty));
    }

    logging::log_slot(index, ty, "converted");
    convert::convert_checked(converter.as_ref(), arg, ty, check)
        .map(Arg::Value)
        .map_err(|source| AdaptError { index, source })
}

fn adapt_missing(index: usize, ty: &TypeDesc) -> Arg {
    match make_identity_function(ty) {
        Some(identity) => {
            logging::log_slot(index, ty, "identity");
            Arg::Func(Some(identity.at_slot(index)))
        }
        None => {
            logging::log_slot(index, ty, "zeroed");
            Arg::zero(ty)
        }
    }
}
