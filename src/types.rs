//! Type descriptors for native parameters and results
//!
//! Each registered callable carries an explicit descriptor per parameter,
//! built once at registration. The adapter works against these descriptors
//! instead of inspecting the callable at call time.

use crate::value::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Declared static type of a parameter, result or transform slot
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDesc {
    /// Accepts any dynamic value unchanged
    Any,
    Bool,
    Int,
    Float,
    String,
    Array(Box<TypeDesc>),
    Map(Box<TypeDesc>),
    Func {
        inputs: Vec<TypeDesc>,
        outputs: Vec<TypeDesc>,
    },
}

impl TypeDesc {
    /// `[elem]`
    #[inline]
    pub fn array(elem: TypeDesc) -> Self {
        Self::Array(Box::new(elem))
    }

    /// `{string: elem}`
    #[inline]
    pub fn map(elem: TypeDesc) -> Self {
        Self::Map(Box::new(elem))
    }

    /// Single-input, single-output function type
    #[inline]
    pub fn func(input: TypeDesc, output: TypeDesc) -> Self {
        Self::Func {
            inputs: vec![input],
            outputs: vec![output],
        }
    }

    /// True for the "block" shape: exactly one input and one output
    #[inline]
    pub fn is_default_function(&self) -> bool {
        matches!(self, Self::Func { inputs, outputs } if inputs.len() == 1 && outputs.len() == 1)
    }

    /// Input and output of a default-function type
    pub fn block_shape(&self) -> Option<(&TypeDesc, &TypeDesc)> {
        match self {
            Self::Func { inputs, outputs } if inputs.len() == 1 && outputs.len() == 1 => {
                Some((&inputs[0], &outputs[0]))
            }
            _ => None,
        }
    }

    /// Empty value of this type. Function types have no value
    /// representation and zero to nil.
    pub fn zero(&self) -> Value {
        match self {
            Self::Any | Self::Func { .. } => Value::Nil,
            Self::Bool => Value::Bool(false),
            Self::Int => Value::Int(0),
            Self::Float => Value::Float(0.0),
            Self::String => Value::String(String::new()),
            Self::Array(_) => Value::Array(Vec::new()),
            Self::Map(_) => Value::Map(BTreeMap::new()),
        }
    }

    /// Check whether `value` already has this type's shape
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Any, _) => true,
            (Self::Bool, Value::Bool(_)) => true,
            (Self::Int, Value::Int(_)) => true,
            (Self::Float, Value::Float(_)) => true,
            (Self::String, Value::String(_)) => true,
            (Self::Array(elem), Value::Array(items)) => items.iter().all(|v| elem.accepts(v)),
            (Self::Map(elem), Value::Map(entries)) => entries.values().all(|v| elem.accepts(v)),
            _ => false,
        }
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
            Self::Array(elem) => write!(f, "[{elem}]"),
            Self::Map(elem) => write!(f, "{{string: {elem}}}"),
            Self::Func { inputs, outputs } => {
                write!(f, "func(")?;
                for (idx, ty) in inputs.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{ty}")?;
                }
                write!(f, ")")?;
                match outputs.as_slice() {
                    [] => Ok(()),
                    [single] => write!(f, " -> {single}"),
                    many => {
                        write!(f, " -> (")?;
                        for (idx, ty) in many.iter().enumerate() {
                            if idx > 0 {
                                write!(f, ", ")?;
                            }
                            write!(f, "{ty}")?;
                        }
                        write!(f, ")")
                    }
                }
            }
        }
    }
}
