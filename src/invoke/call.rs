//! Native callables and the invoker
//!
//! A `Callable` pairs a validated `Signature` with a body whose result
//! arity matches it. `Invoker` adapts arguments, runs the body and
//! normalizes what comes back.

use super::args::{adapt, Args};
use super::results::{adapt_results, ErrorSlot, RawResults, ResultError};
use super::signature::Signature;
use super::transform::BlockConversionFailure;
use crate::config::InvokeConfig;
use crate::convert::{Converter, TypeCheckConverter};
use crate::error::{ContractViolation, FilterError, InvokeError};
use crate::logging;
use crate::types::TypeDesc;
use crate::value::Value;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

type SingleFn = dyn Fn(&Args) -> Value + Send + Sync;
type PairFn = dyn Fn(&Args) -> (Value, Option<ErrorSlot>) + Send + Sync;

/// Body of a native callable
#[derive(Clone)]
pub enum NativeFn {
    /// One result
    Single(Arc<SingleFn>),
    /// Value plus error slot
    Pair(Arc<PairFn>),
}

impl NativeFn {
    #[inline]
    pub fn result_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Pair(_) => 2,
        }
    }

    fn call(&self, args: &Args) -> RawResults {
        match self {
            Self::Single(f) => RawResults::One(f(args)),
            Self::Pair(f) => {
                let (value, slot) = f(args);
                RawResults::Two(value, slot)
            }
        }
    }
}

/// A native function exposed to templates
#[derive(Clone)]
pub struct Callable {
    name: String,
    signature: Signature,
    body: NativeFn,
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

impl Callable {
    /// Validate that `body` produces as many results as `signature` declares
    pub fn from_parts(
        name: impl Into<String>,
        signature: Signature,
        body: NativeFn,
    ) -> Result<Self, ContractViolation> {
        if body.result_count() != signature.result_count() {
            return Err(ContractViolation::BodyShapeMismatch {
                body: body.result_count(),
                declared: signature.result_count(),
            });
        }
        Ok(Self {
            name: name.into(),
            signature,
            body,
        })
    }

    /// Infallible callable with a single result
    pub fn new<F>(name: impl Into<String>, params: Vec<TypeDesc>, ret: TypeDesc, f: F) -> Self
    where
        F: Fn(&Args) -> Value + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            signature: Signature::returning(params, ret),
            body: NativeFn::Single(Arc::new(f)),
        }
    }

    /// Fallible callable; `Err` travels through the error slot
    pub fn fallible<F>(name: impl Into<String>, params: Vec<TypeDesc>, ret: TypeDesc, f: F) -> Self
    where
        F: Fn(&Args) -> Result<Value, FilterError> + Send + Sync + 'static,
    {
        let body = move |args: &Args| -> (Value, Option<ErrorSlot>) {
            match f(args) {
                Ok(value) => (value, None),
                Err(err) => (Value::Nil, Some(Box::new(err) as ErrorSlot)),
            }
        };
        Self {
            name: name.into(),
            signature: Signature::fallible(params, ret),
            body: NativeFn::Pair(Arc::new(body)),
        }
    }

    /// Two-result callable whose error slot may hold anything
    pub fn paired<F>(name: impl Into<String>, signature: Signature, f: F) -> Result<Self, ContractViolation>
    where
        F: Fn(&Args) -> (Value, Option<ErrorSlot>) + Send + Sync + 'static,
    {
        Self::from_parts(name, signature, NativeFn::Pair(Arc::new(f)))
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.signature.arity()
    }

    #[inline]
    pub fn is_fallible(&self) -> bool {
        self.signature.is_fallible()
    }
}

/// Calls native callables with dynamic arguments.
///
/// Holds no per-call state; one invoker can serve many threads.
#[derive(Clone)]
pub struct Invoker {
    converter: Arc<dyn Converter>,
    config: InvokeConfig,
}

impl Default for Invoker {
    fn default() -> Self {
        Self::new(TypeCheckConverter)
    }
}

impl Invoker {
    pub fn new(converter: impl Converter + 'static) -> Self {
        Self {
            converter: Arc::new(converter),
            config: InvokeConfig::default(),
        }
    }

    pub fn with_config(mut self, config: InvokeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &InvokeConfig {
        &self.config
    }

    /// Adapt `args` to `callable`'s parameters without calling it
    pub fn adapt(&self, callable: &Callable, args: &[Value]) -> Result<Args, InvokeError> {
        adapt(
            &callable.signature,
            args,
            &self.converter,
            self.config.check_conversions,
        )
        .map_err(|err| InvokeError::Conversion {
            callable: callable.name.clone(),
            index: err.index,
            source: err.source,
        })
    }

    /// Call `callable`, reporting contract and conversion defects as
    /// fatal `InvokeError` kinds instead of aborting
    pub fn try_invoke(&self, callable: &Callable, args: &[Value]) -> Result<Value, InvokeError> {
        let _span = self
            .config
            .trace_calls
            .then(|| tracing::debug_span!("invoke", callable = %callable.name).entered());

        logging::log_invoke(&callable.name, callable.arity(), args.len());

        let adapted = self.adapt(callable, args)?;
        let raw = run_body(callable, &adapted)?;
        let outcome = adapt_results(raw);

        logging::log_invoke_result(&callable.name, outcome.is_ok());

        outcome.map_err(|err| match err {
            ResultError::Failed(err) => InvokeError::Failed(err),
            ResultError::Violation(violation) => InvokeError::Contract {
                callable: callable.name.clone(),
                violation,
            },
        })
    }

    /// Call `callable` with dynamic arguments.
    ///
    /// Returns the native's value or its declared error.
    ///
    /// # Panics
    /// When the callable breaks its contract (an error slot holding a
    /// non-error) or an argument cannot be converted, including a block
    /// value the native applies.
    pub fn invoke(&self, callable: &Callable, args: &[Value]) -> Result<Value, FilterError> {
        match self.try_invoke(callable, args) {
            Ok(value) => Ok(value),
            Err(InvokeError::Failed(err)) => Err(err),
            Err(fatal) => abort(&callable.name, &fatal),
        }
    }
}

/// Run the body, mapping a failed block conversion back to the
/// argument that supplied the block. Other panics keep unwinding.
fn run_body(callable: &Callable, args: &Args) -> Result<RawResults, InvokeError> {
    panic::catch_unwind(AssertUnwindSafe(|| callable.body.call(args))).map_err(|payload| {
        match payload.downcast::<BlockConversionFailure>() {
            Ok(failure) => InvokeError::Conversion {
                callable: callable.name.clone(),
                index: failure.index,
                source: failure.source,
            },
            Err(other) => panic::resume_unwind(other),
        }
    })
}

#[cold]
fn abort(callable: &str, fatal: &InvokeError) -> ! {
    logging::log_fatal(callable, &fatal.to_string());
    panic!("{fatal}")
}
