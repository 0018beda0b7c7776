//! filter-bridge - call typed native filters from a dynamic template language
//!
//! The interpreter hands over a callable and a list of loosely typed values.
//! This crate shapes the values to the callable's declared parameters,
//! calls it, and folds a `(value, error)` result back into one outcome.
//!
//! ```
//! use filter_bridge::{Callable, Invoker, TypeDesc, Value};
//!
//! let add = Callable::new("add", vec![TypeDesc::Int, TypeDesc::Int], TypeDesc::Int, |args| {
//!     Value::Int(args.int(0) + args.int(1))
//! });
//! let invoker = Invoker::default();
//! assert_eq!(invoker.invoke(&add, &[Value::Int(3), Value::Int(4)]).unwrap(), Value::Int(7));
//! // missing arguments take their type's zero value
//! assert_eq!(invoker.invoke(&add, &[Value::Int(3)]).unwrap(), Value::Int(3));
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod invoke;
pub mod logging;
pub mod registry;
pub mod types;
pub mod value;

// Re-export core types
pub use config::{Config, ConfigError, InvokeConfig, LoggingConfig};
pub use convert::{Converter, TypeCheckConverter};
pub use error::{BoxError, ContractViolation, ConversionError, FilterError, InvokeError};
pub use invoke::{
    Arg, Args, Callable, ErrorSlot, Invoker, NativeFn, ReturnSlot, Signature, SlotValue, Transform,
};
pub use registry::Registry;
pub use types::TypeDesc;
pub use value::Value;

/// Build an invoker and install logging from `config`
pub fn init(config: &Config, converter: impl Converter + 'static) -> Invoker {
    logging::init(&config.logging);
    logging::info!(target: "filter_bridge::invoke", "filter bridge initialized");
    Invoker::new(converter).with_config(config.invoke.clone())
}
