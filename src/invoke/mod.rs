//! Invocation bridge - call typed natives with dynamic arguments
//!
//! Architecture:
//! - `signature.rs` - declared parameter types and result shape
//! - `transform.rs` - constant and identity transforms for block slots
//! - `args.rs` - dynamic arguments onto declared slots
//! - `results.rs` - value / error-slot normalization
//! - `call.rs` - `Callable` and `Invoker`

mod args;
mod call;
mod results;
mod signature;
mod transform;

pub use args::{adapt, AdaptError, Arg, Args};
pub use call::{Callable, Invoker, NativeFn};
pub use results::{adapt_results, ErrorSlot, RawResults, ResultError, SlotValue};
pub use signature::{ReturnSlot, Signature};
pub use transform::{make_constant_function, make_identity_function, Transform};
