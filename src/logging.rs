//! Logging utilities for the invocation bridge
//!
//! Structured `tracing` events under fixed `filter_bridge::*` targets: `invoke`, `adapt`,
//! `convert` and `fatal`. Nothing is printed until a subscriber is installed,
//! either by the host or through [`init`].

pub use tracing::{debug, error, info, trace, warn, Level};

use crate::config::{LogFormat, LogOutput, LoggingConfig};
use crate::error::ConversionError;
use crate::types::TypeDesc;
use once_cell::sync::OnceCell;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceCell<Option<WorkerGuard>> = OnceCell::new();

/// Install the global subscriber described by `config`.
///
/// Only the first call has any effect. `RUST_LOG` takes precedence over the
/// configured level and filter.
pub fn init(config: &LoggingConfig) {
    let _ = LOGGER_INITIALIZED.get_or_init(|| install(config));
}

fn install(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut directives = format!("filter_bridge={}", config.level);
        if let Some(extra) = &config.filter {
            directives.push(',');
            directives.push_str(extra);
        }
        EnvFilter::new(directives)
    });

    let (writer, guard) = match config.output {
        LogOutput::Stderr => tracing_appender::non_blocking(std::io::stderr()),
        LogOutput::Stdout => tracing_appender::non_blocking(std::io::stdout()),
        LogOutput::File => tracing_appender::non_blocking(tracing_appender::rolling::daily(
            &config.directory,
            &config.prefix,
        )),
    };

    let layer = match config.format {
        LogFormat::Pretty => fmt::layer().pretty().with_writer(writer).boxed(),
        LogFormat::Compact => fmt::layer().compact().with_writer(writer).boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(writer).boxed(),
    };

    // Host may already own the global subscriber
    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .try_init()
        .ok()
        .map(|_| guard)
}

/// Log entry into an invocation
#[inline]
pub fn log_invoke(callable: &str, arity: usize, supplied: usize) {
    trace!(
        target: "filter_bridge::invoke",
        callable,
        arity,
        supplied,
        discarded = supplied.saturating_sub(arity),
        "invoking native callable"
    );
}

/// Log the outcome of an invocation
#[inline]
pub fn log_invoke_result(callable: &str, success: bool) {
    trace!(target: "filter_bridge::invoke", callable, success, "native callable returned");
}

/// Log how one parameter slot was filled
#[inline]
pub fn log_slot(index: usize, ty: &TypeDesc, how: &'static str) {
    trace!(target: "filter_bridge::adapt", index, ty = %ty, how, "slot adapted");
}

/// Log a type conversion request
#[inline]
pub fn log_type_conversion(from: &str, to: &TypeDesc) {
    trace!(target: "filter_bridge::convert", from, to = %to, "type conversion");
}

#[inline]
pub fn log_conversion_failure(err: &ConversionError) {
    debug!(target: "filter_bridge::convert", from = err.from, to = %err.target, reason = %err.reason, "conversion failed");
}

/// Log a contract violation just before aborting
#[inline]
pub fn log_fatal(callable: &str, error: &str) {
    error!(target: "filter_bridge::fatal", callable, error, "native callable contract violated");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_functions() {
        // No subscriber installed; these must not panic
        log_invoke("upcase", 1, 3);
        log_invoke_result("upcase", true);
        log_slot(0, &TypeDesc::Int, "converted");
        log_type_conversion("string", &TypeDesc::Int);
        log_conversion_failure(&ConversionError::new("string", TypeDesc::Int, "bad digit"));
        log_fatal("upcase", "boom");
    }

    #[test]
    fn test_init_is_idempotent() {
        let config = LoggingConfig::default();
        init(&config);
        init(&config);
        assert!(LOGGER_INITIALIZED.get().is_some());
    }
}
