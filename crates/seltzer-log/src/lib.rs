// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![warn(missing_docs)]
//!
//! Projects any [`StructuredError`] onto exactly one structured log event.

pub mod context;
mod level;
mod logger;
mod options;

pub use context::ContextScope;
pub use level::{Level, ParseLevelError};
pub use logger::{
    CapturedEvent, CollectingLogger, LogRecord, StructuredLogger, TracingLogger, error_chain,
};
pub use options::{DEFAULT_ERROR_CODE_KEY, DEFAULT_REMEDIATING_ACTION_KEY, LogOptions, MessageStyle};

use seltzer_api::StructuredError;

/// Log `error` to `logger` at `level`.
///
/// The attributes, then the error code under
/// [`LogOptions::error_code_key`], then (if present) the remediating action
/// under [`LogOptions::remediating_action_key`] are written to the ambient
/// [`context`]. A later write wins on a key clash, so the code is never
/// shadowed by an attribute of the same name. One event is then emitted with
/// the message formatted per [`LogOptions::message_style`] and the error's
/// exception as its cause.
///
/// The keys written here are released before returning, including when the
/// logger panics. Keys set by an enclosing [`ContextScope`] remain visible to
/// the event and survive the call.
pub fn emit<L, E>(logger: &L, level: Level, error: &E, options: &LogOptions)
where
    L: StructuredLogger + ?Sized,
    E: StructuredError + ?Sized,
{
    let mut scope = ContextScope::enter();
    for (key, value) in error.attributes() {
        scope.insert(key.as_str(), value.as_str());
    }
    scope.insert(options.error_code_key.as_str(), error.error_code().to_string());
    if let Some(action) = error.remediating_action() {
        scope.insert(options.remediating_action_key.as_str(), action);
    }

    let cause = error.exception();
    let message = options.message_style.render(error.message(), cause.is_some());
    let context = context::current();
    logger.log(&LogRecord {
        level,
        message: &message,
        context: &context,
        cause,
    });
}

/// [`emit`] with [`LogOptions::default`]: keys `ErrorCode` and
/// `RemediatingAction`, colon message style.
pub fn emit_default<L, E>(logger: &L, level: Level, error: &E)
where
    L: StructuredLogger + ?Sized,
    E: StructuredError + ?Sized,
{
    emit(logger, level, error, &LogOptions::default())
}
