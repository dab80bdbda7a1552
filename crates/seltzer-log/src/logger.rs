// SPDX-License-Identifier: MIT OR Apache-2.0
use serde::Serialize;
use std::error::Error;
use std::sync::{Arc, Mutex};

use seltzer_api::Attributes;

use crate::level::Level;

/// One event handed to a [`StructuredLogger`].
#[derive(Debug, Clone, Copy)]
pub struct LogRecord<'a> {
    /// Severity.
    pub level: Level,
    /// Message, already formatted for the configured style.
    pub message: &'a str,
    /// Key/value context attached to this event.
    pub context: &'a Attributes,
    /// Underlying fault to render after the message, if any.
    pub cause: Option<&'a (dyn Error + 'static)>,
}

/// Backend receiving structured log events.
pub trait StructuredLogger {
    /// Emit one event.
    fn log(&self, record: &LogRecord<'_>);
}

impl<L: StructuredLogger + ?Sized> StructuredLogger for &L {
    fn log(&self, record: &LogRecord<'_>) {
        (**self).log(record)
    }
}

impl<L: StructuredLogger + ?Sized> StructuredLogger for Box<L> {
    fn log(&self, record: &LogRecord<'_>) {
        (**self).log(record)
    }
}

impl<L: StructuredLogger + ?Sized> StructuredLogger for Arc<L> {
    fn log(&self, record: &LogRecord<'_>) {
        (**self).log(record)
    }
}

/// `err` followed by each of its sources, outermost first.
pub fn error_chain<'a>(
    err: &'a (dyn Error + 'static),
) -> impl Iterator<Item = &'a (dyn Error + 'static)> {
    std::iter::successors(Some(err), |e: &&'a (dyn Error + 'static)| (*e).source())
}

fn chain_text(err: &(dyn Error + 'static)) -> String {
    error_chain(err)
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}

// ---------------------------------------------------------------------------
// TracingLogger
// ---------------------------------------------------------------------------

/// Forwards records to `tracing` under the `seltzer` target.
///
/// The context is rendered as a JSON object string in the `context` field,
/// so JSON subscribers see it as an encoded string rather than a nested map.
/// When a cause is present, `cause` holds its display text and
/// `cause_chain` the texts of the cause and all of its sources, joined by
/// `": "`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl StructuredLogger for TracingLogger {
    fn log(&self, record: &LogRecord<'_>) {
        let context = serde_json::to_string(record.context).unwrap_or_default();
        let cause = record.cause.map(tracing::field::display);
        let cause_chain = record.cause.map(chain_text);
        let cause_chain = cause_chain.as_deref().map(tracing::field::display);

        macro_rules! event_at {
            ($lvl:expr) => {
                tracing::event!(
                    target: "seltzer",
                    $lvl,
                    context = %context,
                    cause = cause,
                    cause_chain = cause_chain,
                    "{}",
                    record.message
                )
            };
        }

        match record.level {
            Level::Error => event_at!(tracing::Level::ERROR),
            Level::Warn => event_at!(tracing::Level::WARN),
            Level::Info => event_at!(tracing::Level::INFO),
            Level::Debug => event_at!(tracing::Level::DEBUG),
            Level::Trace => event_at!(tracing::Level::TRACE),
        }
    }
}

// ---------------------------------------------------------------------------
// CollectingLogger
// ---------------------------------------------------------------------------

/// Owned copy of a [`LogRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapturedEvent {
    /// Severity.
    pub level: Level,
    /// Formatted message.
    pub message: String,
    /// Context attached to the event.
    pub context: Attributes,
    /// Display text of the cause, if any.
    pub cause: Option<String>,
    /// Display text of the cause and each of its sources, outermost first.
    pub cause_chain: Vec<String>,
}

impl From<&LogRecord<'_>> for CapturedEvent {
    fn from(record: &LogRecord<'_>) -> Self {
        Self {
            level: record.level,
            message: record.message.to_owned(),
            context: record.context.clone(),
            cause: record.cause.map(|c| c.to_string()),
            cause_chain: record
                .cause
                .map(|c| error_chain(c).map(|e| e.to_string()).collect())
                .unwrap_or_default(),
        }
    }
}

/// Thread-safe logger that keeps every record in memory.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct CollectingLogger {
    inner: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CollectingLogger {
    /// Create an empty logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// All events recorded so far.
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.inner.lock().expect("event log poisoned").clone()
    }

    /// Remove and return all recorded events.
    pub fn take(&self) -> Vec<CapturedEvent> {
        std::mem::take(&mut *self.inner.lock().expect("event log poisoned"))
    }

    /// The most recent event.
    pub fn last(&self) -> Option<CapturedEvent> {
        self.inner.lock().expect("event log poisoned").last().cloned()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("event log poisoned").len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StructuredLogger for CollectingLogger {
    fn log(&self, record: &LogRecord<'_>) {
        let event = CapturedEvent::from(record);
        self.inner.lock().expect("event log poisoned").push(event);
    }
}
