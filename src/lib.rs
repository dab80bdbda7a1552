// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

pub use seltzer_api as api;
pub use seltzer_io as io;
pub use seltzer_log as log;

pub use seltzer_api::{
    Attributes, Cause, ErrorReport, InvalidArgument, SeltzerError, StructuredError,
    StructuredErrorBuilder,
};
pub use seltzer_io::{EofError, IoError};
pub use seltzer_log::{
    CollectingLogger, ContextScope, Level, LogOptions, LogRecord, MessageStyle, StructuredLogger,
    TracingLogger, emit, emit_default, error_chain,
};
