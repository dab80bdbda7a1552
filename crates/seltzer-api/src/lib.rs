// SPDX-License-Identifier: MIT OR Apache-2.0
//! Structured error capability set, value type, and builder.
//!
//! Every structured error carries an error code (any printable type chosen by
//! the producer), a human-readable message, string key-value attributes, an
//! optional remediating action, and an optional underlying exception. The
//! [`StructuredError`] trait is the contract consumers program against;
//! [`SeltzerError`] is the plain immutable value implementation, and
//! [`StructuredErrorBuilder`] accumulates fields before freezing them into
//! any output shape.
//!
//! ```
//! use seltzer_api::{SeltzerError, StructuredError};
//!
//! let err = SeltzerError::builder("E_IO", "disk failure")?
//!     .with_attribute("path", "/tmp/a")
//!     .with_remediating_action("Check the disk.")
//!     .build();
//!
//! assert_eq!(err.error_code(), &"E_IO");
//! assert_eq!(err.attributes()["path"], "/tmp/a");
//! # Ok::<(), seltzer_api::InvalidArgument>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod report;
mod value;

pub use builder::StructuredErrorBuilder;
pub use report::ErrorReport;
pub use value::SeltzerError;

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// String-keyed, string-valued diagnostic facts attached to an error.
///
/// Ordered so that rendering and iteration are deterministic.
pub type Attributes = BTreeMap<String, String>;

/// Shared handle to an underlying fault.
pub type Cause = Arc<dyn Error + Send + Sync + 'static>;

// ---------------------------------------------------------------------------
// InvalidArgument
// ---------------------------------------------------------------------------

/// Rejected constructor input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidArgument {
    /// The error code renders as an empty string.
    #[error("error code must not be empty")]
    EmptyErrorCode,
}

/// Reject an error code whose `Display` output is empty.
///
/// Every constructor of a structured error runs this before storing a code.
pub fn check_error_code<C: fmt::Display + ?Sized>(code: &C) -> Result<(), InvalidArgument> {
    // Display into a flag writer so large codes are not allocated.
    struct SawText(bool);
    impl fmt::Write for SawText {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            self.0 |= !s.is_empty();
            Ok(())
        }
    }
    let mut seen = SawText(false);
    let _ = fmt::write(&mut seen, format_args!("{code}"));
    if seen.0 {
        Ok(())
    } else {
        Err(InvalidArgument::EmptyErrorCode)
    }
}

// ---------------------------------------------------------------------------
// StructuredError
// ---------------------------------------------------------------------------

/// The structured-error capability set.
///
/// Implemented by plain values ([`SeltzerError`]), by user-defined records,
/// and by fault types that are themselves `std::error::Error`s. Consumers
/// such as the logging adapter only ever see this trait.
///
/// A fault type that *is* the exception returns itself from
/// [`exception`](StructuredError::exception), so the structured error and
/// the raised fault share one identity.
pub trait StructuredError {
    /// Type of the error code.
    type Code: fmt::Display;

    /// Stable identifier for the error class.
    fn error_code(&self) -> &Self::Code;

    /// Human-readable description.
    fn message(&self) -> &str;

    /// Diagnostic attributes; empty when there are none.
    fn attributes(&self) -> &Attributes;

    /// Advice for resolving the error, if any.
    fn remediating_action(&self) -> Option<&str> {
        None
    }

    /// The underlying fault, if any.
    fn exception(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

impl<E: StructuredError + ?Sized> StructuredError for &E {
    type Code = E::Code;

    fn error_code(&self) -> &Self::Code {
        (**self).error_code()
    }
    fn message(&self) -> &str {
        (**self).message()
    }
    fn attributes(&self) -> &Attributes {
        (**self).attributes()
    }
    fn remediating_action(&self) -> Option<&str> {
        (**self).remediating_action()
    }
    fn exception(&self) -> Option<&(dyn Error + 'static)> {
        (**self).exception()
    }
}

impl<E: StructuredError + ?Sized> StructuredError for Box<E> {
    type Code = E::Code;

    fn error_code(&self) -> &Self::Code {
        (**self).error_code()
    }
    fn message(&self) -> &str {
        (**self).message()
    }
    fn attributes(&self) -> &Attributes {
        (**self).attributes()
    }
    fn remediating_action(&self) -> Option<&str> {
        (**self).remediating_action()
    }
    fn exception(&self) -> Option<&(dyn Error + 'static)> {
        (**self).exception()
    }
}

impl<E: StructuredError + ?Sized> StructuredError for Arc<E> {
    type Code = E::Code;

    fn error_code(&self) -> &Self::Code {
        (**self).error_code()
    }
    fn message(&self) -> &str {
        (**self).message()
    }
    fn attributes(&self) -> &Attributes {
        (**self).attributes()
    }
    fn remediating_action(&self) -> Option<&str> {
        (**self).remediating_action()
    }
    fn exception(&self) -> Option<&(dyn Error + 'static)> {
        (**self).exception()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
