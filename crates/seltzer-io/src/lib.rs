// SPDX-License-Identifier: MIT OR Apache-2.0
//! I/O fault types that are also structured errors.
//!
//! [`IoError`] and [`EofError`] are ordinary `std::error::Error`s that carry
//! the full structured-error field set. Their
//! [`exception`](StructuredError::exception) accessor returns the fault
//! itself, so the structured error and the raised fault are one object.
//! Both convert into [`std::io::Error`] for APIs that must return one, and
//! can be found again with [`StructuredFault::find_in`].

#![deny(unsafe_code)]
#![warn(missing_docs)]

use std::error::Error;
use std::fmt;
use std::io;
use std::marker::PhantomData;
use std::sync::Arc;

use seltzer_api::{Attributes, Cause, InvalidArgument, StructuredError, check_error_code};

// ---------------------------------------------------------------------------
// Fault kinds
// ---------------------------------------------------------------------------

mod sealed {
    pub trait Sealed {}
}

/// Marker selecting the flavour of a [`StructuredFault`].
pub trait FaultKind: sealed::Sealed + Send + Sync + 'static {
    /// Kind used when converting into [`io::Error`].
    const IO_KIND: io::ErrorKind;
    /// Name shown in `Debug` output.
    const NAME: &'static str;
}

/// General I/O failure.
#[derive(Debug, Clone, Copy)]
pub struct Io;

/// Premature end of stream.
#[derive(Debug, Clone, Copy)]
pub struct Eof;

impl sealed::Sealed for Io {}
impl sealed::Sealed for Eof {}

impl FaultKind for Io {
    const IO_KIND: io::ErrorKind = io::ErrorKind::Other;
    const NAME: &'static str = "IoError";
}

impl FaultKind for Eof {
    const IO_KIND: io::ErrorKind = io::ErrorKind::UnexpectedEof;
    const NAME: &'static str = "EofError";
}

/// A structured I/O failure.
pub type IoError = StructuredFault<Io>;

/// A structured end-of-stream failure.
pub type EofError = StructuredFault<Eof>;

// ---------------------------------------------------------------------------
// StructuredFault
// ---------------------------------------------------------------------------

/// Fault object satisfying [`StructuredError`] with string error codes.
///
/// ```
/// use seltzer_api::StructuredError;
/// use seltzer_io::IoError;
///
/// let err = IoError::from_cause("E_READ", std::io::Error::other("disk gone"))?
///     .with_attribute("path", "/var/data");
/// assert_eq!(err.message(), "disk gone");
/// assert!(err.exception().is_some());
/// # Ok::<(), seltzer_api::InvalidArgument>(())
/// ```
pub struct StructuredFault<K> {
    error_code: String,
    message: String,
    attributes: Attributes,
    remediating_action: Option<String>,
    cause: Option<Cause>,
    _kind: PhantomData<K>,
}

impl<K: FaultKind> StructuredFault<K> {
    /// A fault with an explicit message and no cause.
    ///
    /// Fails with [`InvalidArgument::EmptyErrorCode`] if `error_code` is
    /// empty; the same holds for every constructor below.
    pub fn new(
        error_code: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self, InvalidArgument> {
        Self::from_parts(
            error_code.into(),
            message.into(),
            Attributes::new(),
            None,
            None,
        )
    }

    /// A fault with an explicit message wrapping `cause`.
    pub fn with_cause(
        error_code: impl Into<String>,
        message: impl Into<String>,
        cause: impl Error + Send + Sync + 'static,
    ) -> Result<Self, InvalidArgument> {
        Self::from_parts(
            error_code.into(),
            message.into(),
            Attributes::new(),
            None,
            Some(Arc::new(cause)),
        )
    }

    /// A fault wrapping `cause`, taking its message from the cause.
    ///
    /// The message is the cause's display text, or the cause's short type
    /// name when that text is empty.
    pub fn from_cause<E>(error_code: impl Into<String>, cause: E) -> Result<Self, InvalidArgument>
    where
        E: Error + Send + Sync + 'static,
    {
        let mut message = cause.to_string();
        if message.is_empty() {
            message = short_type_name::<E>().to_owned();
        }
        Self::from_parts(
            error_code.into(),
            message,
            Attributes::new(),
            None,
            Some(Arc::new(cause)),
        )
    }

    /// Assemble a fault from all five structured-error fields.
    ///
    /// The signature matches the builder's constructor function, so
    /// `builder.build_with(IoError::from_parts)` finishes a builder into a
    /// fault. `exception` becomes the fault's cause.
    pub fn from_parts(
        error_code: String,
        message: String,
        attributes: Attributes,
        remediating_action: Option<String>,
        exception: Option<Cause>,
    ) -> Result<Self, InvalidArgument> {
        check_error_code(error_code.as_str())?;
        Ok(Self {
            error_code,
            message,
            attributes,
            remediating_action,
            cause: exception,
            _kind: PhantomData,
        })
    }

    /// Insert an attribute, overwriting any existing value for `name`.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Insert every entry of `attributes`.
    pub fn with_attributes<I, N, V>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        self.attributes
            .extend(attributes.into_iter().map(|(n, v)| (n.into(), v.into())));
        self
    }

    /// Set the remediating action.
    pub fn with_remediating_action(mut self, action: impl Into<String>) -> Self {
        self.remediating_action = Some(action.into());
        self
    }

    /// The wrapped cause, if any.
    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    /// Find a fault of this kind carried inside an [`io::Error`].
    pub fn find_in(err: &io::Error) -> Option<&Self> {
        err.get_ref()?.downcast_ref::<Self>()
    }
}

impl<K: FaultKind> StructuredError for StructuredFault<K> {
    type Code = String;

    fn error_code(&self) -> &String {
        &self.error_code
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn remediating_action(&self) -> Option<&str> {
        self.remediating_action.as_deref()
    }

    fn exception(&self) -> Option<&(dyn Error + 'static)> {
        Some(self)
    }
}

impl<K: FaultKind> fmt::Debug for StructuredFault<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct(K::NAME);
        d.field("error_code", &self.error_code);
        d.field("message", &self.message);
        if !self.attributes.is_empty() {
            d.field("attributes", &self.attributes);
        }
        if let Some(ref action) = self.remediating_action {
            d.field("remediating_action", action);
        }
        if let Some(ref cause) = self.cause {
            d.field("cause", &cause.to_string());
        }
        d.finish()
    }
}

impl<K: FaultKind> fmt::Display for StructuredFault<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl<K: FaultKind> Error for StructuredFault<K> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl<K: FaultKind> From<StructuredFault<K>> for io::Error {
    fn from(err: StructuredFault<K>) -> Self {
        io::Error::new(K::IO_KIND, err)
    }
}

/// Last path segment of a type name, without generic arguments.
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
