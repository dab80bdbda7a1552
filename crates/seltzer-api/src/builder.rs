// SPDX-License-Identifier: MIT OR Apache-2.0
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::value::SeltzerError;
use crate::{Attributes, Cause, InvalidArgument, check_error_code};

/// Mutable accumulator for structured errors.
///
/// The error code is fixed at creation; every other field can be updated any
/// number of times before a terminal `build`. Attribute writes are
/// last-write-wins per key. There is no way to clear a remediating action or
/// exception once set.
///
/// A builder is meant to have a single owner between creation and `build`.
/// Both build forms hand over a snapshot of the current state, so the
/// produced value is unaffected by anything done to the builder afterwards.
///
/// ```
/// use seltzer_api::{SeltzerError, StructuredError};
///
/// let err = SeltzerError::builder("E_NET", "connect failed")?
///     .with_attribute("host", "db1")
///     .with_message("connect refused")
///     .build();
/// assert_eq!(err.message(), "connect refused");
/// # Ok::<(), seltzer_api::InvalidArgument>(())
/// ```
#[derive(Clone)]
pub struct StructuredErrorBuilder<C> {
    error_code: C,
    message: String,
    attributes: Attributes,
    remediating_action: Option<String>,
    exception: Option<Cause>,
}

impl<C: fmt::Display> StructuredErrorBuilder<C> {
    /// Create a builder with the given code and initial message.
    pub fn new(error_code: C, message: impl Into<String>) -> Result<Self, InvalidArgument> {
        check_error_code(&error_code)?;
        Ok(Self {
            error_code,
            message: message.into(),
            attributes: Attributes::new(),
            remediating_action: None,
            exception: None,
        })
    }
}

impl<C> StructuredErrorBuilder<C> {
    /// Replace the message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Insert an attribute, overwriting any existing value for `name`.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Insert every entry of `attributes`, in its iteration order.
    ///
    /// Equivalent to calling [`with_attribute`](Self::with_attribute) once per
    /// entry, so on key collision the most recent write wins.
    pub fn with_attributes<I, K, V>(self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        attributes
            .into_iter()
            .fold(self, |b, (k, v)| b.with_attribute(k, v))
    }

    /// Set the remediating action.
    pub fn with_remediating_action(mut self, action: impl Into<String>) -> Self {
        self.remediating_action = Some(action.into());
        self
    }

    /// Set the exception.
    pub fn with_exception(self, exception: impl Error + Send + Sync + 'static) -> Self {
        self.with_cause(Arc::new(exception))
    }

    /// Set the exception from an existing shared handle.
    pub fn with_cause(mut self, cause: Cause) -> Self {
        self.exception = Some(cause);
        self
    }

    /// The error code this builder was created with.
    pub fn error_code(&self) -> &C {
        &self.error_code
    }

    /// The current message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The attributes accumulated so far.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

impl<C: Clone> StructuredErrorBuilder<C> {
    /// Freeze the accumulated state through a constructor function.
    ///
    /// `construct` receives `(code, message, attributes, remediating_action,
    /// exception)`, where `attributes` is a snapshot of the map at the moment
    /// of the call. This lets one accumulation routine produce a plain value,
    /// a fault type, or any other shape.
    pub fn build_with<T, F>(&self, construct: F) -> T
    where
        F: FnOnce(C, String, Attributes, Option<String>, Option<Cause>) -> T,
    {
        construct(
            self.error_code.clone(),
            self.message.clone(),
            self.attributes.clone(),
            self.remediating_action.clone(),
            self.exception.clone(),
        )
    }

    /// Freeze the accumulated state into a [`SeltzerError`].
    pub fn build(&self) -> SeltzerError<C> {
        // The code was validated in `new`.
        self.build_with(SeltzerError::from_checked)
    }
}

impl<C: fmt::Debug> fmt::Debug for StructuredErrorBuilder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuredErrorBuilder")
            .field("error_code", &self.error_code)
            .field("message", &self.message)
            .field("attributes", &self.attributes)
            .field("remediating_action", &self.remediating_action)
            .field("exception", &self.exception.as_ref().map(|e| e.to_string()))
            .finish()
    }
}
