// SPDX-License-Identifier: MIT OR Apache-2.0
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::builder::StructuredErrorBuilder;
use crate::{Attributes, Cause, InvalidArgument, StructuredError, check_error_code};

/// Immutable structured error value.
///
/// All five fields are fixed at construction. The attribute map is owned by
/// the value, so later changes to the map a caller passed in cannot reach it.
///
/// Two values are equal when code, message, attributes and remediating action
/// are equal and both carry the *same* exception (or neither carries one).
/// Exceptions are opaque, so they compare by identity.
#[derive(Clone)]
pub struct SeltzerError<C> {
    error_code: C,
    message: String,
    attributes: Attributes,
    remediating_action: Option<String>,
    exception: Option<Cause>,
}

impl<C: fmt::Display> SeltzerError<C> {
    /// Create a structured error from all five fields.
    ///
    /// Fails with [`InvalidArgument::EmptyErrorCode`] if `error_code` renders
    /// as an empty string.
    pub fn new(
        error_code: C,
        message: String,
        attributes: Attributes,
        remediating_action: Option<String>,
        exception: Option<Cause>,
    ) -> Result<Self, InvalidArgument> {
        check_error_code(&error_code)?;
        Ok(Self::from_checked(
            error_code,
            message,
            attributes,
            remediating_action,
            exception,
        ))
    }

    /// An error with only a code and message: no attributes, no remediating
    /// action, no exception.
    pub fn with_message_only(
        error_code: C,
        message: impl Into<String>,
    ) -> Result<Self, InvalidArgument> {
        Self::new(error_code, message.into(), Attributes::new(), None, None)
    }

    /// Start a mutable builder seeded with a code and initial message.
    pub fn builder(
        error_code: C,
        message: impl Into<String>,
    ) -> Result<StructuredErrorBuilder<C>, InvalidArgument> {
        StructuredErrorBuilder::new(error_code, message)
    }
}

impl<C> SeltzerError<C> {
    /// Assemble a value whose code has already been validated.
    pub(crate) fn from_checked(
        error_code: C,
        message: String,
        attributes: Attributes,
        remediating_action: Option<String>,
        exception: Option<Cause>,
    ) -> Self {
        Self {
            error_code,
            message,
            attributes,
            remediating_action,
            exception,
        }
    }

    /// The shared exception handle, if any.
    pub fn cause(&self) -> Option<&Cause> {
        self.exception.as_ref()
    }

    /// Decompose into `(code, message, attributes, remediating_action, exception)`.
    pub fn into_parts(self) -> (C, String, Attributes, Option<String>, Option<Cause>) {
        (
            self.error_code,
            self.message,
            self.attributes,
            self.remediating_action,
            self.exception,
        )
    }
}

impl<C: fmt::Display> StructuredError for SeltzerError<C> {
    type Code = C;

    fn error_code(&self) -> &C {
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
        self.exception
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl<C: PartialEq> PartialEq for SeltzerError<C> {
    fn eq(&self, other: &Self) -> bool {
        let same_exception = match (&self.exception, &other.exception) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        same_exception
            && self.error_code == other.error_code
            && self.message == other.message
            && self.attributes == other.attributes
            && self.remediating_action == other.remediating_action
    }
}

impl<C: Eq> Eq for SeltzerError<C> {}

impl<C: fmt::Debug> fmt::Debug for SeltzerError<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("SeltzerError");
        d.field("error_code", &self.error_code);
        d.field("message", &self.message);
        if !self.attributes.is_empty() {
            d.field("attributes", &self.attributes);
        }
        if let Some(ref action) = self.remediating_action {
            d.field("remediating_action", action);
        }
        if let Some(ref exc) = self.exception {
            d.field("exception", &exc.to_string());
        }
        d.finish()
    }
}

impl<C: fmt::Display> fmt::Display for SeltzerError<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code, self.message)?;
        if !self.attributes.is_empty() {
            if let Ok(attrs) = serde_json::to_string(&self.attributes) {
                write!(f, " {attrs}")?;
            }
        }
        Ok(())
    }
}

impl<C: fmt::Display + fmt::Debug> Error for SeltzerError<C> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        StructuredError::exception(self)
    }
}
