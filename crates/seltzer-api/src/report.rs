// SPDX-License-Identifier: MIT OR Apache-2.0
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::value::SeltzerError;
use crate::{Attributes, InvalidArgument, StructuredError};

/// Serialisable snapshot of any [`StructuredError`].
///
/// The error code is captured in its rendered form and the exception as its
/// display text, since neither is serialisable in general.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorReport {
    /// Rendered error code.
    pub error_code: String,
    /// Human-readable message.
    pub message: String,
    /// Diagnostic attributes.
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    /// Remediating action, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediating_action: Option<String>,
    /// Display text of the exception, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception_message: Option<String>,
}

impl ErrorReport {
    /// Capture the fields of `error`.
    pub fn from_error<E: StructuredError + ?Sized>(error: &E) -> Self {
        Self {
            error_code: error.error_code().to_string(),
            message: error.message().to_owned(),
            attributes: error.attributes().clone(),
            remediating_action: error.remediating_action().map(str::to_owned),
            exception_message: error.exception().map(|e| e.to_string()),
        }
    }

    /// Rebuild a value from the report. The exception cannot be restored.
    pub fn into_error(self) -> Result<SeltzerError<String>, InvalidArgument> {
        SeltzerError::new(
            self.error_code,
            self.message,
            self.attributes,
            self.remediating_action,
            None,
        )
    }
}
