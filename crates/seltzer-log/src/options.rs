// SPDX-License-Identifier: MIT OR Apache-2.0
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Default context key for the error code.
pub const DEFAULT_ERROR_CODE_KEY: &str = "ErrorCode";

/// Default context key for the remediating action.
pub const DEFAULT_REMEDIATING_ACTION_KEY: &str = "RemediatingAction";

/// How the message is formatted when the error carries an exception.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageStyle {
    /// Append `": "` so the backend's rendering of the cause reads as a
    /// continuation of the message.
    #[default]
    MessageColonException,
    /// Pass the message through unchanged.
    MessageOnly,
}

impl MessageStyle {
    /// Render `message` for an event that does or does not carry a cause.
    pub fn render<'a>(&self, message: &'a str, has_cause: bool) -> Cow<'a, str> {
        match self {
            Self::MessageColonException if has_cause => Cow::Owned(format!("{message}: ")),
            _ => Cow::Borrowed(message),
        }
    }
}

/// Settings for projecting a structured error onto a log event.
///
/// Every field has a default, so a partial table in a host's configuration
/// file is enough:
///
/// ```
/// use seltzer_log::{LogOptions, MessageStyle};
///
/// let opts: LogOptions = serde_json::from_str(r#"{"message_style": "MESSAGE_ONLY"}"#)?;
/// assert_eq!(opts.error_code_key, "ErrorCode");
/// assert_eq!(opts.message_style, MessageStyle::MessageOnly);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LogOptions {
    /// Context key carrying the rendered error code.
    pub error_code_key: String,
    /// Context key carrying the remediating action, when present.
    pub remediating_action_key: String,
    /// Message formatting when a cause is present.
    pub message_style: MessageStyle,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            error_code_key: DEFAULT_ERROR_CODE_KEY.into(),
            remediating_action_key: DEFAULT_REMEDIATING_ACTION_KEY.into(),
            message_style: MessageStyle::default(),
        }
    }
}

impl LogOptions {
    /// Use `key` for the error code.
    pub fn with_error_code_key(mut self, key: impl Into<String>) -> Self {
        self.error_code_key = key.into();
        self
    }

    /// Use `key` for the remediating action.
    pub fn with_remediating_action_key(mut self, key: impl Into<String>) -> Self {
        self.remediating_action_key = key.into();
        self
    }

    /// Use `style` for message formatting.
    pub fn with_message_style(mut self, style: MessageStyle) -> Self {
        self.message_style = style;
        self
    }
}
