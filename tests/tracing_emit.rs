// SPDX-License-Identifier: MIT OR Apache-2.0
//! Integration tests for `TracingLogger`: structured errors emitted through
//! `tracing` and captured by a `tracing-subscriber` fmt subscriber.

use std::io;
use std::sync::{Arc, Mutex};

use seltzer::{
    IoError, Level, LogOptions, MessageStyle, SeltzerError, TracingLogger, emit, emit_default,
};
use tracing_subscriber::fmt::MakeWriter;

// ---------------------------------------------------------------------------
// Capturing infrastructure
// ---------------------------------------------------------------------------

/// Shared buffer that implements `io::Write` + `MakeWriter` so
/// `tracing_subscriber::fmt` can write formatted events into it.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;
    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }

    fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }
}

/// Build a subscriber that captures all levels as plain text.
fn capturing_subscriber() -> (tracing::subscriber::DefaultGuard, CapturedLogs) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_target(true)
        .with_ansi(false)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (guard, logs)
}

/// Build a subscriber that captures all levels as JSON lines.
fn capturing_json_subscriber() -> (tracing::subscriber::DefaultGuard, CapturedLogs) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_writer(logs.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_target(true)
        .with_ansi(false)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (guard, logs)
}

fn disk_failure() -> SeltzerError<&'static str> {
    SeltzerError::builder("E_IO", "disk failure")
        .unwrap()
        .with_attribute("path", "/tmp/a")
        .build()
}

fn json_lines(logs: &CapturedLogs) -> Vec<serde_json::Value> {
    logs.lines()
        .iter()
        .map(|l| serde_json::from_str(l).expect("json log line"))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn error_event_has_message_and_context() {
    let (_guard, logs) = capturing_subscriber();
    emit_default(&TracingLogger, Level::Error, &disk_failure());

    let output = logs.contents();
    assert!(output.contains("ERROR"), "expected ERROR level:\n{output}");
    assert!(output.contains("seltzer"), "expected target:\n{output}");
    assert!(output.contains("disk failure"), "expected message:\n{output}");
    assert!(
        output.contains(r#""ErrorCode":"E_IO""#),
        "expected error code in context:\n{output}"
    );
    assert!(
        output.contains(r#""path":"/tmp/a""#),
        "expected attribute in context:\n{output}"
    );
    assert!(!output.contains("cause="), "no cause expected:\n{output}");
    assert!(!output.contains("cause_chain="), "no cause chain expected:\n{output}");
}

#[test]
fn each_level_maps_to_tracing_level() {
    let (_guard, logs) = capturing_json_subscriber();
    for level in Level::ALL {
        emit_default(&TracingLogger, level, &disk_failure());
    }

    let lines = json_lines(&logs);
    assert_eq!(lines.len(), Level::ALL.len());
    for (line, level) in lines.iter().zip(Level::ALL) {
        assert_eq!(line["level"], level.as_str().to_uppercase());
        assert_eq!(line["target"], "seltzer");
    }
}

#[test]
fn json_context_field_carries_all_keys() {
    let (_guard, logs) = capturing_json_subscriber();
    let err = SeltzerError::builder("E_NET", "connect failed")
        .unwrap()
        .with_attribute("host", "db1")
        .with_remediating_action("Check the firewall.")
        .build();
    emit_default(&TracingLogger, Level::Warn, &err);

    let line = &json_lines(&logs)[0];
    assert_eq!(line["fields"]["message"], "connect failed");
    let context: serde_json::Value =
        serde_json::from_str(line["fields"]["context"].as_str().unwrap()).unwrap();
    assert_eq!(
        context,
        serde_json::json!({
            "host": "db1",
            "ErrorCode": "E_NET",
            "RemediatingAction": "Check the firewall.",
        })
    );
}

#[test]
fn cause_follows_colon_message() {
    let (_guard, logs) = capturing_json_subscriber();
    let err = SeltzerError::builder("E_IO", "disk failure")
        .unwrap()
        .with_exception(io::Error::other("Printer on fire."))
        .build();
    emit_default(&TracingLogger, Level::Error, &err);

    let line = &json_lines(&logs)[0];
    assert_eq!(line["fields"]["message"], "disk failure: ");
    assert_eq!(line["fields"]["cause"], "Printer on fire.");
}

#[test]
fn fault_cause_chain_includes_root_cause() {
    let (_guard, logs) = capturing_json_subscriber();
    let fault = IoError::with_cause(
        "E_IO",
        "disk failure",
        io::Error::other("sector 7 unreadable"),
    )
    .unwrap();
    emit_default(&TracingLogger, Level::Error, &fault);

    let line = &json_lines(&logs)[0];
    assert_eq!(line["fields"]["cause"], "disk failure");
    assert_eq!(
        line["fields"]["cause_chain"],
        "disk failure: sector 7 unreadable"
    );
}

#[test]
fn message_only_style_with_cause() {
    let (_guard, logs) = capturing_json_subscriber();
    let err = SeltzerError::builder("E_IO", "disk failure")
        .unwrap()
        .with_exception(io::Error::other("Printer on fire."))
        .build();
    let opts = LogOptions::default().with_message_style(MessageStyle::MessageOnly);
    emit(&TracingLogger, Level::Info, &err, &opts);

    let line = &json_lines(&logs)[0];
    assert_eq!(line["fields"]["message"], "disk failure");
    assert_eq!(line["fields"]["cause"], "Printer on fire.");
}

#[test]
fn custom_key_names_appear_in_context() {
    let (_guard, logs) = capturing_json_subscriber();
    let err = SeltzerError::builder("ErrorCodeName", "A message.")
        .unwrap()
        .with_remediating_action("Some action.")
        .build();
    let opts = LogOptions::default()
        .with_error_code_key("CODE")
        .with_remediating_action_key("REMEDIATING");
    emit(&TracingLogger, Level::Debug, &err, &opts);

    let line = &json_lines(&logs)[0];
    let context: serde_json::Value =
        serde_json::from_str(line["fields"]["context"].as_str().unwrap()).unwrap();
    assert_eq!(context["CODE"], "ErrorCodeName");
    assert_eq!(context["REMEDIATING"], "Some action.");
    assert!(context.get("ErrorCode").is_none());
}

#[test]
fn attributes_do_not_leak_into_next_event() {
    let (_guard, logs) = capturing_json_subscriber();
    emit_default(&TracingLogger, Level::Error, &disk_failure());
    let unrelated = SeltzerError::with_message_only("E_OTHER", "unrelated").unwrap();
    emit_default(&TracingLogger, Level::Info, &unrelated);

    let lines = json_lines(&logs);
    let second: serde_json::Value =
        serde_json::from_str(lines[1]["fields"]["context"].as_str().unwrap()).unwrap();
    assert_eq!(second, serde_json::json!({"ErrorCode": "E_OTHER"}));
}

#[test]
fn filtered_levels_are_dropped_by_the_subscriber() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    emit_default(&TracingLogger, Level::Debug, &disk_failure());
    assert!(logs.contents().is_empty());
    emit_default(&TracingLogger, Level::Warn, &disk_failure());
    assert!(logs.contents().contains("disk failure"));
}
