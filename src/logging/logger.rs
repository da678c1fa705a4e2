//! Level-gated application logger
//!
//! A `Logger` is built once at startup and handed to everything that needs
//! it. Clones share the same threshold, so changing the level through one
//! handle (for instance from the admin endpoint) affects every holder.

use serde_json::Value;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};

use super::LogLevel;

/// Destination for formatted log lines
pub trait LogSink: Send + Sync {
    fn write(&self, level: LogLevel, line: &str);
}

/// Forwards lines to `tracing` under the `genie::app` target
#[derive(Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, level: LogLevel, line: &str) {
        match level {
            LogLevel::Debug => tracing::debug!(target: "genie::app", "{}", line),
            LogLevel::Info => tracing::info!(target: "genie::app", "{}", line),
            LogLevel::Warning => tracing::warn!(target: "genie::app", "{}", line),
            LogLevel::Error => tracing::error!(target: "genie::app", "{}", line),
            LogLevel::Critical => {
                tracing::error!(target: "genie::app", critical = true, "{}", line)
            }
        }
    }
}

/// Keeps every emitted line in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<(LogLevel, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of emitted lines
    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Whether any emitted line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|(_, line)| line.contains(needle))
    }

    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.clear();
        }
    }
}

impl LogSink for MemorySink {
    fn write(&self, level: LogLevel, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, line.to_string()));
        }
    }
}

/// Extra argument appended to a log message
#[derive(Debug, Clone)]
pub enum LogArg {
    /// Structured data, rendered as pretty JSON
    Value(Value),
    /// Error rendered with its cause chain
    Trace(String),
}

impl LogArg {
    pub fn error(err: &(dyn std::error::Error + 'static)) -> Self {
        LogArg::Trace(error_trace(err))
    }

    fn render(&self) -> String {
        match self {
            LogArg::Value(Value::String(s)) => s.clone(),
            LogArg::Value(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            LogArg::Trace(trace) => trace.clone(),
        }
    }
}

impl From<Value> for LogArg {
    fn from(value: Value) -> Self {
        LogArg::Value(value)
    }
}

/// Render an error followed by each of its sources
pub fn error_trace(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str("\n  caused by: ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

/// Format a line as `[timestamp] [LEVEL] message` plus one block per argument
pub fn format_message(level: LogLevel, message: &str, args: &[LogArg]) -> String {
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    let mut line = format!("[{}] [{}] {}", timestamp, level, message);
    for arg in args {
        line.push('\n');
        line.push_str(&arg.render());
    }
    line
}

#[derive(Clone)]
pub struct Logger {
    threshold: Arc<AtomicU8>,
    sink: Arc<dyn LogSink>,
}

impl Logger {
    /// Create a logger that emits through `tracing`
    pub fn new(level: LogLevel) -> Self {
        Self::with_sink(level, Arc::new(TracingSink))
    }

    pub fn with_sink(level: LogLevel, sink: Arc<dyn LogSink>) -> Self {
        Self {
            threshold: Arc::new(AtomicU8::new(level as u8)),
            sink,
        }
    }

    /// Current minimum severity
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.threshold.load(Ordering::Relaxed))
    }

    /// Change the minimum severity and announce it
    pub fn set_level(&self, level: LogLevel) {
        self.threshold.store(level as u8, Ordering::Relaxed);
        self.info(&format!("Log level set to {}", level), &[]);
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level()
    }

    pub fn log(&self, level: LogLevel, message: &str, args: &[LogArg]) {
        if self.enabled(level) {
            self.sink.write(level, &format_message(level, message, args));
        }
    }

    pub fn debug(&self, message: &str, args: &[LogArg]) {
        self.log(LogLevel::Debug, message, args);
    }

    pub fn info(&self, message: &str, args: &[LogArg]) {
        self.log(LogLevel::Info, message, args);
    }

    pub fn warning(&self, message: &str, args: &[LogArg]) {
        self.log(LogLevel::Warning, message, args);
    }

    pub fn error(&self, message: &str, args: &[LogArg]) {
        self.log(LogLevel::Error, message, args);
    }

    pub fn critical(&self, message: &str, args: &[LogArg]) {
        self.log(LogLevel::Critical, message, args);
    }

    /// Debug line for an outgoing HTTP request
    pub fn log_request(&self, method: &str, url: &str, body: Option<&Value>) {
        if !self.enabled(LogLevel::Debug) {
            return;
        }
        let body = body.cloned().unwrap_or_else(|| Value::from("No body"));
        self.debug(
            &format!("{} Request to {}", method, url),
            &[serde_json::json!({ "method": method, "url": url, "body": body }).into()],
        );
    }

    /// Debug line for a received HTTP response
    pub fn log_response(&self, method: &str, url: &str, status: u16, data: &Value) {
        if !self.enabled(LogLevel::Debug) {
            return;
        }
        self.debug(
            &format!("{} Response from {} ({})", method, url, status),
            &[serde_json::json!({
                "method": method,
                "url": url,
                "status": status,
                "data": data,
            })
            .into()],
        );
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::default())
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger").field("level", &self.level()).finish()
    }
}
