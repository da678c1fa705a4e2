//! Application logging

mod level;
mod logger;

pub use level::LogLevel;
pub use logger::{error_trace, format_message, LogArg, LogSink, Logger, MemorySink, TracingSink};
