//! Process logging.
//!
//! Internal diagnostics use `tracing` directly. This module adds the
//! application-facing logger: one per process, configured once, writing
//! `"<timestamp> (<user>|system) [LEVEL] message"` lines to the console
//! (through `tracing`) and to any [`LogSink`] registered for another target.
//!
//! ```
//! use statecraft::logging::{LogLevel, LogTag, LogTargets, Logger, LoggerConfig, MemorySink};
//!
//! let sink = MemorySink::new();
//! let logger = Logger::new(
//!     LoggerConfig::new(LogLevel::Info, LogTargets::DB)
//!         .with_sink(LogTargets::DB, sink.clone())
//!         .with_user("ops"),
//! );
//!
//! assert!(logger.log(LogLevel::Warning, "disk almost full", LogTag::Named("STORAGE")));
//! assert!(!logger.log(LogLevel::Trace, "noise", LogTag::default()));
//! assert!(sink.lines()[0].ends_with("(ops) [WARNING] disk almost full"));
//! ```

mod error;
mod level;
mod logger;
mod sink;
mod subscriber;

pub use error::LogError;
pub use level::{LogLevel, LogTag, LogTargets};
pub use logger::{configure, log, logger, Logger, LoggerConfig};
pub use sink::{LogSink, MemorySink};
pub use subscriber::init_console;
