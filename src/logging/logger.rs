//! The process-wide logger.
//!
//! There is at most one [`Logger`] per process. [`configure`] creates it and
//! every later call returns that same instance; [`log`] writes through it and
//! fails until it exists.

use super::error::LogError;
use super::level::{LogLevel, LogTag, LogTargets};
use super::sink::LogSink;
use chrono::Utc;
use std::env;
use std::fmt;
use std::sync::{Arc, OnceLock};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Logger settings.
#[derive(Clone)]
pub struct LoggerConfig {
    level: LogLevel,
    targets: LogTargets,
    sinks: Vec<(LogTargets, Arc<dyn LogSink>)>,
    user: Option<String>,
}

impl LoggerConfig {
    pub fn new(level: LogLevel, targets: LogTargets) -> Self {
        Self {
            level,
            targets,
            sinks: Vec::new(),
            user: None,
        }
    }

    /// Register `sink` for every bit in `target`.
    pub fn with_sink(mut self, target: LogTargets, sink: impl LogSink + 'static) -> Self {
        self.sinks.push((target, Arc::new(sink)));
        self
    }

    /// Attribute lines to `user` instead of `system`.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Read settings from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `STATECRAFT_LOG_LEVEL`: minimum level (default: error)
    /// - `STATECRAFT_LOG_TARGETS`: `|` separated targets (default: console)
    /// - `STATECRAFT_LOG_USER`: user the lines are attributed to (default: none)
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let level = env::var("STATECRAFT_LOG_LEVEL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(LogLevel::Error);

        let targets = env::var("STATECRAFT_LOG_TARGETS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(LogTargets::CONSOLE);

        let config = Self::new(level, targets);
        match env::var("STATECRAFT_LOG_USER") {
            Ok(user) if !user.trim().is_empty() => config.with_user(user),
            _ => config,
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn targets(&self) -> LogTargets {
        self.targets
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::new(LogLevel::Error, LogTargets::CONSOLE)
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("level", &self.level)
            .field("targets", &self.targets)
            .field("sinks", &self.sinks.len())
            .field("user", &self.user)
            .finish()
    }
}

/// Formats lines and fans them out to the configured targets.
#[derive(Debug)]
pub struct Logger {
    config: LoggerConfig,
}

impl Logger {
    pub fn new(config: LoggerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Whether a message at `level` tagged `tag` passes the level filter.
    pub fn enabled(&self, level: LogLevel, tag: LogTag) -> bool {
        tag == LogTag::Assert || level >= self.config.level
    }

    /// Write `message`. Returns whether a line was emitted.
    pub fn log(&self, level: LogLevel, message: &str, tag: LogTag) -> bool {
        if !self.enabled(level, tag) {
            return false;
        }

        let line = self.format_line(level, message);

        if self.config.targets.contains(LogTargets::CONSOLE) {
            emit_console(level, tag, &line);
        }

        for (target, sink) in &self.config.sinks {
            if target.intersects(self.config.targets - LogTargets::CONSOLE) {
                sink.write_line(&line);
            }
        }

        true
    }

    /// `<timestamp> (<user>|system) [LEVEL] message`, timestamp in UTC.
    pub fn format_line(&self, level: LogLevel, message: &str) -> String {
        let Some(label) = level.label() else {
            return message.to_string();
        };
        format!(
            "{} ({}) [{}] {}",
            Utc::now().format(TIMESTAMP_FORMAT),
            self.config.user().unwrap_or("system"),
            label,
            message
        )
    }
}

fn emit_console(level: LogLevel, tag: LogTag, line: &str) {
    let tag = tag.as_str();
    match level {
        LogLevel::Error | LogLevel::Fatal => tracing::error!(tag, "{line}"),
        LogLevel::Warning => tracing::warn!(tag, "{line}"),
        LogLevel::Info => tracing::info!(tag, "{line}"),
        LogLevel::Debug => tracing::debug!(tag, "{line}"),
        LogLevel::Trace | LogLevel::None => tracing::trace!(tag, "{line}"),
    }
}

/// Create the process logger from `config`, or return the one that exists.
///
/// Only the first call's settings take effect. That call also writes a
/// startup line tagged [`LogTag::Assert`], followed by a `USER: <id>` line
/// when a user is configured.
pub fn configure(config: LoggerConfig) -> &'static Logger {
    configure_in(&LOGGER, config)
}

/// The process logger, once [`configure`] has run.
pub fn logger() -> Option<&'static Logger> {
    LOGGER.get()
}

/// Write `message` through the process logger.
///
/// Returns whether a line was emitted, or [`LogError::NotConfigured`] before
/// [`configure`] has been called.
pub fn log(level: LogLevel, message: &str, tag: LogTag) -> Result<bool, LogError> {
    log_in(&LOGGER, level, message, tag)
}

fn configure_in(slot: &OnceLock<Logger>, config: LoggerConfig) -> &Logger {
    let mut started = false;
    let logger = slot.get_or_init(|| {
        started = true;
        Logger::new(config)
    });

    if started {
        logger.log(
            LogLevel::Info,
            &format!("logger started at level {}", logger.config.level),
            LogTag::Assert,
        );
        if let Some(user) = logger.config.user() {
            logger.log(LogLevel::Info, &format!("USER: {user}"), LogTag::Assert);
        }
    }
    logger
}

fn log_in(
    slot: &OnceLock<Logger>,
    level: LogLevel,
    message: &str,
    tag: LogTag,
) -> Result<bool, LogError> {
    slot.get()
        .map(|logger| logger.log(level, message, tag))
        .ok_or(LogError::NotConfigured)
}
