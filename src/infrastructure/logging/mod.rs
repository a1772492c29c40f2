//! Structured relay log
//!
//! Every entry is printed to stdout (ANSI-coloured by level) and appended to
//! `<directory>/<YYYY-MM-DD>.log`, one file per UTC day. An `auth` object in
//! the data block is always masked before serialization.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::infrastructure::config::LoggingConfig;

const RESET: &str = "\x1b[0m";
const MASK: &str = "***";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    Debug,
    Other(String),
}

impl LogLevel {
    pub fn as_str(&self) -> &str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Debug => "debug",
            LogLevel::Other(s) => s,
        }
    }

    fn color(&self) -> &'static str {
        match self {
            LogLevel::Info => "\x1b[32m",
            LogLevel::Warn => "\x1b[33m",
            LogLevel::Error => "\x1b[31m",
            LogLevel::Debug => "\x1b[36m",
            LogLevel::Other(_) => "",
        }
    }
}

impl From<&str> for LogLevel {
    fn from(s: &str) -> Self {
        match s {
            "info" => LogLevel::Info,
            "warn" => LogLevel::Warn,
            "error" => LogLevel::Error,
            "debug" => LogLevel::Debug,
            other => LogLevel::Other(other.to_string()),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// A single log entry, already redacted
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub data: Option<Value>,
}

impl LogEntry {
    pub fn new(timestamp: DateTime<Utc>, level: LogLevel, message: impl Into<String>, data: Option<&Value>) -> Self {
        Self {
            timestamp,
            level,
            message: message.into(),
            data: data.map(redact),
        }
    }

    /// `[<timestamp>] [<LEVEL>] <message>` plus a pretty-printed data block
    pub fn render(&self) -> String {
        let mut line = format!(
            "[{}] [{}] {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.level,
            self.message
        );

        if let Some(data) = &self.data {
            let block = serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
            line.push('\n');
            line.push_str(&block);
        }

        line
    }

    pub fn file_name(&self) -> String {
        format!("{}.log", self.timestamp.format("%Y-%m-%d"))
    }
}

/// Deep copy of `data` with any top-level `auth` field masked
pub fn redact(data: &Value) -> Value {
    let mut safe = data.clone();
    if let Value::Object(map) = &mut safe {
        if map.contains_key("auth") {
            map.insert(
                "auth".to_string(),
                serde_json::json!({ "username": MASK, "password": MASK }),
            );
        }
    }
    safe
}

/// Console + daily-file logger shared by every invocation
pub struct StructuredLogger {
    directory: PathBuf,
    console: bool,
    file_enabled: AtomicBool,
}

impl StructuredLogger {
    /// Create the logger, making the log directory if needed.
    ///
    /// If the directory cannot be created the logger keeps running with
    /// console output only.
    pub fn new(directory: impl Into<PathBuf>, console: bool) -> Self {
        let directory = directory.into();
        let file_enabled = match fs::create_dir_all(&directory) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    "Cannot create log directory {}: {}; logging to console only",
                    directory.display(),
                    e
                );
                false
            }
        };

        Self {
            directory,
            console,
            file_enabled: AtomicBool::new(file_enabled),
        }
    }

    pub fn from_config(config: &LoggingConfig) -> Self {
        Self::new(&config.directory, config.console)
    }

    pub fn file_logging(&self) -> bool {
        self.file_enabled.load(Ordering::Relaxed)
    }

    pub fn log(&self, level: impl Into<LogLevel>, message: &str, data: Option<&Value>) -> String {
        self.log_at(Utc::now(), level.into(), message, data)
    }

    pub fn log_at(&self, now: DateTime<Utc>, level: LogLevel, message: &str, data: Option<&Value>) -> String {
        self.log_to(&mut std::io::stdout(), now, level, message, data)
    }

    /// Log with `console` as the console sink. A failing sink is ignored.
    pub fn log_to<W: Write>(
        &self,
        console: &mut W,
        now: DateTime<Utc>,
        level: LogLevel,
        message: &str,
        data: Option<&Value>,
    ) -> String {
        let entry = LogEntry::new(now, level, message, data);
        let line = entry.render();

        if self.console {
            let _ = writeln!(console, "{}{}{}", entry.level.color(), line, RESET);
        }

        if self.file_logging() {
            let path = self.directory.join(entry.file_name());
            if let Err(e) = append_line(&path, &line) {
                // Degrade once, then stay on console
                if self.file_enabled.swap(false, Ordering::Relaxed) {
                    tracing::warn!(
                        "Cannot append to {}: {}; logging to console only",
                        path.display(),
                        e
                    );
                }
            }
        }

        line
    }

    pub fn info(&self, message: &str) -> String {
        self.log(LogLevel::Info, message, None)
    }

    pub fn warn(&self, message: &str, data: Option<&Value>) -> String {
        self.log(LogLevel::Warn, message, data)
    }

    pub fn error(&self, message: &str, data: Option<&Value>) -> String {
        self.log(LogLevel::Error, message, data)
    }

    pub fn debug(&self, message: &str, data: Option<&Value>) -> String {
        self.log(LogLevel::Debug, message, data)
    }
}

fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", line)
}

#[cfg(test)]
mod tests;
