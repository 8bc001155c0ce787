//! Structured logging - JSON log lines for machine parsing
//!
//! One JSON object per line to stderr and, when configured, a log file:
//!   {"timestamp":"2026-08-07T12:34:56Z","level":"error","component":"STORAGE","event":"save_tasks","message":"..."}
//!
//! Diagnostics never travel through the speech channel; handlers log
//! storage and output failures here and keep the conversation going.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

lazy_static::lazy_static! {
    static ref SINK: Mutex<Sink> = Mutex::new(Sink::default());
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Serialize)]
struct LogLine<'a> {
    timestamp: DateTime<Utc>,
    level: &'static str,
    component: &'a str,
    event: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

struct Sink {
    min_level: LogLevel,
    file: Option<File>,
}

impl Default for Sink {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            file: None,
        }
    }
}

/// Configure the logger. Safe to call once at startup; later calls replace
/// the previous configuration.
pub fn init(file_path: Option<PathBuf>, min_level: LogLevel) {
    let file = file_path.and_then(|path| {
        OpenOptions::new().create(true).append(true).open(path).ok()
    });
    if let Ok(mut sink) = SINK.lock() {
        sink.min_level = min_level;
        sink.file = file;
    }
}

pub fn info(component: &str, event: &str, data: serde_json::Value) {
    emit(LogLevel::Info, component, event, None, Some(data));
}

pub fn warn(component: &str, event: &str, message: &str) {
    emit(LogLevel::Warn, component, event, Some(message), None);
}

pub fn error(component: &str, event: &str, message: &str) {
    emit(LogLevel::Error, component, event, Some(message), None);
}

fn emit(
    level: LogLevel,
    component: &str,
    event: &str,
    message: Option<&str>,
    data: Option<serde_json::Value>,
) {
    let Ok(mut sink) = SINK.lock() else {
        return;
    };
    if level < sink.min_level {
        return;
    }

    let line = LogLine {
        timestamp: Utc::now(),
        level: level.as_str(),
        component,
        event,
        message,
        data,
    };
    let rendered = serde_json::to_string(&line).unwrap_or_else(|_| format!("{:?}", line));

    eprintln!("{}", rendered);
    if let Some(ref mut file) = sink.file {
        let _ = writeln!(file, "{}", rendered);
    }
}
