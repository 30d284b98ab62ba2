//! Fabricated log records and the generator that produces them.
use chrono::{DateTime, SecondsFormat, Utc};
use opentelemetry::logs::Severity;
use rand::Rng;
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::SystemTime;

/// Label attached to every generated record.
pub const SERVICE_NAME: &str = "demo-app";

/// Canned message bodies, picked uniformly.
pub const MESSAGES: [&str; 5] = [
    "Processing user request",
    "Database query executed",
    "Cache miss occurred",
    "API endpoint called",
    "Background job completed",
];

const REQUEST_ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const REQUEST_ID_LEN: usize = 8;
const MAX_DURATION_MS: u32 = 1000;
const MAX_USER_ID: u32 = 100;

/// Severity of a generated record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    /// `INFO`
    Info,
    /// `WARN`
    Warn,
    /// `ERROR`
    Error,
    /// `DEBUG`
    Debug,
}

impl Level {
    /// All levels, in the order they are sampled from.
    pub const ALL: [Level; 4] = [Level::Info, Level::Warn, Level::Error, Level::Debug];

    /// Upper-case name used on the wire and as OTLP severity text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Debug => "DEBUG",
        }
    }

    /// OpenTelemetry severity number for this level.
    pub fn severity(&self) -> Severity {
        match self {
            Level::Info => Severity::Info,
            Level::Warn => Severity::Warn,
            Level::Error => Severity::Error,
            Level::Debug => Severity::Debug,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Synthetic request metadata. Serialized under the `log` key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Attributes {
    /// Eight lowercase alphanumeric characters.
    pub request_id: String,
    /// In `[0, 1000)`.
    pub duration_ms: u32,
    /// In `[0, 100)`.
    pub user_id: u32,
}

/// A single fabricated log record.
///
/// Serializes to the newline-delimited wire format:
///
/// ```json
/// {"timestamp":"2024-05-01T12:00:00Z","level":"INFO","message":"Cache miss occurred","service":"demo-app","log":{"request_id":"a1b2c3d4","duration_ms":421,"user_id":7}}
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    /// Generation time, rendered as RFC3339 UTC.
    #[serde(serialize_with = "serialize_rfc3339")]
    pub timestamp: SystemTime,
    /// Record severity.
    pub level: Level,
    /// One of [`MESSAGES`].
    pub message: &'static str,
    /// Always [`SERVICE_NAME`].
    pub service: &'static str,
    /// Synthetic attributes, omitted from the JSON when absent.
    #[serde(rename = "log", skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

impl LogRecord {
    /// The timestamp rendered the way it appears on the wire.
    pub fn timestamp_rfc3339(&self) -> String {
        format_rfc3339(self.timestamp)
    }
}

fn format_rfc3339(timestamp: SystemTime) -> String {
    let datetime: DateTime<Utc> = timestamp.into();
    datetime.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn serialize_rfc3339<S: Serializer>(timestamp: &SystemTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_rfc3339(*timestamp))
}

/// Produces records from an injectable random source.
///
/// Timestamps never move backwards across records produced by the same
/// generator, even if the wall clock does.
#[derive(Debug)]
pub struct RecordGenerator<R> {
    rng: R,
    last_timestamp: Option<SystemTime>,
}

impl<R: Rng> RecordGenerator<R> {
    /// Create a generator drawing from `rng`.
    pub fn new(rng: R) -> Self {
        RecordGenerator {
            rng,
            last_timestamp: None,
        }
    }

    /// Build the next record, stamped with the current time.
    pub fn next_record(&mut self) -> LogRecord {
        let now = SystemTime::now();
        let timestamp = match self.last_timestamp {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_timestamp = Some(timestamp);

        let level = Level::ALL[self.rng.random_range(0..Level::ALL.len())];
        let message = MESSAGES[self.rng.random_range(0..MESSAGES.len())];

        LogRecord {
            timestamp,
            level,
            message,
            service: SERVICE_NAME,
            attributes: Some(Attributes {
                request_id: self.request_id(),
                duration_ms: self.rng.random_range(0..MAX_DURATION_MS),
                user_id: self.rng.random_range(0..MAX_USER_ID),
            }),
        }
    }

    /// Mutable access to the random source, shared with interval sampling.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    fn request_id(&mut self) -> String {
        (0..REQUEST_ID_LEN)
            .map(|_| REQUEST_ID_CHARSET[self.rng.random_range(0..REQUEST_ID_CHARSET.len())] as char)
            .collect()
    }
}
