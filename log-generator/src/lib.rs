//! Synthetic log traffic for exercising log pipelines.
//!
//! An [`Emitter`] builds one fabricated [`LogRecord`] at a time (random level,
//! canned message, synthetic request attributes) and hands it to a [`Sink`],
//! pausing two to four seconds between records. Sinks write newline-delimited
//! JSON to stdout or a TCP socket, or export OpenTelemetry log records to an
//! OTLP/HTTP collector.
//!
//! # Examples
//!
//! ```no_run
//! use log_generator::{sink, Config, Emitter};
//!
//! # fn main() -> Result<(), log_generator::Error> {
//! let config = Config::from_env()?;
//! let sink = sink::from_config(&config.sink)?;
//! let emitted = Emitter::new(sink, rand::rng())
//!     .with_max_records(config.max_records)
//!     .run()?;
//! eprintln!("emitted {emitted} records");
//! # Ok(())
//! # }
//! ```
#![warn(missing_debug_implementations, missing_docs)]

mod cancel;
pub mod config;
mod emitter;
mod error;
pub mod record;
pub mod sink;

pub use cancel::CancellationToken;
pub use config::{Config, SinkConfig};
pub use emitter::{Emitter, Interval};
pub use error::{Error, Result};
pub use record::{Level, LogRecord, RecordGenerator};
pub use sink::Sink;
