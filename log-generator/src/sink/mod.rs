//! Destinations for generated records.
//!
//! Three sinks are provided:
//! - [`ConsoleSink`]: newline-delimited JSON on stdout.
//! - [`TcpSink`]: newline-delimited JSON over one persistent TCP connection.
//! - [`OtlpSink`]: structured log records exported through the OpenTelemetry
//!   SDK to an OTLP/HTTP collector.
use crate::config::SinkConfig;
use crate::error::Result;
use crate::record::LogRecord;
use std::fmt::Debug;

mod json;
mod otlp;

pub use json::{ConsoleSink, JsonLinesSink, TcpSink};
pub use otlp::{otlp_logs_url, OtlpSink};

/// Accepts records one at a time.
///
/// Errors from either method are fatal to the generator; implementations
/// should not retry internally.
pub trait Sink: Debug {
    /// Deliver a single record.
    fn emit(&mut self, record: &LogRecord) -> Result<()>;

    /// Flush and release the underlying resource. Called once when the
    /// emitter stops.
    fn shutdown(&mut self) -> Result<()>;
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn emit(&mut self, record: &LogRecord) -> Result<()> {
        (**self).emit(record)
    }

    fn shutdown(&mut self) -> Result<()> {
        (**self).shutdown()
    }
}

/// Open the sink described by `config`.
///
/// Dialling the TCP endpoint or building the OTLP exporter happens here, so
/// any connectivity or setup problem surfaces before the first record.
pub fn from_config(config: &SinkConfig) -> Result<Box<dyn Sink>> {
    Ok(match config {
        SinkConfig::Console => Box::new(ConsoleSink::stdout()),
        SinkConfig::Tcp { endpoint } => Box::new(TcpSink::connect(endpoint)?),
        SinkConfig::Otlp { endpoint } => Box::new(OtlpSink::from_endpoint(endpoint)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::net::TcpListener;

    #[test]
    fn console_config_opens() {
        assert!(from_config(&SinkConfig::Console).is_ok());
    }

    #[test]
    fn unreachable_tcp_endpoint_fails_setup() {
        // Bind then drop to get a port nothing listens on.
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let endpoint = format!("127.0.0.1:{port}");

        let err = from_config(&SinkConfig::Tcp {
            endpoint: endpoint.clone(),
        })
        .unwrap_err();
        match err {
            Error::Connect { endpoint: e, .. } => assert_eq!(e, endpoint),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
