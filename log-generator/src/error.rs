//! Errors raised while configuring the generator or emitting records.
use opentelemetry_otlp::ExporterBuildError;
use opentelemetry_sdk::error::OTelSdkError;
use std::io;
use thiserror::Error;

/// Every failure in this crate is fatal to the process: configuration errors
/// and sink setup errors stop it before the first record, write errors stop it
/// mid-stream. Nothing is retried.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// An endpoint is required but `OTEL_ENDPOINT` is unset or empty.
    #[error("{0} must be set")]
    MissingEndpoint(&'static str),

    /// A configuration variable holds a value that cannot be used.
    #[error("invalid value {value:?} for {var}")]
    InvalidConfig {
        /// Name of the offending variable.
        var: &'static str,
        /// The raw value that was read.
        value: String,
    },

    /// The TCP sink could not dial its endpoint.
    #[error("failed to connect to {endpoint}: {source}")]
    Connect {
        /// Address that was dialled.
        endpoint: String,
        /// Underlying socket error.
        #[source]
        source: io::Error,
    },

    /// The OTLP log exporter could not be constructed.
    #[error("failed to create OTLP log exporter: {0}")]
    ExporterBuild(#[from] ExporterBuildError),

    /// A record could not be serialized to JSON.
    #[error("failed to encode log record: {0}")]
    Encode(#[from] serde_json::Error),

    /// Writing a serialized record to the sink failed.
    #[error("failed to write log record: {0}")]
    Write(#[from] io::Error),

    /// Shutting down the OTLP logger provider failed.
    #[error("failed to shut down logger provider: {0}")]
    Shutdown(#[from] OTelSdkError),
}

/// Result type used throughout the generator.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_error_names_endpoint() {
        let err = Error::Connect {
            endpoint: "127.0.0.1:5170".to_string(),
            source: io::Error::from(io::ErrorKind::ConnectionRefused),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("failed to connect to 127.0.0.1:5170"));
    }

    #[test]
    fn io_error_converts_to_write() {
        let err: Error = io::Error::from(io::ErrorKind::BrokenPipe).into();
        assert!(matches!(err, Error::Write(_)));
    }
}
