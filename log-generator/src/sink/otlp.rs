use super::Sink;
use crate::error::Result;
use crate::record::{LogRecord, SERVICE_NAME};
use opentelemetry::logs::{AnyValue, LogRecord as _, Logger as _, LoggerProvider as _};
use opentelemetry_otlp::{LogExporter, Protocol, WithExportConfig};
use opentelemetry_sdk::logs::{SdkLogger, SdkLoggerProvider};
use opentelemetry_sdk::Resource;

const OTLP_LOGS_PATH: &str = "/v1/logs";

/// Exports records as OpenTelemetry log records.
///
/// The sink owns its [`SdkLoggerProvider`]; nothing is registered globally.
/// Delivery to the collector is asynchronous, so export failures do not fail
/// [`Sink::emit`]. They are reported through the SDK's internal logs.
#[derive(Debug)]
pub struct OtlpSink {
    provider: SdkLoggerProvider,
    logger: SdkLogger,
    is_shutdown: bool,
}

impl OtlpSink {
    /// Emit through an already configured provider.
    pub fn new(provider: SdkLoggerProvider) -> Self {
        let logger = provider.logger(SERVICE_NAME);
        OtlpSink {
            provider,
            logger,
            is_shutdown: false,
        }
    }

    /// Export to the OTLP/HTTP collector at `endpoint` over plain HTTP,
    /// batching with the SDK's default flush policy.
    pub fn from_endpoint(endpoint: &str) -> Result<Self> {
        let url = otlp_logs_url(endpoint);
        let exporter = LogExporter::builder()
            .with_http()
            .with_protocol(Protocol::HttpBinary)
            .with_endpoint(url.as_str())
            .build()?;

        let provider = SdkLoggerProvider::builder()
            .with_resource(Resource::builder().with_service_name(SERVICE_NAME).build())
            .with_batch_exporter(exporter)
            .build();

        tracing::debug!(name: "OtlpSink.Initialized", endpoint = url.as_str());
        Ok(Self::new(provider))
    }
}

impl Sink for OtlpSink {
    fn emit(&mut self, record: &LogRecord) -> Result<()> {
        let mut log = self.logger.create_log_record();
        log.set_timestamp(record.timestamp);
        log.set_severity_text(record.level.as_str());
        log.set_severity_number(record.level.severity());
        log.set_body(AnyValue::from(record.message));
        log.add_attribute("service", record.service);
        if let Some(attrs) = &record.attributes {
            log.add_attribute("request_id", attrs.request_id.clone());
            log.add_attribute("duration_ms", i64::from(attrs.duration_ms));
            log.add_attribute("user_id", i64::from(attrs.user_id));
        }
        self.logger.emit(log);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        if self.is_shutdown {
            return Ok(());
        }
        self.is_shutdown = true;
        self.provider.shutdown()?;
        Ok(())
    }
}

/// Turn a configured endpoint into the OTLP/HTTP logs URL.
///
/// A bare `host:port` is treated as an insecure collector address and gets
/// `http://` and the `/v1/logs` signal path. A URL with a scheme but no path
/// gets the signal path appended; a URL with a path is used unchanged.
pub fn otlp_logs_url(endpoint: &str) -> String {
    let endpoint = endpoint.trim();
    let (scheme, rest) = endpoint.split_once("://").unwrap_or(("http", endpoint));
    let authority = rest.trim_end_matches('/');
    if authority.contains('/') {
        format!("{scheme}://{rest}")
    } else {
        format!("{scheme}://{authority}{OTLP_LOGS_PATH}")
    }
}
