use log_generator::{sink, Config, Emitter, SinkConfig};
use std::error::Error;
use std::io;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

fn init_diagnostics() {
    // Stdout may carry the generated records, so diagnostics go to stderr.
    // Events from the HTTP stack used by the OTLP exporter are dropped so they
    // don't drown out the generator's own output.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"))
        .add_directive("hyper=off".parse().expect("valid directive"))
        .add_directive("h2=off".parse().expect("valid directive"))
        .add_directive("reqwest=off".parse().expect("valid directive"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(fmt_layer).init();
}

fn sink_kind(config: &SinkConfig) -> &'static str {
    match config {
        SinkConfig::Console => "console",
        SinkConfig::Tcp { .. } => "tcp",
        SinkConfig::Otlp { .. } => "otlp",
    }
}

fn main() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    init_diagnostics();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(name: "LogGenerator.ConfigError", error = %err);
            return Err(err.into());
        }
    };

    let sink = match sink::from_config(&config.sink) {
        Ok(sink) => sink,
        Err(err) => {
            tracing::error!(name: "LogGenerator.SinkSetupFailed", sink = sink_kind(&config.sink), error = %err);
            return Err(err.into());
        }
    };

    let emitter = Emitter::new(sink, rand::rng()).with_max_records(config.max_records);

    let cancel = emitter.cancellation_token();
    ctrlc::set_handler(move || cancel.cancel())?;

    tracing::info!(
        name: "LogGenerator.Started",
        sink = sink_kind(&config.sink),
        max_records = ?config.max_records
    );

    emitter.run()?;
    Ok(())
}
