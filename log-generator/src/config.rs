//! Startup configuration read from the environment.
use crate::error::{Error, Result};
use std::env;

/// Destination address. TCP `host:port`, or the OTLP/HTTP collector when
/// [`USE_OTEL_SDK`] is enabled. Unset or empty selects the console sink.
pub const OTEL_ENDPOINT: &str = "OTEL_ENDPOINT";
/// Set to `true` (together with [`OTEL_ENDPOINT`]) to export through the
/// OpenTelemetry SDK instead of raw TCP.
pub const USE_OTEL_SDK: &str = "USE_OTEL_SDK";
/// Set to `true` to refuse to start without [`OTEL_ENDPOINT`].
pub const REQUIRE_OTEL_ENDPOINT: &str = "REQUIRE_OTEL_ENDPOINT";
/// Stop after emitting this many records. Unset means run until cancelled.
pub const LOG_GENERATOR_MAX_RECORDS: &str = "LOG_GENERATOR_MAX_RECORDS";

/// Where records are sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SinkConfig {
    /// Newline-delimited JSON on stdout.
    Console,
    /// Newline-delimited JSON over a single TCP connection.
    Tcp {
        /// `host:port` to dial.
        endpoint: String,
    },
    /// OTLP/HTTP log export through a batch processor.
    Otlp {
        /// Collector address, see [`crate::sink::otlp_logs_url`].
        endpoint: String,
    },
}

/// Resolved generator configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Selected sink.
    pub sink: SinkConfig,
    /// Optional record budget.
    pub max_records: Option<u64>,
}

impl Config {
    /// Resolve the configuration from environment variables.
    ///
    /// | `OTEL_ENDPOINT` | `USE_OTEL_SDK` | sink    |
    /// |-----------------|----------------|---------|
    /// | unset           | any            | console |
    /// | set             | not `true`     | TCP     |
    /// | set             | `true`         | OTLP    |
    pub fn from_env() -> Result<Self> {
        let endpoint = env::var(OTEL_ENDPOINT).ok().filter(|s| !s.is_empty());

        let sink = match endpoint {
            None if is_true(REQUIRE_OTEL_ENDPOINT) => {
                return Err(Error::MissingEndpoint(OTEL_ENDPOINT))
            }
            None => SinkConfig::Console,
            Some(endpoint) if is_true(USE_OTEL_SDK) => SinkConfig::Otlp { endpoint },
            Some(endpoint) => SinkConfig::Tcp { endpoint },
        };

        let max_records = match env::var(LOG_GENERATOR_MAX_RECORDS) {
            Ok(value) => match value.trim().parse::<u64>() {
                Ok(n) if n > 0 => Some(n),
                _ => {
                    return Err(Error::InvalidConfig {
                        var: LOG_GENERATOR_MAX_RECORDS,
                        value,
                    })
                }
            },
            Err(_) => None,
        };

        Ok(Config { sink, max_records })
    }
}

// Only the exact literal enables a flag.
fn is_true(var: &str) -> bool {
    env::var(var).map(|v| v == "true").unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARS: [&str; 4] = [
        OTEL_ENDPOINT,
        USE_OTEL_SDK,
        REQUIRE_OTEL_ENDPOINT,
        LOG_GENERATOR_MAX_RECORDS,
    ];

    // Runs `f` with exactly `env_vars` set; every other variable this module
    // reads is removed for the duration.
    fn run_env_test<F, R>(env_vars: &[(&'static str, &'static str)], f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let vars: Vec<(&'static str, Option<&'static str>)> = ALL_VARS
            .iter()
            .map(|&k| {
                let v = env_vars.iter().find(|(key, _)| *key == k).map(|(_, v)| *v);
                (k, v)
            })
            .collect();
        temp_env::with_vars(vars, f)
    }

    #[test]
    fn defaults_to_console() {
        let config = run_env_test(&[], Config::from_env).unwrap();
        assert_eq!(config.sink, SinkConfig::Console);
        assert_eq!(config.max_records, None);
    }

    #[test]
    fn empty_endpoint_is_unset() {
        let config = run_env_test(&[(OTEL_ENDPOINT, ""), (USE_OTEL_SDK, "true")], Config::from_env)
            .unwrap();
        assert_eq!(config.sink, SinkConfig::Console);
    }

    #[test]
    fn endpoint_without_sdk_selects_tcp() {
        let config = run_env_test(&[(OTEL_ENDPOINT, "collector:5170")], Config::from_env).unwrap();
        assert_eq!(
            config.sink,
            SinkConfig::Tcp {
                endpoint: "collector:5170".to_string()
            }
        );
    }

    #[test]
    fn sdk_flag_must_be_literal_true() {
        for flag in ["TRUE", "1", "yes", "false"] {
            let config = run_env_test(
                &[(OTEL_ENDPOINT, "collector:5170"), (USE_OTEL_SDK, flag)],
                Config::from_env,
            )
            .unwrap();
            assert!(matches!(config.sink, SinkConfig::Tcp { .. }), "flag {flag}");
        }
    }

    #[test]
    fn endpoint_with_sdk_selects_otlp() {
        let config = run_env_test(
            &[(OTEL_ENDPOINT, "collector:4318"), (USE_OTEL_SDK, "true")],
            Config::from_env,
        )
        .unwrap();
        assert_eq!(
            config.sink,
            SinkConfig::Otlp {
                endpoint: "collector:4318".to_string()
            }
        );
    }

    #[test]
    fn required_endpoint_missing_is_an_error() {
        let err = run_env_test(&[(REQUIRE_OTEL_ENDPOINT, "true")], Config::from_env).unwrap_err();
        assert!(matches!(err, Error::MissingEndpoint(OTEL_ENDPOINT)));
    }

    #[test]
    fn required_endpoint_present_is_accepted() {
        let config = run_env_test(
            &[(REQUIRE_OTEL_ENDPOINT, "true"), (OTEL_ENDPOINT, "localhost:5170")],
            Config::from_env,
        )
        .unwrap();
        assert!(matches!(config.sink, SinkConfig::Tcp { .. }));
    }

    #[test]
    fn max_records_parses() {
        let config = run_env_test(&[(LOG_GENERATOR_MAX_RECORDS, "12")], Config::from_env).unwrap();
        assert_eq!(config.max_records, Some(12));
    }

    #[test]
    fn max_records_rejects_garbage_and_zero() {
        for value in ["abc", "0", "-3"] {
            let err = run_env_test(&[(LOG_GENERATOR_MAX_RECORDS, value)], Config::from_env)
                .unwrap_err();
            assert!(
                matches!(err, Error::InvalidConfig { var: LOG_GENERATOR_MAX_RECORDS, .. }),
                "value {value}"
            );
        }
    }
}
