//! Telemetry initialization.
//!
//! Sinks, in priority order:
//! - `OTEL_EXPORTER_OTLP_ENDPOINT=stderr` → JSON events to stderr
//! - `OTEL_EXPORTER_OTLP_ENDPOINT=http://...` → OTLP HTTP export (traces + logs)
//! - `[log] file` in `edlist.toml` → JSON events appended to that file
//! - otherwise → no-op
//!
//! The terminal UI owns stdout/stderr while it runs, so the file sink is the
//! one to use when debugging `edlist ui`.
//!
//! The level filter comes from `RUST_LOG`, then `[log] filter`, then `info`.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use edlist_core::config::LogConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// Opaque guard — dropping it flushes and shuts down the OTLP pipeline.
/// Hold this in `main()` until exit.
pub struct TelemetryGuard {
    #[cfg(feature = "otel")]
    trace_provider: Option<opentelemetry_sdk::trace::SdkTracerProvider>,
    #[cfg(feature = "otel")]
    log_provider: Option<opentelemetry_sdk::logs::SdkLoggerProvider>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        #[cfg(feature = "otel")]
        {
            if let Some(provider) = self.trace_provider.take()
                && let Err(e) = provider.shutdown()
            {
                eprintln!("otel trace shutdown error: {e}");
            }
            if let Some(provider) = self.log_provider.take()
                && let Err(e) = provider.shutdown()
            {
                eprintln!("otel log shutdown error: {e}");
            }
        }
    }
}

/// Initialize telemetry from the environment and the `[log]` config section.
#[must_use]
pub fn init(log: &LogConfig) -> TelemetryGuard {
    let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok();

    match endpoint.as_deref() {
        Some("stderr") => init_stderr(log),
        #[cfg(feature = "otel")]
        Some(e) if !e.is_empty() => init_otlp(log),
        #[cfg(not(feature = "otel"))]
        Some(e) if !e.is_empty() => {
            eprintln!(
                "warning: OTEL_EXPORTER_OTLP_ENDPOINT set but edlist built without 'otel' feature"
            );
            init_file_or_noop(log)
        }
        _ => init_file_or_noop(log),
    }
}

fn filter(log: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| config_filter(log))
}

/// `[log] filter`, falling back to `info` when absent or unparseable.
fn config_filter(log: &LogConfig) -> EnvFilter {
    EnvFilter::try_new(log.filter.as_deref().unwrap_or("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

const fn noop() -> TelemetryGuard {
    TelemetryGuard {
        #[cfg(feature = "otel")]
        trace_provider: None,
        #[cfg(feature = "otel")]
        log_provider: None,
    }
}

fn init_file_or_noop(log: &LogConfig) -> TelemetryGuard {
    match &log.file {
        Some(path) => init_file(log, path),
        None => noop(),
    }
}

/// JSON events to stderr via tracing-subscriber's JSON formatter.
fn init_stderr(log: &LogConfig) -> TelemetryGuard {
    tracing_subscriber::registry()
        .with(filter(log))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();
    noop()
}

/// JSON events appended to a file.
fn init_file(log: &LogConfig, path: &Path) -> TelemetryGuard {
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("warning: could not open log file {}: {e}", path.display());
            return noop();
        }
    };

    tracing_subscriber::registry()
        .with(filter(log))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    noop()
}

/// OTLP HTTP export (traces + logs).
///
/// The SDK reads `OTEL_EXPORTER_OTLP_ENDPOINT` from the environment natively
/// and appends `/v1/traces` or `/v1/logs` as appropriate.
#[cfg(feature = "otel")]
fn init_otlp(log: &LogConfig) -> TelemetryGuard {
    use opentelemetry::trace::TracerProvider as _;

    let span_exporter = match opentelemetry_otlp::SpanExporter::builder()
        .with_http()
        .build()
    {
        Ok(e) => e,
        Err(e) => {
            eprintln!("warning: failed to init OTLP span exporter: {e}");
            return init_file_or_noop(log);
        }
    };

    let log_exporter = match opentelemetry_otlp::LogExporter::builder()
        .with_http()
        .build()
    {
        Ok(e) => e,
        Err(e) => {
            eprintln!("warning: failed to init OTLP log exporter: {e}");
            return init_file_or_noop(log);
        }
    };

    let resource = otel_resource();

    let trace_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_simple_exporter(span_exporter)
        .with_resource(resource.clone())
        .build();
    let tracer = trace_provider.tracer(env!("CARGO_PKG_NAME"));

    let log_provider = opentelemetry_sdk::logs::SdkLoggerProvider::builder()
        .with_simple_exporter(log_exporter)
        .with_resource(resource)
        .build();

    tracing_subscriber::registry()
        .with(filter(log))
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .with(opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge::new(
            &log_provider,
        ))
        .init();

    TelemetryGuard {
        trace_provider: Some(trace_provider),
        log_provider: Some(log_provider),
    }
}

#[cfg(feature = "otel")]
fn otel_resource() -> opentelemetry_sdk::Resource {
    use opentelemetry::KeyValue;
    opentelemetry_sdk::Resource::builder()
        .with_attribute(KeyValue::new("service.name", env!("CARGO_PKG_NAME")))
        .with_attribute(KeyValue::new("service.version", env!("CARGO_PKG_VERSION")))
        .build()
}
