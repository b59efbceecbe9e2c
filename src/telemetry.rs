//! Tracing setup: console output plus optional OTLP/HTTP export of spans and
//! log events.

use anyhow::{Context, Result};
use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::{LogExporter, SpanExporter, WithExportConfig};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_semantic_conventions::resource::{SERVICE_NAME, SERVICE_VERSION};
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::LoggingConfig;

const SERVICE: &str = "tripplanner";

// exporter and HTTP client internals stay quiet so exporting never feeds itself
const QUIET_TARGETS: [&str; 4] = ["hyper=warn", "h2=warn", "reqwest=warn", "opentelemetry=warn"];

type FilteredRegistry = Layered<EnvFilter, Registry>;

/// Flushes and shuts down the exporters when dropped
#[derive(Default)]
pub struct TelemetryGuard {
    tracer_provider: Option<SdkTracerProvider>,
    logger_provider: Option<SdkLoggerProvider>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.tracer_provider.take() {
            if let Err(err) = provider.shutdown() {
                eprintln!("Failed to shut down trace exporter: {err}");
            }
        }
        if let Some(provider) = self.logger_provider.take() {
            if let Err(err) = provider.shutdown() {
                eprintln!("Failed to shut down log exporter: {err}");
            }
        }
    }
}

/// Install the global subscriber. `verbose` forces `debug` regardless of the
/// configured level; `RUST_LOG` overrides both.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<TelemetryGuard> {
    let level = if verbose { "debug" } else { config.level.as_str() };
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    for directive in QUIET_TARGETS {
        filter = filter.add_directive(directive.parse().context("Invalid log directive")?);
    }

    let mut guard = TelemetryGuard::default();
    if let Some(endpoint) = &config.otlp_endpoint {
        let endpoint = endpoint.trim_end_matches('/');
        let resource = resource();
        guard.tracer_provider = Some(tracer_provider(endpoint, resource.clone())?);
        guard.logger_provider = Some(logger_provider(endpoint, resource)?);
    }

    let otel_layer = guard
        .tracer_provider
        .as_ref()
        .map(|provider| tracing_opentelemetry::layer().with_tracer(provider.tracer(SERVICE)));
    let log_bridge = guard
        .logger_provider
        .as_ref()
        .map(OpenTelemetryTracingBridge::new);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer(&config.format))
        .with(otel_layer)
        .with(log_bridge)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if let Some(endpoint) = &config.otlp_endpoint {
        tracing::info!("Exporting traces and logs to {}", endpoint);
    }

    Ok(guard)
}

fn fmt_layer(format: &str) -> Box<dyn Layer<FilteredRegistry> + Send + Sync> {
    match format {
        "json" => fmt::layer().json().with_current_span(true).boxed(),
        _ => fmt::layer().with_target(true).boxed(),
    }
}

fn resource() -> Resource {
    Resource::builder()
        .with_attributes([
            KeyValue::new(SERVICE_NAME, SERVICE),
            KeyValue::new(SERVICE_VERSION, env!("CARGO_PKG_VERSION")),
        ])
        .build()
}

fn tracer_provider(endpoint: &str, resource: Resource) -> Result<SdkTracerProvider> {
    let exporter = SpanExporter::builder()
        .with_http()
        .with_endpoint(format!("{endpoint}/v1/traces"))
        .build()
        .context("Failed to build OTLP span exporter")?;

    Ok(SdkTracerProvider::builder()
        .with_resource(resource)
        .with_batch_exporter(exporter)
        .build())
}

fn logger_provider(endpoint: &str, resource: Resource) -> Result<SdkLoggerProvider> {
    let exporter = LogExporter::builder()
        .with_http()
        .with_endpoint(format!("{endpoint}/v1/logs"))
        .build()
        .context("Failed to build OTLP log exporter")?;

    Ok(SdkLoggerProvider::builder()
        .with_resource(resource)
        .with_batch_exporter(exporter)
        .build())
}
