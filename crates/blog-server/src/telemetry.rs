//! Logging and trace export
//!
//! `tracing` spans are bridged to OpenTelemetry and shipped to the collector
//! over OTLP/gRPC by a batch span processor. Console logs go through the
//! `fmt` layer, filtered by `RUST_LOG`; the filter never applies to export.
//! Incoming W3C `traceparent` headers make the request span a child of the
//! caller's trace.

use crate::config::Config;
use anyhow::{Context, Result};
use axum::http::{HeaderMap, Request};
use opentelemetry::propagation::{Extractor, TextMapPropagator};
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::{runtime, trace as sdktrace, Resource};
use tracing::{Span, Subscriber};
use tracing_opentelemetry::OpenTelemetrySpanExt;
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

pub const SERVICE_NAME: &str = "otel-blog";
const TEAM: &str = "blog-managers";
const DEFAULT_FILTER: &str = "info,tower_http=debug";

/// Flushes pending spans when dropped.
pub struct TelemetryGuard;

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Flushing trace exporter");
        opentelemetry::global::shutdown_tracer_provider();
    }
}

pub fn resource(config: &Config) -> Resource {
    Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.namespace", SERVICE_NAME),
        KeyValue::new("environment", config.environment.clone()),
        KeyValue::new("team", TEAM),
        KeyValue::new("version", env!("CARGO_PKG_VERSION")),
    ])
}

/// Reads propagation headers out of an HTTP header map.
struct HeaderExtractor<'a>(&'a HeaderMap);

impl<'a> Extractor for HeaderExtractor<'a> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(|k| k.as_str()).collect()
    }
}

pub fn install_propagator() {
    opentelemetry::global::set_text_map_propagator(TraceContextPropagator::new());
}

/// Server span for one HTTP request, parented on the caller's trace context.
pub fn request_span<B>(request: &Request<B>) -> Span {
    let span = tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        version = ?request.version(),
    );

    let parent = opentelemetry::global::get_text_map_propagator(|propagator| {
        propagator.extract(&HeaderExtractor(request.headers()))
    });
    span.set_parent(parent);

    span
}

/// Console output filtered by `console_filter`; every `info` span and above
/// goes to `tracer` regardless.
pub fn subscriber(
    console_filter: EnvFilter,
    tracer: sdktrace::Tracer,
) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(console_filter))
        .with(
            tracing_opentelemetry::layer()
                .with_tracer(tracer)
                .with_filter(LevelFilter::INFO),
        )
}

/// Install the global subscriber. Must run inside the Tokio runtime.
pub fn init(config: &Config) -> Result<TelemetryGuard> {
    install_propagator();

    let tracer = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(
            opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(config.otlp_endpoint.clone()),
        )
        .with_trace_config(sdktrace::config().with_resource(resource(config)))
        .install_batch(runtime::Tokio)
        .context("Failed to install OTLP trace pipeline")?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    subscriber(filter, tracer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(TelemetryGuard)
}
