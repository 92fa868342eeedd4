use crate::config::Config;
use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{runtime, trace as sdktrace, Resource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

const DEFAULT_FILTER: &str = "holical=info,tower_http=info";

type InitResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

pub struct ObservabilityGuard;

impl Drop for ObservabilityGuard {
    fn drop(&mut self) {
        shutdown();
    }
}

pub fn init(config: &Config) -> InitResult<ObservabilityGuard> {
    init_tracing(config)?;
    init_metrics(config)?;
    Ok(ObservabilityGuard)
}

fn init_tracing(config: &Config) -> InitResult<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    // Exported spans are only built when a collector endpoint is configured
    let otel_layer = match &config.otel_exporter_endpoint {
        Some(endpoint) => {
            let tracer = opentelemetry_otlp::new_pipeline()
                .tracing()
                .with_exporter(
                    opentelemetry_otlp::new_exporter()
                        .tonic()
                        .with_endpoint(endpoint),
                )
                .with_trace_config(sdktrace::config().with_resource(service_resource(config)))
                .install_batch(runtime::Tokio)?;
            Some(tracing_opentelemetry::layer().with_tracer(tracer))
        }
        None => None,
    };

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()?;

    tracing::info!(
        service = %config.service_name,
        version = env!("CARGO_PKG_VERSION"),
        otlp = config.otel_exporter_endpoint.is_some(),
        "Tracing initialized"
    );
    Ok(())
}

fn service_resource(config: &Config) -> Resource {
    Resource::new(vec![
        KeyValue::new("service.name", config.service_name.clone()),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ])
}

fn init_metrics(config: &Config) -> InitResult<()> {
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], config.metrics_port))
        .add_global_label("service", config.service_name.clone())
        .install()?;
    describe_metrics();

    tracing::info!(
        service = %config.service_name,
        port = config.metrics_port,
        "Prometheus exporter listening"
    );
    Ok(())
}

fn describe_metrics() {
    metrics::describe_counter!(
        "holiday_source_hits_total",
        "Requests answered by an external holiday source"
    );
    metrics::describe_counter!(
        "holiday_source_failures_total",
        "External holiday source attempts that failed, timed out or returned nothing"
    );
    metrics::describe_counter!(
        "holiday_fallback_total",
        "Lookups that reached the static holiday table, by hit/miss"
    );
    metrics::describe_counter!("calendars_rendered_total", "ICS documents served");
}

pub fn shutdown() {
    global::shutdown_tracer_provider();
}
