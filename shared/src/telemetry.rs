use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

/// RAII guard that flushes and shuts down the OpenTelemetry tracer provider on drop.
pub struct TelemetryGuard {
    provider: Option<opentelemetry_sdk::trace::SdkTracerProvider>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("Failed to shutdown tracer provider: {e}");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Plain,
    Json,
}

/// Telemetry knobs, read from the environment.
#[derive(Debug, Clone)]
pub struct TelemetrySettings {
    pub format: LogFormat,
    pub otlp_endpoint: Option<String>,
}

impl TelemetrySettings {
    /// Reads `LOG_FORMAT` and `OTEL_EXPORTER_OTLP_ENDPOINT`.
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("LOG_FORMAT").ok().as_deref(),
            std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok(),
        )
    }

    fn from_values(format: Option<&str>, otlp_endpoint: Option<String>) -> Self {
        let format = match format {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Plain,
        };
        Self {
            format,
            otlp_endpoint: otlp_endpoint.filter(|e| !e.trim().is_empty()),
        }
    }
}

/// Initializes tracing with optional JSON formatting and optional OTLP export.
///
/// `RUST_LOG` drives filtering (default `info`). Calling this more than once
/// keeps the first subscriber, so test binaries may call it freely.
///
/// Returns a guard that must be held for the lifetime of the run.
pub fn init_telemetry(component: &str) -> TelemetryGuard {
    init_with(component, &TelemetrySettings::from_env())
}

pub fn init_with(component: &str, settings: &TelemetrySettings) -> TelemetryGuard {
    opentelemetry::global::set_text_map_propagator(TraceContextPropagator::new());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_layer = (settings.format == LogFormat::Json)
        .then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let plain_layer =
        (settings.format == LogFormat::Plain).then(|| tracing_subscriber::fmt::layer());

    let (otel_layer, provider) = match settings.otlp_endpoint.as_deref() {
        Some(endpoint) => match build_otel_layer(component, endpoint) {
            Ok((layer, provider)) => (Some(layer), Some(provider)),
            Err(e) => {
                eprintln!("OTLP export disabled, failed to build exporter: {e}");
                (None, None)
            }
        },
        None => (None, None),
    };

    let installed = Registry::default()
        .with(env_filter)
        .with(json_layer)
        .with(plain_layer)
        .with(otel_layer)
        .try_init();

    if installed.is_err() {
        tracing::debug!(component, "Tracing subscriber already installed");
    }

    TelemetryGuard { provider }
}

type OtelLayer<S> =
    tracing_opentelemetry::OpenTelemetryLayer<S, opentelemetry_sdk::trace::Tracer>;

fn build_otel_layer<S>(
    component: &str,
    endpoint: &str,
) -> Result<
    (OtelLayer<S>, opentelemetry_sdk::trace::SdkTracerProvider),
    opentelemetry_otlp::ExporterBuildError,
>
where
    S: tracing::Subscriber + for<'span> tracing_subscriber::registry::LookupSpan<'span>,
{
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_http()
        .with_endpoint(endpoint)
        .build()?;

    let provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(
            opentelemetry_sdk::Resource::builder()
                .with_service_name(component.to_owned())
                .build(),
        )
        .build();

    let tracer = provider.tracer(component.to_owned());
    opentelemetry::global::set_tracer_provider(provider.clone());

    let layer = tracing_opentelemetry::layer().with_tracer(tracer);
    Ok((layer, provider))
}
