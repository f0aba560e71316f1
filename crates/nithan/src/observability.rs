//! Span export for generation runs.
//!
//! With the `observability` feature, the binary sends the generation
//! pipeline's spans (`studio.generate`, `story.generate`, `story.scene`,
//! `gemini.generate_content`, plus store and decode spans) to an OpenTelemetry
//! stdout exporter. Only spans from the workspace crates are exported; HTTP
//! client internals reach the log output at most.
//!
//! Every exported span carries the command being run and, for `generate`, the
//! story mode as resource attributes, so one run's trace can be told apart
//! from another's.

use nithan_core::StoryMode;
use opentelemetry::{KeyValue, global, trace::TracerProvider as _};
use opentelemetry_sdk::{Resource, trace::SdkTracerProvider};
use opentelemetry_stdout::SpanExporter;
use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose spans are exported.
pub const PIPELINE_TARGETS: [&str; 9] = [
    "nithan",
    "nithan_story",
    "nithan_models",
    "nithan_core",
    "nithan_storage",
    "nithan_auth",
    "nithan_config",
    "nithan_interface",
    "nithan_error",
];

const SERVICE_NAME: &str = "nithan";

/// What the telemetry pipeline is told about this process.
#[derive(Debug, Clone)]
pub struct TelemetrySettings {
    command: String,
    story_mode: Option<StoryMode>,
    verbose: bool,
    json_logs: bool,
}

impl TelemetrySettings {
    /// Settings for the named subcommand.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            story_mode: None,
            verbose: false,
            json_logs: false,
        }
    }

    /// Tags spans with the story mode being generated.
    pub fn with_story_mode(mut self, mode: StoryMode) -> Self {
        self.story_mode = Some(mode);
        self
    }

    /// Log at debug instead of info when `RUST_LOG` is unset.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Emit logs as JSON lines.
    pub fn with_json_logs(mut self, json_logs: bool) -> Self {
        self.json_logs = json_logs;
        self
    }

    /// Resource attributes attached to every exported span.
    pub fn attributes(&self) -> Vec<KeyValue> {
        let mut attributes = vec![
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
            KeyValue::new("nithan.command", self.command.clone()),
            KeyValue::new("gen_ai.system", "gemini"),
        ];
        if let Some(mode) = self.story_mode {
            attributes.push(KeyValue::new("nithan.story_mode", mode.to_string()));
            attributes.push(KeyValue::new("nithan.long_form", mode.is_long()));
        }
        attributes
    }

    fn default_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// Selects the spans that reach the exporter.
pub fn pipeline_filter() -> Targets {
    Targets::new().with_targets(PIPELINE_TARGETS.map(|target| (target, Level::DEBUG)))
}

/// Keeps the tracer provider alive; flushes and shuts it down on drop.
#[derive(Debug)]
pub struct TelemetryGuard {
    provider: SdkTracerProvider,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Err(e) = self.provider.shutdown() {
            tracing::warn!(error = %e, "Span exporter did not shut down cleanly");
        }
    }
}

/// Installs logging to stderr plus span export to stdout.
///
/// Hold the returned guard until the command finishes.
///
/// # Errors
///
/// Fails if the log filter is invalid or a global subscriber is already set.
pub fn init_telemetry(
    settings: &TelemetrySettings,
) -> Result<TelemetryGuard, Box<dyn std::error::Error>> {
    let resource = Resource::builder()
        .with_service_name(SERVICE_NAME)
        .with_attributes(settings.attributes())
        .build();
    let provider = SdkTracerProvider::builder()
        .with_simple_exporter(SpanExporter::default())
        .with_resource(resource)
        .build();
    global::set_tracer_provider(provider.clone());

    let otel_layer = tracing_opentelemetry::layer()
        .with_tracer(provider.tracer(SERVICE_NAME))
        .with_filter(pipeline_filter());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(settings.default_level()))?;

    // Story output owns stdout alongside the exporter, so logs go to stderr.
    let fmt_layer = if settings.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()?;

    Ok(TelemetryGuard { provider })
}
