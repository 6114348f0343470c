// Path: crates/telemetry/src/init.rs
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

/// Output format of the global subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event, for log shippers.
    #[default]
    Json,
    /// Human-readable lines, for local runs.
    Pretty,
}

impl LogFormat {
    /// Reads `AGORA_LOG_FORMAT` (`json` or `pretty`), defaulting to JSON.
    pub fn from_env() -> Self {
        match std::env::var("AGORA_LOG_FORMAT") {
            Ok(v) if v.eq_ignore_ascii_case("pretty") => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

/// Initializes the global `tracing` subscriber and bridges `log` records into it.
///
/// The filter honours `RUST_LOG` and falls back to `default_directives`
/// (e.g. `"info"` or `"info,global_state_gateway=debug"`).
pub fn init_tracing(format: LogFormat, default_directives: &str) -> Result<(), anyhow::Error> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed(),
    };
    let subscriber = Registry::default().with(fmt_layer).with(filter);
    tracing_log::LogTracer::init()?;
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
