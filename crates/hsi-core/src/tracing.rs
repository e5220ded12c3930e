use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the process-wide JSON stdout subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`. Event fields are flattened
/// into the top-level object and the current span is attached, so request-scoped
/// fields from `TraceLayer` land on every line.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let json = fmt::layer()
        .json()
        .flatten_event(true)
        .with_current_span(true)
        .with_span_list(false);
    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .try_init()
        .is_ok()
}
