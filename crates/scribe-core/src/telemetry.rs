//! Tracing bootstrap.
//!
//! [`init_tracing`] configures the global subscriber once at program start.
//! Later calls are no-ops, so tests and library consumers may call it
//! freely.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialise the global tracing subscriber.
///
/// `RUST_LOG` takes precedence for filtering; otherwise `level` is the
/// default verbosity. With `json` set, log lines are newline-delimited
/// JSON for CI log aggregation.
pub fn init_tracing(json: bool, level: Level) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let registry = tracing_subscriber::registry().with(filter);

    let fmt_layer = fmt::layer().with_target(false);
    if json {
        registry.with(fmt_layer.json()).try_init().ok();
    } else {
        registry.with(fmt_layer).try_init().ok();
    }
}
