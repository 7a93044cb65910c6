use std::sync::Once;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Default filter when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "portfolio_viewer=info,warn";

/// Install the global console subscriber. Safe to call more than once.
pub fn init_logging() {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let console_layer = fmt::layer().compact().with_target(false);

        if tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .try_init()
            .is_err()
        {
            tracing::warn!("global subscriber already set, keeping it");
        }
    });
}
