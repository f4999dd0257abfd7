//! Logging setup
//!
//! stdout belongs to git, so everything goes to stderr.

use netlify_config::HelperSettings;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the subscriber for this invocation; it stays active while the
/// returned guard is alive.
pub fn init(settings: &HelperSettings) -> DefaultGuard {
    let filter = if settings.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("error")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(std::io::stderr),
        )
        .set_default()
}
