//! Subscriber setup.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
pub fn default_directives(verbose: u8) -> String {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    format!(
        "warn,freefalld={level},freefall_watchdog={level},freefall_actuator={level},freefall_event={},freefall_rt={level}",
        if verbose == 0 { "warn" } else { level }
    )
}

/// Install the global subscriber, writing to stderr.
pub fn init(verbose: u8) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose))),
        )
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
