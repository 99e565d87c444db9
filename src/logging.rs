// Diagnostics go to stdout next to the report lines.

use tracing::Level;

/// Installs the global fmt subscriber. Safe to call more than once.
pub fn init_logging() {
    init_logging_with(Level::INFO);
}

pub fn init_logging_with(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .with_target(false)
        .without_time()
        .with_max_level(level)
        .try_init();
}
