use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Overrides the log filter, e.g. `CHECKSUM_LOG=checksum_generator=debug`.
pub const LOG_ENV: &str = "CHECKSUM_LOG";

static INIT: Once = Once::new();

/// Installs the stderr subscriber once; later calls are no-ops.
pub fn init_logging(verbosity: u8) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(default_directive(0), "warn");
        assert_eq!(default_directive(1), "info");
        assert_eq!(default_directive(5), "debug");
    }

    #[test]
    fn init_is_idempotent() {
        init_logging(0);
        init_logging(2);
    }
}
