//! Logging setup - structured diagnostics via `tracing`
//!
//! Events carry counts, formats and statement ids only. Transaction
//! descriptions and amounts are never logged.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive, e.g. `spendlens_core=debug`
pub const LOG_ENV_VAR: &str = "SPENDLENS_LOG";

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber, writing to stderr
///
/// `default_level` applies when `SPENDLENS_LOG` is unset or invalid.
/// Later calls are no-ops.
pub fn init_tracing(default_level: &str) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        // try_init: a subscriber installed by the host application wins
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init_tracing("warn");
        init_tracing("debug");
        tracing::info!("still alive");
    }
}
