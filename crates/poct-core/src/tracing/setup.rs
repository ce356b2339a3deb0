//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize logging for a host process embedding the engine.
///
/// Reads `POCT_LOG` for per-crate log levels, e.g.
/// `POCT_LOG=poct_analysis=debug,poct_core=warn`.
///
/// Falls back to `poct=info` if `POCT_LOG` is not set or is invalid.
/// Idempotent. Library code never calls this.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("poct=info"));

        // A host may already have installed its own subscriber.
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_line_number(true))
            .with(filter)
            .try_init();
    });
}
