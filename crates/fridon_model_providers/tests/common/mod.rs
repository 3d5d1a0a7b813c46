//! Shared test helpers for provider integration tests.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize environment variables from `.env` file (once).
pub fn init_env() {
    INIT.call_once(|| {
        let _ = dotenvy::dotenv();
    });
}
