//! ## Logging Configuration
//!
//! This module sets up logging automatically at program startup using the `ctor` crate.
//! Logging behavior is controlled by the `DEBUG_HOUSING_FEATURES` environment variable:
//!
//! - **Disabled** (default): If the variable is unset, empty, or explicitly set to `"0"` or `"false"`,
//!   no subscriber is installed and the `tracing` events emitted by the transformers are dropped.
//! - **Enabled**: Any other value installs a `fmt` subscriber with a maximum log level of `DEBUG`.
//!
//! ### Usage Example
//!
//! To see which columns the skewness-based log transform picks, or how long each pipeline
//! step takes, set the environment variable before running your application:
//!
//! ```sh
//! export DEBUG_HOUSING_FEATURES=true
//! ```

use ctor::ctor;
use tracing::Level;

/// Returns true when the given value of `DEBUG_HOUSING_FEATURES` turns logging on.
fn logging_enabled(value: Option<&str>) -> bool {
    !value.map_or(true, |v| v == "0" || v == "false" || v.is_empty())
}

#[ctor]
fn set_debug_level() {
    let value = std::env::var("DEBUG_HOUSING_FEATURES").ok();
    if logging_enabled(value.as_deref()) {
        // A host application may already own the global subscriber.
        let _ = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .try_init();
    }
}
