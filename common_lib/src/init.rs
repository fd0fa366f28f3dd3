//! init.rs
//!
//! process start-up shared by the binaries: .env first, then logging

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Load `<crate_dir>/.env` if there is one and install the tracing subscriber.
/// RUST_LOG wins over the default level.
pub fn init(crate_dir: &str) {
    let env_path = Path::new(crate_dir).join(".env");
    let env_result = dotenvy::from_path(&env_path);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    // a second init (tests, embedded use) keeps the first subscriber
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match env_result {
        Ok(_) => tracing::debug!("[init] loaded {:?}", &env_path),
        Err(e) => tracing::debug!("[init] no .env loaded from {:?}: {:?}", &env_path, &e),
    }
}
