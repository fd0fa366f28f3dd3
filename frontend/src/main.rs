//! main.rs
#![forbid(unsafe_code)]

mod configuration;
mod dashboard;
mod sessions;
mod utils;
mod web_server;

use common_lib::init::init;

use crate::configuration::get_yaml_configuration;
use crate::web_server::WebServer;

/// main
fn main() {
    init(env!("CARGO_MANIFEST_DIR"));

    let settings = match get_yaml_configuration() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("[main] could not load configuration.yaml: {:?}", &e);
            std::process::exit(1);
        }
    };

    let tokio_runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("dashboard")
        .enable_all()
        .build()
        .expect("Tokio runtime didn't start");

    tokio_runtime.block_on(async {
        if let Err(e) = WebServer::run(settings).await {
            tracing::error!("[main] web server stopped: {:?}", &e);
        }
    });
}
