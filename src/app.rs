use std::error::Error;
use std::sync::{Arc, Mutex};

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::infrastructure::config::ServerConfig;
use crate::interfaces::http::{add_log, start_server, LogEntry};

pub async fn run() -> Result<(), Box<dyn Error>> {
    // Optional; a missing .env is fine
    dotenvy::dotenv().ok();

    let config = ServerConfig::load().map_err(|err| {
        eprintln!("Failed to load configuration: {}", err);
        err
    })?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    for (name, path) in [("prices", &config.prices_path), ("events", &config.events_path)] {
        if !path.exists() {
            warn!(
                feed = name,
                path = %path.display(),
                "Data file not found; requests will fail until it exists"
            );
        }
    }

    let logs: Arc<Mutex<Vec<LogEntry>>> = Arc::new(Mutex::new(Vec::new()));
    let server = start_server(&config, logs.clone()).map_err(|err| {
        error!(error = %err, host = %config.host, port = config.port, "Failed to bind HTTP server");
        err
    })?;

    add_log(
        &logs,
        "INFO",
        "Server",
        &format!("Listening on http://{}:{}", config.host, config.port),
    );
    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Brent oil API listening on http://{}:{}", config.host, config.port
    );

    server.await?;
    Ok(())
}
