use std::process::ExitCode;

use tracing::{error, info};

use mediagate::web::server::shutdown_signal;
use mediagate::web::WebServer;
use mediagate::Config;

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    if let Err(e) = mediagate::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        mediagate::logging::init_console_only(&config.logging.level);
    }

    info!("mediagate - image CDN gateway");

    if let Err(e) = config.validate() {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    let server = match WebServer::from_config(&config) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to create web server: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Server configured on {}:{} (environment {}, CDN endpoint {})",
        config.server.host,
        config.server.port,
        config.server.environment,
        config.imagekit.url_endpoint
    );

    if let Err(e) = server.run(shutdown_signal()).await {
        error!("Web server error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Server stopped");
    ExitCode::SUCCESS
}
