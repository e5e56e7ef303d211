use ups_server::error::ServerError;
use ups_server::{AppState, build_router, logger};

use ups_auth::{JwtAlgorithm, JwtValidator};
use ups_config::Config;
use ups_profile::UploadPolicy;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use log::{error, info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    config.validate()?;

    let log_file_path: Option<PathBuf> = match config.logging.file {
        Some(ref filename) => {
            let log_dir = Config::config_dir()?.join(&config.logging.dir);
            std::fs::create_dir_all(&log_dir).map_err(|e| ServerError::Directory {
                path: log_dir.display().to_string(),
                source: e,
            })?;
            Some(log_dir.join(filename))
        }
        None => None,
    };

    // Before any other logging
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting ups-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());
    let pool = ups_db::connect(&database_path)
        .await
        .map_err(ServerError::from)?;
    info!("Database ready");

    let jwt_validator = jwt_validator(&config)?;

    let upload_dir = config.upload_directory()?;
    std::fs::create_dir_all(&upload_dir).map_err(|e| ServerError::Directory {
        path: upload_dir.display().to_string(),
        source: e,
    })?;
    info!("Storing uploads in {}", upload_dir.display());

    let policy = UploadPolicy {
        directory: upload_dir,
        max_file_size_bytes: config.upload.max_file_size_bytes,
        allowed_extensions: config.upload.allowed_extensions.clone(),
    };

    let state = AppState::new(
        pool,
        policy,
        jwt_validator,
        config.server.public_base_url.clone(),
    );
    let app = build_router(state);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    // Port 0 is resolved by the OS
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Graceful shutdown complete");
    Ok(())
}

/// Build the token validator when auth is enabled
fn jwt_validator(config: &Config) -> Result<Option<Arc<JwtValidator>>, ServerError> {
    if !config.auth.enabled {
        warn!("Authentication DISABLED - caller identity taken from X-User-Email");
        return Ok(None);
    }

    let algorithm = match (&config.auth.jwt_secret, config.jwt_public_key_path()?) {
        (Some(secret), _) => JwtAlgorithm::HS256 {
            secret: secret.as_bytes().to_vec(),
        },
        (None, Some(key_path)) => {
            let public_key_pem =
                std::fs::read_to_string(&key_path).map_err(|e| ServerError::JwtKeyFile {
                    path: key_path.display().to_string(),
                    source: e,
                })?;
            JwtAlgorithm::RS256 { public_key_pem }
        }
        (None, None) => {
            return Err(ServerError::Config(ups_config::ConfigError::auth(
                "auth.enabled requires jwt_secret or jwt_public_key_path",
            )));
        }
    };

    let validator = JwtValidator::from_algorithm(algorithm)?;
    info!("JWT: {} authentication enabled", validator.algorithm());

    Ok(Some(Arc::new(validator)))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), shutting down"),
        Err(e) => {
            error!("Failed to listen for SIGINT: {}", e);
            // Keep serving without a shutdown trigger
            std::future::pending::<()>().await
        }
    }
}
