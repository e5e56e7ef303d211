use crate::{
    AuthConfig, ConfigError, ConfigErrorResult, DatabaseConfig, LoggingConfig, ServerConfig,
    UploadConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub upload: UploadConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Read `.env` from the working directory if present
    /// 2. Check for UPS_CONFIG_DIR env var, else use ./.ups/
    /// 3. Auto-create config directory if it doesn't exist
    /// 4. Load config.toml if it exists, else use defaults
    /// 5. Apply UPS_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let _ = dotenvy::dotenv();

        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        config.upload.normalize();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: UPS_CONFIG_DIR env var > ./.ups/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var("UPS_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".ups"))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let config_dir = Self::config_dir()?;

        self.server.validate()?;
        self.auth.validate(&config_dir)?;
        self.upload.validate()?;

        // Database path must stay inside the config dir
        let db_path = Path::new(&self.database.path);
        if db_path.is_absolute() || self.database.path.contains("..") {
            return Err(ConfigError::database(
                "database.path must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Get absolute path to database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.database.path))
    }

    /// Get the upload directory; relative paths resolve against the config dir.
    pub fn upload_directory(&self) -> ConfigErrorResult<PathBuf> {
        let dir = Path::new(&self.upload.directory);
        if dir.is_absolute() {
            return Ok(dir.to_path_buf());
        }
        Ok(Self::config_dir()?.join(dir))
    }

    /// Get the RS256 public key path, if configured.
    pub fn jwt_public_key_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match self.auth.jwt_public_key_path {
            Some(ref key_path) => Ok(Some(Self::config_dir()?.join(key_path))),
            None => Ok(None),
        }
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (public base: {})",
            self.server.host,
            self.server.port,
            self.server
                .public_base_url
                .as_deref()
                .unwrap_or("from Host header")
        );
        info!("  database: {}", self.database.path);

        let auth_type = if self.auth.jwt_secret.is_some() {
            "HS256"
        } else if self.auth.jwt_public_key_path.is_some() {
            "RS256"
        } else {
            "none"
        };

        info!(
            "  auth: {} ({})",
            if self.auth.enabled {
                "enabled"
            } else {
                "disabled"
            },
            auth_type
        );

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );

        info!(
            "  upload: dir={}, max={} bytes, extensions=[{}]",
            self.upload.directory,
            self.upload.max_file_size_bytes,
            self.upload.allowed_extensions.join(", ")
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("UPS_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("UPS_SERVER_PORT", &mut self.server.port);
        Self::apply_env_option_string(
            "UPS_SERVER_PUBLIC_BASE_URL",
            &mut self.server.public_base_url,
        );

        // Database
        Self::apply_env_string("UPS_DATABASE_PATH", &mut self.database.path);

        // Auth
        Self::apply_env_bool("UPS_AUTH_ENABLED", &mut self.auth.enabled);
        Self::apply_env_option_string("UPS_AUTH_JWT_SECRET", &mut self.auth.jwt_secret);
        Self::apply_env_option_string(
            "UPS_AUTH_JWT_PUBLIC_KEY_PATH",
            &mut self.auth.jwt_public_key_path,
        );

        // Logging
        Self::apply_env_parse("UPS_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("UPS_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("UPS_LOG_FILE", &mut self.logging.file);

        // Upload
        Self::apply_env_string("UPS_UPLOAD_DIRECTORY", &mut self.upload.directory);
        Self::apply_env_parse(
            "UPS_UPLOAD_MAX_FILE_SIZE_BYTES",
            &mut self.upload.max_file_size_bytes,
        );
        if let Ok(val) = std::env::var("UPS_UPLOAD_ALLOWED_EXTENSIONS") {
            self.upload.allowed_extensions = val
                .split(',')
                .map(str::trim)
                .filter(|ext| !ext.is_empty())
                .map(String::from)
                .collect();
        }
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
