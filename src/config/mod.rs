// Configuration module entry point
// Loads layered configuration (defaults, environment) and holds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

use crate::error::ConfigError;

// Re-export public types
pub use state::AppState;
pub use types::{
    CalculateConfig, Config, LoggingConfig, PerformanceConfig, ServerConfig, StaticFilesConfig,
};

/// Prefix for environment overrides, e.g. `CALC_SERVER__HOST`
pub const ENV_PREFIX: &str = "CALC";

/// Unprefixed port override, kept for platform compatibility
pub const PORT_ENV: &str = "PORT";

/// Default cap on the `/calculate` request body
pub const DEFAULT_MAX_BODY_SIZE: u64 = 1_000_000;

impl Config {
    /// Load configuration from defaults and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(std::env::var(PORT_ENV).ok().filter(|p| !p.is_empty()))
    }

    /// Load configuration with an explicit `PORT` value instead of reading it from the environment
    pub fn load_from(port_override: Option<String>) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("static_files.public_dir", "public")?
            .set_default("static_files.index_file", "index.html")?
            .set_default("calculate.max_body_size", 1_000_000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.connection_timeout", 30)?
            .set_default("performance.shutdown_timeout", 10)?
            .set_override_option("server.port", port_override)?
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that deserialize fine but cannot start a server
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if matches!(self.server.workers, Some(0)) {
            return Err(ConfigError::InvalidValue {
                key: "server.workers",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Loopback configuration with the remaining defaults, serving files from `public_dir`
    pub fn with_public_dir(public_dir: impl Into<String>) -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                workers: None,
            },
            static_files: StaticFilesConfig {
                public_dir: public_dir.into(),
                index_file: "index.html".to_string(),
            },
            calculate: CalculateConfig {
                max_body_size: DEFAULT_MAX_BODY_SIZE,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: true,
                access_log_format: "combined".to_string(),
            },
            performance: PerformanceConfig {
                keep_alive: true,
                connection_timeout: 30,
                shutdown_timeout: 10,
            },
        }
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|e| ConfigError::InvalidAddress(format!("{addr}: {e}")))
    }
}
