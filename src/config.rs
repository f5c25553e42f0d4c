use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Process-wide settings, fixed at startup. Deliberately not `Debug`: the
/// database URL carries a password.
#[derive(Clone, Deserialize)]
pub struct Settings {
    pub database_url: Option<String>,
    pub allow_unsafe_demo: Option<String>,
    pub schema: String,
    pub listen_host: String,
    pub port: u16,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: None,
            allow_unsafe_demo: None,
            schema: DEFAULT_SCHEMA.to_string(),
            listen_host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    /// Defaults, then `pgpeek.toml` in the working directory if present,
    /// then plain environment variables (`DATABASE_URL`, `PORT`, ...).
    pub fn load() -> Result<Self, ConfigError> {
        let settings = ConfigBuilder::builder()
            .set_default("schema", DEFAULT_SCHEMA)?
            .set_default("listen_host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("log_level", DEFAULT_LOG_LEVEL)?
            .add_source(File::with_name("pgpeek").required(false))
            .add_source(Environment::default())
            .build()?;

        settings.try_deserialize()
    }

    /// The demo only turns on for the exact string "1".
    pub fn unsafe_demo_enabled(&self) -> bool {
        self.allow_unsafe_demo.as_deref() == Some("1")
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listen_host, self.port)
    }
}
