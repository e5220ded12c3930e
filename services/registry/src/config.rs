use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngExt;
use serde::Deserialize;

use hsi_core::config::Config;

/// Deployment profile selected by `APP_CONFIG`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Development,
    Testing,
    Production,
}

/// Registry service configuration loaded from environment variables.
#[derive(Deserialize)]
pub struct RegistryConfig {
    /// Database connection URL. Env var: `DATABASE_URL`.
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Application secret. A random one is generated per process when unset.
    #[serde(default = "generate_secret_key")]
    pub secret_key: String,
    /// Env var: `APP_CONFIG`.
    #[serde(default, rename = "app_config")]
    pub profile: Profile,
    /// TCP port for the HTTP server (default 5000). Env var: `REGISTRY_PORT`.
    #[serde(default = "default_port")]
    pub registry_port: u16,
    /// Apply pending migrations and seed roles at startup. Env var: `RUN_MIGRATIONS`.
    #[serde(default)]
    pub run_migrations: Option<bool>,
}

impl Config for RegistryConfig {}

impl RegistryConfig {
    /// Explicit `RUN_MIGRATIONS` wins; otherwise every profile but production migrates.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations
            .unwrap_or(self.profile != Profile::Production)
    }
}

impl std::fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("database_url", &self.database_url)
            .field("secret_key", &"[REDACTED]")
            .field("profile", &self.profile)
            .field("registry_port", &self.registry_port)
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}

fn default_database_url() -> String {
    "sqlite://dev_db.db?mode=rwc".to_owned()
}

fn default_port() -> u16 {
    5000
}

fn generate_secret_key() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();
    URL_SAFE_NO_PAD.encode(bytes)
}
