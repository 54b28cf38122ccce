use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which key-value substrate backs the record store.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One `<namespace>.json` file per collection under `data_dir`.
    #[default]
    File,
    /// Process-local map; nothing survives a restart.
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { backend: StorageBackend::File, data_dir: default_data_dir() }
    }
}

/// Static login credentials. Either `password` (plain text, hashed at startup)
/// or `password_hash` (argon2 PHC string) must be set.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub password_hash: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { username: default_username(), password: Some(default_password()), password_hash: None }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self { Self { format: default_log_format() } }
}

fn default_data_dir() -> String { "data".to_string() }
fn default_username() -> String { "admin".to_string() }
fn default_password() -> String { "123".to_string() }
fn default_log_format() -> String { "compact".to_string() }

pub fn load_default() -> Result<AppConfig> {
    let _ = dotenvy::dotenv();
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`); a missing file yields defaults.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.storage.normalize_from_env();
        self.storage.validate()?;
        self.auth.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl StorageConfig {
    pub fn normalize_from_env(&mut self) {
        if self.data_dir.trim().is_empty() {
            self.data_dir = std::env::var("OFICINA_DATA_DIR").unwrap_or_else(|_| default_data_dir());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.backend == StorageBackend::File && self.data_dir.trim().is_empty() {
            return Err(anyhow!("storage.data_dir must not be empty for the file backend"));
        }
        Ok(())
    }
}

impl AuthConfig {
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(anyhow!("auth.username must not be empty"));
        }
        let has_password = self.password.as_deref().map(|p| !p.is_empty()).unwrap_or(false);
        let has_hash = self.password_hash.as_deref().map(|h| !h.trim().is_empty()).unwrap_or(false);
        if !has_password && !has_hash {
            return Err(anyhow!("auth.password or auth.password_hash is required"));
        }
        Ok(())
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<()> {
        match self.format.as_str() {
            "compact" | "json" => Ok(()),
            other => Err(anyhow!("logging.format must be compact or json, got {other}")),
        }
    }
}
