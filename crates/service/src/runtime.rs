//! Runtime bootstrap
//!
//! Wires configuration, logging, the data directory, the record store and the
//! login gate together for an embedding application.

use std::sync::Arc;

use configs::{AppConfig, StorageBackend};
use tracing::info;

use crate::auth::LoginGate;
use crate::notify::Notifier;
use crate::record_store::RecordStore;

/// Ensure the data directory exists; thin wrapper over `common::env`.
pub async fn ensure_env(data_dir: &str) -> anyhow::Result<()> {
    common::env::ensure_data_dir(data_dir).await
}

/// Everything a front-end needs after startup.
#[derive(Clone, Debug)]
pub struct Runtime {
    pub store: RecordStore,
    pub login: LoginGate,
}

/// Build the runtime from an already validated config.
/// Initializes logging with the configured format (first call wins).
pub async fn bootstrap(cfg: &AppConfig, notifier: Arc<dyn Notifier>) -> anyhow::Result<Runtime> {
    common::utils::logging::init_logging(&cfg.logging.format);
    if cfg.storage.backend == StorageBackend::File {
        ensure_env(&cfg.storage.data_dir).await?;
    }
    let store = RecordStore::open(&cfg.storage, notifier).await?;
    let login = LoginGate::from_config(&cfg.auth)?;
    info!(service = "record_store", event = "start", version = env!("CARGO_PKG_VERSION"), "record store ready");
    Ok(Runtime { store, login })
}

/// Load `config.toml` (or `CONFIG_PATH`) and bootstrap from it.
pub async fn bootstrap_default(notifier: Arc<dyn Notifier>) -> anyhow::Result<Runtime> {
    let cfg = AppConfig::load_and_validate()?;
    bootstrap(&cfg, notifier).await
}
