//! Configuration storage port

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for persisting the layered daemon configuration.
///
/// The adapter owns the on-disk format and location (the default store keeps
/// a TOML file under the XDG config dir); callers only see `AppConfig`.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the stored configuration.
    ///
    /// A missing store is not an error: it loads as an empty config, whose
    /// unset fields fall through to the defaults during the merge.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Persist the given configuration, creating the store if needed.
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Location of the backing file, for `config path` output.
    fn path(&self) -> PathBuf;

    /// Whether the store has been created yet.
    fn exists(&self) -> bool;

    /// Create the store seeded with the default configuration.
    /// Fails if it already exists, so `config init` never clobbers edits.
    async fn init(&self) -> Result<(), ConfigError>;
}
