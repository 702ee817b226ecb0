mod app_config;
mod backend;

pub use app_config::{AppConfig, HotkeysConfig, DEFAULT_PORT};
pub use backend::BackendKind;
