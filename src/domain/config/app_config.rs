//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::config::BackendKind;
use crate::domain::hotkey::HotkeyBinding;
use crate::domain::session::DEFAULT_HISTORY_LIMIT;

/// Default port for the local dashboard API
pub const DEFAULT_PORT: u16 = 5933;

/// Hotkey bindings section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HotkeysConfig {
    pub push_to_talk: Option<HotkeyBinding>,
    pub toggle_listen: Option<HotkeyBinding>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub backend: Option<String>,
    pub local_command: Option<String>,
    pub local_model_path: Option<String>,
    pub language: Option<String>,
    pub prompt: Option<String>,
    pub temperature: Option<f32>,
    pub auto_paste: Option<bool>,
    pub audio_feedback: Option<bool>,
    pub audio_device_index: Option<usize>,
    pub history_limit: Option<usize>,
    pub port: Option<u16>,
    pub hotkeys: Option<HotkeysConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            api_key: None,
            backend: Some("api".to_string()),
            local_command: Some("whisper-cli".to_string()),
            local_model_path: None,
            language: None,
            prompt: None,
            temperature: None,
            auto_paste: Some(false),
            audio_feedback: Some(true),
            audio_device_index: None,
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
            port: Some(DEFAULT_PORT),
            hotkeys: Some(HotkeysConfig {
                push_to_talk: Some(HotkeyBinding::default_push_to_talk()),
                toggle_listen: Some(HotkeyBinding::default_toggle_listen()),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            api_key: other.api_key.or(self.api_key),
            backend: other.backend.or(self.backend),
            local_command: other.local_command.or(self.local_command),
            local_model_path: other.local_model_path.or(self.local_model_path),
            language: other.language.or(self.language),
            prompt: other.prompt.or(self.prompt),
            temperature: other.temperature.or(self.temperature),
            auto_paste: other.auto_paste.or(self.auto_paste),
            audio_feedback: other.audio_feedback.or(self.audio_feedback),
            audio_device_index: other.audio_device_index.or(self.audio_device_index),
            history_limit: other.history_limit.or(self.history_limit),
            port: other.port.or(self.port),
            hotkeys: Self::merge_hotkeys(self.hotkeys, other.hotkeys),
        }
    }

    fn merge_hotkeys(
        base: Option<HotkeysConfig>,
        other: Option<HotkeysConfig>,
    ) -> Option<HotkeysConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(HotkeysConfig {
                push_to_talk: o.push_to_talk.or(b.push_to_talk),
                toggle_listen: o.toggle_listen.or(b.toggle_listen),
            }),
        }
    }

    /// Get backend as parsed BackendKind, or Api if not set/invalid
    pub fn backend_or_default(&self) -> BackendKind {
        self.backend
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get local transcriber command, or "whisper-cli" if not set
    pub fn local_command_or_default(&self) -> &str {
        self.local_command.as_deref().unwrap_or("whisper-cli")
    }

    /// Get auto_paste setting, or false if not set
    pub fn auto_paste_or_default(&self) -> bool {
        self.auto_paste.unwrap_or(false)
    }

    /// Get audio_feedback setting, or true if not set
    pub fn audio_feedback_or_default(&self) -> bool {
        self.audio_feedback.unwrap_or(true)
    }

    /// Get history_limit, or the default if not set
    pub fn history_limit_or_default(&self) -> usize {
        self.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT)
    }

    /// Get dashboard port, or the default if not set
    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Get push-to-talk binding, or the PAUSE key if not set
    pub fn push_to_talk_or_default(&self) -> HotkeyBinding {
        self.hotkeys
            .as_ref()
            .and_then(|h| h.push_to_talk.clone())
            .unwrap_or_else(HotkeyBinding::default_push_to_talk)
    }

    /// Get toggle-listen binding, or shift+PAUSE if not set
    pub fn toggle_listen_or_default(&self) -> HotkeyBinding {
        self.hotkeys
            .as_ref()
            .and_then(|h| h.toggle_listen.clone())
            .unwrap_or_else(HotkeyBinding::default_toggle_listen)
    }
}
