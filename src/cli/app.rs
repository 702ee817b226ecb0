//! Main app runner
//!
//! Loads layered configuration, wires the adapters into the orchestrator,
//! and runs the daemon until Ctrl-C.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::{info, warn};

use crate::application::ports::{ConfigStore, HotkeySwitch, StatusSink, Transcriber};
use crate::application::{event_channel, Orchestrator, OrchestratorEvent, TranscriptionPipeline};
use crate::domain::audio::BackendLimits;
use crate::domain::config::AppConfig;
use crate::domain::hotkey::HotkeyTracker;
use crate::domain::session::{SessionStatus, TranscriptionRecord};
use crate::http::{self, DashboardState};
use crate::infrastructure::{
    build_delivery, build_transcriber, create_audio_cue, spawn_listener, CpalCapture,
    XdgConfigStore,
};

use super::args::Cli;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Broadcasts status updates to every interested sink.
///
/// The terminal and the dashboard both want to know what the session is
/// doing; the orchestrator only takes one sink.
struct StatusFanout {
    sinks: Vec<Arc<dyn StatusSink>>,
}

impl StatusSink for StatusFanout {
    fn status_changed(&self, status: SessionStatus) {
        for sink in &self.sinks {
            sink.status_changed(status);
        }
    }

    fn transcription_complete(&self, record: &TranscriptionRecord) {
        for sink in &self.sinks {
            sink.transcription_complete(record);
        }
    }

    fn pipeline_error(&self, message: &str) {
        for sink in &self.sinks {
            sink.pipeline_error(message);
        }
    }
}

/// Run the hotkey daemon until interrupted
pub async fn run_daemon(cli_config: AppConfig) -> ExitCode {
    let presenter = Presenter::new();
    let config = load_merged_config(cli_config).await;

    // Backend is optional at startup: a missing API key should not keep the
    // hotkeys from working, the failure surfaces per-session instead.
    let (transcriber, limits): (Option<Arc<dyn Transcriber>>, BackendLimits) =
        match build_transcriber(&config) {
            Ok(t) => {
                let limits = t.limits();
                (Some(t), limits)
            }
            Err(e) => {
                presenter.warn(&e.to_string());
                (None, BackendLimits::local())
            }
        };

    let delivery = build_delivery(config.auto_paste_or_default());
    let pipeline = Arc::new(TranscriptionPipeline::new(transcriber, delivery));
    let capture = Arc::new(CpalCapture::new(config.audio_device_index));
    let cue = create_audio_cue(config.audio_feedback_or_default());

    let hotkeys = HotkeySwitch::new();
    let dashboard = Arc::new(DashboardState::new(
        config.history_limit_or_default(),
        hotkeys.clone(),
    ));
    let status = Arc::new(StatusFanout {
        sinks: vec![
            Arc::new(Presenter::new()) as Arc<dyn StatusSink>,
            dashboard.clone() as Arc<dyn StatusSink>,
        ],
    });

    let tracker = HotkeyTracker::new(
        config.push_to_talk_or_default(),
        config.toggle_listen_or_default(),
    );

    let (tx, rx) = event_channel();
    let mut orchestrator = Orchestrator::new(
        tracker, capture, pipeline, status, cue, hotkeys, limits, tx, rx,
    );

    // Dashboard API on localhost
    let port = config.port_or_default();
    let dashboard_state = dashboard.as_ref().clone();
    tokio::spawn(async move {
        if let Err(e) = http::serve(dashboard_state, port).await {
            warn!("dashboard server stopped: {}", e);
        }
    });

    // Global key listener feeds the orchestrator channel
    let _listener = spawn_listener(orchestrator.sender());

    // Ctrl-C turns into a Shutdown event so the loop winds down cleanly
    let shutdown_tx = orchestrator.sender();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutting down");
            let _ = shutdown_tx.send(OrchestratorEvent::Shutdown).await;
        }
    });

    presenter.info(&format!(
        "Listening for hotkeys (push-to-talk: {}, toggle: {})",
        describe_binding(&config.push_to_talk_or_default()),
        describe_binding(&config.toggle_listen_or_default()),
    ));
    presenter.info(&format!("Dashboard: http://127.0.0.1:{}", port));

    orchestrator.run().await;

    ExitCode::from(EXIT_SUCCESS)
}

/// List audio input devices with their indices
pub fn run_devices() -> ExitCode {
    let presenter = Presenter::new();
    match CpalCapture::list_input_devices() {
        Ok(devices) if devices.is_empty() => {
            presenter.warn("No audio input devices found");
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(devices) => {
            for (index, name) in devices.iter().enumerate() {
                presenter.key_value(&index.to_string(), name);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    let env_config = AppConfig {
        api_key: env::var("KEYSCRIBE_API_KEY").ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}

/// Translate CLI flags into a config override layer
pub fn cli_overrides(cli: &Cli) -> AppConfig {
    AppConfig {
        backend: cli.backend.map(|b| {
            let kind: crate::domain::config::BackendKind = b.into();
            kind.to_string()
        }),
        language: cli.language.clone(),
        audio_device_index: cli.device,
        auto_paste: cli.paste.then_some(true),
        audio_feedback: cli.no_sound.then_some(false),
        port: cli.port,
        ..Default::default()
    }
}

fn describe_binding(binding: &crate::domain::hotkey::HotkeyBinding) -> String {
    let mut parts = Vec::new();
    if binding.ctrl {
        parts.push("ctrl".to_string());
    }
    if binding.shift {
        parts.push("shift".to_string());
    }
    if binding.alt {
        parts.push("alt".to_string());
    }
    parts.push(format!("key {}", binding.key_code));
    parts.join("+")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::BackendArg;
    use crate::domain::hotkey::HotkeyBinding;

    #[test]
    fn cli_overrides_only_set_fields() {
        let cli = Cli {
            backend: None,
            language: Some("en".to_string()),
            device: None,
            paste: false,
            no_sound: false,
            port: Some(9000),
            command: None,
        };
        let overrides = cli_overrides(&cli);
        assert!(overrides.backend.is_none());
        assert_eq!(overrides.language.as_deref(), Some("en"));
        assert!(overrides.auto_paste.is_none());
        assert!(overrides.audio_feedback.is_none());
        assert_eq!(overrides.port, Some(9000));
    }

    #[test]
    fn cli_flags_map_to_booleans() {
        let cli = Cli {
            backend: Some(BackendArg::Local),
            language: None,
            device: Some(1),
            paste: true,
            no_sound: true,
            port: None,
            command: None,
        };
        let overrides = cli_overrides(&cli);
        assert_eq!(overrides.backend.as_deref(), Some("local"));
        assert_eq!(overrides.audio_device_index, Some(1));
        assert_eq!(overrides.auto_paste, Some(true));
        assert_eq!(overrides.audio_feedback, Some(false));
    }

    #[test]
    fn describe_binding_with_modifiers() {
        let binding = HotkeyBinding::new(67).with_shift().with_ctrl();
        assert_eq!(describe_binding(&binding), "ctrl+shift+key 67");
    }

    #[test]
    fn describe_binding_bare_key() {
        let binding = HotkeyBinding::new(3653);
        assert_eq!(describe_binding(&binding), "key 3653");
    }
}
