//! CLI argument definitions using Clap

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::config::BackendKind;

/// Keyscribe - hotkey-driven voice to text for your desktop
#[derive(Parser, Debug)]
#[command(name = "keyscribe")]
#[command(version = "1.0.0")]
#[command(about = "Hotkey-driven voice to text transcription")]
#[command(long_about = None)]
pub struct Cli {
    /// Transcription backend
    #[arg(short = 'b', long, value_name = "BACKEND")]
    pub backend: Option<BackendArg>,

    /// Language hint passed to the transcriber (e.g. en, de)
    #[arg(short = 'l', long, value_name = "LANG")]
    pub language: Option<String>,

    /// Audio input device index (see `keyscribe devices`)
    #[arg(long, value_name = "INDEX")]
    pub device: Option<usize>,

    /// Paste transcripts via clipboard instead of typing them
    #[arg(long)]
    pub paste: bool,

    /// Disable the start/stop audio cues
    #[arg(long)]
    pub no_sound: bool,

    /// Dashboard API port
    #[arg(short = 'p', long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List available audio input devices
    Devices,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create a default config file
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Value to set
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Backend argument wrapper for clap
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendArg {
    /// OpenAI Whisper API
    Api,
    /// Local whisper.cpp binary
    Local,
}

impl From<BackendArg> for BackendKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Api => BackendKind::Api,
            BackendArg::Local => BackendKind::Local,
        }
    }
}

/// Valid config keys for `config set` / `config get`
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "api_key",
    "backend",
    "local_command",
    "local_model_path",
    "language",
    "prompt",
    "temperature",
    "auto_paste",
    "audio_feedback",
    "audio_device_index",
    "history_limit",
    "port",
];

/// Check whether a key is settable via the CLI
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn parse_no_args() {
        let cli = Cli::parse_from(["keyscribe"]);
        assert!(cli.backend.is_none());
        assert!(cli.language.is_none());
        assert!(cli.device.is_none());
        assert!(!cli.paste);
        assert!(!cli.no_sound);
        assert!(cli.port.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn parse_backend() {
        let cli = Cli::parse_from(["keyscribe", "--backend", "local"]);
        assert_eq!(cli.backend, Some(BackendArg::Local));
        assert_eq!(BackendKind::from(BackendArg::Local), BackendKind::Local);
    }

    #[test]
    fn parse_overrides() {
        let cli = Cli::parse_from([
            "keyscribe",
            "-l",
            "de",
            "--device",
            "2",
            "--paste",
            "--no-sound",
            "-p",
            "8080",
        ]);
        assert_eq!(cli.language.as_deref(), Some("de"));
        assert_eq!(cli.device, Some(2));
        assert!(cli.paste);
        assert!(cli.no_sound);
        assert_eq!(cli.port, Some(8080));
    }

    #[test]
    fn parse_config_set() {
        let cli = Cli::parse_from(["keyscribe", "config", "set", "api_key", "sk-test"]);
        match cli.command {
            Some(Commands::Config {
                action: ConfigAction::Set { key, value },
            }) => {
                assert_eq!(key, "api_key");
                assert_eq!(value, "sk-test");
            }
            _ => panic!("Expected config set command"),
        }
    }

    #[test]
    fn parse_devices() {
        let cli = Cli::parse_from(["keyscribe", "devices"]);
        assert!(matches!(cli.command, Some(Commands::Devices)));
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("api_key"));
        assert!(is_valid_config_key("backend"));
        assert!(is_valid_config_key("port"));
        assert!(!is_valid_config_key("bogus"));
    }

    #[test]
    fn invalid_backend_rejected() {
        let result = Cli::try_parse_from(["keyscribe", "--backend", "cloud"]);
        assert!(result.is_err());
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
