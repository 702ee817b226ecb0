//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::BackendKind;
use crate::domain::error::ConfigError;
use crate::domain::session::DEFAULT_HISTORY_LIMIT;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    validate_config_value(key, value)?;

    let mut config = store.load().await?;

    match key {
        "api_key" => config.api_key = Some(value.to_string()),
        "backend" => config.backend = Some(value.to_string()),
        "local_command" => config.local_command = Some(value.to_string()),
        "local_model_path" => config.local_model_path = Some(value.to_string()),
        "language" => config.language = Some(value.to_string()),
        "prompt" => config.prompt = Some(value.to_string()),
        "temperature" => config.temperature = value.parse::<f32>().ok(),
        "auto_paste" => config.auto_paste = parse_bool_field(key, value)?,
        "audio_feedback" => config.audio_feedback = parse_bool_field(key, value)?,
        "audio_device_index" => config.audio_device_index = value.parse::<usize>().ok(),
        "history_limit" => config.history_limit = value.parse::<usize>().ok(),
        "port" => config.port = value.parse::<u16>().ok(),
        _ => unreachable!(), // Already validated
    }

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    let config = store.load().await?;

    let value = match key {
        "api_key" => config.api_key.map(|s| mask_api_key(&s)),
        "backend" => config.backend,
        "local_command" => config.local_command,
        "local_model_path" => config.local_model_path,
        "language" => config.language,
        "prompt" => config.prompt,
        "temperature" => config.temperature.map(|t| t.to_string()),
        "auto_paste" => config.auto_paste.map(|b| b.to_string()),
        "audio_feedback" => config.audio_feedback.map(|b| b.to_string()),
        "audio_device_index" => config.audio_device_index.map(|i| i.to_string()),
        "history_limit" => config.history_limit.map(|n| n.to_string()),
        "port" => config.port.map(|p| p.to_string()),
        _ => unreachable!(),
    };

    match value {
        Some(v) => presenter.output(&v),
        None => presenter.output("(not set)"),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    let not_set = || "(not set)".to_string();

    presenter.key_value(
        "api_key",
        &config
            .api_key
            .map(|s| mask_api_key(&s))
            .unwrap_or_else(not_set),
    );
    presenter.key_value("backend", config.backend.as_deref().unwrap_or("(not set)"));
    presenter.key_value(
        "local_command",
        config.local_command.as_deref().unwrap_or("(not set)"),
    );
    presenter.key_value(
        "local_model_path",
        config.local_model_path.as_deref().unwrap_or("(not set)"),
    );
    presenter.key_value("language", config.language.as_deref().unwrap_or("(not set)"));
    presenter.key_value("prompt", config.prompt.as_deref().unwrap_or("(not set)"));
    presenter.key_value(
        "temperature",
        &config
            .temperature
            .map(|t| t.to_string())
            .unwrap_or_else(not_set),
    );
    presenter.key_value(
        "auto_paste",
        &config
            .auto_paste
            .map(|b| b.to_string())
            .unwrap_or_else(not_set),
    );
    presenter.key_value(
        "audio_feedback",
        &config
            .audio_feedback
            .map(|b| b.to_string())
            .unwrap_or_else(not_set),
    );
    presenter.key_value(
        "audio_device_index",
        &config
            .audio_device_index
            .map(|i| i.to_string())
            .unwrap_or_else(not_set),
    );
    presenter.key_value(
        "history_limit",
        &config
            .history_limit
            .map(|n| n.to_string())
            .unwrap_or_else(not_set),
    );
    presenter.key_value(
        "port",
        &config.port.map(|p| p.to_string()).unwrap_or_else(not_set),
    );

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "backend" => {
            value
                .parse::<BackendKind>()
                .map_err(|e| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: e,
                })?;
        }
        "temperature" => {
            let t = value
                .parse::<f32>()
                .map_err(|_| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Value must be a number between 0.0 and 1.0".to_string(),
                })?;
            if !(0.0..=1.0).contains(&t) {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Value must be a number between 0.0 and 1.0".to_string(),
                });
            }
        }
        "auto_paste" | "audio_feedback" => {
            parse_bool(value).map_err(|_| ConfigError::ValidationError {
                key: key.to_string(),
                message: "Value must be 'true' or 'false'".to_string(),
            })?;
        }
        "audio_device_index" => {
            value
                .parse::<usize>()
                .map_err(|_| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Value must be a non-negative integer".to_string(),
                })?;
        }
        "history_limit" => {
            let n = value
                .parse::<usize>()
                .map_err(|_| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Value must be a positive integer".to_string(),
                })?;
            if n == 0 {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: format!(
                        "Value must be at least 1 (default is {})",
                        DEFAULT_HISTORY_LIMIT
                    ),
                });
            }
        }
        "port" => {
            value
                .parse::<u16>()
                .map_err(|_| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Value must be a port number (1-65535)".to_string(),
                })?;
        }
        _ => {} // Free-form string keys accept any value
    }
    Ok(())
}

fn parse_bool_field(key: &str, value: &str) -> Result<Option<bool>, ConfigError> {
    parse_bool(value)
        .map(Some)
        .map_err(|_| ConfigError::ValidationError {
            key: key.to_string(),
            message: "Value must be 'true' or 'false'".to_string(),
        })
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

/// Mask API key for display (show first 4 and last 4 chars)
fn mask_api_key(key: &str) -> String {
    if key.len() <= 8 {
        "*".repeat(key.len())
    } else {
        format!("{}...{}", &key[..4], &key[key.len() - 4..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Ok(true));
        assert_eq!(parse_bool("false"), Ok(false));
        assert_eq!(parse_bool("yes"), Ok(true));
        assert_eq!(parse_bool("no"), Ok(false));
        assert_eq!(parse_bool("1"), Ok(true));
        assert_eq!(parse_bool("0"), Ok(false));
        assert!(parse_bool("invalid").is_err());
    }

    #[test]
    fn mask_api_key_long() {
        let masked = mask_api_key("abcdefghijklmnop");
        assert_eq!(masked, "abcd...mnop");
    }

    #[test]
    fn mask_api_key_short() {
        let masked = mask_api_key("short");
        assert_eq!(masked, "*****");
    }

    #[test]
    fn validate_backend_valid() {
        assert!(validate_config_value("backend", "api").is_ok());
        assert!(validate_config_value("backend", "local").is_ok());
    }

    #[test]
    fn validate_backend_invalid() {
        assert!(validate_config_value("backend", "cloud").is_err());
    }

    #[test]
    fn validate_temperature_range() {
        assert!(validate_config_value("temperature", "0.0").is_ok());
        assert!(validate_config_value("temperature", "0.4").is_ok());
        assert!(validate_config_value("temperature", "1.0").is_ok());
        assert!(validate_config_value("temperature", "1.5").is_err());
        assert!(validate_config_value("temperature", "warm").is_err());
    }

    #[test]
    fn validate_history_limit() {
        assert!(validate_config_value("history_limit", "50").is_ok());
        assert!(validate_config_value("history_limit", "0").is_err());
        assert!(validate_config_value("history_limit", "-1").is_err());
    }

    #[test]
    fn validate_port() {
        assert!(validate_config_value("port", "5933").is_ok());
        assert!(validate_config_value("port", "70000").is_err());
    }
}
