use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which transcription backend to run against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Hosted Whisper API over HTTPS
    #[default]
    Api,
    /// Local whisper-cli process
    Local,
}

impl BackendKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "api" => Ok(Self::Api),
            "local" => Ok(Self::Local),
            other => Err(format!(
                "unknown backend '{other}', expected 'api' or 'local'"
            )),
        }
    }
}
