#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;

use async_trait::async_trait;
use strum::IntoEnumIterator;

use super::ChatRequest;
use super::ChatResponse;
use crate::configuration::Config;
use crate::configuration::ConfigKey;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Missing configuration: {}", .missing.join(", "))]
    Configuration { missing: Vec<String> },

    #[error("The booking service responded with HTTP {status}: {body}")]
    Backend { status: u16, body: String },

    #[error("Unable to reach the booking service: {0}")]
    Network(String),
}

impl TransportError {
    /// Long form explanation of a configuration error, listing where every
    /// missing key can be set.
    pub fn setup_instructions(&self) -> Option<String> {
        let missing = match self {
            TransportError::Configuration { missing } => missing,
            _ => return None,
        };

        let config_file = Config::default(ConfigKey::ConfigFile);
        let mut lines = vec![
            "Tablebook can't start chatting until it knows where the booking service lives."
                .to_string(),
            "".to_string(),
            self.to_string(),
            "".to_string(),
        ];

        for name in missing {
            let key = ConfigKey::iter().find(|key| return &key.to_string() == name);
            if let Some(key) = key {
                lines.push(format!(
                    "- {name}: set `{name}` in {config_file}, pass --{name}, or export {}",
                    key.env_var()
                ));
            } else {
                lines.push(format!("- {name}"));
            }
        }

        return Some(lines.join("\n"));
    }
}

/// Endpoint and credential used to reach the booking service, resolved once
/// at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransportConfig {
    pub api_url: String,
    pub api_token: String,
}

impl TransportConfig {
    pub fn new(api_url: &str, api_token: &str) -> TransportConfig {
        return TransportConfig {
            api_url: api_url.trim().to_string(),
            api_token: api_token.trim().to_string(),
        };
    }

    pub fn validate(&self) -> Result<(), TransportError> {
        let mut missing = vec![];
        if self.api_url.is_empty() {
            missing.push(ConfigKey::ApiURL.to_string());
        }
        if self.api_token.is_empty() {
            missing.push(ConfigKey::ApiToken.to_string());
        }

        if !missing.is_empty() {
            return Err(TransportError::Configuration { missing });
        }

        return Ok(());
    }
}

#[async_trait]
pub trait Transport {
    /// Checks the configuration without touching the network. Used at
    /// startup to decide whether the chat can be shown at all.
    fn validate(&self) -> Result<(), TransportError>;

    /// Performs a single request against the booking service. There are no
    /// retries; callers surface any error to the user.
    async fn send(&self, request: ChatRequest) -> Result<ChatResponse, TransportError>;
}

pub type TransportBox = Box<dyn Transport + Send + Sync>;
