//! Conversation service configuration sourced from the environment.
use std::{env, fmt, time::Duration};

const BASE_URL_VAR: &str = "AGENT_BASE_URL";
const CHAT_PATH_VAR: &str = "AGENT_CHAT_PATH";
const TIMEOUT_VAR: &str = "AGENT_TIMEOUT_SECS";

const DEFAULT_CHAT_PATH: &str = "/chat";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Remote conversation endpoint settings.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub base_url: String,
    pub chat_path: String,
    pub timeout: Duration,
}

impl AgentConfig {
    pub fn from_env() -> Result<Self, AgentConfigError> {
        let base_url = env::var(BASE_URL_VAR)
            .map_err(|_| AgentConfigError::MissingBaseUrl)
            .and_then(|value| {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    Err(AgentConfigError::MissingBaseUrl)
                } else {
                    Ok(trimmed.to_string())
                }
            })?;

        let chat_path = env::var(CHAT_PATH_VAR)
            .map(|value| value.trim().to_string())
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_CHAT_PATH.to_string());

        let timeout = env::var(TIMEOUT_VAR)
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|value| *value > 0)
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        Ok(Self {
            base_url,
            chat_path,
            timeout,
        })
    }

    pub fn chat_url(&self) -> String {
        let path = if self.chat_path.starts_with('/') {
            self.chat_path.clone()
        } else {
            format!("/{}", self.chat_path)
        };
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[derive(Debug)]
pub enum AgentConfigError {
    MissingBaseUrl,
    ClientBuild(String),
}

impl fmt::Display for AgentConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBaseUrl => write!(f, "missing {}", BASE_URL_VAR),
            Self::ClientBuild(message) => write!(f, "client build failure: {}", message),
        }
    }
}

impl std::error::Error for AgentConfigError {}
