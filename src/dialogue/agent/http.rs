//! Live HTTP client for the remote conversation service.
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::dialogue::errors::AgentError;

use super::{AgentConfig, AgentConfigError, AgentReply, AgentRequest, ConversationAgent};

pub struct HttpConversationAgent {
    http: Client,
    config: AgentConfig,
}

impl HttpConversationAgent {
    pub fn new(config: AgentConfig) -> Result<Self, AgentConfigError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| AgentConfigError::ClientBuild(err.to_string()))?;

        Ok(Self { http, config })
    }
}

/// Wire shape of a success response; `reply_text` may be absent or blank,
/// both of which count as malformed.
#[derive(Debug, Deserialize)]
struct AgentReplyPayload {
    reply_text: Option<String>,
}

impl AgentReplyPayload {
    fn into_reply(self) -> Result<AgentReply, AgentError> {
        self.reply_text
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .map(|reply_text| AgentReply { reply_text })
            .ok_or_else(|| AgentError::malformed("response is missing reply text"))
    }
}

impl ConversationAgent for HttpConversationAgent {
    fn converse(&self, request: &AgentRequest) -> Result<AgentReply, AgentError> {
        let response = self
            .http
            .post(self.config.chat_url())
            .json(request)
            .send()
            .map_err(|err| {
                if err.is_timeout() {
                    AgentError::Timeout {
                        elapsed: self.config.timeout,
                    }
                } else {
                    AgentError::network(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgentError::network(format!(
                "HTTP {} from conversation service",
                status
            )));
        }

        let payload: AgentReplyPayload = response
            .json()
            .map_err(|err| AgentError::malformed(err.to_string()))?;

        payload.into_reply()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_with_reply_text_parses() {
        let payload: AgentReplyPayload =
            serde_json::from_str(r#"{"reply_text": "  Hello! "}"#).expect("parse");
        let reply = payload.into_reply().expect("usable reply");
        assert_eq!(reply.reply_text, "Hello!");
    }

    #[test]
    fn missing_or_blank_reply_text_is_malformed() {
        let payload: AgentReplyPayload = serde_json::from_str("{}").expect("parse");
        assert!(matches!(
            payload.into_reply(),
            Err(AgentError::MalformedResponse { .. })
        ));

        let payload: AgentReplyPayload =
            serde_json::from_str(r#"{"reply_text": "   "}"#).expect("parse");
        assert!(matches!(
            payload.into_reply(),
            Err(AgentError::MalformedResponse { .. })
        ));
    }
}
