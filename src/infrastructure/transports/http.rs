#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use async_trait::async_trait;

use crate::domain::models::ChatRequest;
use crate::domain::models::ChatResponse;
use crate::domain::models::Transport;
use crate::domain::models::TransportConfig;
use crate::domain::models::TransportError;

fn convert_err(err: reqwest::Error) -> TransportError {
    tracing::error!(error = ?err, "Booking service is not reachable");
    return TransportError::Network(err.to_string());
}

/// Talks to the booking service over a single JSON POST endpoint.
pub struct HttpTransport {
    config: TransportConfig,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: TransportConfig) -> HttpTransport {
        return HttpTransport {
            config,
            client: reqwest::Client::new(),
        };
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn validate(&self) -> Result<(), TransportError> {
        return self.config.validate();
    }

    #[allow(clippy::implicit_return)]
    async fn send(&self, request: ChatRequest) -> Result<ChatResponse, TransportError> {
        self.validate()?;

        let res = self
            .client
            .post(&self.config.api_url)
            .header("Authorization", format!("Bearer {}", self.config.api_token))
            .json(&request)
            .send()
            .await
            .map_err(convert_err)?;

        let status = res.status();
        let body = res.text().await.map_err(convert_err)?;

        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                body = body.as_str(),
                "Booking service rejected the request"
            );
            return Err(TransportError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        let response = ChatResponse::from_body(&body);
        tracing::debug!(response = ?response, "Chat response");

        return Ok(response);
    }
}
