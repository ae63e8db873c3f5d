use reqwest::Client;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, info};

use shared_config::AppConfig;

#[derive(Error, Debug)]
pub enum MailerError {
    #[error("Outbound mail not configured")]
    NotConfigured,

    #[error("Mail provider error: {message}")]
    Provider { message: String },
}

impl From<reqwest::Error> for MailerError {
    fn from(err: reqwest::Error) -> Self {
        MailerError::Provider {
            message: err.to_string(),
        }
    }
}

/// HTTP client for the transactional mail provider. Delivery is
/// best-effort; callers spawn `send` and log failures instead of
/// propagating them.
#[derive(Debug)]
pub struct MailClient {
    client: Client,
    base_url: String,
    api_token: String,
    from: String,
}

impl MailClient {
    pub fn new(config: &AppConfig) -> Result<Self, MailerError> {
        if !config.is_mail_configured() {
            return Err(MailerError::NotConfigured);
        }

        Ok(Self {
            client: Client::new(),
            base_url: config.mail_api_url.clone(),
            api_token: config.mail_api_token.clone(),
            from: config.mail_from.clone(),
        })
    }

    /// Dispatch one message through the provider's `/messages` endpoint.
    pub async fn send(
        &self,
        to: &str,
        subject: &str,
        text: &str,
        html: &str,
    ) -> Result<(), MailerError> {
        let url = format!("{}/messages", self.base_url);

        let message = json!({
            "from": self.from,
            "to": to,
            "subject": subject,
            "text": text,
            "html": html,
        });

        debug!("Sending mail to {} via {}", to, url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .header("Content-Type", "application/json")
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let response_text = response.text().await.unwrap_or_default();
            error!("Mail dispatch failed: {} - {}", status, response_text);
            return Err(MailerError::Provider {
                message: format!("HTTP {}: {}", status, response_text),
            });
        }

        info!("Mail accepted by provider for {}", to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(mail_url: &str) -> AppConfig {
        AppConfig {
            database_url: "http://localhost:54321".to_string(),
            database_api_key: "test-key".to_string(),
            jwt_secret: "test-secret".to_string(),
            mail_api_url: mail_url.to_string(),
            mail_api_token: "mail-token".to_string(),
            mail_from: "clinic@example.com".to_string(),
        }
    }

    #[test]
    fn client_creation_fails_without_config() {
        let mut config = test_config("http://localhost:2525");
        config.mail_api_url = String::new();

        let client = MailClient::new(&config);
        assert_matches!(client, Err(MailerError::NotConfigured));
    }

    #[tokio::test]
    async fn send_posts_message_payload() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(header("Authorization", "Bearer mail-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "m-1"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = MailClient::new(&test_config(&mock_server.uri())).unwrap();
        let result = client
            .send("a@b.com", "Verify your account", "code 123456", "<b>123456</b>")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn provider_failure_surfaces_as_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(500).set_body_string("smtp relay down"))
            .mount(&mock_server)
            .await;

        let client = MailClient::new(&test_config(&mock_server.uri())).unwrap();
        let result = client.send("a@b.com", "s", "t", "<p>h</p>").await;

        assert_matches!(result, Err(MailerError::Provider { .. }));
    }
}
