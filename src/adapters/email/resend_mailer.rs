//! Resend email API adapter.
//!
//! Sends HTML mail through `POST /emails` with a bearer API key.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::ports::{MailError, Mailer, OutgoingEmail};

const DEFAULT_BASE_URL: &str = "https://api.resend.com";

#[derive(Clone)]
pub struct ResendConfig {
    api_key: SecretString,
    from_email: String,
    from_name: String,
    api_base_url: String,
    timeout: Duration,
}

impl ResendConfig {
    pub fn new(api_key: SecretString, from_email: impl Into<String>, from_name: impl Into<String>) -> Self {
        Self {
            api_key,
            from_email: from_email.into(),
            from_name: from_name.into(),
            api_base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `"Name <address>"`, or the bare address when no name is set.
    fn sender(&self) -> String {
        if self.from_name.trim().is_empty() {
            self.from_email.clone()
        } else {
            format!("{} <{}>", self.from_name, self.from_email)
        }
    }
}

impl std::fmt::Debug for ResendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendConfig")
            .field("api_key", &"[REDACTED]")
            .field("from_email", &self.from_email)
            .field("from_name", &self.from_name)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

pub struct ResendMailer {
    config: ResendConfig,
    http_client: reqwest::Client,
}

impl ResendMailer {
    pub fn new(config: ResendConfig) -> Result<Self, MailError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MailError::Network(e.to_string()))?;
        Ok(Self {
            config,
            http_client,
        })
    }
}

#[derive(Debug, Serialize)]
struct SendEmailBody<'a> {
    from: String,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResendError {
    #[serde(default)]
    message: String,
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        if !email.to.contains('@') {
            return Err(MailError::InvalidRecipient(email.to));
        }

        let url = format!("{}/emails", self.config.api_base_url);
        let body = SendEmailBody {
            from: self.config.sender(),
            to: [email.to.as_str()],
            subject: &email.subject,
            html: &email.html_body,
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| MailError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ResendError>(&text)
                .map(|e| e.message)
                .unwrap_or(text);
            return Err(MailError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(to = %email.to, subject = %email.subject, "Email accepted by Resend");
        Ok(())
    }
}
