use async_trait::async_trait;
use tokio::time::{timeout, Duration};
use tracing::{debug, warn};

use crate::error::RequestError;

use super::models::{error_detail, AskRequest, AskResponse};

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";

#[async_trait]
pub trait AskService: Send + Sync {
    async fn ask(&self, question: &str) -> Result<String, RequestError>;
}

pub struct HttpAskClient {
    client: reqwest::Client,
    ask_url: String,
    timeout: Option<Duration>,
}

impl HttpAskClient {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            client: reqwest::Client::new(),
            ask_url: format!("{}/ask", base_url.as_ref().trim_end_matches('/')),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn ask_url(&self) -> &str {
        &self.ask_url
    }

    async fn send(&self, question: &str) -> Result<String, RequestError> {
        let response = self
            .client
            .post(&self.ask_url)
            .json(&AskRequest { question })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(RequestError::Status {
                status,
                detail: error_detail(&body),
            });
        }

        let answer: AskResponse =
            serde_json::from_str(&body).map_err(|e| RequestError::Malformed(e.to_string()))?;
        Ok(answer.response)
    }
}

#[async_trait]
impl AskService for HttpAskClient {
    async fn ask(&self, question: &str) -> Result<String, RequestError> {
        debug!(url = %self.ask_url, "sending travel question");

        let result = match self.timeout {
            Some(limit) => timeout(limit, self.send(question))
                .await
                .map_err(|_| RequestError::Timeout)
                .and_then(|res| res),
            None => self.send(question).await,
        };

        if let Err(err) = &result {
            warn!(error = %err, "travel service request failed");
        }
        result
    }
}
