use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tokio::time::sleep;
use tracing::{debug, warn};
use url::Url;

use crate::{Error, Idea, Narrator, Result};
use ventura_types::{CharacterProfile, Verdict};

/// Timeout for collaborator requests. A pitch that takes longer than
/// this is not worth waiting for; the caller falls back to scripted
/// lines.
const TIMEOUT: Duration = Duration::from_secs(10);

/// Retry policy for transient collaborator failures.
///
/// Generation requests carry no state, so POSTs are safe to retry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per request (including the first attempt).
    pub max_attempts: usize,
    /// Initial backoff delay after the first retryable failure.
    pub initial_backoff: Duration,
    /// Maximum backoff delay between attempts.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(2),
        }
    }
}

/// HTTP client for the text-generation collaborator.
#[derive(Clone, Debug)]
pub struct HttpNarrator {
    base_url: Url,
    api_key: Option<String>,
    http: reqwest::Client,
    retry: RetryPolicy,
}

#[derive(Serialize)]
struct PitchRequest<'a> {
    character: &'a str,
    persona: &'a str,
}

#[derive(Serialize)]
struct VerdictRequest<'a> {
    character: &'a str,
    persona: &'a str,
    idea_title: &'a str,
    won: bool,
}

impl HttpNarrator {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        let http = reqwest::Client::builder()
            .timeout(TIMEOUT)
            .pool_idle_timeout(Duration::from_secs(60))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            http,
            retry: RetryPolicy::default(),
        })
    }

    /// Returns a new client with the provided retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.base_url.join(path)?;
        debug!("requesting {}", url);

        let mut attempt = 0usize;
        let mut backoff = self.retry.initial_backoff;
        loop {
            attempt += 1;
            let mut request = self.http.post(url.clone()).json(body);
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key);
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response.json().await?);
                    }
                    if !is_retryable_status(status) || attempt >= self.retry.max_attempts {
                        return Err(Error::Failed(status));
                    }
                    warn!(%status, attempt, "collaborator request failed, retrying");
                }
                Err(err) => {
                    if attempt >= self.retry.max_attempts || !is_retryable_error(&err) {
                        return Err(Error::Http(err));
                    }
                    warn!(error = %err, attempt, "collaborator request failed, retrying");
                }
            }

            if backoff > Duration::ZERO {
                sleep(backoff).await;
                backoff = std::cmp::min(backoff.saturating_mul(2), self.retry.max_backoff);
            }
        }
    }
}

fn is_retryable_status(status: reqwest::StatusCode) -> bool {
    status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn is_retryable_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect()
}

impl Narrator for HttpNarrator {
    async fn pitch(&self, character: &CharacterProfile) -> Result<Idea> {
        self.post_json(
            "pitch",
            &PitchRequest {
                character: character.name,
                persona: character.persona,
            },
        )
        .await
    }

    async fn verdict(
        &self,
        character: &CharacterProfile,
        idea_title: &str,
        won: bool,
    ) -> Result<Verdict> {
        self.post_json(
            "verdict",
            &VerdictRequest {
                character: character.name,
                persona: character.persona,
                idea_title,
                won,
            },
        )
        .await
    }
}
