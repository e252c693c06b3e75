use std::time::Duration;

use docgrab_core::{FileKind, DEFAULT_REQUEST_TIMEOUT};
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use crate::{FailureKind, FetchError, FetchMetadata, FetchOutput};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            redirect_limit: 10,
            user_agent: concat!("docgrab/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Which Content-Type a response must carry to be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentRule {
    Any,
    Kind(FileKind),
}

impl ContentRule {
    /// A missing header is checked as the empty string.
    pub fn allows(self, content_type: Option<&str>) -> bool {
        match self {
            ContentRule::Any => true,
            ContentRule::Kind(kind) => kind.accepts_content_type(content_type.unwrap_or("")),
        }
    }
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// One GET, status 200 only, body fully buffered.
    async fn fetch(&self, url: &str, rule: ContentRule) -> Result<FetchOutput, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .user_agent(settings.user_agent)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str, rule: ContentRule) -> Result<FetchOutput, FetchError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let response = self
            .client
            .get(parsed.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            // Raw bytes, so a non-ASCII parameter does not hide the media type.
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());

        if !rule.allows(content_type.as_deref()) {
            return Err(FetchError::new(
                FailureKind::UnsupportedContentType {
                    content_type: content_type.unwrap_or_default(),
                },
                "unexpected content type",
            ));
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            bytes.extend_from_slice(&chunk);
        }

        let metadata = FetchMetadata {
            original_url: parsed.to_string(),
            final_url,
            content_type,
            byte_len: bytes.len() as u64,
        };

        Ok(FetchOutput { bytes, metadata })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_rule_accepts_missing_header() {
        assert!(ContentRule::Any.allows(None));
        assert!(ContentRule::Any.allows(Some("text/html")));
    }

    #[test]
    fn kind_rule_rejects_missing_header() {
        assert!(!ContentRule::Kind(FileKind::Pdf).allows(None));
        assert!(ContentRule::Kind(FileKind::Pdf).allows(Some("application/pdf")));
        assert!(!ContentRule::Kind(FileKind::Zip).allows(Some("text/html; charset=utf-8")));
    }

    #[test]
    fn default_timeout_is_three_minutes() {
        assert_eq!(
            FetchSettings::default().request_timeout,
            Duration::from_secs(180)
        );
    }
}
