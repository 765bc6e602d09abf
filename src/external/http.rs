use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::errors::FetchError;
use crate::external::data_source::DataSource;
use crate::models::{FetchRequest, FetchResult, HttpVerb};

pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Fetches view payloads from the web application over HTTP.
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: Url,
}

// Error responses look like: { "error": "Security not found" }
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl HttpFetcher {
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base()?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint against the base URL. Absolute paths replace the
    /// base path; relative ones (the quiz `list`) land under it.
    pub fn resolve(&self, request: &FetchRequest) -> Result<Url, FetchError> {
        let mut url = self.base_url.join(request.endpoint.path)?;
        if let Some(param) = &request.endpoint.param {
            url.path_segments_mut()
                .map_err(|_| {
                    FetchError::Endpoint(format!("{} cannot take path segments", request.endpoint))
                })?
                .push(param);
        }
        Ok(url)
    }

    async fn try_fetch(&self, request: &FetchRequest) -> Result<Value, FetchError> {
        let url = self.resolve(request)?;

        let mut builder = match request.verb {
            HttpVerb::Get => self.client.get(url),
            HttpVerb::Post => self.client.post(url),
        }
        .header(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = &request.csrf_token {
            builder = builder.header(CSRF_HEADER, token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.bytes().await.unwrap_or_default();
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));

            return Err(FetchError::Server {
                status: status.as_u16(),
                message,
            });
        }

        resp.json::<Value>()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))
    }
}

#[async_trait]
impl DataSource for HttpFetcher {
    async fn fetch(&self, request: &FetchRequest) -> FetchResult {
        debug!("{} {} - fetching", request.verb, request.endpoint);

        let outcome = self.try_fetch(request).await;
        match &outcome {
            Ok(_) => info!("{} {} - ok", request.verb, request.endpoint),
            Err(FetchError::Server { status, message }) => {
                warn!("{} {} - server returned {}: {}", request.verb, request.endpoint, status, message)
            }
            Err(e) => error!("{} {} - failed: {}", request.verb, request.endpoint, e),
        }

        FetchResult::from(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BondType, ViewRequest};

    fn fetcher(base: &str) -> HttpFetcher {
        HttpFetcher::new(&ClientConfig {
            base_url: base.to_string(),
            ..ClientConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_resolve_encodes_path_parameter() {
        let fetcher = fetcher("http://localhost:8000/");
        let request = ViewRequest::CorpBonds {
            bond_type: BondType::HighYield,
        }
        .fetch_request(None);

        let url = fetcher.resolve(&request).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/data/corp_bonds_data/High%20Yield");
    }

    #[test]
    fn test_resolve_relative_quiz_endpoint() {
        let fetcher = fetcher("http://localhost:8000/quiz");
        let url = fetcher.resolve(&ViewRequest::QuizList.fetch_request(None)).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/quiz/list");
    }

    #[test]
    fn test_resolve_absolute_endpoint_ignores_base_path() {
        let fetcher = fetcher("http://localhost:8000/quiz/");
        let request = ViewRequest::TechnicalAnalysis { security_id: 3 }.fetch_request(None);
        let url = fetcher.resolve(&request).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/data/ta/3");
    }
}
