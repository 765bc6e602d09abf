use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::errors::FetchError;

/// Shown when the transport fails or the server answers with garbage.
pub const GENERIC_FAILURE: &str = "Unable to load data, please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpVerb {
    Get,
    Post,
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpVerb::Get => f.write_str("GET"),
            HttpVerb::Post => f.write_str("POST"),
        }
    }
}

/// Endpoint path plus an optional trailing parameter segment.
///
/// The parameter is kept apart so it can be percent-encoded as a single path
/// segment (`High Yield` -> `High%20Yield`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub path: &'static str,
    pub param: Option<String>,
}

impl Endpoint {
    pub fn fixed(path: &'static str) -> Self {
        Self { path, param: None }
    }

    pub fn with_param(path: &'static str, param: impl Into<String>) -> Self {
        Self {
            path,
            param: Some(param.into()),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.param {
            Some(param) => write!(f, "{}/{}", self.path, param),
            None => f.write_str(self.path),
        }
    }
}

/// Everything needed to issue one request. Built fresh per call.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub endpoint: Endpoint,
    pub verb: HttpVerb,
    pub body: Option<Value>,
    pub csrf_token: Option<String>,
}

/// Outcome of a fetch as seen by the renderer: a payload or a message.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    Success(Value),
    Failure(String),
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success(_))
    }
}

impl From<Result<Value, FetchError>> for FetchResult {
    fn from(value: Result<Value, FetchError>) -> Self {
        match value {
            Ok(payload) => FetchResult::Success(payload),
            Err(FetchError::Server { message, .. }) => FetchResult::Failure(message),
            Err(_) => FetchResult::Failure(GENERIC_FAILURE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_server_error_keeps_message() {
        let result = FetchResult::from(Err(FetchError::Server {
            status: 404,
            message: "Security not found".to_string(),
        }));
        assert_eq!(result, FetchResult::Failure("Security not found".to_string()));
    }

    #[test]
    fn test_network_error_is_generic() {
        let result = FetchResult::from(Err(FetchError::Network("connection refused".into())));
        assert_eq!(result, FetchResult::Failure(GENERIC_FAILURE.to_string()));
    }

    #[test]
    fn test_success_passes_payload_through() {
        let result = FetchResult::from(Ok(json!({"ROE": 1.0})));
        assert!(result.is_success());
    }

    #[test]
    fn test_endpoint_display() {
        let endpoint = Endpoint::with_param("/data/corp_bonds_data", "High Yield");
        assert_eq!(endpoint.to_string(), "/data/corp_bonds_data/High Yield");
        assert_eq!(Endpoint::fixed("/data/md").to_string(), "/data/md");
    }
}
