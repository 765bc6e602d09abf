use thiserror::Error;

use crate::models::ViewKind;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid endpoint: {0}")]
    Endpoint(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            FetchError::Parse(value.to_string())
        } else {
            FetchError::Network(value.to_string())
        }
    }
}

impl From<url::ParseError> for FetchError {
    fn from(value: url::ParseError) -> Self {
        FetchError::Endpoint(value.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("malformed payload for {view}: {reason}")]
    MalformedPayload { view: ViewKind, reason: String },

    #[error("series `{series}` is not sorted by time")]
    UnsortedSeries { series: String },

    #[error("invalid image data: {0}")]
    InvalidImage(String),
}
