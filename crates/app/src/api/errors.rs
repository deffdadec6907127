//! API Errors

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors returned by the backend service clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never got a response.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The requested record does not exist.
    #[error("not found")]
    NotFound,

    /// The session is missing, expired or lacks permission.
    #[error("not authorized, log in again")]
    Unauthorized,

    /// The service refused the request.
    #[error("service responded with status {status}: {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Message reported by the service
        message: String,
    },
}

impl ApiError {
    /// Builds the error for a non-success response.
    pub(crate) fn from_response(status: StatusCode, body: &str) -> Self {
        match status {
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized,
            status => Self::Rejected {
                status: status.as_u16(),
                message: error_message(body),
            },
        }
    }

    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(error) => error.is_timeout() || error.is_connect(),
            Self::Rejected { status, .. } => *status >= 500,
            Self::Decode(_) | Self::NotFound | Self::Unauthorized => false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: MessageField,
}

/// Nest reports either one message or a list of validation messages.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MessageField {
    One(String),
    Many(Vec<String>),
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: MessageField::One(message),
        }) => message,
        Ok(ErrorBody {
            message: MessageField::Many(messages),
        }) => messages.join("; "),
        Err(_err) => body.trim().to_string(),
    }
}
