use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use objd_store::StoreError;
use objd_types::TypeError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Incorrect ID: wrong ID syntax")]
    InvalidKeySyntax(String),

    #[error("Incorrect ID: identifier exceeds {max} characters")]
    KeyTooLong { max: usize },

    #[error("Content cannot exceeds {max} bytes")]
    PayloadTooLarge { max: usize },

    #[error("Content-Type cannot be empty")]
    MissingContentType,

    #[error("{0} does not exist")]
    NotFound(String),

    #[error("404 page not found")]
    RouteNotFound,

    #[error("request body read failed: {0}")]
    BodyRead(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("store error: {0}")]
    Store(StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidKeySyntax(_)
            | Self::KeyTooLong { .. }
            | Self::MissingContentType => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::NotFound(_) | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::BodyRead(_)
            | Self::Serialization(_)
            | Self::Store(_)
            | Self::Config(_)
            | Self::Io(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text sent to the client. Internal errors get a fixed message; their
    /// detail only goes to the log.
    pub fn public_message(&self) -> String {
        match self {
            Self::BodyRead(_) => "Request processing error".into(),
            Self::Serialization(_) => "Data cannot be processed".into(),
            Self::Store(_) => "Database temporary error".into(),
            Self::Config(_) | Self::Io(_) | Self::Internal(_) => "Internal server error".into(),
            other => other.to_string(),
        }
    }
}

impl From<TypeError> for ServerError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidKeySyntax(raw) => Self::InvalidKeySyntax(raw),
            TypeError::KeyTooLong { max, .. } => Self::KeyTooLong { max },
            TypeError::Serialization(msg) | TypeError::Deserialization(msg) => {
                Self::Serialization(msg)
            }
        }
    }
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Codec(e) => e.into(),
            other => Self::Store(other),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, self.public_message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(
            ServerError::InvalidKeySyntax("a-".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::KeyTooLong { max: 100 }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::MissingContentType.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::PayloadTooLarge { max: 1024 }.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ServerError::NotFound("abc".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn client_messages() {
        assert_eq!(
            ServerError::NotFound("abc".into()).public_message(),
            "abc does not exist"
        );
        assert_eq!(
            ServerError::KeyTooLong { max: 100 }.public_message(),
            "Incorrect ID: identifier exceeds 100 characters"
        );
        assert_eq!(
            ServerError::PayloadTooLarge { max: 1024 }.public_message(),
            "Content cannot exceeds 1024 bytes"
        );
    }

    #[test]
    fn internal_detail_is_hidden() {
        let err = ServerError::BodyRead("connection reset by peer".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Request processing error");

        let err = ServerError::Internal("join error".into());
        assert!(!err.public_message().contains("join"));
    }

    #[test]
    fn type_errors_convert() {
        let err: ServerError = TypeError::KeyTooLong { len: 120, max: 100 }.into();
        assert!(matches!(err, ServerError::KeyTooLong { max: 100 }));

        let err: ServerError = TypeError::Serialization("boom".into()).into();
        assert_eq!(err.public_message(), "Data cannot be processed");
    }

    #[test]
    fn store_codec_errors_become_serialization_errors() {
        let err: ServerError = StoreError::Codec(TypeError::Deserialization("bad".into())).into();
        assert!(matches!(err, ServerError::Serialization(_)));
    }
}
