//! HTTP error mapping from domain errors.
//!
//! Keep the domain free of transport concerns by translating [`Error`] into
//! envelope responses with the fixed status mapping here.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::envelope::Envelope;

/// Domain error carried through actix handlers.
#[derive(Debug, Clone)]
pub struct ApiError(Error);

impl ApiError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.0.code()
    }

    /// Human readable message.
    pub fn message(&self) -> &str {
        self.0.message()
    }

    fn to_status_code(&self) -> StatusCode {
        match self.0.code() {
            ErrorCode::InvalidRequest | ErrorCode::AlreadyExists => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Upstream => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        if value.code() == ErrorCode::Internal {
            error!(message = value.message(), details = ?value.details(), "internal error");
        }
        ApiError(value)
    }
}

impl From<actix_web::Error> for ApiError {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to API error");
        ApiError(Error::internal("Internal server error"))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.message())
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.to_status_code()
    }

    fn error_response(&self) -> HttpResponse {
        // Internal messages are redacted; everything else passes through.
        let message = if self.0.code() == ErrorCode::Internal {
            "Internal server error".to_owned()
        } else {
            self.0.message().to_owned()
        };
        HttpResponse::build(self.status_code()).json(Envelope::<serde_json::Value>::fail(message))
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::invalid(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case::collision(Error::already_exists("dup"), StatusCode::BAD_REQUEST)]
    #[case::missing(Error::not_found("gone"), StatusCode::NOT_FOUND)]
    #[case::upstream(Error::upstream("down"), StatusCode::BAD_GATEWAY)]
    #[case::internal(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn codes_map_to_fixed_status_codes(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(ApiError::from(error).status_code(), expected);
    }

    async fn response_body(response: HttpResponse) -> serde_json::Value {
        let body = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("body bytes");
        serde_json::from_slice(&body).expect("json body")
    }

    #[actix_web::test]
    async fn internal_messages_are_redacted() {
        let response = ApiError::from(Error::internal("connection string leaked")).error_response();
        let value = response_body(response).await;
        assert_eq!(value["message"], serde_json::json!("Internal server error"));
        assert_eq!(value["error"], serde_json::json!(true));
        assert_eq!(value["data"], serde_json::Value::Null);
    }

    #[actix_web::test]
    async fn client_errors_keep_their_messages() {
        let response =
            ApiError::from(Error::already_exists("Avatar already exists")).error_response();
        let value = response_body(response).await;
        assert_eq!(value["message"], serde_json::json!("Avatar already exists"));
    }
}
