use crate::{db::StoreError, lookup::LookupError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::{fmt, io};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server startup error: {0}")]
    Server(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        error!("I/O Error occurred: {}", err);
        AppError::Server(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Database(err.to_string())
    }
}

/// A single rejected input, reported back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_address() -> Self {
        Self::new(
            "address",
            "The provided value is not a valid TRON address.",
        )
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Error body of every failed HTTP request.
/// Contains the following fields:
/// - error: a short description of the error
/// - message: a longer description of the error
/// - status_code: the HTTP status code to return
/// - detail: the rejected fields, for validation errors only
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detail: Vec<FieldError>,
}

impl ApiError {
    pub fn not_found() -> Self {
        Self {
            error: "Not Found".to_string(),
            message: "The requested component has not been found.".to_string(),
            status_code: 404,
            detail: vec![],
        }
    }

    pub fn bad_request(message: String) -> Self {
        Self {
            error: "Bad Request".to_string(),
            message,
            status_code: 400,
            detail: vec![],
        }
    }

    /// Input rejected before anything was fetched or stored.
    pub fn validation(field_error: FieldError) -> Self {
        Self {
            error: "Unprocessable Entity".to_string(),
            message: field_error.to_string(),
            status_code: 422,
            detail: vec![field_error],
        }
    }

    pub fn method_not_allowed() -> Self {
        Self {
            error: "Method Not Allowed".to_string(),
            message: "This method is not supported on the requested path.".to_string(),
            status_code: 405,
            detail: vec![],
        }
    }

    /// This error is converted in middleware to internal_server_error_user
    pub fn internal_server_error(message: String) -> Self {
        Self {
            error: "Internal Server Error".to_string(),
            message,
            status_code: 500,
            detail: vec![],
        }
    }

    /// Internal server error with a generic message, safe to show to users
    pub fn internal_server_error_user() -> Self {
        Self::internal_server_error("An unexpected error occurred on the server.".to_string())
    }
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        match &err {
            LookupError::Validation(field_error) => Self::validation(field_error.clone()),
            LookupError::RequestRejected(_) => Self::bad_request(err.to_string()),
            LookupError::Storage(_) => Self::internal_server_error(err.to_string()),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiError: {}", self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = match self.status_code {
            400 => StatusCode::BAD_REQUEST,
            404 => StatusCode::NOT_FOUND,
            405 => StatusCode::METHOD_NOT_ALLOWED,
            422 => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // server errors are logged by `error_middleware`, which still sees the detail
        if status_code.is_client_error() {
            warn!(
                status = self.status_code,
                "Client error: {} - {}", self.error, self.message
            );
        }

        (status_code, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tron::TronError;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tracing_test::traced_test;

    #[rstest]
    #[case(TronError::Api("node unavailable".to_string()))]
    #[case(TronError::BadAddress("Invalid address provided".to_string()))]
    #[case(TronError::NotFound("account not found on-chain".to_string()))]
    fn network_failures_render_as_bad_request(#[case] tron_error: TronError) {
        let underlying = tron_error.to_string();
        let api_error = ApiError::from(LookupError::RequestRejected(tron_error));

        assert_eq!(api_error.status_code, 400);
        assert!(
            api_error.message.contains(&underlying),
            "message `{}` should embed `{underlying}`",
            api_error.message
        );
        assert!(api_error.detail.is_empty());
    }

    #[test]
    fn validation_carries_field_detail() {
        let api_error = ApiError::from(LookupError::Validation(FieldError::invalid_address()));

        assert_eq!(api_error.status_code, 422);
        assert_eq!(api_error.detail, vec![FieldError::invalid_address()]);
    }

    #[test]
    fn storage_failure_is_a_server_error() {
        let api_error = ApiError::from(LookupError::Storage(StoreError::Migration(
            "no such table".to_string(),
        )));

        assert_eq!(api_error.status_code, 500);
    }

    #[rstest]
    #[case(ApiError::not_found(), StatusCode::NOT_FOUND)]
    #[case(ApiError::bad_request("nope".to_string()), StatusCode::BAD_REQUEST)]
    #[case(ApiError::validation(FieldError::new("page", "must be >= 1")), StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(ApiError::method_not_allowed(), StatusCode::METHOD_NOT_ALLOWED)]
    #[case(ApiError::internal_server_error_user(), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_codes(#[case] error: ApiError, #[case] expected: StatusCode) {
        assert_eq!(error.into_response().status(), expected);
    }

    #[test]
    fn detail_is_omitted_when_empty() {
        let json = serde_json::to_value(ApiError::not_found()).unwrap();

        assert!(json.get("detail").is_none());
        assert_eq!(json["status_code"], 404);
    }

    #[test]
    #[traced_test]
    fn client_errors_are_logged_on_render() {
        let _ = ApiError::validation(FieldError::invalid_address()).into_response();

        assert!(logs_contain("Client error: Unprocessable Entity"));
        assert!(logs_contain("not a valid TRON address"));
    }
}
