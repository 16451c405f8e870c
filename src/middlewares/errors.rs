use crate::errors::ApiError;
use axum::{
    body::to_bytes,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

/// Renders axum's bare 405 as JSON and replaces every 5xx body with a generic
/// message. The original body is logged first. Client errors pass through;
/// `ApiError` logs those itself.
pub async fn error_middleware(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let response = next.run(request).await;

    match response.status() {
        StatusCode::METHOD_NOT_ALLOWED => {
            warn!(path = %path, "Method not allowed");
            ApiError::method_not_allowed().into_response()
        },
        status if status.is_server_error() => {
            let detail = server_error_detail(response).await;
            error!(path = %path, %status, "Server error: {detail}");
            ApiError::internal_server_error_user().into_response()
        },
        _ => response,
    }
}

async fn server_error_detail(response: Response) -> String {
    match to_bytes(response.into_body(), usize::MAX).await {
        Ok(bytes) => match serde_json::from_slice::<ApiError>(&bytes) {
            Ok(api_error) => format!("{} - {}", api_error.error, api_error.message),
            Err(_) => String::from_utf8_lossy(&bytes).into_owned(),
        },
        Err(e) => format!("unreadable body: {e}"),
    }
}
