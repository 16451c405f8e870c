use crate::{
    addresses::AddressRequest,
    errors::{ApiError, FieldError},
    models::AddressInfo,
    server::state::AppStateExt,
    types::ApiResult,
};
use axum::{Json, body::Bytes, extract::State};

/// `POST /addresses`
///
/// The body is parsed by hand so a malformed payload gets the same 422 shape
/// as an invalid address.
pub async fn route(State(state): AppStateExt, body: Bytes) -> ApiResult<AddressInfo> {
    let request: AddressRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::validation(FieldError::new("body", e.to_string())))?;

    let info = state.lookup.lookup_address(&request.address).await?;

    Ok(Json(info))
}
