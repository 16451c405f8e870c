use crate::{
    errors::{ApiError, FieldError},
    models::PaginatedAddressQueries,
    pagination::{Pagination, PaginationQuery},
    server::state::AppStateExt,
    types::ApiResult,
};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

/// `GET /addresses?page=&page_size=`
pub async fn route(
    State(state): AppStateExt,
    query: Result<Query<PaginationQuery>, QueryRejection>,
) -> ApiResult<PaginatedAddressQueries> {
    let Query(pagination_query) =
        query.map_err(|e| ApiError::validation(FieldError::new("query", e.body_text())))?;

    let pagination = Pagination::from_query(pagination_query).map_err(ApiError::validation)?;

    let history = state
        .lookup
        .list_queries(pagination.page, pagination.page_size)
        .await?;

    Ok(Json(history))
}
