use super::state::AppState;
use crate::api::{addresses, root};
use axum::{
    Router,
    routing::{get, post},
};

pub fn get_api_routes() -> Router<AppState> {
    Router::new().route("/", get(root::route)).route(
        "/addresses",
        post(addresses::lookup::route).get(addresses::history::route),
    )
}
