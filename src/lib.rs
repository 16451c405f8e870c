pub mod addresses;
pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod errors;
pub mod lookup;
pub mod middlewares;
pub mod models;
pub mod pagination;
pub mod schema;
pub mod server;
pub mod tron;
pub mod types;

pub use errors::{ApiError, AppError};
