use crate::{config::Config, db::QueryStore, lookup::LookupService, tron::TronClient};
use axum::extract::State;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub lookup: LookupService,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        tron: Arc<dyn TronClient>,
        store: Arc<dyn QueryStore>,
    ) -> Self {
        Self {
            config,
            lookup: LookupService::new(tron, store),
        }
    }
}

pub type AppStateExt = State<AppState>;
