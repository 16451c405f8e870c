//! Address lookups and the history of past lookups.

use crate::{
    addresses::validate_address,
    db::{QueryStore, StoreError},
    errors::FieldError,
    models::{AddressInfo, AddressQueryView, NewAddressQuery, PaginatedAddressQueries},
    pagination::Pagination,
    tron::{TronClient, TronError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("{0}")]
    Validation(FieldError),

    /// Any failure of the network client. The three kinds stay apart here and
    /// are rendered as one client error at the HTTP boundary.
    #[error("Error while fetching TRON address info: {0}")]
    RequestRejected(#[from] TronError),

    #[error("{0}")]
    Storage(#[from] StoreError),
}

#[derive(Clone)]
pub struct LookupService {
    tron: Arc<dyn TronClient>,
    store: Arc<dyn QueryStore>,
}

impl LookupService {
    pub fn new(tron: Arc<dyn TronClient>, store: Arc<dyn QueryStore>) -> Self {
        Self { tron, store }
    }

    /// Fetches balance and resources of `address`, records the query and
    /// returns the derived figures.
    ///
    /// Nothing is fetched for a malformed address, and nothing is stored
    /// unless both network calls succeeded.
    pub async fn lookup_address(&self, address: &str) -> Result<AddressInfo, LookupError> {
        validate_address(address).map_err(LookupError::Validation)?;

        let account = self.tron.get_account(address).await?;
        debug!(address, balance = ?account.balance, "Account fetched");

        let resource = self.tron.get_account_resource(address).await?;
        debug!(address, ?resource, "Account resource fetched");

        let info = AddressInfo {
            address: address.to_string(),
            balance_trx: account.balance_trx(),
            bandwidth: resource.bandwidth(),
            energy: resource.energy(),
        };

        let record = self.store.insert(NewAddressQuery::from(&info)).await?;

        info!(
            address,
            id = record.id,
            balance_trx = info.balance_trx,
            bandwidth = info.bandwidth,
            energy = info.energy,
            "Address lookup recorded"
        );

        Ok(info)
    }

    pub async fn list_queries(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<PaginatedAddressQueries, LookupError> {
        let pagination = Pagination::new(page, page_size).map_err(LookupError::Validation)?;

        let total = self.store.count().await?;
        let items = self
            .store
            .list_page(pagination.offset(), pagination.page_size)
            .await?;

        Ok(PaginatedAddressQueries {
            total,
            page: pagination.page,
            page_size: pagination.page_size,
            items: items.into_iter().map(AddressQueryView::from).collect(),
        })
    }
}
