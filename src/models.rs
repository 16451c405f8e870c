use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// One stored lookup. Rows are only ever inserted.
#[derive(Queryable, Selectable, Deserialize, Serialize, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::address_queries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AddressQuery {
    pub id: i32,
    pub address: String,
    pub balance_trx: f64,
    pub bandwidth: i64,
    pub energy: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Deserialize, Serialize, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::address_queries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NewAddressQuery {
    pub address: String,
    pub balance_trx: f64,
    pub bandwidth: i64,
    pub energy: i64,
}

/// Result of a single address lookup.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct AddressInfo {
    pub address: String,
    pub balance_trx: f64,
    pub bandwidth: i64,
    pub energy: i64,
}

impl From<&AddressInfo> for NewAddressQuery {
    fn from(info: &AddressInfo) -> Self {
        Self {
            address: info.address.clone(),
            balance_trx: info.balance_trx,
            bandwidth: info.bandwidth,
            energy: info.energy,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct AddressQueryView {
    pub id: i32,
    pub address: String,
    pub balance_trx: f64,
    pub bandwidth: i64,
    pub energy: i64,
    pub created_at: DateTime<Utc>,
}

impl From<AddressQuery> for AddressQueryView {
    fn from(record: AddressQuery) -> Self {
        Self {
            id: record.id,
            address: record.address,
            balance_trx: record.balance_trx,
            bandwidth: record.bandwidth,
            energy: record.energy,
            // the store writes UTC timestamps
            created_at: record.created_at.and_utc(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PaginatedAddressQueries {
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub items: Vec<AddressQueryView>,
}
