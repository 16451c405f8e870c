use crate::{
    models::{AddressQuery, NewAddressQuery},
    schema::address_queries,
};
use async_trait::async_trait;
use deadpool_diesel::sqlite::{Manager, Pool};
use diesel::{connection::SimpleConnection, prelude::*, sqlite::SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use thiserror::Error;
use tracing::info;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/");

/// SQLite keeps one private database per `:memory:` connection.
pub const IN_MEMORY: &str = ":memory:";

const CONNECTION_PRAGMAS: &str = "PRAGMA busy_timeout = 5000;";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database connection error: {0}")]
    Connection(#[from] deadpool_diesel::PoolError),

    #[error("Database interaction error: {0}")]
    Interaction(#[from] deadpool_diesel::InteractError),

    #[error("Database query error: {0}")]
    Query(#[from] diesel::result::Error),

    #[error("Database pool error: {0}")]
    Pool(String),

    #[error("Database migration error: {0}")]
    Migration(String),
}

/// Append-only history of address lookups.
#[async_trait]
pub trait QueryStore: Send + Sync {
    /// Stores a new record. The store assigns `id` and `created_at`.
    async fn insert(&self, record: NewAddressQuery) -> Result<AddressQuery, StoreError>;

    async fn count(&self) -> Result<i64, StoreError>;

    /// Records ordered by `created_at` then `id`, newest first.
    async fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<AddressQuery>, StoreError>;
}

#[derive(Clone)]
pub struct Db {
    pool: Pool,
}

impl Db {
    pub async fn new(database_url: &str, max_connections: usize) -> Result<Self, StoreError> {
        let max_size = if database_url == IN_MEMORY {
            1
        } else {
            max_connections.max(1)
        };

        let manager = Manager::new(database_url, deadpool_diesel::Runtime::Tokio1);
        let pool = Pool::builder(manager)
            .max_size(max_size)
            .build()
            .map_err(|e| StoreError::Pool(e.to_string()))?;

        let connection = pool.get().await?;

        connection
            .interact(|c| {
                c.batch_execute("PRAGMA journal_mode = WAL;")
                    .map_err(|e| e.to_string())?;
                c.run_pending_migrations(MIGRATIONS)
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            })
            .await?
            .map_err(StoreError::Migration)?;

        info!(database_url, max_size, "Database ready");

        Ok(Self { pool })
    }

    async fn interact<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut SqliteConnection) -> QueryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let connection = self.pool.get().await?;

        let result = connection
            .interact(move |c| {
                c.batch_execute(CONNECTION_PRAGMAS)?;
                f(c)
            })
            .await??;

        Ok(result)
    }
}

#[async_trait]
impl QueryStore for Db {
    async fn insert(&self, record: NewAddressQuery) -> Result<AddressQuery, StoreError> {
        self.interact(move |c| {
            diesel::insert_into(address_queries::table)
                .values(&record)
                .returning(AddressQuery::as_returning())
                .get_result(c)
        })
        .await
    }

    async fn count(&self) -> Result<i64, StoreError> {
        self.interact(|c| address_queries::table.count().get_result(c))
            .await
    }

    async fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<AddressQuery>, StoreError> {
        self.interact(move |c| {
            address_queries::table
                .order((
                    address_queries::created_at.desc(),
                    address_queries::id.desc(),
                ))
                .offset(offset)
                .limit(limit)
                .select(AddressQuery::as_select())
                .load(c)
        })
        .await
    }
}
