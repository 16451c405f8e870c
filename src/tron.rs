//! TRON full-node client.
//!
//! [`TronClient`] is the capability the lookup service depends on. [`TronGrid`]
//! implements it over the HTTP API exposed by TronGrid and by any `java-tron`
//! full node (`/wallet/getaccount`, `/wallet/getaccountresource`).

use crate::{
    addresses::AddressFormat,
    config::Config,
    errors::AppError,
};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client, Url,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

/// 1 TRX = 1,000,000 SUN.
pub const SUN_PER_TRX: f64 = 1_000_000.0;

pub const API_KEY_HEADER: &str = "TRON-PRO-API-KEY";

const GET_ACCOUNT_PATH: &str = "wallet/getaccount";
const GET_ACCOUNT_RESOURCE_PATH: &str = "wallet/getaccountresource";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TronError {
    /// Transport failure or a generic error reported by the node.
    #[error("{0}")]
    Api(String),

    /// The node rejected the address itself.
    #[error("{0}")]
    BadAddress(String),

    /// Well formed address without an account on-chain.
    #[error("{0}")]
    NotFound(String),
}

impl TronError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Api(_) => "api_error",
            Self::BadAddress(_) => "bad_address",
            Self::NotFound(_) => "not_found",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub address: Option<String>,
    /// Balance in SUN.
    #[serde(default)]
    pub balance: Option<i64>,
}

impl Account {
    pub fn balance_trx(&self) -> f64 {
        sun_to_trx(self.balance.unwrap_or(0))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountResource {
    #[serde(rename = "freeNetLimit", default)]
    pub free_net_limit: Option<i64>,
    #[serde(rename = "freeNetUsed", default)]
    pub free_net_used: Option<i64>,
    #[serde(rename = "EnergyLimit", default)]
    pub energy_limit: Option<i64>,
    #[serde(rename = "EnergyUsed", default)]
    pub energy_used: Option<i64>,
}

impl AccountResource {
    /// Free bandwidth left. Negative when usage exceeded the free limit.
    pub fn bandwidth(&self) -> i64 {
        self.free_net_limit
            .unwrap_or(0)
            .saturating_sub(self.free_net_used.unwrap_or(0))
    }

    /// Energy left. Negative when usage exceeded the limit.
    pub fn energy(&self) -> i64 {
        self.energy_limit
            .unwrap_or(0)
            .saturating_sub(self.energy_used.unwrap_or(0))
    }
}

pub fn sun_to_trx(sun: i64) -> f64 {
    sun as f64 / SUN_PER_TRX
}

#[async_trait]
pub trait TronClient: Send + Sync {
    async fn get_account(&self, address: &str) -> Result<Account, TronError>;

    async fn get_account_resource(&self, address: &str) -> Result<AccountResource, TronError>;
}

#[derive(Clone)]
pub struct TronGrid {
    base_url: Url,
    client: Client,
}

impl TronGrid {
    pub fn new(endpoint: Url, api_key: Option<&str>, timeout: Duration) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();

        if let Some(api_key) = api_key {
            let value = HeaderValue::from_str(api_key)
                .map_err(|e| AppError::Config(format!("invalid API key: {e}")))?;
            headers.insert(API_KEY_HEADER, value);
        }

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::Server(format!("failed to build client: {e}")))?;

        // `Url::join` replaces the last path segment unless the base ends with a slash
        let base_url = if endpoint.path().ends_with('/') {
            endpoint
        } else {
            let with_slash = format!("{endpoint}/");
            Url::parse(&with_slash).map_err(|e| AppError::Config(format!("URL error: {e}")))?
        };

        Ok(Self { base_url, client })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(
            config.node_endpoint.clone(),
            config.api_key.as_deref(),
            config.request_timeout,
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn post(&self, path: &str, address: &str) -> Result<Value, TronError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| TronError::Api(format!("URL error: {e}")))?;

        let body = json!({
            "address": address,
            "visible": AddressFormat::detect(address) != Some(AddressFormat::Hex),
        });

        debug!(path, url = %url, address, "TronGrid POST");

        let response = self
            .client
            .post(url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| TronError::Api(format!("HTTP error: {e}")))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|e| TronError::Api(format!("HTTP error: {e}")))?;

        if !status.is_success() {
            return Err(TronError::Api(format!(
                "node responded with {status}: {body_text}"
            )));
        }

        let value: Value = serde_json::from_str(&body_text).map_err(|e| {
            error!(
                path,
                url = %url,
                status = %status,
                response_body = %body_text,
                error = %e,
                "TronGrid failed to parse response"
            );
            TronError::Api(format!("JSON error: {e}"))
        })?;

        if let Some(message) = value.get("Error") {
            return Err(classify_node_error(message));
        }

        Ok(value)
    }
}

fn classify_node_error(message: &Value) -> TronError {
    let message = match message {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let lowercase = message.to_lowercase();

    if lowercase.contains("address") && (lowercase.contains("invalid") || lowercase.contains("bad"))
    {
        TronError::BadAddress(message)
    } else {
        TronError::Api(message)
    }
}

fn is_empty_object(value: &Value) -> bool {
    value.as_object().is_some_and(|object| object.is_empty())
}

#[async_trait]
impl TronClient for TronGrid {
    async fn get_account(&self, address: &str) -> Result<Account, TronError> {
        let value = self.post(GET_ACCOUNT_PATH, address).await?;

        // The node answers with `{}` for addresses that never received anything
        if is_empty_object(&value) {
            return Err(TronError::NotFound("account not found on-chain".to_string()));
        }

        serde_json::from_value(value).map_err(|e| TronError::Api(format!("JSON error: {e}")))
    }

    async fn get_account_resource(&self, address: &str) -> Result<AccountResource, TronError> {
        let value = self.post(GET_ACCOUNT_RESOURCE_PATH, address).await?;

        serde_json::from_value(value).map_err(|e| TronError::Api(format!("JSON error: {e}")))
    }
}
