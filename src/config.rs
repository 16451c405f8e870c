use crate::cli::Args;
use crate::errors::AppError;
use crate::types::Network;
use reqwest::Url;
use std::net::IpAddr;
use std::time::Duration;
use tracing::Level;

/// Resolved at startup and immutable for the lifetime of the process.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_address: IpAddr,
    pub server_port: u16,
    pub log_level: Level,
    pub network: Network,
    pub node_endpoint: Url,
    pub api_key: Option<String>,
    pub request_timeout: Duration,
    pub database_url: String,
    pub max_db_connections: usize,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self, AppError> {
        let database_url = args
            .database_url
            .filter(|url| !url.trim().is_empty())
            .ok_or(AppError::Config("--database-url must be set".into()))?;

        let endpoint = args
            .node_endpoint
            .unwrap_or_else(|| args.network.default_endpoint().to_string());

        let node_endpoint = Url::parse(&endpoint).map_err(|e| {
            AppError::Config(format!("Invalid --node-endpoint '{endpoint}': {e}"))
        })?;

        if args.request_timeout_sec == 0 {
            return Err(AppError::Config(
                "--request-timeout-sec must be greater than 0".into(),
            ));
        }

        let api_key = args.api_key.filter(|key| !key.trim().is_empty());

        Ok(Config {
            server_address: args.server_address,
            server_port: args.server_port,
            log_level: args.log_level.into(),
            network: args.network,
            node_endpoint,
            api_key,
            request_timeout: Duration::from_secs(args.request_timeout_sec),
            database_url,
            max_db_connections: args.max_db_connections,
        })
    }
}
