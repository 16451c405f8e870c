use crate::{
    config::Config,
    errors::AppError,
    types::{LogLevel, Network},
};
use anyhow::{Error, Result};
use clap::{ArgMatches, CommandFactory, Parser};
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use twelf::{config, Layer};

const ENV_PREFIX: &str = "TRON_API_";

/// Unprefixed variables read by earlier deployments, with the field each one sets.
/// They rank below every other source.
const LEGACY_ENV: [(&str, &str); 2] = [
    ("DATABASE_URL", "database_url"),
    ("TRON_NETWORK", "network"),
];

static SHOULD_SKIP_SERIALIZING_FIELDS: AtomicBool = AtomicBool::new(false);

fn should_skip_serializing_fields<T>(_: &T) -> bool {
    SHOULD_SKIP_SERIALIZING_FIELDS.load(Ordering::SeqCst)
}

#[derive(Parser, Debug, Clone)]
#[command(author,
          name = "tron-address-api",
          bin_name = "tron-address-api",
          version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_REVISION"), ")"),
          about,
          long_about = None)]
#[config]
pub struct Args {
    #[arg(long, default_value = "0.0.0.0")]
    pub server_address: IpAddr,

    #[arg(long, default_value = "8000")]
    pub server_port: u16,

    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,

    /// TRON network to query, also read from `TRON_NETWORK`
    #[arg(long, default_value = "mainnet")]
    pub network: Network,

    /// Full node HTTP endpoint, defaults to the public TronGrid endpoint of the network
    #[arg(long)]
    pub node_endpoint: Option<String>,

    /// TronGrid API key, sent as the TRON-PRO-API-KEY header
    #[arg(long)]
    pub api_key: Option<String>,

    #[arg(long, default_value = "10")]
    pub request_timeout_sec: u64,

    /// SQLite database path, or `:memory:`. Also read from `DATABASE_URL`
    #[arg(long)]
    pub database_url: Option<String>,

    #[arg(long, default_value = "8")]
    pub max_db_connections: usize,

    #[arg(long, help = "Write the resolved configuration to the config file and exit")]
    #[serde(skip_serializing_if = "should_skip_serializing_fields")]
    #[serde(default)]
    init: bool,

    #[arg(long, help = "Path to an existing configuration file")]
    #[serde(skip_serializing_if = "should_skip_serializing_fields")]
    config: Option<PathBuf>,
}

fn legacy_env_values(lookup: impl Fn(&str) -> Option<String>) -> Value {
    let values: Map<String, Value> = LEGACY_ENV
        .iter()
        .filter_map(|(var, field)| {
            lookup(var).map(|value| (field.to_string(), Value::String(value)))
        })
        .collect();

    Value::Object(values)
}

fn legacy_env_layer() -> Layer {
    Layer::CustomFn((|| legacy_env_values(|var| std::env::var(var).ok())).into())
}

fn config_layers(config_path: &Path, matches: ArgMatches) -> Vec<Layer> {
    let mut layers = vec![legacy_env_layer()];
    if config_path.exists() {
        layers.push(Layer::Toml(config_path.to_path_buf()));
    }
    layers.push(Layer::Env(Some(String::from(ENV_PREFIX))));
    layers.push(Layer::Clap(matches));
    layers
}

fn get_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tron-address-api")
        .join("config.toml")
}

impl Args {
    fn parse_args(config_path: &Path) -> Result<Args, AppError> {
        let no_config_file = !config_path.exists();
        let no_env_vars = std::env::vars().all(|(key, _val)| {
            !key.starts_with(ENV_PREFIX) && !LEGACY_ENV.iter().any(|(var, _)| key == *var)
        });
        let empty_argv = std::env::args().len() == 1;
        if no_config_file && no_env_vars && empty_argv {
            let _ = Self::command().print_help();
            std::process::exit(1);
        }
        let matches = Self::command().get_matches();

        Self::with_layers(&config_layers(config_path, matches)).map_err(|e| match e {
            twelf::Error::Toml(_) => AppError::Config(format!(
                "Failed to parse config file '{}'",
                config_path.to_string_lossy()
            )),
            _ => AppError::Config(e.to_string()),
        })
    }

    pub fn init() -> Result<Config, AppError> {
        let initial_args = Args::parse();
        let config_path = initial_args.config.unwrap_or_else(get_config_path);

        let arguments = Args::parse_args(&config_path)?;

        SHOULD_SKIP_SERIALIZING_FIELDS.store(true, Ordering::SeqCst);

        if arguments.init {
            arguments
                .write_config(&config_path)
                .map_err(|e| AppError::Config(e.to_string()))?;
            println!("\nConfig has been written to {config_path:?}");

            std::process::exit(0);
        }

        Config::from_args(arguments)
    }

    fn to_file(&self, file_path: &Path) -> Result<()> {
        let toml_string = toml::to_string(self).map_err(Error::new)?;
        let mut file = fs::File::create(file_path)?;
        file.write_all(toml_string.as_bytes())?;
        Ok(())
    }

    fn write_config(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        self.to_file(config_path)
    }
}
