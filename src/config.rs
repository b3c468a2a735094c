// src/config.rs

use secrecy::{ExposeSecret, SecretString};
use std::env;
use thiserror::Error;

/// Chain used when `CHAIN_ID` is unset or not a number (BNB Smart Chain).
pub const DEFAULT_CHAIN_ID: u64 = 56;

const REQUIRED_VARS: [&str; 3] = ["PRIVATE_KEY", "RPC_URL", "API_KEY"];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
    #[error("PRIVATE_KEY should start with 0x")]
    InvalidPrivateKey,
}

// All configuration, loaded once at startup from the environment (and .env file).
#[derive(Clone, Debug)]
pub struct Config {
    pub private_key: SecretString,
    pub rpc_url: String,
    pub api_key: SecretString,
    pub chain_id: u64,
    /// Overrides the swap quote endpoint picked from `chain_id`.
    pub swap_api_url: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load variables from the .env file into the environment
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let missing: Vec<&'static str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|key| get(key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let private_key = get("PRIVATE_KEY").unwrap_or_default();
        if !private_key.starts_with("0x") {
            return Err(ConfigError::InvalidPrivateKey);
        }

        let chain_id = get("CHAIN_ID")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|id| *id != 0)
            .unwrap_or(DEFAULT_CHAIN_ID);

        Ok(Config {
            private_key: SecretString::new(private_key),
            rpc_url: get("RPC_URL").unwrap_or_default(),
            api_key: SecretString::new(get("API_KEY").unwrap_or_default()),
            chain_id,
            swap_api_url: get("SWAP_API_URL"),
        })
    }

    pub fn has_private_key(&self) -> bool {
        !self.private_key.expose_secret().is_empty()
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.expose_secret().is_empty()
    }
}
