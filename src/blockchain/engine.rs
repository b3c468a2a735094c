// src/blockchain/engine.rs

use std::str::FromStr;

use anyhow::Context;
use async_trait::async_trait;
use ethers_core::types::U256;
use ethers_signers::{LocalWallet, Signer};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::json;
use tracing::{info, warn};
use url::Url;

use crate::blockchain::{
    action::ActionSet,
    actions,
    context::WalletContext,
    models::EngineError,
    services::{rpc, swap},
};
use crate::config::Config;

/// A wallet-automation engine: builds authenticated sessions and publishes the
/// actions that can run against them.
#[async_trait]
pub trait WalletEngine: Send + Sync {
    async fn configure(&self, config: &Config) -> Result<WalletContext, EngineError>;

    fn actions(&self) -> ActionSet;
}

/// Engine that signs with a local key and talks to an EVM node over JSON-RPC.
#[derive(Clone, Debug, Default)]
pub struct EvmEngine {
    http: Client,
}

impl EvmEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WalletEngine for EvmEngine {
    async fn configure(&self, config: &Config) -> Result<WalletContext, EngineError> {
        let wallet = LocalWallet::from_str(config.private_key.expose_secret())
            .map_err(|e| EngineError::InvalidPrivateKey(e.to_string()))?
            .with_chain_id(config.chain_id);

        let url = Url::parse(&config.rpc_url).map_err(|e| EngineError::InvalidRpcUrl {
            url: config.rpc_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(EngineError::InvalidRpcUrl {
                url: config.rpc_url.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        let reported = rpc::call(&self.http, &config.rpc_url, "eth_chainId", json!([]))
            .await
            .context("RPC endpoint did not answer eth_chainId")?;
        let reported = rpc::parse_quantity(&reported)?;
        if reported != U256::from(config.chain_id) {
            warn!(
                "RPC endpoint reports chain {} but CHAIN_ID is {}",
                reported, config.chain_id
            );
        }

        let swap_quote_url = config
            .swap_api_url
            .clone()
            .unwrap_or_else(|| swap::default_quote_url(config.chain_id));

        info!(
            "Wallet session ready for {:?} on chain {}",
            wallet.address(),
            config.chain_id
        );
        Ok(WalletContext::new(
            wallet,
            config.rpc_url.clone(),
            config.api_key.clone(),
            swap_quote_url,
        ))
    }

    fn actions(&self) -> ActionSet {
        actions::all()
    }
}
