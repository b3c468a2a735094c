//! Wallet session handle.
//!
//! A `WalletContext` bundles everything an action needs to talk to the chain:
//! the signer (bound to the configured chain id), the node endpoint, the
//! aggregator credentials and a nonce manager shared by every submission.

use std::time::Duration;

use anyhow::Result;
use ethers_core::types::{Address, TransactionRequest};
use ethers_signers::{LocalWallet, Signer};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use crate::blockchain::{
    models::{ReceiptStatus, TransactionResponse},
    nonce_manager::NonceManager,
    services::transactions,
};

#[derive(Clone, Debug)]
pub struct WalletContext {
    wallet: LocalWallet,
    rpc_url: String,
    api_key: SecretString,
    swap_quote_url: String,
    http: Client,
    nonce_manager: NonceManager,
    receipt_attempts: u32,
    receipt_interval: Duration,
}

impl WalletContext {
    pub fn new(
        wallet: LocalWallet,
        rpc_url: impl Into<String>,
        api_key: SecretString,
        swap_quote_url: impl Into<String>,
    ) -> Self {
        Self {
            wallet,
            rpc_url: rpc_url.into(),
            api_key,
            swap_quote_url: swap_quote_url.into(),
            http: Client::new(),
            nonce_manager: NonceManager::new(),
            receipt_attempts: transactions::RECEIPT_POLL_ATTEMPTS,
            receipt_interval: transactions::RECEIPT_POLL_INTERVAL,
        }
    }

    /// Overrides how long submissions wait for a receipt.
    pub fn with_receipt_polling(mut self, attempts: u32, interval: Duration) -> Self {
        self.receipt_attempts = attempts;
        self.receipt_interval = interval;
        self
    }

    pub fn chain_id(&self) -> u64 {
        self.wallet.chain_id()
    }

    pub fn address(&self) -> Address {
        self.wallet.address()
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    pub fn swap_quote_url(&self) -> &str {
        &self.swap_quote_url
    }

    /// Signs and submits `tx` from the session wallet.
    pub async fn submit(&self, tx: TransactionRequest) -> Result<TransactionResponse> {
        transactions::send_evm_transaction(
            &self.http,
            &self.rpc_url,
            &self.wallet,
            tx,
            &self.nonce_manager,
        )
        .await
    }

    pub async fn wait_for_receipt(&self, tx_hash: &str) -> Result<ReceiptStatus> {
        transactions::wait_for_receipt(
            &self.http,
            &self.rpc_url,
            tx_hash,
            self.receipt_attempts,
            self.receipt_interval,
        )
        .await
    }
}
