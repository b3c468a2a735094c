// src/blockchain/models.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;

// --- Error types for engine operations ---

/// Failures while building a wallet session.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
    #[error("invalid RPC URL '{url}': {reason}")]
    InvalidRpcUrl { url: String, reason: String },
    #[error("{0:#}")]
    Rpc(#[from] anyhow::Error),
}

/// Failures raised by an action invocation.
#[derive(Error, Debug)]
pub enum ActionError {
    #[error("invalid arguments for {action}: {reason}")]
    InvalidArguments { action: &'static str, reason: String },
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),
    #[error("{0:#}")]
    Failed(#[from] anyhow::Error),
}

impl ActionError {
    /// Lifts node-reported balance failures out of an opaque service error.
    pub fn from_service(err: anyhow::Error) -> Self {
        let message = format!("{err:#}");
        if message.to_lowercase().contains("insufficient funds") {
            ActionError::InsufficientFunds(message)
        } else {
            ActionError::Failed(err)
        }
    }
}

// --- Transaction Models ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionResponse {
    pub tx_hash: String,
}

/// Outcome of waiting for a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptStatus {
    Confirmed,
    Reverted,
    Pending,
}

impl ReceiptStatus {
    pub fn describe(self) -> &'static str {
        match self {
            ReceiptStatus::Confirmed => "confirmed",
            ReceiptStatus::Reverted => "reverted",
            ReceiptStatus::Pending => "pending (not yet mined)",
        }
    }
}

// --- Balance Models ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceEntry {
    pub symbol: String,
    /// Token contract, `None` for the chain's native coin.
    pub token: Option<String>,
    /// Human-readable amount, already scaled by the token decimals.
    pub amount: String,
}

impl std::fmt::Display for BalanceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.token {
            Some(token) => write!(f, "{} ({}): {}", self.symbol, token, self.amount),
            None => write!(f, "{}: {}", self.symbol, self.amount),
        }
    }
}

/// Symbol of the native coin on well-known chains.
pub fn native_symbol(chain_id: u64) -> &'static str {
    match chain_id {
        56 | 97 => "BNB",
        137 | 80001 => "MATIC",
        43114 | 43113 => "AVAX",
        _ => "ETH",
    }
}
