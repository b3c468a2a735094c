// src/blockchain/services/transactions.rs

use std::time::Duration;

use crate::blockchain::{
    models::{ReceiptStatus, TransactionResponse},
    nonce_manager::NonceManager,
};
use anyhow::{anyhow, Context, Result};
use ethers_core::types::TransactionRequest;
use ethers_signers::{LocalWallet, Signer};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::rpc;

pub const RECEIPT_POLL_ATTEMPTS: u32 = 30;
pub const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Signs and submits an EVM transaction from `wallet`.
/// Nonces come from the NonceManager so sequential submissions never collide.
pub async fn send_evm_transaction(
    client: &Client,
    rpc_url: &str,
    wallet: &LocalWallet,
    tx_request: TransactionRequest,
    nonce_manager: &NonceManager,
) -> Result<TransactionResponse> {
    let from_address = wallet.address();
    let nonce = nonce_manager
        .get_next_nonce(client, rpc_url, from_address)
        .await?;

    let mut tx = tx_request
        .from(from_address)
        .nonce(nonce)
        .chain_id(wallet.chain_id());

    let submitted = async {
        if tx.gas.is_none() {
            let call_obj = serde_json::to_value(&tx)?;
            let gas = rpc::call(client, rpc_url, "eth_estimateGas", json!([call_obj]))
                .await
                .context("Failed to estimate gas")?;
            tx.gas = Some(rpc::parse_quantity(&gas)?);
        }

        if tx.gas_price.is_none() {
            let gas_price = rpc::call(client, rpc_url, "eth_gasPrice", json!([]))
                .await
                .context("Failed to get gasPrice")?;
            tx.gas_price = Some(rpc::parse_quantity(&gas_price)?);
        }

        let signature = wallet.sign_transaction(&tx.clone().into()).await?;
        let raw_tx = tx.rlp_signed(&signature);

        let result = rpc::call(
            client,
            rpc_url,
            "eth_sendRawTransaction",
            json!([format!("0x{}", hex::encode(raw_tx))]),
        )
        .await?;

        let tx_hash = result
            .as_str()
            .ok_or_else(|| anyhow!("Failed to extract transaction hash from response"))?;
        Ok::<_, anyhow::Error>(TransactionResponse {
            tx_hash: tx_hash.to_string(),
        })
    }
    .await;

    if submitted.is_err() {
        nonce_manager.reset(from_address).await;
    }
    submitted
}

/// Polls for the receipt of `tx_hash`.
pub async fn wait_for_receipt(
    client: &Client,
    rpc_url: &str,
    tx_hash: &str,
    attempts: u32,
    interval: Duration,
) -> Result<ReceiptStatus> {
    for attempt in 0..attempts {
        let receipt = rpc::call(client, rpc_url, "eth_getTransactionReceipt", json!([tx_hash])).await?;
        if let Some(status) = receipt_status(&receipt) {
            return Ok(status);
        }
        debug!("Receipt for {} not available yet (attempt {})", tx_hash, attempt + 1);
        if attempt + 1 < attempts {
            tokio::time::sleep(interval).await;
        }
    }
    warn!("Gave up waiting for receipt of {}", tx_hash);
    Ok(ReceiptStatus::Pending)
}

fn receipt_status(receipt: &Value) -> Option<ReceiptStatus> {
    if receipt.is_null() {
        return None;
    }
    match receipt.get("status").and_then(Value::as_str) {
        Some("0x0") => Some(ReceiptStatus::Reverted),
        _ => Some(ReceiptStatus::Confirmed),
    }
}
