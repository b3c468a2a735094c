// src/blockchain/nonce_manager.rs

use std::sync::Arc;

use dashmap::DashMap;
use ethers_core::types::{Address, U256};
use reqwest::Client;
use tokio::sync::Mutex;

use crate::blockchain::services::rpc;

// Hands out sequential nonces per sender so back-to-back transactions
// (approve then swap) do not collide.
#[derive(Debug, Clone, Default)]
pub struct NonceManager {
    nonces: Arc<DashMap<Address, Arc<Mutex<NonceState>>>>,
}

#[derive(Debug)]
struct NonceState {
    next_nonce: Option<U256>,
}

impl NonceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the next valid nonce for a given address.
    /// Fetches the pending transaction count on first use, then counts locally.
    pub async fn get_next_nonce(
        &self,
        client: &Client,
        rpc_url: &str,
        address: Address,
    ) -> anyhow::Result<U256> {
        let address_nonce_lock = self
            .nonces
            .entry(address)
            .or_insert_with(|| Arc::new(Mutex::new(NonceState { next_nonce: None })))
            .clone();

        let mut state = address_nonce_lock.lock().await;

        let nonce_to_use = match state.next_nonce {
            Some(nonce) => nonce,
            None => {
                let result = rpc::call(
                    client,
                    rpc_url,
                    "eth_getTransactionCount",
                    serde_json::json!([format!("{:?}", address), "pending"]),
                )
                .await?;
                rpc::parse_quantity(&result)?
            }
        };

        state.next_nonce = Some(nonce_to_use + U256::one());

        Ok(nonce_to_use)
    }

    /// Drops the cached nonce so the next call re-reads it from the node.
    /// Used after a submission fails and the reserved nonce was never consumed.
    pub async fn reset(&self, address: Address) {
        if let Some(lock) = self.nonces.get(&address).map(|entry| entry.clone()) {
            lock.lock().await.next_nonce = None;
        }
    }
}
