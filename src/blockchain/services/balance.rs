use anyhow::Result;
use ethers_core::types::{Address, U256};
use reqwest::Client;
use serde_json::json;

use super::rpc;

/// Native coin balance of `address`, in wei.
pub async fn native_balance(client: &Client, rpc_url: &str, address: Address) -> Result<U256> {
    let result = rpc::call(
        client,
        rpc_url,
        "eth_getBalance",
        json!([format!("{:?}", address), "latest"]),
    )
    .await?;
    rpc::parse_quantity(&result)
}
