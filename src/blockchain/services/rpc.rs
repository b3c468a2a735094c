// src/blockchain/services/rpc.rs

use anyhow::{anyhow, Context, Result};
use ethers_core::types::U256;
use reqwest::Client;
use serde_json::{json, Value};

/// Sends one JSON-RPC request to the node and returns its `result` member.
pub async fn call(client: &Client, rpc_url: &str, method: &str, params: Value) -> Result<Value> {
    let payload = json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
        "id": 1
    });
    let response: Value = client
        .post(rpc_url)
        .json(&payload)
        .send()
        .await
        .with_context(|| format!("{method} request failed"))?
        .json()
        .await
        .with_context(|| format!("{method} returned a non-JSON body"))?;

    if let Some(err) = response.get("error") {
        let message = err
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string());
        return Err(anyhow!("RPC Error on {}: {}", method, message));
    }
    response
        .get("result")
        .cloned()
        .ok_or_else(|| anyhow!("RPC response to {} missing 'result' field", method))
}

/// Decodes a hex quantity (`"0x1a"`) into a `U256`.
pub fn parse_quantity(value: &Value) -> Result<U256> {
    let s = value
        .as_str()
        .ok_or_else(|| anyhow!("expected hex quantity, got {}", value))?;
    let digits = s.trim_start_matches("0x");
    if digits.is_empty() {
        return Ok(U256::zero());
    }
    U256::from_str_radix(digits, 16).with_context(|| format!("invalid hex quantity '{s}'"))
}
