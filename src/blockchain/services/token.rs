// src/blockchain/services/token.rs

use anyhow::{anyhow, Result};
use ethers_core::abi::{decode, encode, ParamType, Token};
use ethers_core::types::{Address, Bytes, TransactionRequest, U256};
use ethers_core::utils::keccak256;
use reqwest::Client;
use serde_json::{json, Value};

use super::rpc;

fn selector(sig: &str) -> [u8; 4] {
    let mut sel = [0u8; 4];
    sel.copy_from_slice(&keccak256(sig.as_bytes())[0..4]);
    sel
}

fn hex_to_bytes(v: &Value) -> Result<Vec<u8>> {
    let s = v.as_str().ok_or_else(|| anyhow!("eth_call result not string"))?;
    let s = s.strip_prefix("0x").unwrap_or(s);
    Ok(hex::decode(s)?)
}

fn decode_string(v: &Value) -> Option<String> {
    let bytes = hex_to_bytes(v).ok()?;
    if let Ok(tokens) = decode(&[ParamType::String], &bytes) {
        if let Some(Token::String(s)) = tokens.first() {
            return Some(s.clone());
        }
    }
    // Older tokens (MKR and friends) return bytes32
    if let Ok(tokens) = decode(&[ParamType::FixedBytes(32)], &bytes) {
        if let Some(Token::FixedBytes(b)) = tokens.first() {
            let trimmed: Vec<u8> = b.iter().copied().take_while(|c| *c != 0u8).collect();
            return String::from_utf8(trimmed).ok();
        }
    }
    None
}

fn decode_u256(v: &Value) -> Option<U256> {
    let bytes = hex_to_bytes(v).ok()?;
    match decode(&[ParamType::Uint(256)], &bytes).ok()?.first() {
        Some(Token::Uint(n)) => Some(*n),
        _ => None,
    }
}

pub(crate) fn encode_call(sig: &str, tokens: Vec<Token>) -> Bytes {
    let mut out = selector(sig).to_vec();
    let mut tail = encode(&tokens);
    out.append(&mut tail);
    Bytes::from(out)
}

async fn eth_call(client: &Client, rpc_url: &str, to: Address, data: Bytes) -> Result<Value> {
    rpc::call(
        client,
        rpc_url,
        "eth_call",
        json!([{"to": format!("{:?}", to), "data": format!("0x{}", hex::encode(data))}, "latest"]),
    )
    .await
}

pub async fn erc20_balance_of(
    client: &Client,
    rpc_url: &str,
    token: Address,
    owner: Address,
) -> Result<U256> {
    let data = encode_call("balanceOf(address)", vec![Token::Address(owner)]);
    let raw = eth_call(client, rpc_url, token, data).await?;
    decode_u256(&raw).ok_or_else(|| anyhow!("token {:?} returned an undecodable balance", token))
}

pub async fn erc20_decimals(client: &Client, rpc_url: &str, token: Address) -> Result<u32> {
    let raw = eth_call(client, rpc_url, token, encode_call("decimals()", vec![])).await?;
    let decimals = decode_u256(&raw)
        .ok_or_else(|| anyhow!("token {:?} returned undecodable decimals", token))?;
    if decimals > U256::from(77u32) {
        return Err(anyhow!("token {:?} reports {} decimals", token, decimals));
    }
    Ok(decimals.as_u32())
}

/// Symbol of an ERC-20 token; tokens without a readable symbol get "TOKEN".
pub async fn erc20_symbol(client: &Client, rpc_url: &str, token: Address) -> String {
    match eth_call(client, rpc_url, token, encode_call("symbol()", vec![])).await {
        Ok(raw) => decode_string(&raw).unwrap_or_else(|| "TOKEN".to_string()),
        Err(_) => "TOKEN".to_string(),
    }
}

pub async fn erc20_allowance(
    client: &Client,
    rpc_url: &str,
    token: Address,
    owner: Address,
    spender: Address,
) -> Result<U256> {
    let data = encode_call(
        "allowance(address,address)",
        vec![Token::Address(owner), Token::Address(spender)],
    );
    let raw = eth_call(client, rpc_url, token, data).await?;
    decode_u256(&raw).ok_or_else(|| anyhow!("token {:?} returned an undecodable allowance", token))
}

pub fn erc20_transfer_tx(token: Address, to: Address, amount: U256) -> TransactionRequest {
    let data = encode_call(
        "transfer(address,uint256)",
        vec![Token::Address(to), Token::Uint(amount)],
    );
    TransactionRequest::new().to(token).data(data)
}

pub fn erc20_approve_tx(token: Address, spender: Address, amount: U256) -> TransactionRequest {
    let data = encode_call(
        "approve(address,uint256)",
        vec![Token::Address(spender), Token::Uint(amount)],
    );
    TransactionRequest::new().to(token).data(data)
}
