// src/blockchain/services/swap.rs

use anyhow::{anyhow, Context, Result};
use ethers_core::types::{Address, Bytes, TransactionRequest, U256};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;

/// Address the quote API uses for the chain's native coin.
pub const NATIVE_TOKEN_SENTINEL: &str = "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE";

/// Default quote endpoint for a chain.
pub fn default_quote_url(chain_id: u64) -> String {
    let host = match chain_id {
        56 => "bsc.api.0x.org",
        137 => "polygon.api.0x.org",
        10 => "optimism.api.0x.org",
        42161 => "arbitrum.api.0x.org",
        8453 => "base.api.0x.org",
        43114 => "avalanche.api.0x.org",
        _ => "api.0x.org",
    };
    format!("https://{host}/swap/v1/quote")
}

#[derive(Debug, Clone)]
pub struct QuoteRequest<'a> {
    pub sell_token: &'a str,
    pub buy_token: &'a str,
    pub sell_amount: U256,
    pub taker: Address,
}

/// Quote as returned by the aggregator. Numeric fields arrive as decimal strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuote {
    pub to: String,
    pub data: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub gas: Option<String>,
    #[serde(default)]
    pub gas_price: Option<String>,
    #[serde(default)]
    pub allowance_target: Option<String>,
    pub buy_amount: String,
}

impl SwapQuote {
    /// Transaction that executes this quote.
    pub fn to_transaction(&self) -> Result<TransactionRequest> {
        let to = Address::from_str(&self.to).context("quote returned an invalid 'to' address")?;
        let data = Bytes::from_str(&self.data).context("quote returned invalid calldata")?;
        let mut tx = TransactionRequest::new().to(to).data(data);
        if let Some(value) = self.value.as_deref() {
            tx = tx.value(parse_decimal(value, "value")?);
        }
        if let Some(gas) = self.gas.as_deref() {
            tx = tx.gas(parse_decimal(gas, "gas")?);
        }
        if let Some(gas_price) = self.gas_price.as_deref() {
            tx = tx.gas_price(parse_decimal(gas_price, "gasPrice")?);
        }
        Ok(tx)
    }

    pub fn allowance_target(&self) -> Result<Option<Address>> {
        match self.allowance_target.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => {
                let target = Address::from_str(raw)
                    .context("quote returned an invalid allowance target")?;
                Ok((!target.is_zero()).then_some(target))
            }
        }
    }
}

fn parse_decimal(raw: &str, field: &str) -> Result<U256> {
    U256::from_dec_str(raw).map_err(|e| anyhow!("quote field '{}' is not a number: {}", field, e))
}

pub async fn fetch_quote(
    client: &Client,
    quote_url: &str,
    api_key: &str,
    request: &QuoteRequest<'_>,
) -> Result<SwapQuote> {
    let response = client
        .get(quote_url)
        .header("0x-api-key", api_key)
        .query(&[
            ("sellToken", request.sell_token.to_string()),
            ("buyToken", request.buy_token.to_string()),
            ("sellAmount", request.sell_amount.to_string()),
            ("takerAddress", format!("{:?}", request.taker)),
            ("skipValidation", "true".to_string()),
        ])
        .send()
        .await
        .context("swap quote request failed")?;

    let status = response.status();
    let body: Value = response
        .json()
        .await
        .context("swap quote returned a non-JSON body")?;
    if !status.is_success() {
        let reason = body
            .get("reason")
            .or_else(|| body.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string());
        return Err(anyhow!("swap quote error {}: {}", status, reason));
    }
    serde_json::from_value(body).context("swap quote has an unexpected shape")
}
