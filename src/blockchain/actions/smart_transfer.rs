use async_trait::async_trait;
use ethers_core::types::TransactionRequest;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::{parse_amount, NATIVE_DECIMALS, NATIVE_TOKEN};
use crate::blockchain::{
    action::{parse_address, parse_args, Action},
    context::WalletContext,
    models::{native_symbol, ActionError},
    services::token,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SmartTransferArgs {
    amount: String,
    /// ERC-20 contract, or `eth` for the native coin.
    token_address: String,
    destination: String,
}

pub struct SmartTransfer;

#[async_trait]
impl Action for SmartTransfer {
    fn name(&self) -> &'static str {
        "smart_transfer"
    }

    fn description(&self) -> &'static str {
        "Transfers the native coin or an ERC-20 token from the wallet to a destination address."
    }

    async fn run(&self, ctx: &WalletContext, args: Value) -> Result<String, ActionError> {
        let args: SmartTransferArgs = parse_args(self.name(), args)?;
        let destination = parse_address(&args.destination)?;

        let (tx, symbol) = if args.token_address.trim().eq_ignore_ascii_case(NATIVE_TOKEN) {
            let value = parse_amount(self.name(), &args.amount, NATIVE_DECIMALS)?;
            let tx = TransactionRequest::new().to(destination).value(value);
            (tx, native_symbol(ctx.chain_id()).to_string())
        } else {
            let token_address = parse_address(&args.token_address)?;
            let decimals = token::erc20_decimals(ctx.http(), ctx.rpc_url(), token_address)
                .await
                .map_err(ActionError::from_service)?;
            let amount = parse_amount(self.name(), &args.amount, decimals)?;
            let symbol = token::erc20_symbol(ctx.http(), ctx.rpc_url(), token_address).await;
            (token::erc20_transfer_tx(token_address, destination, amount), symbol)
        };

        let sent = ctx.submit(tx).await.map_err(ActionError::from_service)?;
        info!("Transfer submitted: {}", sent.tx_hash);
        let status = ctx
            .wait_for_receipt(&sent.tx_hash)
            .await
            .map_err(ActionError::from_service)?;

        Ok(format!(
            "Successfully transferred {} {} to {}.\nTransaction hash: {}\nStatus: {}",
            args.amount.trim(),
            symbol,
            args.destination.trim(),
            sent.tx_hash,
            status.describe()
        ))
    }
}
