use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{display_amount, NATIVE_DECIMALS};
use crate::blockchain::{
    action::{parse_address, parse_args, Action},
    context::WalletContext,
    models::{native_symbol, ActionError, BalanceEntry},
    services::{balance, token},
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetBalanceArgs {
    /// Token contracts to report; empty means the native coin.
    #[serde(default)]
    token_addresses: Vec<String>,
}

pub struct GetBalance;

#[async_trait]
impl Action for GetBalance {
    fn name(&self) -> &'static str {
        "get_balance"
    }

    fn description(&self) -> &'static str {
        "Returns the native balance of the wallet, or the balances of the given ERC-20 tokens."
    }

    async fn run(&self, ctx: &WalletContext, args: Value) -> Result<String, ActionError> {
        let args: GetBalanceArgs = parse_args(self.name(), args)?;
        let owner = ctx.address();

        let mut entries = Vec::with_capacity(args.token_addresses.len().max(1));
        if args.token_addresses.is_empty() {
            let wei = balance::native_balance(ctx.http(), ctx.rpc_url(), owner)
                .await
                .map_err(ActionError::from_service)?;
            entries.push(BalanceEntry {
                symbol: native_symbol(ctx.chain_id()).to_string(),
                token: None,
                amount: display_amount(wei, NATIVE_DECIMALS),
            });
        }

        for raw in &args.token_addresses {
            let token_address = parse_address(raw)?;
            debug!("Querying balance of token {:?}", token_address);
            let amount = token::erc20_balance_of(ctx.http(), ctx.rpc_url(), token_address, owner)
                .await
                .map_err(ActionError::from_service)?;
            let decimals = token::erc20_decimals(ctx.http(), ctx.rpc_url(), token_address)
                .await
                .map_err(ActionError::from_service)?;
            let symbol = token::erc20_symbol(ctx.http(), ctx.rpc_url(), token_address).await;
            entries.push(BalanceEntry {
                symbol,
                token: Some(raw.trim().to_string()),
                amount: display_amount(amount, decimals),
            });
        }

        let lines: Vec<String> = entries.iter().map(ToString::to_string).collect();
        Ok(format!("Smart Account Balances:\n{}", lines.join("\n")))
    }
}
