use async_trait::async_trait;
use ethers_core::types::Address;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::{parse_amount, NATIVE_DECIMALS, NATIVE_TOKEN};
use crate::blockchain::{
    action::{parse_address, parse_args, Action},
    context::WalletContext,
    models::{ActionError, ReceiptStatus},
    services::{
        swap::{self, QuoteRequest},
        token,
    },
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SmartSwapArgs {
    token_in: String,
    token_out: String,
    amount: String,
}

/// Side of a swap: the native coin or an ERC-20 contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwapToken {
    Native,
    Erc20(Address),
}

impl SwapToken {
    fn parse(raw: &str) -> Result<Self, ActionError> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case(NATIVE_TOKEN)
            || raw.eq_ignore_ascii_case(swap::NATIVE_TOKEN_SENTINEL)
        {
            return Ok(SwapToken::Native);
        }
        let address = parse_address(raw)?;
        if address.is_zero() {
            Ok(SwapToken::Native)
        } else {
            Ok(SwapToken::Erc20(address))
        }
    }

    fn quote_id(self) -> String {
        match self {
            SwapToken::Native => swap::NATIVE_TOKEN_SENTINEL.to_string(),
            SwapToken::Erc20(address) => format!("{:?}", address),
        }
    }
}

pub struct SmartSwap;

#[async_trait]
impl Action for SmartSwap {
    fn name(&self) -> &'static str {
        "smart_swap"
    }

    fn description(&self) -> &'static str {
        "Swaps one token for another through the configured DEX aggregator."
    }

    async fn run(&self, ctx: &WalletContext, args: Value) -> Result<String, ActionError> {
        let args: SmartSwapArgs = parse_args(self.name(), args)?;
        let token_in = SwapToken::parse(&args.token_in)?;
        let token_out = SwapToken::parse(&args.token_out)?;
        if token_in == token_out {
            return Err(ActionError::InvalidArguments {
                action: self.name(),
                reason: "tokenIn and tokenOut must differ".to_string(),
            });
        }

        let decimals = match token_in {
            SwapToken::Native => NATIVE_DECIMALS,
            SwapToken::Erc20(address) => token::erc20_decimals(ctx.http(), ctx.rpc_url(), address)
                .await
                .map_err(ActionError::from_service)?,
        };
        let sell_amount = parse_amount(self.name(), &args.amount, decimals)?;

        let sell_token = token_in.quote_id();
        let buy_token = token_out.quote_id();
        let quote = swap::fetch_quote(
            ctx.http(),
            ctx.swap_quote_url(),
            ctx.api_key(),
            &QuoteRequest {
                sell_token: &sell_token,
                buy_token: &buy_token,
                sell_amount,
                taker: ctx.address(),
            },
        )
        .await
        .map_err(ActionError::from_service)?;

        if let (SwapToken::Erc20(address), Some(spender)) =
            (token_in, quote.allowance_target().map_err(ActionError::from_service)?)
        {
            let allowance =
                token::erc20_allowance(ctx.http(), ctx.rpc_url(), address, ctx.address(), spender)
                    .await
                    .map_err(ActionError::from_service)?;
            if allowance < sell_amount {
                info!("Approving {:?} to spend {} of {:?}", spender, sell_amount, address);
                let approval = ctx
                    .submit(token::erc20_approve_tx(address, spender, sell_amount))
                    .await
                    .map_err(ActionError::from_service)?;
                let status = ctx
                    .wait_for_receipt(&approval.tx_hash)
                    .await
                    .map_err(ActionError::from_service)?;
                if status != ReceiptStatus::Confirmed {
                    return Err(ActionError::Failed(anyhow::anyhow!(
                        "approval {} is {}",
                        approval.tx_hash,
                        status.describe()
                    )));
                }
            }
        }

        let tx = quote.to_transaction().map_err(ActionError::from_service)?;
        let sent = ctx.submit(tx).await.map_err(ActionError::from_service)?;
        info!("Swap submitted: {}", sent.tx_hash);
        let status = ctx
            .wait_for_receipt(&sent.tx_hash)
            .await
            .map_err(ActionError::from_service)?;

        Ok(format!(
            "Swapped {} of {} for {} (expected output: {} base units).\nTransaction hash: {}\nStatus: {}",
            args.amount.trim(),
            args.token_in.trim(),
            args.token_out.trim(),
            quote.buy_amount,
            sent.tx_hash,
            status.describe()
        ))
    }
}
