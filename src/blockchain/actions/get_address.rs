use async_trait::async_trait;
use ethers_core::utils::to_checksum;
use serde_json::Value;

use crate::blockchain::{action::Action, context::WalletContext, models::ActionError};

pub struct GetAddress;

#[async_trait]
impl Action for GetAddress {
    fn name(&self) -> &'static str {
        "get_address"
    }

    fn description(&self) -> &'static str {
        "Returns the address of the configured wallet."
    }

    async fn run(&self, ctx: &WalletContext, _args: Value) -> Result<String, ActionError> {
        Ok(format!("Smart Account: {}", to_checksum(&ctx.address(), None)))
    }
}
