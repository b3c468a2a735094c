//! Turns MCP tool calls into engine action runs.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::blockchain::{ActionError, EngineError};
use crate::mcp::{
    session::SessionInitializer,
    translate::{translate_args, translate_name, UnmappedTool},
};
use crate::utils::with_suppressed_stdout;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("{0}")]
    Session(#[from] EngineError),
    #[error(transparent)]
    Unmapped(#[from] UnmappedTool),
    #[error("Action {0} not found in available actions")]
    ActionNotFound(&'static str),
    #[error("{0}")]
    Execution(#[from] ActionError),
}

/// Coarse failure classes with a tailored message for the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InsufficientFunds,
    InvalidAddress,
    MissingSmartAccount,
    Other,
}

impl DispatchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            DispatchError::Execution(ActionError::InsufficientFunds(_)) => {
                FailureKind::InsufficientFunds
            }
            DispatchError::Execution(ActionError::InvalidAddress(_)) => FailureKind::InvalidAddress,
            DispatchError::Session(EngineError::InvalidPrivateKey(_)) => {
                FailureKind::MissingSmartAccount
            }
            other => classify_message(&other.to_string()),
        }
    }
}

/// Best-effort classification of an opaque error message.
///
/// Node and engine errors are free text, so this is approximate: it only
/// backs up the structured variants of [`ActionError`].
pub fn classify_message(message: &str) -> FailureKind {
    if message.contains("insufficient funds") {
        FailureKind::InsufficientFunds
    } else if message.contains("invalid address") {
        FailureKind::InvalidAddress
    } else if message.contains("Smart Account is required") {
        FailureKind::MissingSmartAccount
    } else {
        FailureKind::Other
    }
}

/// Client-facing text for a failed call of `tool`.
pub fn describe_failure(tool: &str, err: &DispatchError) -> String {
    match err.kind() {
        FailureKind::InsufficientFunds => format!(
            "Error: Insufficient funds for {tool}. Please ensure you have enough balance and gas."
        ),
        FailureKind::InvalidAddress => format!(
            "Error: Invalid address provided for {tool}. Please check the address format."
        ),
        FailureKind::MissingSmartAccount => {
            "Error: Smart account configuration issue. Please check your environment variables."
                .to_string()
        }
        FailureKind::Other => format!("Error executing {tool}: {err}"),
    }
}

pub struct Dispatcher {
    sessions: Arc<SessionInitializer>,
}

impl Dispatcher {
    pub fn new(sessions: Arc<SessionInitializer>) -> Self {
        Self { sessions }
    }

    pub fn sessions(&self) -> &SessionInitializer {
        &self.sessions
    }

    /// Runs the MCP tool `tool`. Never fails: errors come back as text.
    pub async fn dispatch(&self, tool: &str, args: &Value) -> String {
        match self.try_dispatch(tool, args).await {
            Ok(result) => result,
            Err(err) => {
                warn!("Tool {} failed: {}", tool, err);
                describe_failure(tool, &err)
            }
        }
    }

    async fn try_dispatch(&self, tool: &str, args: &Value) -> Result<String, DispatchError> {
        let session = self.sessions.ensure_session().await?;
        let action_name = translate_name(tool)?;
        let action = session
            .actions
            .find(action_name)
            .ok_or(DispatchError::ActionNotFound(action_name))?;
        let action_args = translate_args(tool, args);

        info!("Running {} as {}", tool, action_name);
        let result =
            with_suppressed_stdout(action.run(&session.context, action_args)).await?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn execution(err: ActionError) -> DispatchError {
        DispatchError::Execution(err)
    }

    #[test]
    fn structured_errors_win() {
        assert_eq!(
            execution(ActionError::InsufficientFunds("x".into())).kind(),
            FailureKind::InsufficientFunds
        );
        assert_eq!(
            execution(ActionError::InvalidAddress("0xABC".into())).kind(),
            FailureKind::InvalidAddress
        );
        assert_eq!(
            DispatchError::Session(EngineError::InvalidPrivateKey("odd length".into())).kind(),
            FailureKind::MissingSmartAccount
        );
    }

    #[test]
    fn opaque_messages_fall_back_to_substrings() {
        assert_eq!(
            execution(ActionError::Failed(anyhow!(
                "RPC Error: insufficient funds for gas * price + value"
            )))
            .kind(),
            FailureKind::InsufficientFunds
        );
        assert_eq!(
            DispatchError::Session(EngineError::Rpc(anyhow!("Smart Account is required"))).kind(),
            FailureKind::MissingSmartAccount
        );
        assert_eq!(classify_message("invalid address: 0x12"), FailureKind::InvalidAddress);
        // Matching is case-sensitive.
        assert_eq!(classify_message("Invalid Address: 0x12"), FailureKind::Other);
        assert_eq!(classify_message("Insufficient funds"), FailureKind::Other);
        assert_eq!(classify_message("nonce too low"), FailureKind::Other);
    }

    #[test]
    fn failure_text() {
        let tool = "transfer-token";
        assert_eq!(
            describe_failure(tool, &execution(ActionError::InsufficientFunds("x".into()))),
            "Error: Insufficient funds for transfer-token. Please ensure you have enough balance and gas."
        );
        assert_eq!(
            describe_failure(tool, &execution(ActionError::InvalidAddress("X".into()))),
            "Error: Invalid address provided for transfer-token. Please check the address format."
        );
        assert_eq!(
            describe_failure(
                "bridge",
                &DispatchError::Unmapped(UnmappedTool("bridge".into()))
            ),
            "Error executing bridge: No mapping found for MCP tool: bridge"
        );
        assert_eq!(
            describe_failure("get-address", &DispatchError::ActionNotFound("get_address")),
            "Error executing get-address: Action get_address not found in available actions"
        );
    }
}
