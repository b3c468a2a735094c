//! Engine-side action interface.
//!
//! An [`Action`] is a named wallet operation the engine can run against a
//! configured [`WalletContext`]. Arguments arrive as loosely-typed JSON and are
//! validated by deserializing into a per-action struct before anything touches
//! the chain.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use ethers_core::types::Address;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::blockchain::{context::WalletContext, models::ActionError};

#[async_trait]
pub trait Action: Send + Sync {
    /// Engine-facing identifier, e.g. `smart_transfer`.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    async fn run(&self, ctx: &WalletContext, args: Value) -> Result<String, ActionError>;
}

/// Ordered set of actions published by an engine.
#[derive(Clone, Default)]
pub struct ActionSet {
    actions: Vec<Arc<dyn Action>>,
}

impl ActionSet {
    pub fn new(actions: Vec<Arc<dyn Action>>) -> Self {
        Self { actions }
    }

    pub fn find(&self, name: &str) -> Option<Arc<dyn Action>> {
        self.actions.iter().find(|a| a.name() == name).cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Action>> {
        self.actions.iter()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.actions.iter().map(|a| a.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl fmt::Debug for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Deserializes action arguments, treating `null` as an empty object.
pub fn parse_args<T: DeserializeOwned>(action: &'static str, args: Value) -> Result<T, ActionError> {
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| ActionError::InvalidArguments {
        action,
        reason: e.to_string(),
    })
}

pub fn parse_address(raw: &str) -> Result<Address, ActionError> {
    let trimmed = raw.trim();
    if !trimmed.starts_with("0x") || trimmed.len() != 42 {
        return Err(ActionError::InvalidAddress(raw.to_string()));
    }
    Address::from_str(trimmed).map_err(|_| ActionError::InvalidAddress(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    struct Named(&'static str);

    #[async_trait]
    impl Action for Named {
        fn name(&self) -> &'static str {
            self.0
        }
        fn description(&self) -> &'static str {
            "test"
        }
        async fn run(&self, _ctx: &WalletContext, _args: Value) -> Result<String, ActionError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn finds_actions_by_name_in_order() {
        let set = ActionSet::new(vec![
            Arc::new(Named("get_address")) as Arc<dyn Action>,
            Arc::new(Named("get_balance")),
        ]);
        assert_eq!(set.names(), vec!["get_address", "get_balance"]);
        assert_eq!(set.find("get_balance").unwrap().name(), "get_balance");
        assert!(set.find("smart_swap").is_none());
        assert_eq!(format!("{set:?}"), r#"["get_address", "get_balance"]"#);
    }

    #[derive(Deserialize)]
    struct Amount {
        amount: String,
    }

    #[test]
    fn argument_validation() {
        let ok: Amount = parse_args("smart_swap", json!({"amount": "5"})).unwrap();
        assert_eq!(ok.amount, "5");

        let err = parse_args::<Amount>("smart_swap", json!({})).err().unwrap();
        assert!(matches!(err, ActionError::InvalidArguments { action: "smart_swap", .. }));
        assert!(err.to_string().contains("amount"));
    }

    #[test]
    fn addresses() {
        assert!(parse_address("0x000000000000000000000000000000000000dEaD").is_ok());
        for bad in ["0xABC", "dead", "0xZZ0000000000000000000000000000000000dEaD"] {
            assert!(matches!(parse_address(bad), Err(ActionError::InvalidAddress(_))));
        }
    }
}
