//! Translation between MCP tool calls and engine action calls.

use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::blockchain::actions::NATIVE_TOKEN;
use crate::mcp::catalog::{GET_ADDRESS, GET_BALANCE, SWAP_TOKENS, TRANSFER_TOKEN};

/// Placeholder address clients pass for the chain's native coin.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

const TOOL_ACTIONS: [(&str, &str); 4] = [
    (GET_ADDRESS, "get_address"),
    (GET_BALANCE, "get_balance"),
    (TRANSFER_TOKEN, "smart_transfer"),
    (SWAP_TOKENS, "smart_swap"),
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("No mapping found for MCP tool: {0}")]
pub struct UnmappedTool(pub String);

/// Engine action backing the MCP tool `tool`.
pub fn translate_name(tool: &str) -> Result<&'static str, UnmappedTool> {
    TOOL_ACTIONS
        .iter()
        .find(|(external, _)| *external == tool)
        .map(|(_, internal)| *internal)
        .ok_or_else(|| UnmappedTool(tool.to_string()))
}

/// Rewrites MCP arguments into the shape the engine action expects.
/// Tools without a mapping get their arguments back untouched.
pub fn translate_args(tool: &str, args: &Value) -> Value {
    match tool {
        GET_ADDRESS => json!({}),
        GET_BALANCE => match args.get("address") {
            Some(address) if !is_native_placeholder(address) => {
                json!({ "tokenAddresses": [address] })
            }
            _ => json!({}),
        },
        TRANSFER_TOKEN => {
            let token = args.get("address").map(|address| {
                if address.as_str() == Some(ZERO_ADDRESS) {
                    Value::from(NATIVE_TOKEN)
                } else {
                    address.clone()
                }
            });
            object([
                ("amount", args.get("amount").cloned()),
                ("tokenAddress", token),
                ("destination", args.get("to").cloned()),
            ])
        }
        SWAP_TOKENS => object([
            ("tokenIn", args.get("fromToken").cloned()),
            ("tokenOut", args.get("toToken").cloned()),
            ("amount", args.get("amount").cloned()),
        ]),
        _ => args.clone(),
    }
}

// Absent, null, empty or zero address all mean "native balance".
fn is_native_placeholder(address: &Value) -> bool {
    match address {
        Value::Null => true,
        Value::String(s) => s.is_empty() || s == ZERO_ADDRESS,
        _ => false,
    }
}

fn object<const N: usize>(fields: [(&str, Option<Value>); N]) -> Value {
    let map: Map<String, Value> = fields
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
        .collect();
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_catalog_tool() {
        assert_eq!(translate_name("get-address").unwrap(), "get_address");
        assert_eq!(translate_name("get-balance").unwrap(), "get_balance");
        assert_eq!(translate_name("transfer-token").unwrap(), "smart_transfer");
        assert_eq!(translate_name("swap-tokens").unwrap(), "smart_swap");
    }

    #[test]
    fn rejects_unknown_tools() {
        let err = translate_name("bridge-tokens").unwrap_err();
        assert_eq!(err, UnmappedTool("bridge-tokens".into()));
        assert_eq!(err.to_string(), "No mapping found for MCP tool: bridge-tokens");
        assert!(translate_name("get_address").is_err());
    }

    #[test]
    fn address_lookup_drops_arguments() {
        assert_eq!(translate_args("get-address", &json!({"foo": 1})), json!({}));
    }

    #[test]
    fn balance_of_native_coin() {
        assert_eq!(translate_args("get-balance", &json!({})), json!({}));
        assert_eq!(
            translate_args("get-balance", &json!({ "address": ZERO_ADDRESS })),
            json!({})
        );
        assert_eq!(translate_args("get-balance", &json!({ "address": "" })), json!({}));
        assert_eq!(translate_args("get-balance", &json!({ "address": null })), json!({}));
    }

    #[test]
    fn balance_of_token() {
        assert_eq!(
            translate_args("get-balance", &json!({ "address": "0xABC" })),
            json!({ "tokenAddresses": ["0xABC"] })
        );
    }

    #[test]
    fn transfer_of_native_coin() {
        assert_eq!(
            translate_args(
                "transfer-token",
                &json!({ "to": "X", "address": ZERO_ADDRESS, "amount": "1" })
            ),
            json!({ "amount": "1", "tokenAddress": "eth", "destination": "X" })
        );
    }

    #[test]
    fn transfer_of_token_keeps_address_verbatim() {
        assert_eq!(
            translate_args(
                "transfer-token",
                &json!({ "to": "X", "address": "0xAbCdEf", "amount": "2.5" })
            ),
            json!({ "amount": "2.5", "tokenAddress": "0xAbCdEf", "destination": "X" })
        );
    }

    #[test]
    fn transfer_omits_absent_fields() {
        assert_eq!(
            translate_args("transfer-token", &json!({ "to": "X" })),
            json!({ "destination": "X" })
        );
    }

    #[test]
    fn swap_renames_fields() {
        assert_eq!(
            translate_args(
                "swap-tokens",
                &json!({ "fromToken": "A", "toToken": "B", "amount": "5" })
            ),
            json!({ "tokenIn": "A", "tokenOut": "B", "amount": "5" })
        );
    }

    #[test]
    fn unknown_tools_pass_through() {
        let args = json!({ "chain": 56, "nested": { "a": [1, 2] } });
        assert_eq!(translate_args("bridge-tokens", &args), args);
    }
}
