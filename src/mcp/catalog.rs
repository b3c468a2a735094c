//! The static catalog of tools advertised to MCP clients.
//!
//! Schemas here are descriptive only; they are not enforced on incoming calls.

use serde_json::{json, Map, Value};

pub const GET_ADDRESS: &str = "get-address";
pub const GET_BALANCE: &str = "get-balance";
pub const TRANSFER_TOKEN: &str = "transfer-token";
pub const SWAP_TOKENS: &str = "swap-tokens";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolParam {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [ToolParam],
}

pub static TOOLS: [ToolDescriptor; 4] = [
    ToolDescriptor {
        name: GET_ADDRESS,
        description: "Gets the smart account wallet address",
        params: &[],
    },
    ToolDescriptor {
        name: GET_BALANCE,
        description: "Gets the balance of tokens in the smart account on BSC",
        params: &[ToolParam {
            name: "address",
            description: "Token contract address (use \"0x0000000000000000000000000000000000000000\" for native token like BNB/ETH)",
            required: false,
        }],
    },
    ToolDescriptor {
        name: TRANSFER_TOKEN,
        description: "Transfer tokens gaslessly to another address",
        params: &[
            ToolParam {
                name: "to",
                description: "Recipient address",
                required: true,
            },
            ToolParam {
                name: "address",
                description: "Token contract address (use \"0x0000000000000000000000000000000000000000\" for native token)",
                required: true,
            },
            ToolParam {
                name: "amount",
                description: "Amount to transfer",
                required: true,
            },
        ],
    },
    ToolDescriptor {
        name: SWAP_TOKENS,
        description: "Swap one token for another gaslessly",
        params: &[
            ToolParam {
                name: "fromToken",
                description: "Source token address",
                required: true,
            },
            ToolParam {
                name: "toToken",
                description: "Destination token address",
                required: true,
            },
            ToolParam {
                name: "amount",
                description: "Amount to swap",
                required: true,
            },
        ],
    },
];

impl ToolDescriptor {
    pub fn required(&self) -> Vec<&'static str> {
        self.params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect()
    }

    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|p| {
                (
                    p.name.to_string(),
                    json!({ "type": "string", "description": p.description }),
                )
            })
            .collect();
        json!({
            "type": "object",
            "properties": properties,
            "required": self.required(),
        })
    }

    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema(),
        })
    }
}

/// Catalog as returned by `tools/list`.
pub fn tools_json() -> Value {
    Value::Array(TOOLS.iter().map(ToolDescriptor::to_json).collect())
}
