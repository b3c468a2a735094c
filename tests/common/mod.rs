//! Shared fixtures: a fake JSON-RPC node with a quote route, and a fake engine.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use ethers_core::abi::{encode, Token};
use ethers_core::types::U256;
use ethers_signers::LocalWallet;
use gasless_mcp_server::{
    blockchain::{
        action::{Action, ActionSet},
        context::WalletContext,
        models::{ActionError, EngineError},
        WalletEngine,
    },
    config::Config,
};
use secrecy::SecretString;
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const TEST_KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
pub const TEST_ADDRESS: &str = "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23";
pub const TOKEN: &str = "0x55d398326f99059fF775485246999027B3197955";
pub const RECIPIENT: &str = "0x000000000000000000000000000000000000dEaD";
pub const TX_HASH: &str = "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060";

// ERC-20 selectors answered by `eth_call`
pub const BALANCE_OF: &str = "0x70a08231";
pub const DECIMALS: &str = "0x313ce567";
pub const SYMBOL: &str = "0x95d89b41";
pub const ALLOWANCE: &str = "0xdd62ed3e";

#[derive(Default)]
struct NodeState {
    results: HashMap<String, Value>,
    errors: HashMap<String, String>,
    calls: HashMap<String, Value>,
    quote: Option<(StatusCode, Value)>,
    seen: Vec<String>,
    quote_queries: Vec<(HashMap<String, String>, Option<String>)>,
}

/// In-process EVM node answering canned JSON-RPC results.
#[derive(Clone)]
pub struct FakeNode {
    pub url: String,
    state: Arc<Mutex<NodeState>>,
}

impl FakeNode {
    /// Starts a node that behaves like an idle BSC account holding 1.5 BNB.
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(NodeState::default()));
        let app = Router::new()
            .route("/", post(rpc_handler))
            .route("/swap/v1/quote", get(quote_handler))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let node = Self { url, state };
        node.respond("eth_chainId", json!("0x38"));
        node.respond("eth_getBalance", json!("0x14d1120d7b160000"));
        node.respond("eth_getTransactionCount", json!("0x0"));
        node.respond("eth_estimateGas", json!("0x5208"));
        node.respond("eth_gasPrice", json!("0x3b9aca00"));
        node.respond("eth_sendRawTransaction", json!(TX_HASH));
        node.respond("eth_getTransactionReceipt", json!({ "status": "0x1" }));
        node
    }

    pub fn respond(&self, method: &str, result: Value) {
        let mut state = self.state.lock().unwrap();
        state.errors.remove(method);
        state.results.insert(method.to_string(), result);
    }

    pub fn fail(&self, method: &str, message: &str) {
        self.state
            .lock()
            .unwrap()
            .errors
            .insert(method.to_string(), message.to_string());
    }

    /// Answers `eth_call`s whose calldata starts with `selector`.
    pub fn on_call(&self, selector: &str, result: Value) {
        self.state
            .lock()
            .unwrap()
            .calls
            .insert(selector.to_string(), result);
    }

    pub fn quote(&self, status: StatusCode, body: Value) {
        self.state.lock().unwrap().quote = Some((status, body));
    }

    /// Methods received so far, in order.
    pub fn seen(&self) -> Vec<String> {
        self.state.lock().unwrap().seen.clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.seen().iter().filter(|m| *m == method).count()
    }

    /// Query parameters and `0x-api-key` header of each quote request.
    pub fn quote_queries(&self) -> Vec<(HashMap<String, String>, Option<String>)> {
        self.state.lock().unwrap().quote_queries.clone()
    }

    pub fn quote_url(&self) -> String {
        format!("{}/swap/v1/quote", self.url)
    }

    pub fn config(&self) -> Config {
        let rpc_url = self.url.clone();
        let quote_url = self.quote_url();
        Config::from_vars(move |key| match key {
            "PRIVATE_KEY" => Some(TEST_KEY.to_string()),
            "RPC_URL" => Some(rpc_url.clone()),
            "API_KEY" => Some("test-api-key".to_string()),
            "CHAIN_ID" => Some("56".to_string()),
            "SWAP_API_URL" => Some(quote_url.clone()),
            _ => None,
        })
        .unwrap()
    }
}

async fn rpc_handler(
    State(state): State<Arc<Mutex<NodeState>>>,
    Json(req): Json<Value>,
) -> Json<Value> {
    let id = req.get("id").cloned().unwrap_or(Value::Null);
    let method = req["method"].as_str().unwrap_or_default().to_string();
    let mut state = state.lock().unwrap();
    state.seen.push(method.clone());

    if let Some(message) = state.errors.get(&method) {
        return Json(json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": -32000, "message": message }
        }));
    }

    let result = if method == "eth_call" {
        let data = req["params"][0]["data"].as_str().unwrap_or_default();
        let selector = data.get(..10).unwrap_or(data);
        state.calls.get(selector).cloned()
    } else {
        state.results.get(&method).cloned()
    };

    match result {
        Some(result) => Json(json!({ "jsonrpc": "2.0", "id": id, "result": result })),
        None => Json(json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": -32601, "message": format!("method {method} not stubbed") }
        })),
    }
}

async fn quote_handler(
    State(state): State<Arc<Mutex<NodeState>>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    let api_key = headers
        .get("0x-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.quote_queries.push((query, api_key));
    match state.quote.clone() {
        Some((status, body)) => (status, Json(body)),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "reason": "no quote stubbed" })),
        ),
    }
}

/// ABI-encoded `uint256` as an `eth_call` result.
pub fn abi_uint(value: u64) -> Value {
    json!(format!("0x{}", hex::encode(encode(&[Token::Uint(U256::from(value))]))))
}

/// ABI-encoded `string` as an `eth_call` result.
pub fn abi_string(value: &str) -> Value {
    json!(format!(
        "0x{}",
        hex::encode(encode(&[Token::String(value.to_string())]))
    ))
}

pub fn test_config() -> Config {
    Config::from_vars(|key| match key {
        "PRIVATE_KEY" => Some(TEST_KEY.to_string()),
        "RPC_URL" => Some("http://127.0.0.1:8545".to_string()),
        "API_KEY" => Some("test-api-key".to_string()),
        _ => None,
    })
    .unwrap()
}

pub fn test_context(rpc_url: &str) -> WalletContext {
    let wallet: LocalWallet = TEST_KEY.parse().unwrap();
    WalletContext::new(
        wallet,
        rpc_url,
        SecretString::new("test-api-key".into()),
        "http://127.0.0.1:1/swap/v1/quote",
    )
}

/// Action that returns or fails with a fixed outcome, recording its arguments.
pub struct ScriptedAction {
    pub name: &'static str,
    pub outcome: fn() -> Result<String, ActionError>,
    pub received: Arc<Mutex<Vec<Value>>>,
}

#[async_trait]
impl Action for ScriptedAction {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        "scripted"
    }

    async fn run(&self, _ctx: &WalletContext, args: Value) -> Result<String, ActionError> {
        self.received.lock().unwrap().push(args);
        (self.outcome)()
    }
}

/// Engine that never touches a node and publishes scripted actions.
pub struct FakeEngine {
    pub actions: Vec<Arc<dyn Action>>,
    pub fail_configure: Option<&'static str>,
}

#[async_trait]
impl WalletEngine for FakeEngine {
    async fn configure(&self, _config: &Config) -> Result<WalletContext, EngineError> {
        match self.fail_configure {
            Some(message) => Err(EngineError::Rpc(anyhow::anyhow!(message))),
            None => Ok(test_context("http://127.0.0.1:1")),
        }
    }

    fn actions(&self) -> ActionSet {
        ActionSet::new(self.actions.clone())
    }
}
