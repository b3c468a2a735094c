//! # MCP Handler Module
//!
//! Implements the Model Context Protocol surface of the server and routes
//! requests to the catalog and the dispatcher.
//!
//! ## Supported Tools
//!
//! - `get-address` - Address of the configured wallet
//! - `get-balance` - Native coin or ERC-20 token balance
//! - `transfer-token` - Send the native coin or an ERC-20 token
//! - `swap-tokens` - Swap one token for another through the aggregator

use serde_json::{json, Value};
use tracing::{debug, info};

use crate::{
    mcp::{
        catalog,
        protocol::{error_codes, text_content, Request, Response},
    },
    utils, AppState,
};

pub const SERVER_NAME: &str = "0xGasless MCP Server";
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

/// This is the main dispatcher for all incoming MCP requests.
pub async fn handle_mcp_request(req: Request, state: AppState) -> Option<Response> {
    info!("Handling MCP request for method: {}", req.method);

    if req.is_notification() {
        debug!("Ignoring notification {}", req.method);
        return None;
    }

    let response = match req.method.as_str() {
        "initialize" => handle_initialize(&req),
        "ping" => Response::success(req.id.clone(), json!({})),
        "tools/list" => handle_tools_list(&req),
        "tools/call" => handle_tool_call(req, state).await,
        _ => Response::error(
            req.id,
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", req.method),
        ),
    };

    Some(response)
}

/// Handles a 'tools/call' request. Tool failures are reported as text content.
async fn handle_tool_call(req: Request, state: AppState) -> Response {
    let params = match req.params.as_ref() {
        Some(p) => p,
        None => {
            return Response::error(
                req.id,
                error_codes::INVALID_PARAMS,
                "Missing 'params' object".into(),
            )
        }
    };

    let tool_name: String = match utils::get_required_arg(params, "name", &req.id) {
        Ok(name) => name,
        Err(resp) => return resp,
    };

    let args = match params.get("arguments") {
        Some(Value::Null) | None => json!({}),
        Some(args) => args.clone(),
    };

    let text = state.dispatcher.dispatch(&tool_name, &args).await;
    Response::success(req.id, text_content(text))
}

/// Handles the 'initialize' request.
fn handle_initialize(req: &Request) -> Response {
    let protocol_version = req
        .params
        .as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PROTOCOL_VERSION);

    Response::success(
        req.id.clone(),
        json!({
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            },
            "protocolVersion": protocol_version,
            "capabilities": { "tools": {} }
        }),
    )
}

/// Handles the 'tools/list' request by returning the static tool catalog.
fn handle_tools_list(req: &Request) -> Response {
    Response::success(req.id.clone(), json!({ "tools": catalog::tools_json() }))
}
