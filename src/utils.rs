//! Utility functions for the gasless MCP server

use std::future::Future;
use std::io::Write;

use gag::Gag;
use serde::de::DeserializeOwned;
use serde_json::{from_value, Value};
use tokio::sync::Mutex;
use tracing::warn;

use crate::mcp::protocol::{error_codes, Response};

// Only one suppression scope may redirect fd 1 at a time.
static STDOUT_SCOPE: Mutex<()> = Mutex::const_new(());

/// Runs `fut` with the process's standard output discarded.
///
/// Stdout carries protocol frames, so anything printed while the wallet engine
/// works would corrupt the stream. The redirection is undone when the scope
/// ends, whether `fut` succeeded or failed.
pub async fn with_suppressed_stdout<F>(fut: F) -> F::Output
where
    F: Future,
{
    let _scope = STDOUT_SCOPE.lock().await;
    // Frames already buffered must reach the client before the redirect.
    if let Err(e) = std::io::stdout().flush() {
        warn!("Could not flush stdout before suppressing it: {}", e);
    }
    let _gag = match Gag::stdout() {
        Ok(gag) => Some(gag),
        Err(e) => {
            warn!("Could not suppress stdout, running unguarded: {}", e);
            None
        }
    };
    fut.await
}

/// Helper function to extract a required argument from a JSON object
pub fn get_required_arg<T: DeserializeOwned>(
    args: &Value,
    key: &str,
    req_id: &Value,
) -> Result<T, Response> {
    from_value(args.get(key).cloned().unwrap_or(Value::Null)).map_err(|_| {
        Response::error(
            req_id.clone(),
            error_codes::INVALID_PARAMS,
            format!("Missing or invalid required argument: '{}'", key),
        )
    })
}
