// src/main.rs

use gasless_mcp_server::{
    blockchain::EvmEngine,
    config::Config,
    mcp::{
        handler::handle_mcp_request,
        protocol::{error_codes, Request, Response},
    },
    AppState,
};
use std::process;
use std::sync::Arc;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// --- MCP Server Logic ---
async fn run_mcp_server(state: AppState) {
    info!("Starting MCP server on stdin/stdout...");

    let mut stdin = io::BufReader::new(io::stdin());
    let mut stdout = io::stdout();

    loop {
        let mut line = String::new();

        match stdin.read_line(&mut line).await {
            Ok(0) => {
                info!("EOF received, shutting down MCP server");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                debug!("Received: {}", line);

                let response = match serde_json::from_str::<Request>(line) {
                    Ok(request) => handle_mcp_request(request, state.clone()).await,
                    Err(parse_error) => {
                        error!("JSON parse error: {}", parse_error);
                        Some(Response::error(
                            serde_json::Value::Null,
                            error_codes::PARSE_ERROR,
                            format!("Parse error: {}", parse_error),
                        ))
                    }
                };

                if let Some(response) = response {
                    match serde_json::to_string(&response) {
                        Ok(response_json) => {
                            debug!("Sending: {}", response_json);
                            let frame = format!("{}\n", response_json);
                            let written = async {
                                stdout.write_all(frame.as_bytes()).await?;
                                stdout.flush().await
                            }
                            .await;
                            if let Err(e) = written {
                                error!("Failed to write response: {}", e);
                                break;
                            }
                        }
                        Err(e) => error!("Failed to serialize response: {}", e),
                    }
                }
            }
            Err(e) => {
                error!("Failed to read from stdin: {}", e);
                break;
            }
        }
    }

    info!("MCP server shutting down");
}

fn log_server_info(config: Option<&Config>) {
    let chain = std::env::var("CHAIN_ID").unwrap_or_else(|_| "56 (default)".to_string());
    let set = |present: bool| if present { "[SET]" } else { "[NOT SET]" };
    let private_key = config.map_or_else(|| std::env::var("PRIVATE_KEY").is_ok(), Config::has_private_key);
    let api_key = config.map_or_else(|| std::env::var("API_KEY").is_ok(), Config::has_api_key);

    info!("=== 0xGasless MCP SERVER ===");
    info!("Chain ID: {}", chain);
    info!("Private Key: {}", set(private_key));
    info!("API Key: {}", set(api_key));
    info!("============================");
}

#[tokio::main]
async fn main() {
    // Initialize tracing; stdout is reserved for protocol frames
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gasless_mcp_server=info,gasless_mcp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = Config::from_env();
    log_server_info(config.as_ref().ok());
    let config = match config {
        Ok(cfg) => {
            info!("Environment variables validated");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let state = AppState::new(Arc::new(EvmEngine::new()), config);

    // Initialize the wallet session early to catch any config issues
    if let Err(e) = state.dispatcher.sessions().ensure_session().await {
        error!("Failed to initialize wallet session: {}", e);
        process::exit(1);
    }
    info!("Wallet session initialized successfully");

    info!("0xGasless MCP Server running");
    run_mcp_server(state).await;
}
