// src/lib.rs

use std::sync::Arc;

pub mod blockchain;
pub mod config;
pub mod mcp;
pub mod utils;

// Re-export commonly used chain types
pub use ethers::types::{Address, U256};

use blockchain::WalletEngine;
use config::Config;
use mcp::{dispatcher::Dispatcher, session::SessionInitializer};

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Resolves and runs tool calls against the wallet session
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(engine: Arc<dyn WalletEngine>, config: Config) -> Self {
        let sessions = Arc::new(SessionInitializer::new(engine, config));
        Self {
            dispatcher: Arc::new(Dispatcher::new(sessions)),
        }
    }
}
