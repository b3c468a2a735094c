// src/blockchain/mod.rs

pub mod action;
pub mod actions;
pub mod context;
pub mod engine;
pub mod models;
pub mod nonce_manager;
pub mod services;

// Re-export commonly used types
pub use action::{Action, ActionSet};
pub use context::WalletContext;
pub use engine::{EvmEngine, WalletEngine};
pub use models::{ActionError, EngineError};
