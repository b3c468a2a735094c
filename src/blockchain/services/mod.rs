// src/blockchain/services/mod.rs

// Chain-facing helpers used by the EVM actions.
pub mod balance;
pub mod rpc;
pub mod swap;
pub mod token;
pub mod transactions;
