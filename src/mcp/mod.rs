// MCP surface: tool catalog, name/argument translation, session and dispatch.
pub mod catalog;
pub mod dispatcher;
pub mod handler;
pub mod protocol;
pub mod session;
pub mod translate;
