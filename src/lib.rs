//! codebroker — request broker between a browser code editor, a Judge0
//! execution backend and a text-generation backend.
//!
//! - `judge`: language registry + execution dispatcher
//! - `llm`: assistant relay
//! - `server`: axum HTTP front door

pub mod judge;
pub mod llm;
pub mod server;

pub use codebroker_config as config;
