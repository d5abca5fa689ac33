//! Core domain layer for the nearbot client.
//!
//! Models and contracts only; no I/O. Persistence lives in
//! `nearbot-infrastructure`, outbound HTTP in `nearbot-interaction`, and
//! the use-case layer in `nearbot-application`.

pub mod chat;
pub mod config;
pub mod error;
pub mod geo;
pub mod session;
pub mod store;

// Re-export common error type
pub use error::{NearbotError, Result};
