//! Genie - gateway and client for the Genie AI assistant
//!
//! The gateway serves the `/api/*` endpoints, forwarding to the backend
//! service or answering from in-memory data. The client side (auth service
//! and session) is what the `genie` command-line tool uses.

pub mod api;
pub mod auth;
pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;

pub use config::Config;
pub use error::Error;
pub use logging::{LogLevel, Logger};
