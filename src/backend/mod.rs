//! HTTP client for the Genie backend service

mod client;

pub use client::{extract_detail, reason_phrase, BackendClient, BackendReply};
