//! HTTP gateway: route handlers forwarding to the backend

pub mod cache;
pub mod mock;
pub mod routes;
pub mod server;

pub use server::*;
