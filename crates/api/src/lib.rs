//! HTTP API: server, routing, identity and role gates.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
