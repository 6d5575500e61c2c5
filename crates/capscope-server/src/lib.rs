//! # capscope-server
//!
//! Binary crate wiring `capscope-auth` over the in-memory backend: config
//! loading, seed provisioning, tracing setup, and the HTTP listener.

pub mod app;
pub mod config;
pub mod observability;
