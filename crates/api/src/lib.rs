//! HTTP API: configuration, routing, and request/response mapping for the
//! vaccine inventory.
//!
//! Callers are expected to be authenticated upstream; this layer performs no
//! identity checks.

pub mod app;
pub mod config;
