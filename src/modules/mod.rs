//! Modules layer - Infrastructure components for external integrations
//!
//! Contains clients and adapters for external services like storage and the
//! vehicle fleet API.

pub mod storage;
