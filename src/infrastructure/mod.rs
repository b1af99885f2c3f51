//! Infrastructure layer: configuration management.
//!
//! Storage, remote-API, cache, and HTTP integrations live under
//! `adapters`; what remains here is the process-level plumbing that
//! satisfies no domain port.

pub mod config;
