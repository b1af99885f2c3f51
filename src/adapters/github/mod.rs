//! GitHub adapter implementing the remote repository source port.

pub mod client;
pub mod models;

pub use client::GitHubClient;
