//! HTTP adapter exposing the services over a thin axum surface.

pub mod server;

pub use server::{ApiServer, ErrorResponse};
