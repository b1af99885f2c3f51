//! In-memory caching layer for hot-path repository reads.
//!
//! Uses `moka` for TTL-based concurrent caching with write-through
//! invalidation. Wraps the store port as a decorator.

pub mod cached_repo_store;

pub use cached_repo_store::CachedRepoStore;
