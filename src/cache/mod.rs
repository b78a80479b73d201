//! Local history persistence for fetched APOD entries
//!
//! Re-exports the CSV-backed store used to keep a deduplicated record of every
//! entry the viewer has fetched.

pub mod store;

pub use store::{CacheError, CacheStore};
