//! PanLex Client - Rust client library for the PanLex lexical translation API
//!
//! This library wraps the PanLex JSON API: it paginates result sets past
//! the service's per-request cap, chunks oversized normalization requests,
//! and exposes convenience translation lookups.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod core;
pub mod translate;

// Re-export key types for convenience
pub use crate::core::{
    client::PanlexClient,
    config::{ApiVersion, ClientConfig, MAX_ARRAY_SIZE},
    errors::{PanlexError, Result},
    models::{PageResponse, Params},
    paging::PagedQuery,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
