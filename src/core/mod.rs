//! Core query engine module

pub mod client;
pub mod config;
pub mod errors;
pub mod limiter;
pub mod models;
pub mod normalize;
pub mod paging;
