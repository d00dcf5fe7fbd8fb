//! HTTP boundary to the sentiment backend.
//!
//! Everything the dashboard knows about the network lives here: the
//! blocking client, the typed error taxonomy, and the request/response
//! wire shapes. Failures never cross this boundary as panics — callers get
//! an [`ApiError`] and decide how to surface it.

pub mod client;
pub mod config;

pub use client::{ApiClient, ApiError, NewsResponse, ReturnsQuery};
pub use config::ApiConfig;
