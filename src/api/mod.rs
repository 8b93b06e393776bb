//! Thin REST boundary with the console backend
//!
//! Entity CRUD over plain JSON payloads plus the single multipart
//! document-upload endpoint. Every request carries the bearer credential the
//! session boundary handed in; a 401 maps to
//! [`crate::error::TransportError::Unauthorized`] and session teardown stays
//! the embedder's job.

pub mod client;
pub mod filters;

pub use client::ApiClient;
pub use filters::ListFilters;

pub use crate::error::TransportError;
