//! Wire DTOs for the console backend
//!
//! These mirror what the REST endpoints actually send, looseness included:
//! camelCase field names, relationship fields that may be a bare id or a
//! populated object, several generations of the same field name on one row.

pub mod domain_models;

// Re-export commonly used types for convenience
pub use domain_models::{
    Agent, Bank, Document, Franchise, Invoice, Lead, RelationshipManager,
};
