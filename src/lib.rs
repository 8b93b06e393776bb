//! lo-console — client core for a loan-origination back-office console
//!
//! The backend references entities loosely: a relationship field may hold a
//! bare id, a populated object, or nothing, and the same record can appear
//! in all three shapes across one page load. This crate is the layer that
//! reconciles that — one normalization primitive for identifier equality,
//! role-based defaulting of the polymorphic "managed by" relationship,
//! staged document uploads across the create/update boundary, and
//! lead/invoice roll-ups.
//!
//! ## Quick start
//!
//! ```rust
//! use lo_console::identity::{key_of, same_entity};
//! use serde_json::json;
//!
//! let populated = json!({"_id": "F1", "name": "Acme Lending"});
//! let raw = json!("F1");
//! assert!(same_entity(&populated, &raw));
//! assert_eq!(key_of(&populated).as_str(), "F1");
//! ```

// Core error handling
pub mod error;

// Connection settings
pub mod config;

// Canonical entity reference keys
pub mod identity;

// Wire DTOs
pub mod models;

// Polymorphic agent ownership
pub mod ownership;

// Staged document attachments
pub mod attachments;

// Per-entity roll-ups
pub mod stats;

// REST boundary
pub mod api;

// Public re-exports for page components
pub use api::{ApiClient, ListFilters};
pub use attachments::{
    AttachmentStager, DocType, DocumentUploader, EntityType, FlushReport, HttpDocumentUploader,
    Preview, SlotState, StagedAttachment, UploadRequest,
};
pub use config::ConsoleConfig;
pub use error::{ConsoleError, OwnershipError, TransportError, UploadError};
pub use identity::{key_of, same_entity, IdentityKey};
pub use models::{Agent, Bank, Document, Franchise, Invoice, Lead, RelationshipManager};
pub use ownership::{
    default_owner, Actor, ActorRole, Owner, OwnerCandidate, OwnerDefault, OwnerKind,
    OwnerSelection,
};
pub use stats::{stats_for, Collections, StatRecord, StatTargetKind};
