//! Polymorphic agent ownership
//!
//! An agent is managed by exactly one of two owner kinds — a franchise or a
//! relationship manager. The backend encodes this with a `managedByModel`
//! discriminator next to a `managedBy` reference, with a legacy `franchise`
//! field still present on older rows. This module carries the tagged
//! [`Owner`] union, the role-based defaulting chain, and the form-field
//! selection state used by create/edit screens.

pub mod resolver;
pub mod selection;

pub use resolver::{default_owner, owner_of, Actor, ActorRole, Owner, OwnerDefault, OwnerKind};
pub use selection::{OwnerCandidate, OwnerSelection};

pub use crate::error::OwnershipError;
