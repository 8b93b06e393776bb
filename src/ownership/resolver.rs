//! Owner defaulting for agent create/edit forms
//!
//! Resolution order, first match wins:
//! 1. a fixed context injected by a parent workflow (owner picker disabled),
//! 2. the existing entity's own ownership fields (edit mode),
//! 3. a franchise actor's own franchise (owner locked),
//! 4. a relationship-manager actor's own identity (owner locked),
//! 5. unset — the user must pick before submit.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::identity::{first_key, key_of_opt, IdentityKey};
use crate::models::Agent;

/// The two possible owner kinds of an agent.
///
/// Wire values match the backend's `managedByModel` discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OwnerKind {
    Franchise,
    RelationshipManager,
}

impl OwnerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OwnerKind::Franchise => "Franchise",
            OwnerKind::RelationshipManager => "RelationshipManager",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Franchise" => Some(OwnerKind::Franchise),
            "RelationshipManager" => Some(OwnerKind::RelationshipManager),
            _ => None,
        }
    }

    /// Human label used in field-level validation messages.
    pub fn label(self) -> &'static str {
        match self {
            OwnerKind::Franchise => "franchise",
            OwnerKind::RelationshipManager => "relationship manager",
        }
    }
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The resolved "managed by" relationship of an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub kind: OwnerKind,
    pub id: IdentityKey,
}

impl Owner {
    pub fn new(kind: OwnerKind, id: impl Into<IdentityKey>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    /// The default-kind, no-selection owner a blank form starts from.
    pub fn unset() -> Self {
        Self {
            kind: OwnerKind::Franchise,
            id: IdentityKey::empty(),
        }
    }

    pub fn is_set(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Console roles. Only `Franchise` and `RelationshipManager` affect owner
/// defaulting; every other role falls through to an unset owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Admin,
    Franchise,
    RelationshipManager,
    Agent,
    Bank,
}

impl ActorRole {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(ActorRole::Admin),
            "franchise" => Some(ActorRole::Franchise),
            "relationship_manager" => Some(ActorRole::RelationshipManager),
            "agent" => Some(ActorRole::Agent),
            "bank" => Some(ActorRole::Bank),
            _ => None,
        }
    }
}

/// The acting user's session identity, threaded in explicitly.
///
/// Deep logic never reads the session store; the page boundary builds an
/// `Actor` once and passes it down.
#[derive(Debug, Clone, Default)]
pub struct Actor {
    pub role: Option<ActorRole>,
    /// The actor's own user id, as the session endpoint sent it.
    pub id: Option<Value>,
    /// The actor's own franchise reference (franchise users only).
    pub franchise: Option<Value>,
}

impl Actor {
    pub fn new(role: ActorRole) -> Self {
        Self {
            role: Some(role),
            id: None,
            franchise: None,
        }
    }

    pub fn with_id(mut self, id: Value) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_franchise(mut self, franchise: Value) -> Self {
        self.franchise = Some(franchise);
        self
    }
}

/// Result of owner defaulting: the starting owner plus whether the picker
/// stays enabled for this form session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerDefault {
    pub owner: Owner,
    pub editable: bool,
}

/// Compute the owner a form opens with. Pure; never fails — an unresolvable
/// owner comes back unset and is caught by submit-time validation.
pub fn default_owner(
    actor: &Actor,
    existing: Option<&Agent>,
    fixed: Option<Owner>,
) -> OwnerDefault {
    if let Some(owner) = fixed {
        // Injected by a parent workflow ("add agent under this manager");
        // the picker stays disabled downstream.
        return OwnerDefault {
            owner,
            editable: false,
        };
    }

    if let Some(agent) = existing {
        return OwnerDefault {
            owner: owner_of(agent),
            editable: true,
        };
    }

    match actor.role {
        Some(ActorRole::Franchise) => OwnerDefault {
            owner: Owner {
                kind: OwnerKind::Franchise,
                id: key_of_opt(actor.franchise.as_ref()),
            },
            editable: false,
        },
        Some(ActorRole::RelationshipManager) => OwnerDefault {
            owner: Owner {
                kind: OwnerKind::RelationshipManager,
                id: key_of_opt(actor.id.as_ref()),
            },
            editable: false,
        },
        _ => OwnerDefault {
            owner: Owner::unset(),
            editable: true,
        },
    }
}

/// Derive an existing agent's owner from its raw ownership fields.
///
/// A missing discriminator means a legacy row; those predate relationship
/// managers, so the kind falls back to franchise either way.
pub fn owner_of(agent: &Agent) -> Owner {
    let kind = agent
        .managed_by_model
        .as_deref()
        .and_then(OwnerKind::parse)
        .unwrap_or(OwnerKind::Franchise);

    let id = match kind {
        OwnerKind::Franchise => {
            first_key([agent.managed_by.as_ref(), agent.franchise.as_ref()])
        }
        OwnerKind::RelationshipManager => key_of_opt(agent.managed_by.as_ref()),
    };

    Owner { kind, id }
}
