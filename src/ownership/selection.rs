//! Owner picker state for agent forms
//!
//! Tracks what the user has actually done in the search-and-pick UI:
//! switched kinds, chosen a candidate, or just typed. Submit-time
//! resolution and validation live here so every form validates the same
//! way.

use crate::error::OwnershipError;
use crate::identity::{key_of_opt, IdentityKey};
use crate::models::{Franchise, RelationshipManager};

use super::resolver::{Owner, OwnerDefault, OwnerKind};

/// One pickable owner in the search dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerCandidate {
    pub id: IdentityKey,
    pub name: String,
}

impl OwnerCandidate {
    pub fn new(id: impl Into<IdentityKey>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl From<&Franchise> for OwnerCandidate {
    fn from(franchise: &Franchise) -> Self {
        Self {
            id: key_of_opt(franchise.id.as_ref()),
            name: franchise.name.clone().unwrap_or_default(),
        }
    }
}

impl From<&RelationshipManager> for OwnerCandidate {
    fn from(manager: &RelationshipManager) -> Self {
        Self {
            id: key_of_opt(manager.id.as_ref()),
            name: manager.name.clone().unwrap_or_default(),
        }
    }
}

/// Form-field state for the owner picker.
///
/// Switching kinds always clears the previously chosen id — an id never
/// silently carries across kinds. A locked field (role default or fixed
/// context) ignores edits entirely.
#[derive(Debug, Clone)]
pub struct OwnerSelection {
    owner: Owner,
    editable: bool,
    search_text: String,
}

impl OwnerSelection {
    pub fn new(default: OwnerDefault) -> Self {
        Self {
            owner: default.owner,
            editable: default.editable,
            search_text: String::new(),
        }
    }

    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    pub fn kind(&self) -> OwnerKind {
        self.owner.kind
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Switch the owner kind. The prior id is invalidated, never carried.
    pub fn set_kind(&mut self, kind: OwnerKind) {
        if !self.editable || kind == self.owner.kind {
            return;
        }
        self.owner = Owner {
            kind,
            id: IdentityKey::empty(),
        };
        self.search_text.clear();
    }

    /// Explicit pick from the dropdown.
    pub fn choose(&mut self, candidate: &OwnerCandidate) {
        if !self.editable {
            return;
        }
        self.owner.id = candidate.id.clone();
        self.search_text = candidate.name.clone();
    }

    /// Drop the current pick, keeping the kind.
    pub fn clear_choice(&mut self) {
        if !self.editable {
            return;
        }
        self.owner.id = IdentityKey::empty();
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        if !self.editable {
            return;
        }
        self.search_text = text.into();
    }

    /// Resolve and validate the owner at submit time.
    ///
    /// If nothing was picked but the typed search text matches exactly one
    /// candidate by case-insensitive name, that candidate's id is adopted.
    /// An empty id after resolution is a field-level error labeled for the
    /// current kind.
    pub fn resolve(&self, candidates: &[OwnerCandidate]) -> Result<Owner, OwnershipError> {
        if self.owner.is_set() {
            return Ok(self.owner.clone());
        }

        let needle = self.search_text.trim();
        if !needle.is_empty() {
            let mut matched = candidates
                .iter()
                .filter(|candidate| candidate.name.trim().eq_ignore_ascii_case(needle));
            if let (Some(only), None) = (matched.next(), matched.next()) {
                if !only.id.is_empty() {
                    return Ok(Owner {
                        kind: self.owner.kind,
                        id: only.id.clone(),
                    });
                }
            }
        }

        Err(OwnershipError::missing(self.owner.kind))
    }
}
