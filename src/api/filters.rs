//! Query filters for list endpoints
//!
//! The filter bars on list pages all send the same handful of query
//! parameters; this builder keeps their names in one place.

use crate::identity::IdentityKey;
use crate::ownership::OwnerKind;

/// Filters for a `list` call. Unset fields are omitted from the query.
#[derive(Debug, Clone, Default)]
pub struct ListFilters {
    search: Option<String>,
    status: Option<String>,
    owner_kind: Option<OwnerKind>,
    owner_id: Option<IdentityKey>,
    page: Option<u32>,
    limit: Option<u32>,
}

impl ListFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn owner(mut self, kind: OwnerKind, id: IdentityKey) -> Self {
        self.owner_kind = Some(kind);
        self.owner_id = Some(id);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query-string pairs in the order the backend documents them.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        if let Some(status) = &self.status {
            query.push(("status", status.clone()));
        }
        if let Some(kind) = self.owner_kind {
            query.push(("ownerKind", kind.as_str().to_string()));
        }
        if let Some(id) = &self.owner_id {
            if !id.is_empty() {
                query.push(("ownerId", id.as_str().to_string()));
            }
        }
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        query
    }
}
