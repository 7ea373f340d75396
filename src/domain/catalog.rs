//! Community and domain snapshots
//!
//! Read-only views of the organizational part of the catalog. Communities
//! form a forest through their optional parent reference; every domain
//! belongs to exactly one community.

use super::ids::{CommunityId, DomainId};
use serde::{Deserialize, Serialize};

/// Top-level organizational grouping in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    /// Community identifier
    pub id: CommunityId,

    /// Community name as shown in the catalog
    pub name: String,

    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parent community, absent for roots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CommunityId>,
}

impl Community {
    /// Create a root community
    pub fn new(id: CommunityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            parent_id: None,
        }
    }

    /// Set the parent community
    pub fn with_parent(mut self, parent_id: CommunityId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether the community has no parent reference
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Named grouping of assets within a community
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    /// Domain identifier
    pub id: DomainId,

    /// Domain name
    pub name: String,

    /// Owning community
    pub community_id: CommunityId,

    /// Domain type name (e.g. "Business Asset Domain")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_type: Option<String>,
}

impl Domain {
    /// Create a new domain
    pub fn new(id: DomainId, name: impl Into<String>, community_id: CommunityId) -> Self {
        Self {
            id,
            name: name.into(),
            community_id,
            domain_type: None,
        }
    }

    /// Set the domain type
    pub fn with_type(mut self, domain_type: impl Into<String>) -> Self {
        self.domain_type = Some(domain_type.into());
        self
    }
}
