//! Catalog API models
//!
//! Request/response structures of the catalog REST API. These are kept
//! separate from the domain models; each payload converts into its domain
//! counterpart with `into_domain`, which performs presence checks only.

use crate::domain::ids::{AssetId, CommunityId, DomainId};
use crate::domain::{
    Asset, AssetRef, Attribute, CatalogError, Community, Domain, Relation, RelationDirection,
    Responsibility, Result, StewardError,
};
use serde::{Deserialize, Serialize};

/// Envelope of every collection response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResponse {
    /// Items on this page
    #[serde(default)]
    pub results: Vec<serde_json::Value>,

    /// Total number of matching items, when the server reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,

    /// Offset echoed back by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,

    /// Limit echoed back by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

/// Reference to another resource embedded in a payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub resource_type: Option<String>,
}

/// Community payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityPayload {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub parent: Option<ResourceRef>,
}

/// Domain payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainPayload {
    pub id: String,
    pub name: String,

    #[serde(rename = "type", default)]
    pub domain_type: Option<ResourceRef>,

    pub community: ResourceRef,
}

/// Asset payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPayload {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(rename = "type", default)]
    pub asset_type: Option<ResourceRef>,

    #[serde(default)]
    pub status: Option<ResourceRef>,

    pub domain: ResourceRef,
}

/// Attribute payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributePayload {
    pub id: String,

    #[serde(rename = "type")]
    pub attribute_type: ResourceRef,

    #[serde(default)]
    pub value: serde_json::Value,
}

/// Relation type payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationTypePayload {
    pub id: String,

    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub co_role: Option<String>,
}

/// Relation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationPayload {
    pub id: String,
    pub source: ResourceRef,
    pub target: ResourceRef,

    #[serde(rename = "type")]
    pub relation_type: RelationTypePayload,
}

/// Responsibility payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponsibilityPayload {
    pub id: String,
    pub role: ResourceRef,
    pub owner: ResourceRef,
}

fn invalid(message: String) -> StewardError {
    StewardError::Catalog(CatalogError::InvalidResponse(message))
}

fn community_id(raw: String) -> Result<CommunityId> {
    CommunityId::new(raw).map_err(invalid)
}

fn domain_id(raw: String) -> Result<DomainId> {
    DomainId::new(raw).map_err(invalid)
}

fn asset_id(raw: String) -> Result<AssetId> {
    AssetId::new(raw).map_err(invalid)
}

impl CommunityPayload {
    /// Convert to a domain [`Community`]
    pub fn into_domain(self) -> Result<Community> {
        Ok(Community {
            id: community_id(self.id)?,
            name: self.name,
            description: self.description,
            parent_id: self.parent.map(|p| community_id(p.id)).transpose()?,
        })
    }
}

impl DomainPayload {
    /// Convert to a domain [`Domain`]
    pub fn into_domain(self) -> Result<Domain> {
        Ok(Domain {
            id: domain_id(self.id)?,
            name: self.name,
            community_id: community_id(self.community.id)?,
            domain_type: self.domain_type.and_then(|t| t.name),
        })
    }
}

impl AssetPayload {
    /// Convert to a domain [`Asset`]
    pub fn into_domain(self) -> Result<Asset> {
        Ok(Asset {
            id: asset_id(self.id)?,
            name: self.name,
            display_name: self.display_name,
            domain_id: domain_id(self.domain.id)?,
            asset_type: self.asset_type.and_then(|t| t.name),
            status: self.status.and_then(|s| s.name),
        })
    }
}

impl AttributePayload {
    /// Convert to a domain [`Attribute`]
    ///
    /// The attribute type name is the key; a type without a name falls back
    /// to its id.
    pub fn into_domain(self) -> Attribute {
        let ResourceRef { id, name, .. } = self.attribute_type;
        Attribute {
            id: self.id,
            attribute_type: name.unwrap_or(id),
            value: self.value,
        }
    }
}

impl RelationPayload {
    /// Convert to a domain [`Relation`] as seen from one side
    ///
    /// Outgoing relations are labelled with the role and point at the
    /// target; incoming ones with the co-role and point at the source. A
    /// missing label falls back to the other one, then to the type id.
    pub fn into_domain(self, direction: RelationDirection) -> Result<Relation> {
        let RelationTypePayload { id, role, co_role } = self.relation_type;
        let (related, label) = match direction {
            RelationDirection::Outgoing => (self.target, role.or(co_role)),
            RelationDirection::Incoming => (self.source, co_role.or(role)),
        };

        Ok(Relation {
            id: self.id,
            direction,
            related_asset: AssetRef {
                id: asset_id(related.id)?,
                name: related.name,
            },
            relation_type: label.unwrap_or(id),
        })
    }
}

impl ResponsibilityPayload {
    /// Convert to a domain [`Responsibility`]
    pub fn into_domain(self) -> Responsibility {
        Responsibility {
            id: self.id,
            role: self.role.name.unwrap_or(self.role.id),
            assignee_id: self.owner.id,
            assignee_type: self.owner.resource_type,
        }
    }
}
