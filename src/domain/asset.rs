//! Asset records and their sub-resources
//!
//! An [`Asset`] is the base record returned by the asset listing. Its
//! attributes, relations and responsibilities each need a separate round trip
//! and are attached in an [`EnrichedAsset`].

use super::ids::{AssetId, DomainId};
use serde::{Deserialize, Serialize};

/// A cataloged data object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Asset identifier
    pub id: AssetId,

    /// Full asset name
    pub name: String,

    /// Human-friendly name, when the catalog carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Owning domain
    pub domain_id: DomainId,

    /// Asset type name (e.g. "Business Term", "Table")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,

    /// Lifecycle status name (e.g. "Accepted")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Asset {
    /// Create a new asset
    pub fn new(id: AssetId, name: impl Into<String>, domain_id: DomainId) -> Self {
        Self {
            id,
            name: name.into(),
            display_name: None,
            domain_id,
            asset_type: None,
            status: None,
        }
    }

    /// Set the asset type
    pub fn with_type(mut self, asset_type: impl Into<String>) -> Self {
        self.asset_type = Some(asset_type.into());
        self
    }
}

/// A typed attribute value attached to an asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute identifier
    pub id: String,

    /// Attribute type name, used as the key (e.g. "Definition")
    pub attribute_type: String,

    /// Attribute value as delivered by the catalog
    pub value: serde_json::Value,
}

/// Which side of a relation the exported asset sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationDirection {
    /// The exported asset is the relation's source
    Outgoing,
    /// The exported asset is the relation's target
    Incoming,
}

/// Minimal reference to another asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    /// Referenced asset identifier
    pub id: AssetId,

    /// Referenced asset name, if the payload carried it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A typed link between two assets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Relation identifier
    pub id: String,

    /// Direction relative to the exported asset
    pub direction: RelationDirection,

    /// The asset on the other end
    pub related_asset: AssetRef,

    /// Relation type as read from the exported asset's side
    /// (role for outgoing, co-role for incoming)
    pub relation_type: String,
}

/// Assignment of a role to a user or group for an asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Responsibility {
    /// Responsibility identifier
    pub id: String,

    /// Role name (e.g. "Steward", "Owner")
    pub role: String,

    /// Assignee identifier
    pub assignee_id: String,

    /// Assignee kind (e.g. "User", "UserGroup")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_type: Option<String>,
}

/// An asset with its requested facets attached
///
/// A facet that was not requested is `None` and is left out of the
/// serialized record entirely; a requested facet with no entries is an
/// empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedAsset {
    /// Base record
    #[serde(flatten)]
    pub asset: Asset,

    /// Attributes, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<Attribute>>,

    /// Outgoing then incoming relations, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relations: Option<Vec<Relation>>,

    /// Responsibility assignments, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsibilities: Option<Vec<Responsibility>>,
}

impl EnrichedAsset {
    /// Wrap a base record with no facets attached
    pub fn bare(asset: Asset) -> Self {
        Self {
            asset,
            attributes: None,
            relations: None,
            responsibilities: None,
        }
    }
}
