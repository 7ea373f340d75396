//! Export units and the documents built for them

use crate::domain::{Community, Domain, EnrichedAsset};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of top-level unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Community,
    Domain,
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::Community => f.write_str("community"),
            UnitKind::Domain => f.write_str("domain"),
        }
    }
}

/// A top-level subject of one independent export attempt
#[derive(Debug, Clone, PartialEq)]
pub enum ExportUnit {
    /// A community together with everything below it
    Community(Community),
    /// A single domain
    Domain(Domain),
}

impl ExportUnit {
    /// Display name, also used to name the output file
    pub fn name(&self) -> &str {
        match self {
            ExportUnit::Community(c) => &c.name,
            ExportUnit::Domain(d) => &d.name,
        }
    }

    pub fn kind(&self) -> UnitKind {
        match self {
            ExportUnit::Community(_) => UnitKind::Community,
            ExportUnit::Domain(_) => UnitKind::Domain,
        }
    }

    /// Catalog id of the unit's root resource
    pub fn id(&self) -> &str {
        match self {
            ExportUnit::Community(c) => c.id.as_str(),
            ExportUnit::Domain(d) => d.id.as_str(),
        }
    }

    /// Serializable reference to this unit
    pub fn to_ref(&self) -> UnitRef {
        UnitRef {
            kind: self.kind(),
            id: self.id().to_string(),
            name: self.name().to_string(),
        }
    }
}

impl fmt::Display for ExportUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind(), self.name())
    }
}

/// Identifies the unit a document was exported for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRef {
    pub kind: UnitKind,
    pub id: String,
    pub name: String,
}

/// A domain with its assets, when assets were requested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainSection {
    #[serde(flatten)]
    pub domain: Domain,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<Vec<EnrichedAsset>>,
}

/// A community and the domains it directly owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunitySection {
    #[serde(flatten)]
    pub community: Community,

    /// Distance from the unit's root community
    pub depth: usize,

    pub domains: Vec<DomainSection>,
}

/// Everything exported for one unit
///
/// Community sections are in discovery order: the unit's root first, then
/// its descendants parents-before-children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub unit: UnitRef,
    pub exported_at: DateTime<Utc>,
    pub communities: Vec<CommunitySection>,
}

impl ExportDocument {
    /// Start an empty document for `unit`, stamped now
    pub fn new(unit: &ExportUnit) -> Self {
        Self {
            unit: unit.to_ref(),
            exported_at: Utc::now(),
            communities: Vec::new(),
        }
    }

    pub fn community_count(&self) -> usize {
        self.communities.len()
    }

    pub fn domain_count(&self) -> usize {
        self.communities.iter().map(|c| c.domains.len()).sum()
    }

    /// Number of exported assets (zero when assets were not requested)
    pub fn asset_count(&self) -> usize {
        self.communities
            .iter()
            .flat_map(|c| &c.domains)
            .filter_map(|d| d.assets.as_ref())
            .map(Vec::len)
            .sum()
    }
}

/// One community in a scope preview
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeEntry {
    pub depth: usize,
    pub id: String,
    pub name: String,
}

/// Communities an export of a unit would cover, without fetching anything
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopePreview {
    pub unit: UnitRef,
    pub communities: Vec<ScopeEntry>,
}

impl ScopePreview {
    /// Indented tree, one community per line
    pub fn render(&self) -> String {
        self.communities
            .iter()
            .map(|entry| format!("{}{} ({})", "  ".repeat(entry.depth), entry.name, entry.id))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
