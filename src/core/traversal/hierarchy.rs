//! Community hierarchy resolution
//!
//! The catalog returns communities as a flat listing in which each entry
//! names its parent. [`CommunityHierarchy`] indexes one such snapshot into a
//! parent → children adjacency map and answers descendant and lookup
//! queries against it without further remote calls.

use super::pagination::fetch_all;
use crate::adapters::catalog::models::CommunityPayload;
use crate::adapters::catalog::{CatalogQuery, CatalogSource};
use crate::domain::{Community, CommunityId, Domain, Result, StewardError};
use std::collections::{HashMap, HashSet};

/// A community reached during a walk, with its distance from the start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HierarchyNode<'a> {
    pub depth: usize,
    pub community: &'a Community,
}

/// Indexed snapshot of the community forest
#[derive(Debug, Clone, Default)]
pub struct CommunityHierarchy {
    communities: Vec<Community>,
    index: HashMap<CommunityId, usize>,
    children: HashMap<CommunityId, Vec<usize>>,
}

impl CommunityHierarchy {
    /// Index a flat community listing
    ///
    /// Listing order is preserved; children of a parent are visited in the
    /// order they appear here.
    pub fn new(communities: Vec<Community>) -> Self {
        let mut index = HashMap::with_capacity(communities.len());
        let mut children: HashMap<CommunityId, Vec<usize>> = HashMap::new();

        for (i, community) in communities.iter().enumerate() {
            index.entry(community.id.clone()).or_insert(i);
            if let Some(parent_id) = &community.parent_id {
                children.entry(parent_id.clone()).or_default().push(i);
            }
        }

        Self {
            communities,
            index,
            children,
        }
    }

    /// Fetch every community from the catalog and index the result
    ///
    /// # Errors
    ///
    /// Propagates pagination failures and invalid community payloads.
    pub async fn load<S>(source: &S, page_size: usize) -> Result<Self>
    where
        S: CatalogSource + ?Sized,
    {
        let payloads: Vec<CommunityPayload> =
            fetch_all(source, &CatalogQuery::communities(), page_size).await?;

        let communities = payloads
            .into_iter()
            .map(CommunityPayload::into_domain)
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(count = communities.len(), "Loaded community hierarchy");

        Ok(Self::new(communities))
    }

    /// Number of communities in the snapshot
    pub fn len(&self) -> usize {
        self.communities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }

    /// All communities in listing order
    pub fn communities(&self) -> &[Community] {
        &self.communities
    }

    /// Look up a community by id
    pub fn get(&self, id: &CommunityId) -> Option<&Community> {
        self.index.get(id).map(|&i| &self.communities[i])
    }

    /// Top-level communities
    ///
    /// A community whose parent is missing from the snapshot is treated as
    /// a root.
    pub fn roots(&self) -> Vec<&Community> {
        self.communities
            .iter()
            .filter(|c| {
                c.parent_id
                    .as_ref()
                    .map_or(true, |parent| !self.index.contains_key(parent))
            })
            .collect()
    }

    /// First community whose name equals `name` exactly
    ///
    /// # Errors
    ///
    /// Returns [`StewardError::NotFound`] when no name matches.
    pub fn community_by_name(&self, name: &str) -> Result<&Community> {
        self.communities
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| StewardError::NotFound(format!("Community '{name}'")))
    }

    /// All communities below `id`, parents before children
    ///
    /// The starting community itself is not included. An id with no
    /// children (or one absent from the snapshot) yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`StewardError::MalformedHierarchy`] when a community is
    /// reached twice, which happens for a parent cycle through `id` or a
    /// duplicated id.
    pub fn resolve_descendants(&self, id: &CommunityId) -> Result<Vec<Community>> {
        Ok(self
            .descend(id)?
            .into_iter()
            .map(|node| node.community.clone())
            .collect())
    }

    /// The community `id` followed by its descendants, with depths
    ///
    /// # Errors
    ///
    /// Returns [`StewardError::NotFound`] when `id` is not in the snapshot
    /// and [`StewardError::MalformedHierarchy`] as for
    /// [`resolve_descendants`](Self::resolve_descendants).
    pub fn walk(&self, id: &CommunityId) -> Result<Vec<HierarchyNode<'_>>> {
        let root = self
            .get(id)
            .ok_or_else(|| StewardError::NotFound(format!("Community with id '{id}'")))?;

        let mut nodes = vec![HierarchyNode {
            depth: 0,
            community: root,
        }];
        nodes.extend(self.descend(id)?);
        Ok(nodes)
    }

    /// Pre-order descent from `id`, excluding `id` itself
    fn descend(&self, id: &CommunityId) -> Result<Vec<HierarchyNode<'_>>> {
        let mut visited: HashSet<&CommunityId> = HashSet::new();
        visited.insert(id);

        let mut nodes = Vec::new();
        let mut stack: Vec<(usize, usize)> = self
            .child_indices(id)
            .iter()
            .rev()
            .map(|&i| (i, 1))
            .collect();

        while let Some((i, depth)) = stack.pop() {
            let community = &self.communities[i];
            if !visited.insert(&community.id) {
                return Err(StewardError::MalformedHierarchy(format!(
                    "Community '{}' ({}) reached twice below '{id}'",
                    community.name, community.id
                )));
            }

            nodes.push(HierarchyNode { depth, community });
            stack.extend(
                self.child_indices(&community.id)
                    .iter()
                    .rev()
                    .map(|&child| (child, depth + 1)),
            );
        }

        Ok(nodes)
    }

    fn child_indices(&self, id: &CommunityId) -> &[usize] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// All descendants of `community_id` within `all_communities`
///
/// Convenience wrapper that indexes the listing and resolves once; use a
/// [`CommunityHierarchy`] directly to resolve several ids against the same
/// snapshot.
///
/// # Errors
///
/// Returns [`StewardError::MalformedHierarchy`] on a cycle or duplicate id.
pub fn resolve_descendants(
    community_id: &CommunityId,
    all_communities: &[Community],
) -> Result<Vec<Community>> {
    CommunityHierarchy::new(all_communities.to_vec()).resolve_descendants(community_id)
}

/// First domain whose name equals `name` exactly
///
/// # Errors
///
/// Returns [`StewardError::NotFound`] when no name matches.
pub fn domain_by_name<'a>(domains: &'a [Domain], name: &str) -> Result<&'a Domain> {
    domains
        .iter()
        .find(|d| d.name == name)
        .ok_or_else(|| StewardError::NotFound(format!("Domain '{name}'")))
}
