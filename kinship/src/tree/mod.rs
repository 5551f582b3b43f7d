//! Tree Builder
//!
//! Breadth-first layering of the relationship graph rooted at a chosen
//! member, producing generation levels for rendering. Core family edges
//! (parents, children, spouse, siblings) are expanded; every other
//! category attaches as a satellite node without further expansion, so
//! rendering cost stays proportional to direct family size.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Member, MemberId, Relationship};
use crate::resolver::resolve_edges;
use crate::storage::{DirectoryStore, StorageError};
use crate::taxonomy::{Category, LineageSide, RelationshipType};

/// Configuration for tree traversal
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum number of expansion hops from the root. The default of 2
    /// covers grandparents through grandchildren.
    pub max_depth: u32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self { max_depth: 2 }
    }
}

/// Non-fatal anomalies recorded during traversal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TreeAnomaly {
    /// A member was reachable via paths implying different generations;
    /// the first-discovered offset was kept
    GenerationConflict {
        member_id: MemberId,
        kept: i32,
        discarded: i32,
    },
    /// Expansion stopped at the depth bound; more nodes exist beyond
    /// this member
    DepthExceeded { member_id: MemberId },
}

/// One member placed in the tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreeNode {
    pub member_id: MemberId,
    pub full_name: String,

    /// Relation label of the edge that discovered this node, as seen
    /// from the member it was discovered through
    pub label: String,

    /// Category of the discovering edge; `None` for the root
    pub category: Option<Category>,

    /// Family side, carried by the discovering label or inherited from
    /// the parent-side subtree the node was reached through
    pub lineage: Option<LineageSide>,

    /// True for nodes attached without further expansion
    pub satellite: bool,
}

/// One generation level
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreeLayer {
    /// Vertical offset from the root (negative = ancestors)
    pub generation: i32,
    pub nodes: Vec<TreeNode>,
}

/// Render-ready layered tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FamilyTree {
    pub root_id: MemberId,

    /// Generation levels ordered ascending (ancestors first)
    pub layers: Vec<TreeLayer>,

    /// Anomalies observed during traversal; the tree is still complete
    /// up to its bounds
    pub anomalies: Vec<TreeAnomaly>,

    /// True when the depth bound cut off reachable family
    pub truncated: bool,
}

impl FamilyTree {
    /// Generation assigned to a member, if it was placed
    pub fn generation_of(&self, member_id: MemberId) -> Option<i32> {
        self.layers.iter().find_map(|layer| {
            layer
                .nodes
                .iter()
                .any(|n| n.member_id == member_id)
                .then_some(layer.generation)
        })
    }

    /// Total number of placed members, root included
    pub fn node_count(&self) -> usize {
        self.layers.iter().map(|l| l.nodes.len()).sum()
    }
}

/// Builds layered family trees from a snapshot of the store
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    store: Arc<dyn DirectoryStore>,
    config: TreeConfig,
}

impl TreeBuilder {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self {
            store,
            config: TreeConfig::default(),
        }
    }

    pub fn with_config(store: Arc<dyn DirectoryStore>, config: TreeConfig) -> Self {
        Self { store, config }
    }

    /// Build the tree rooted at the given member.
    ///
    /// Fetches one snapshot of members and edges, then runs entirely
    /// in-memory. Fails only if the root does not exist; traversal
    /// anomalies are recorded on the result.
    pub async fn build(&self, root_id: MemberId) -> Result<FamilyTree, StorageError> {
        let root = self
            .store
            .get_member(root_id)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("member {}", root_id)))?;

        let members: HashMap<MemberId, Member> = self
            .store
            .list_members(None)
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();
        let edges = self.store.list_relationships(None).await?;

        Ok(build_tree_from_snapshot(
            &root,
            &members,
            &edges,
            self.config,
        ))
    }
}

/// Pure traversal over an already-fetched snapshot
pub fn build_tree_from_snapshot(
    root: &Member,
    members: &HashMap<MemberId, Member>,
    edges: &[Relationship],
    config: TreeConfig,
) -> FamilyTree {
    // Adjacency: every edge listed under both endpoints, in input order
    let mut touching: HashMap<MemberId, Vec<Relationship>> = HashMap::new();
    for edge in edges {
        touching
            .entry(edge.member_id)
            .or_default()
            .push(edge.clone());
        if edge.related_member_id != edge.member_id {
            touching
                .entry(edge.related_member_id)
                .or_default()
                .push(edge.clone());
        }
    }
    let gender_of = |id: MemberId| members.get(&id).and_then(|m| m.gender);

    let mut visited: HashMap<MemberId, i32> = HashMap::new();
    let mut side_of: HashMap<MemberId, Option<LineageSide>> = HashMap::new();
    let mut consumed: HashSet<String> = HashSet::new();
    let mut placed: Vec<(i32, TreeNode)> = Vec::new();
    let mut anomalies = Vec::new();
    let mut truncated = false;
    // Expanding nodes stopped at the depth bound, in discovery order
    let mut frontier: Vec<MemberId> = Vec::new();
    let mut queue: VecDeque<(MemberId, i32, u32)> = VecDeque::new();

    visited.insert(root.id, 0);
    side_of.insert(root.id, None);
    placed.push((
        0,
        TreeNode {
            member_id: root.id,
            full_name: root.full_name.clone(),
            label: "Self".to_string(),
            category: None,
            lineage: None,
            satellite: false,
        },
    ));
    queue.push_back((root.id, 0, 0));

    while let Some((current_id, generation, depth)) = queue.pop_front() {
        let empty = Vec::new();
        let current_edges = touching.get(&current_id).unwrap_or(&empty);

        for resolved in resolve_edges(current_id, current_edges, gender_of) {
            // Each stored edge contributes at most one placement or one
            // conflict; re-walking it from the second endpoint is a no-op
            if !consumed.insert(resolved.relationship_id.clone()) {
                continue;
            }
            let other_id = resolved.other_member_id;
            let Some(other) = members.get(&other_id) else {
                // Endpoint record missing from the snapshot; validation
                // prevents this for live data
                continue;
            };
            let target_generation = generation + resolved.relationship_type.generation_delta();

            if let Some(&existing) = visited.get(&other_id) {
                if existing != target_generation {
                    debug!(
                        member_id = other_id,
                        kept = existing,
                        discarded = target_generation,
                        "conflicting generation offsets, keeping first-discovered"
                    );
                    anomalies.push(TreeAnomaly::GenerationConflict {
                        member_id: other_id,
                        kept: existing,
                        discarded: target_generation,
                    });
                }
                continue;
            }

            // Label-carried side wins; otherwise a Father/Mother edge out
            // of the root opens the paternal/maternal subtree and the
            // side is inherited through it
            let lineage = match resolved.relationship_type.lineage_side() {
                Some(side) => Some(side),
                None if current_id == root.id => match resolved.relationship_type {
                    RelationshipType::Father => Some(LineageSide::Paternal),
                    RelationshipType::Mother => Some(LineageSide::Maternal),
                    _ => None,
                },
                None => side_of.get(&current_id).copied().flatten(),
            };

            let expands = resolved.relationship_type.expands_in_tree();
            visited.insert(other_id, target_generation);
            side_of.insert(other_id, lineage);
            placed.push((
                target_generation,
                TreeNode {
                    member_id: other_id,
                    full_name: other.full_name.clone(),
                    label: resolved.label.clone(),
                    category: Some(resolved.category),
                    lineage,
                    satellite: !expands,
                },
            ));

            if expands {
                if depth + 1 < config.max_depth {
                    queue.push_back((other_id, target_generation, depth + 1));
                } else {
                    frontier.push(other_id);
                }
            }
        }
    }

    // Only once traversal is complete can truncation be judged: a
    // neighbor hidden from one frontier node may have been reached
    // through a shallower path
    for member_id in frontier {
        let has_hidden_family = touching
            .get(&member_id)
            .map(|es| {
                es.iter()
                    .any(|e| e.other_member(member_id).is_some_and(|m| !visited.contains_key(&m)))
            })
            .unwrap_or(false);
        if has_hidden_family {
            truncated = true;
            anomalies.push(TreeAnomaly::DepthExceeded { member_id });
        }
    }

    // Group placed nodes into layers, ascending by generation, keeping
    // discovery order within each layer
    let mut generations: Vec<i32> = placed.iter().map(|(g, _)| *g).collect();
    generations.sort_unstable();
    generations.dedup();

    let layers = generations
        .into_iter()
        .map(|generation| TreeLayer {
            generation,
            nodes: placed
                .iter()
                .filter(|(g, _)| *g == generation)
                .map(|(_, n)| n.clone())
                .collect(),
        })
        .collect();

    FamilyTree {
        root_id: root.id,
        layers,
        anomalies,
        truncated,
    }
}
