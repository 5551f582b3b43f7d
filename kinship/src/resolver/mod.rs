//! Reciprocal Resolver
//!
//! Storage holds only the directed edge as entered by the operator; this
//! module derives the logically symmetric view. For a member M it
//! returns edges where M is the source as entered, and edges where M is
//! the target with the type rewritten to the reciprocal label. The
//! rewrite is a pure derivation over stored edges; inverse edges are
//! never written back.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Gender, MemberId, Relationship};
use crate::storage::{DirectoryStore, StorageError};
use crate::taxonomy::{Category, ReciprocalResolution, RelationshipType};

/// Which column of the stored edge the queried member occupied
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EdgeDirection {
    /// The member was the source; the type is as entered
    Outgoing,
    /// The member was the target; the type was rewritten via the
    /// reciprocal table
    Incoming,
}

/// One logical relationship as seen from the queried member
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedRelationship {
    /// Identifier of the underlying stored edge
    pub relationship_id: String,

    /// The member at the far end
    pub other_member_id: MemberId,

    /// Normalized type: what the other member is to the queried member.
    /// When the reciprocal stays ambiguous this holds the first taxonomy
    /// candidate; render `label` instead of this field.
    pub relationship_type: RelationshipType,

    /// Narrative category of the normalized type
    pub category: Category,

    /// Role the queried member had on the stored edge
    pub direction: EdgeDirection,

    /// True when the reciprocal could not be pinned to one type.
    /// Presentation layers should render conservatively.
    pub ambiguous_reciprocal: bool,

    /// Display label: the specific type label, or the generic category
    /// label when the reciprocal is ambiguous
    pub label: String,

    /// When the underlying edge was recorded
    pub created_at: DateTime<Utc>,
}

/// Derive the symmetric relationship view for one member from a set of
/// edges already fetched from the store.
///
/// `gender_of` supplies the recorded gender of other members, used to
/// pick between gendered reciprocal candidates. Output preserves edge
/// order within each partition, outgoing first, and de-duplicates on
/// `(other_member_id, normalized_type)` so independently recorded
/// inverse edges are not double-counted.
pub fn resolve_edges<F>(
    member_id: MemberId,
    edges: &[Relationship],
    gender_of: F,
) -> Vec<ResolvedRelationship>
where
    F: Fn(MemberId) -> Option<Gender>,
{
    let mut resolved = Vec::new();
    let mut seen: HashSet<(MemberId, RelationshipType)> = HashSet::new();

    // Direct partition: member is the source, type as entered
    for edge in edges.iter().filter(|e| e.member_id == member_id) {
        let rel_type = edge.relationship_type;
        if !seen.insert((edge.related_member_id, rel_type)) {
            continue;
        }
        resolved.push(ResolvedRelationship {
            relationship_id: edge.id.clone(),
            other_member_id: edge.related_member_id,
            relationship_type: rel_type,
            category: rel_type.category(),
            direction: EdgeDirection::Outgoing,
            ambiguous_reciprocal: false,
            label: rel_type.label().to_string(),
            created_at: edge.created_at,
        });
    }

    // Inverse partition: member is the target, rewrite via the taxonomy
    for edge in edges
        .iter()
        .filter(|e| e.related_member_id == member_id && e.member_id != member_id)
    {
        let other_id = edge.member_id;
        let (rel_type, ambiguous, label) =
            match edge.relationship_type.reciprocal_for(gender_of(other_id)) {
                ReciprocalResolution::Exact(t) => (t, false, t.label().to_string()),
                ReciprocalResolution::Ambiguous {
                    candidates,
                    category,
                } => {
                    debug!(
                        edge_id = %edge.id,
                        stored_type = %edge.relationship_type,
                        "ambiguous reciprocal, emitting generic category label"
                    );
                    (candidates[0], true, category.generic_label().to_string())
                }
            };

        // Outgoing edges win when both directions were recorded
        if !seen.insert((other_id, rel_type)) {
            continue;
        }
        resolved.push(ResolvedRelationship {
            relationship_id: edge.id.clone(),
            other_member_id: other_id,
            relationship_type: rel_type,
            category: rel_type.category(),
            direction: EdgeDirection::Incoming,
            ambiguous_reciprocal: ambiguous,
            label,
            created_at: edge.created_at,
        });
    }

    resolved
}

/// Store-backed resolver
#[derive(Debug, Clone)]
pub struct ReciprocalResolver {
    store: Arc<dyn DirectoryStore>,
}

impl ReciprocalResolver {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    /// Resolve all logical relationships of a member, fetching the
    /// touching edges and the genders of the members at the far ends.
    pub async fn resolve_for_member(
        &self,
        member_id: MemberId,
    ) -> Result<Vec<ResolvedRelationship>, StorageError> {
        let edges = self.store.relationships_touching(member_id).await?;

        let mut genders = std::collections::HashMap::new();
        for edge in &edges {
            if let Some(other_id) = edge.other_member(member_id) {
                if !genders.contains_key(&other_id) {
                    let gender = self
                        .store
                        .get_member(other_id)
                        .await?
                        .and_then(|m| m.gender);
                    genders.insert(other_id, gender);
                }
            }
        }

        Ok(resolve_edges(member_id, &edges, |id| {
            genders.get(&id).copied().flatten()
        }))
    }
}
