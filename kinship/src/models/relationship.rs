//! Relationship model representing a directed, typed edge between members

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::MemberId;
use crate::taxonomy::RelationshipType;

/// A directed, typed edge between two members.
///
/// The type describes what the related member is to the source member:
/// `(asha, ravi, Father)` records that Ravi is Asha's father. Storage
/// holds only the edge as entered; the reciprocal view is derived, never
/// written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Relationship {
    /// Unique identifier for the edge
    pub id: String,

    /// Source member
    pub member_id: MemberId,

    /// Related member
    pub related_member_id: MemberId,

    /// Relationship-type label, drawn from the closed taxonomy
    pub relationship_type: RelationshipType,

    /// When the edge was recorded
    pub created_at: DateTime<Utc>,
}

impl Relationship {
    /// Create a new edge with a fresh identifier
    pub fn new(
        member_id: MemberId,
        related_member_id: MemberId,
        relationship_type: RelationshipType,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            member_id,
            related_member_id,
            relationship_type,
            created_at: Utc::now(),
        }
    }

    /// Check if this edge touches the given member on either side
    pub fn touches(&self, member_id: MemberId) -> bool {
        self.member_id == member_id || self.related_member_id == member_id
    }

    /// Get the member at the far end from the given member
    pub fn other_member(&self, member_id: MemberId) -> Option<MemberId> {
        if self.member_id == member_id {
            Some(self.related_member_id)
        } else if self.related_member_id == member_id {
            Some(self.member_id)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touches_and_other_member() {
        let edge = Relationship::new(1, 2, RelationshipType::Father);
        assert!(edge.touches(1));
        assert!(edge.touches(2));
        assert!(!edge.touches(3));
        assert_eq!(edge.other_member(1), Some(2));
        assert_eq!(edge.other_member(2), Some(1));
        assert_eq!(edge.other_member(3), None);
    }

    #[test]
    fn test_new_assigns_unique_ids() {
        let a = Relationship::new(1, 2, RelationshipType::Brother);
        let b = Relationship::new(1, 2, RelationshipType::Brother);
        assert_ne!(a.id, b.id);
    }
}
