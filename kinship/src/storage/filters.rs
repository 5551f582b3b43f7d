//! Filter types for storage queries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Gender, MaritalStatus, MemberId};
use crate::taxonomy::RelationshipType;

/// Filter for member queries
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MemberFilter {
    /// Filter by member IDs
    pub ids: Option<Vec<MemberId>>,

    /// Filter by full name (substring match)
    pub name_contains: Option<String>,

    /// Filter by recorded gender
    pub gender: Option<Gender>,

    /// Filter by marital status
    pub marital_status: Option<MaritalStatus>,

    /// Filter by current city
    pub current_city: Option<String>,

    /// Filter by current state
    pub current_state: Option<String>,

    /// Filter by temple/group affiliation
    pub temple_id: Option<String>,

    /// Filter by creation date range
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
}

/// Filter for relationship queries
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RelationshipFilter {
    /// Filter by relationship IDs
    pub ids: Option<Vec<String>>,

    /// Filter by relationship type
    pub relationship_type: Option<RelationshipType>,

    /// Filter by source member ID
    pub member_id: Option<MemberId>,

    /// Filter by related member ID
    pub related_member_id: Option<MemberId>,

    /// Filter by creation date range
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
}
