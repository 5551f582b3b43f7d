//! In-memory directory store.
//!
//! Reference implementation of the store contract backed by
//! `RwLock<HashMap>`. Used by tests and by callers that run the engine
//! over an already-fetched snapshot of the external record store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{Member, MemberId, Relationship};
use crate::storage::errors::StorageError;
use crate::storage::filters::{MemberFilter, RelationshipFilter};
use crate::storage::traits::{MemberStore, RelationshipStore};
use crate::taxonomy::RelationshipType;

/// In-memory implementation of the directory store contract
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectoryStore {
    members: Arc<RwLock<HashMap<MemberId, Member>>>,
    relationships: Arc<RwLock<HashMap<String, Relationship>>>,
}

impl MemoryDirectoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn member_matches(member: &Member, filter: &MemberFilter) -> bool {
        if let Some(ref ids) = filter.ids {
            if !ids.contains(&member.id) {
                return false;
            }
        }
        if let Some(ref needle) = filter.name_contains {
            if !member
                .full_name
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        if let Some(gender) = filter.gender {
            if member.gender != Some(gender) {
                return false;
            }
        }
        if let Some(status) = filter.marital_status {
            if member.marital_status != status {
                return false;
            }
        }
        if let Some(ref city) = filter.current_city {
            if !member.current_city.eq_ignore_ascii_case(city) {
                return false;
            }
        }
        if let Some(ref state) = filter.current_state {
            if !member.current_state.eq_ignore_ascii_case(state) {
                return false;
            }
        }
        if let Some(ref temple_id) = filter.temple_id {
            if member.temple_id.as_deref() != Some(temple_id.as_str()) {
                return false;
            }
        }
        if let Some(after) = filter.created_after {
            if member.created_at < after {
                return false;
            }
        }
        if let Some(before) = filter.created_before {
            if member.created_at > before {
                return false;
            }
        }
        true
    }

    fn relationship_matches(edge: &Relationship, filter: &RelationshipFilter) -> bool {
        if let Some(ref ids) = filter.ids {
            if !ids.contains(&edge.id) {
                return false;
            }
        }
        if let Some(rel_type) = filter.relationship_type {
            if edge.relationship_type != rel_type {
                return false;
            }
        }
        if let Some(member_id) = filter.member_id {
            if edge.member_id != member_id {
                return false;
            }
        }
        if let Some(related_id) = filter.related_member_id {
            if edge.related_member_id != related_id {
                return false;
            }
        }
        if let Some(after) = filter.created_after {
            if edge.created_at < after {
                return false;
            }
        }
        if let Some(before) = filter.created_before {
            if edge.created_at > before {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl MemberStore for MemoryDirectoryStore {
    async fn create_member(&self, member: Member) -> Result<Member, StorageError> {
        let mut members = self.members.write().await;
        if members.contains_key(&member.id) {
            return Err(StorageError::AlreadyExists(format!(
                "member {}",
                member.id
            )));
        }
        members.insert(member.id, member.clone());
        Ok(member)
    }

    async fn get_member(&self, id: MemberId) -> Result<Option<Member>, StorageError> {
        let members = self.members.read().await;
        Ok(members.get(&id).cloned())
    }

    async fn update_member(&self, member: Member) -> Result<Member, StorageError> {
        let mut members = self.members.write().await;
        if !members.contains_key(&member.id) {
            return Err(StorageError::NotFound(format!("member {}", member.id)));
        }
        members.insert(member.id, member.clone());
        Ok(member)
    }

    async fn delete_member(&self, id: MemberId) -> Result<bool, StorageError> {
        let mut members = self.members.write().await;
        Ok(members.remove(&id).is_some())
    }

    async fn list_members(
        &self,
        filter: Option<MemberFilter>,
    ) -> Result<Vec<Member>, StorageError> {
        let members = self.members.read().await;
        let mut result: Vec<Member> = members
            .values()
            .filter(|m| {
                filter
                    .as_ref()
                    .map(|f| Self::member_matches(m, f))
                    .unwrap_or(true)
            })
            .cloned()
            .collect();
        result.sort_by_key(|m| m.id);
        Ok(result)
    }

    async fn count_members(&self, filter: Option<MemberFilter>) -> Result<usize, StorageError> {
        Ok(self.list_members(filter).await?.len())
    }
}

#[async_trait]
impl RelationshipStore for MemoryDirectoryStore {
    async fn create_relationship(
        &self,
        relationship: Relationship,
    ) -> Result<Relationship, StorageError> {
        let mut relationships = self.relationships.write().await;
        if relationships.contains_key(&relationship.id) {
            return Err(StorageError::AlreadyExists(format!(
                "relationship {}",
                relationship.id
            )));
        }
        relationships.insert(relationship.id.clone(), relationship.clone());
        Ok(relationship)
    }

    async fn get_relationship(&self, id: &str) -> Result<Option<Relationship>, StorageError> {
        let relationships = self.relationships.read().await;
        Ok(relationships.get(id).cloned())
    }

    async fn delete_relationship(&self, id: &str) -> Result<bool, StorageError> {
        let mut relationships = self.relationships.write().await;
        Ok(relationships.remove(id).is_some())
    }

    async fn list_relationships(
        &self,
        filter: Option<RelationshipFilter>,
    ) -> Result<Vec<Relationship>, StorageError> {
        let relationships = self.relationships.read().await;
        let mut result: Vec<Relationship> = relationships
            .values()
            .filter(|r| {
                filter
                    .as_ref()
                    .map(|f| Self::relationship_matches(r, f))
                    .unwrap_or(true)
            })
            .cloned()
            .collect();
        // Deterministic listing order for downstream derivations
        result.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(result)
    }

    async fn count_relationships(
        &self,
        filter: Option<RelationshipFilter>,
    ) -> Result<usize, StorageError> {
        Ok(self.list_relationships(filter).await?.len())
    }

    async fn relationships_touching(
        &self,
        member_id: MemberId,
    ) -> Result<Vec<Relationship>, StorageError> {
        let relationships = self.relationships.read().await;
        let mut result: Vec<Relationship> = relationships
            .values()
            .filter(|r| r.touches(member_id))
            .cloned()
            .collect();
        result.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(result)
    }

    async fn find_relationship(
        &self,
        member_id: MemberId,
        related_member_id: MemberId,
        relationship_type: RelationshipType,
    ) -> Result<Option<Relationship>, StorageError> {
        let relationships = self.relationships.read().await;
        Ok(relationships
            .values()
            .find(|r| {
                r.member_id == member_id
                    && r.related_member_id == related_member_id
                    && r.relationship_type == relationship_type
            })
            .cloned())
    }

    async fn delete_relationships_touching(
        &self,
        member_id: MemberId,
    ) -> Result<usize, StorageError> {
        let mut relationships = self.relationships.write().await;
        let before = relationships.len();
        relationships.retain(|_, r| !r.touches(member_id));
        Ok(before - relationships.len())
    }
}
