//! Trait definitions for storage components

use std::fmt::Debug;

use async_trait::async_trait;

use crate::models::{Member, MemberId, Relationship};
use crate::storage::errors::StorageError;
use crate::storage::filters::{MemberFilter, RelationshipFilter};

/// Trait for member record operations
#[async_trait]
pub trait MemberStore: Send + Sync + 'static + Debug {
    /// Create a new member record
    async fn create_member(&self, member: Member) -> Result<Member, StorageError>;

    /// Get a member by its ID
    async fn get_member(&self, id: MemberId) -> Result<Option<Member>, StorageError>;

    /// Update an existing member record
    async fn update_member(&self, member: Member) -> Result<Member, StorageError>;

    /// Delete a member record by its ID.
    ///
    /// Removes the record only; cascading incident edges is the
    /// responsibility of the caller (see `Directory::delete_member`).
    async fn delete_member(&self, id: MemberId) -> Result<bool, StorageError>;

    /// List members with optional filtering, ordered by id
    async fn list_members(&self, filter: Option<MemberFilter>) -> Result<Vec<Member>, StorageError>;

    /// Count members with optional filtering
    async fn count_members(&self, filter: Option<MemberFilter>) -> Result<usize, StorageError>;
}

/// Trait for relationship edge operations
#[async_trait]
pub trait RelationshipStore: Send + Sync + 'static + Debug {
    /// Create a new relationship edge
    async fn create_relationship(
        &self,
        relationship: Relationship,
    ) -> Result<Relationship, StorageError>;

    /// Get a relationship by its ID
    async fn get_relationship(&self, id: &str) -> Result<Option<Relationship>, StorageError>;

    /// Delete a relationship by its ID
    async fn delete_relationship(&self, id: &str) -> Result<bool, StorageError>;

    /// List relationships with optional filtering, ordered by creation
    /// time then id
    async fn list_relationships(
        &self,
        filter: Option<RelationshipFilter>,
    ) -> Result<Vec<Relationship>, StorageError>;

    /// Count relationships with optional filtering
    async fn count_relationships(
        &self,
        filter: Option<RelationshipFilter>,
    ) -> Result<usize, StorageError>;

    /// Fetch all edges where the member appears in either column
    async fn relationships_touching(
        &self,
        member_id: MemberId,
    ) -> Result<Vec<Relationship>, StorageError>;

    /// Find the edge for an exact (member, related, type) triple, if any
    async fn find_relationship(
        &self,
        member_id: MemberId,
        related_member_id: MemberId,
        relationship_type: crate::taxonomy::RelationshipType,
    ) -> Result<Option<Relationship>, StorageError>;

    /// Remove every edge touching the member, returning how many were
    /// removed. Cascade primitive for member deletion.
    async fn delete_relationships_touching(
        &self,
        member_id: MemberId,
    ) -> Result<usize, StorageError>;
}

/// Combined trait for the full directory store contract
pub trait DirectoryStore: MemberStore + RelationshipStore {}

impl<T: MemberStore + RelationshipStore> DirectoryStore for T {}
