//! Directory facade over the storage adapter.
//!
//! Validated mutation surface plus the derivation entry points (resolved
//! relationships, trees, network snapshots, stories). All validation
//! happens before any write; derivations run over a fetched snapshot and
//! annotate anomalies instead of failing.

use std::sync::Arc;

use tracing::{debug, info};

use crate::models::{Member, MemberId, Relationship};
use crate::network::{NetworkAnalyzer, NetworkSnapshot};
use crate::resolver::{ReciprocalResolver, ResolvedRelationship};
use crate::storage::{DirectoryStore, MemberFilter, StorageError};
use crate::story::{StoryComposer, StoryDocument};
use crate::taxonomy::RelationshipType;
use crate::tree::{FamilyTree, TreeBuilder, TreeConfig};
use crate::{KinshipError, Result};

/// Facade over a directory store with the graph engine attached
#[derive(Debug, Clone)]
pub struct Directory {
    store: Arc<dyn DirectoryStore>,
    resolver: ReciprocalResolver,
    tree_config: TreeConfig,
}

impl Directory {
    /// Create a directory over the given store with default settings
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self::with_tree_config(store, TreeConfig::default())
    }

    /// Create a directory with an explicit tree traversal configuration
    pub fn with_tree_config(store: Arc<dyn DirectoryStore>, tree_config: TreeConfig) -> Self {
        let resolver = ReciprocalResolver::new(store.clone());
        Self {
            store,
            resolver,
            tree_config,
        }
    }

    /// Access the underlying store
    pub fn store(&self) -> Arc<dyn DirectoryStore> {
        self.store.clone()
    }

    // --- Member records ---

    /// Register a new member record
    pub async fn register_member(&self, member: Member) -> Result<Member> {
        let member = self.store.create_member(member).await?;
        info!(member_id = member.id, name = %member.full_name, "member registered");
        Ok(member)
    }

    /// Get a member by id
    pub async fn get_member(&self, id: MemberId) -> Result<Option<Member>> {
        Ok(self.store.get_member(id).await?)
    }

    /// Update an existing member record
    pub async fn update_member(&self, member: Member) -> Result<Member> {
        Ok(self.store.update_member(member).await?)
    }

    /// List members with optional filtering
    pub async fn list_members(&self, filter: Option<MemberFilter>) -> Result<Vec<Member>> {
        Ok(self.store.list_members(filter).await?)
    }

    /// Delete a member, cascading to every incident relationship edge.
    ///
    /// Edges are removed before the member record so concurrent reads
    /// of the member's relationships never see a dangling endpoint.
    pub async fn delete_member(&self, id: MemberId) -> Result<bool> {
        if self.store.get_member(id).await?.is_none() {
            return Ok(false);
        }
        let removed_edges = self.store.delete_relationships_touching(id).await?;
        let removed = self.store.delete_member(id).await?;
        info!(
            member_id = id,
            removed_edges, "member deleted with incident edges"
        );
        Ok(removed)
    }

    // --- Relationship edges ---

    /// Create a relationship edge from a form label.
    ///
    /// Validates the label against the taxonomy, rejects self-edges and
    /// dangling endpoints, and enforces at-most-once per logical
    /// (member, related, type) triple. Nothing is written when any
    /// validation fails.
    pub async fn add_relationship(
        &self,
        member_id: MemberId,
        related_member_id: MemberId,
        label: &str,
    ) -> Result<Relationship> {
        let relationship_type = RelationshipType::from_label(label)?;
        self.add_relationship_typed(member_id, related_member_id, relationship_type)
            .await
    }

    /// Create a relationship edge from an already-validated type
    pub async fn add_relationship_typed(
        &self,
        member_id: MemberId,
        related_member_id: MemberId,
        relationship_type: RelationshipType,
    ) -> Result<Relationship> {
        if member_id == related_member_id {
            return Err(KinshipError::SelfRelationshipRejected { member_id });
        }
        if self.store.get_member(member_id).await?.is_none() {
            return Err(KinshipError::DanglingReference { member_id });
        }
        if self.store.get_member(related_member_id).await?.is_none() {
            return Err(KinshipError::DanglingReference {
                member_id: related_member_id,
            });
        }
        if self
            .store
            .find_relationship(member_id, related_member_id, relationship_type)
            .await?
            .is_some()
        {
            return Err(KinshipError::DuplicateRelationship {
                member_id,
                related_member_id,
                relationship_type,
            });
        }

        let edge = self
            .store
            .create_relationship(Relationship::new(
                member_id,
                related_member_id,
                relationship_type,
            ))
            .await?;
        debug!(
            member_id,
            related_member_id,
            relationship_type = %relationship_type,
            "relationship recorded"
        );
        Ok(edge)
    }

    /// Delete a relationship edge by id
    pub async fn delete_relationship(&self, id: &str) -> Result<bool> {
        Ok(self.store.delete_relationship(id).await?)
    }

    // --- Derivations ---

    /// All logical relationships of a member, symmetric view
    pub async fn relationships_of(&self, member_id: MemberId) -> Result<Vec<ResolvedRelationship>> {
        if self.store.get_member(member_id).await?.is_none() {
            return Err(KinshipError::Storage(StorageError::NotFound(format!(
                "member {}",
                member_id
            ))));
        }
        Ok(self.resolver.resolve_for_member(member_id).await?)
    }

    /// Build the layered tree rooted at a member with the configured
    /// depth bound
    pub async fn build_tree(&self, root_id: MemberId) -> Result<FamilyTree> {
        self.build_tree_with(root_id, self.tree_config).await
    }

    /// Build a tree with an explicit traversal configuration
    pub async fn build_tree_with(
        &self,
        root_id: MemberId,
        config: TreeConfig,
    ) -> Result<FamilyTree> {
        let builder = TreeBuilder::with_config(self.store.clone(), config);
        Ok(builder.build(root_id).await?)
    }

    /// Compute whole-graph statistics
    pub async fn analyze_network(&self) -> Result<NetworkSnapshot> {
        let analyzer = NetworkAnalyzer::new(self.store.clone());
        Ok(analyzer.analyze().await?)
    }

    /// Compose the narrative story for a member
    pub async fn compose_story(&self, member_id: MemberId) -> Result<StoryDocument> {
        let composer = StoryComposer::new(self.store.clone());
        Ok(composer.compose(member_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, MemberBuilder};
    use crate::storage::MemoryDirectoryStore;

    async fn directory_with_members(names: &[(MemberId, &str, Gender)]) -> Directory {
        let directory = Directory::new(Arc::new(MemoryDirectoryStore::new()));
        for (id, name, gender) in names {
            directory
                .register_member(MemberBuilder::new(*name).gender(*gender).build(*id))
                .await
                .unwrap();
        }
        directory
    }

    #[tokio::test]
    async fn test_add_relationship_validates_label() {
        let directory =
            directory_with_members(&[(1, "Asha", Gender::Female), (2, "Ravi", Gender::Male)])
                .await;
        let result = directory.add_relationship(1, 2, "Overlord").await;
        assert!(matches!(result, Err(KinshipError::Taxonomy(_))));
    }

    #[tokio::test]
    async fn test_self_relationship_rejected() {
        let directory = directory_with_members(&[(1, "Asha", Gender::Female)]).await;
        let result = directory.add_relationship(1, 1, "Sister").await;
        assert!(matches!(
            result,
            Err(KinshipError::SelfRelationshipRejected { member_id: 1 })
        ));
    }

    #[tokio::test]
    async fn test_dangling_reference_rejected() {
        let directory = directory_with_members(&[(1, "Asha", Gender::Female)]).await;
        let result = directory.add_relationship(1, 99, "Father").await;
        assert!(matches!(
            result,
            Err(KinshipError::DanglingReference { member_id: 99 })
        ));
        // Nothing was written
        assert_eq!(
            directory.store().count_relationships(None).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_duplicate_triple_rejected() {
        let directory =
            directory_with_members(&[(1, "Asha", Gender::Female), (2, "Ravi", Gender::Male)])
                .await;
        directory.add_relationship(1, 2, "Father").await.unwrap();
        let result = directory.add_relationship(1, 2, "Father").await;
        assert!(matches!(
            result,
            Err(KinshipError::DuplicateRelationship { .. })
        ));
        assert_eq!(
            directory.store().count_relationships(None).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_same_pair_different_type_allowed() {
        let directory =
            directory_with_members(&[(1, "Asha", Gender::Female), (2, "Ravi", Gender::Male)])
                .await;
        directory.add_relationship(1, 2, "Brother").await.unwrap();
        assert!(directory
            .add_relationship(1, 2, "Brother-in-law")
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_delete_member_cascades_edges() {
        let directory = directory_with_members(&[
            (1, "Ravi", Gender::Male),
            (2, "Asha", Gender::Female),
            (3, "Kiran", Gender::Male),
            (4, "Meera", Gender::Female),
        ])
        .await;
        directory.add_relationship(2, 1, "Father").await.unwrap();
        directory.add_relationship(3, 1, "Father").await.unwrap();
        directory.add_relationship(1, 4, "Wife").await.unwrap();

        assert!(directory.delete_member(1).await.unwrap());
        assert_eq!(
            directory.store().count_relationships(None).await.unwrap(),
            0
        );
        assert!(directory.relationships_of(2).await.unwrap().is_empty());
        assert!(directory.get_member(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_member_returns_false() {
        let directory = directory_with_members(&[]).await;
        assert!(!directory.delete_member(5).await.unwrap());
    }

    #[tokio::test]
    async fn test_relationships_of_unknown_member_fails() {
        let directory = directory_with_members(&[]).await;
        assert!(directory.relationships_of(7).await.is_err());
    }
}
