//! # Kinship
//!
//! Family relationship graph engine for community directories, providing
//! validated relationship records, symmetric reciprocal views, layered
//! family trees, whole-network statistics, and deterministic narrative
//! stories.
//!
//! ## Quick Start
//!
//! ```rust
//! use kinship::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Initialize with defaults - in-memory storage
//!     let directory = init_with_defaults().await?;
//!
//!     // Register members and record one side of each relationship
//!     let asha = directory
//!         .register_member(MemberBuilder::new("Asha").gender(Gender::Female).build(1))
//!         .await?;
//!     let ravi = directory
//!         .register_member(MemberBuilder::new("Ravi").gender(Gender::Male).build(2))
//!         .await?;
//!     directory.add_relationship(asha.id, ravi.id, "Father").await?;
//!
//!     // The reverse direction is derived, not stored
//!     let seen_by_ravi = directory.relationships_of(ravi.id).await?;
//!     assert_eq!(seen_by_ravi[0].label, "Daughter");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Taxonomy**: the closed relationship-type registry with reciprocal
//!   and category metadata (always available, no storage required)
//! - **Storage**: async member and relationship stores behind traits,
//!   with an in-memory implementation included
//! - **Derivations**: resolver, tree builder, network analyzer, and
//!   story composer, each running over a fetched snapshot
//!
//! This crate provides the core library functionality that can be used
//! directly in Rust applications or through the separate CLI crate.

pub mod config;
pub mod core;
pub mod logging;
pub mod models;
pub mod network;
pub mod resolver;
pub mod storage;
pub mod story;
pub mod taxonomy;
pub mod tree;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    // Re-export the facade and initialization functions
    pub use crate::core::Directory;
    pub use crate::{init, init_with_defaults};

    // Re-export config types
    pub use crate::config::{ConfigBuilder, KinshipConfig, LogFormat, LogLevel};

    // Re-export model types
    pub use crate::models::{
        Gender, MaritalStatus, Member, MemberBuilder, MemberId, Relationship,
    };

    // Re-export taxonomy types
    pub use crate::taxonomy::{Category, RelationshipType};

    // Re-export derivation types for advanced usage
    pub use crate::network::NetworkSnapshot;
    pub use crate::resolver::ResolvedRelationship;
    pub use crate::story::StoryDocument;
    pub use crate::tree::{FamilyTree, TreeConfig};

    // Re-export storage types for advanced usage
    pub use crate::storage::{DirectoryStore, MemoryDirectoryStore, StorageError};

    // Re-export essential result type
    pub use crate::{KinshipError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for Kinship operations
#[derive(Debug, thiserror::Error)]
pub enum KinshipError {
    /// Error during storage operations
    #[error("Storage error: {0}")]
    Storage(#[from] crate::storage::StorageError),

    /// Unknown or malformed relationship label
    #[error("Taxonomy error: {0}")]
    Taxonomy(#[from] crate::taxonomy::TaxonomyError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(#[from] crate::config::ConfigError),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),

    /// A member may not be related to themselves
    #[error("Member {member_id} cannot have a relationship with themselves")]
    SelfRelationshipRejected { member_id: crate::models::MemberId },

    /// A relationship referenced a member that does not exist
    #[error("Relationship references unknown member {member_id}")]
    DanglingReference { member_id: crate::models::MemberId },

    /// The same logical relationship was already recorded
    #[error(
        "Relationship ({member_id}, {related_member_id}, {relationship_type}) already exists"
    )]
    DuplicateRelationship {
        member_id: crate::models::MemberId,
        related_member_id: crate::models::MemberId,
        relationship_type: crate::taxonomy::RelationshipType,
    },

    /// Other unclassified errors
    #[error("{0}")]
    Other(String),
}

/// Result type for Kinship operations
pub type Result<T> = std::result::Result<T, KinshipError>;

/// Initialize Kinship with default configuration
///
/// Sets up the directory over in-memory storage with default tree
/// traversal settings and returns a [`core::Directory`] handle.
pub async fn init_with_defaults() -> Result<core::Directory> {
    let config = config::ConfigBuilder::new().build()?;
    init(config).await
}

/// Initialize Kinship with the provided configuration
///
/// Installs the logging subscriber described by the configuration
/// (ignoring errors if one is already installed) and returns a
/// [`core::Directory`] over in-memory storage.
pub async fn init(config: config::KinshipConfig) -> Result<core::Directory> {
    let _ = logging::init(&config.logging);

    let store = std::sync::Arc::new(storage::MemoryDirectoryStore::new());
    Ok(core::Directory::with_tree_config(store, config.tree))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, MemberBuilder};

    #[tokio::test]
    async fn test_init_with_defaults() {
        let directory = init_with_defaults().await.unwrap();
        assert!(directory.list_members(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_init_honors_tree_config() {
        let config = config::ConfigBuilder::new()
            .with_max_tree_depth(1)
            .build()
            .unwrap();
        let directory = init(config).await.unwrap();

        for (id, name, gender) in [
            (1, "Asha", Gender::Female),
            (2, "Ravi", Gender::Male),
            (3, "Dev", Gender::Male),
        ] {
            directory
                .register_member(MemberBuilder::new(name).gender(gender).build(id))
                .await
                .unwrap();
        }
        // Ravi is Asha's father, Dev is Ravi's father
        directory.add_relationship(1, 2, "Father").await.unwrap();
        directory.add_relationship(2, 3, "Father").await.unwrap();

        let tree = directory.build_tree(1).await.unwrap();
        assert!(tree.truncated);
        assert!(tree.generation_of(3).is_none());
    }
}
