//! Shared CLI context
//!
//! Loads the JSON dataset into an in-memory directory and saves it back
//! after mutating commands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use kinship::core::Directory;
use kinship::models::{Member, Relationship};
use kinship::storage::{MemberStore, MemoryDirectoryStore, RelationshipStore};
use kinship::tree::TreeConfig;
use kinship::{KinshipError, Result};

/// On-disk dataset: plain member and relationship records
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Dataset {
    #[serde(default)]
    pub members: Vec<Member>,

    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

/// Shared state for command handlers
pub struct KinshipCliContext {
    pub directory: Directory,
    data_path: Option<PathBuf>,
}

impl KinshipCliContext {
    /// Create a context, loading the dataset file when one is given
    pub async fn new(data_path: Option<String>, max_depth: Option<u32>) -> Result<Self> {
        let store = Arc::new(MemoryDirectoryStore::new());

        let data_path = data_path.map(PathBuf::from);
        if let Some(path) = &data_path {
            if path.exists() {
                let dataset = read_dataset(path)?;
                debug!(
                    members = dataset.members.len(),
                    relationships = dataset.relationships.len(),
                    "dataset loaded"
                );
                for member in dataset.members {
                    store.create_member(member).await?;
                }
                for relationship in dataset.relationships {
                    store.create_relationship(relationship).await?;
                }
            }
        }

        let tree_config = match max_depth {
            Some(max_depth) => TreeConfig { max_depth },
            None => TreeConfig::default(),
        };
        Ok(Self {
            directory: Directory::with_tree_config(store, tree_config),
            data_path,
        })
    }

    /// Write the current dataset back to the data file, if one was given
    pub async fn save(&self) -> Result<()> {
        let Some(path) = &self.data_path else {
            return Ok(());
        };
        let dataset = Dataset {
            members: self.directory.list_members(None).await?,
            relationships: self.directory.store().list_relationships(None).await?,
        };
        write_dataset(path, &dataset)
    }
}

fn read_dataset(path: &Path) -> Result<Dataset> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| KinshipError::Other(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&contents)
        .map_err(|e| KinshipError::Other(format!("Failed to parse {}: {}", path.display(), e)))
}

fn write_dataset(path: &Path, dataset: &Dataset) -> Result<()> {
    let contents = serde_json::to_string_pretty(dataset)
        .map_err(|e| KinshipError::Other(format!("Failed to serialize dataset: {}", e)))?;
    std::fs::write(path, contents)
        .map_err(|e| KinshipError::Other(format!("Failed to write {}: {}", path.display(), e)))
}
