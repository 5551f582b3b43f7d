//! Command handlers organized by command category

pub mod graph;
pub mod member;
pub mod relationship;
pub mod taxonomy;

pub use graph::{handle_stats, handle_story, handle_tree};
pub use member::handle_member_command;
pub use relationship::handle_relationship_command;
pub use taxonomy::handle_types;
