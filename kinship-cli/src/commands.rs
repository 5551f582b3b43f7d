//! Command definitions
//!
//! This module contains the subcommand enums for the CLI.

use clap::Subcommand;

use crate::args::*;

#[derive(Subcommand)]
pub enum Commands {
    /// Display version information
    Version,

    /// List the relationship taxonomy
    Types,

    /// Member management commands
    #[command(subcommand)]
    Member(MemberCommands),

    /// Relationship management commands
    #[command(subcommand)]
    Relationship(RelationshipCommands),

    /// Build the layered family tree for a member
    Tree(TreeArgs),

    /// Show whole-network statistics
    Stats,

    /// Compose the family story for a member
    Story(StoryArgs),
}

#[derive(Subcommand)]
pub enum MemberCommands {
    /// Register a new member
    Add(AddMemberArgs),

    /// Get a member by id
    Get(MemberIdArgs),

    /// List members
    List(ListMembersArgs),

    /// Delete a member and all incident relationships
    Delete(MemberIdArgs),
}

#[derive(Subcommand)]
pub enum RelationshipCommands {
    /// Record a relationship between two members
    Add(AddRelationshipArgs),

    /// List all relationships of a member, both directions
    List(MemberIdArgs),

    /// Delete a relationship by id
    Delete(DeleteRelationshipArgs),
}

impl Commands {
    /// Commands that change the dataset and require a save afterwards
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Commands::Member(MemberCommands::Add(_))
                | Commands::Member(MemberCommands::Delete(_))
                | Commands::Relationship(RelationshipCommands::Add(_))
                | Commands::Relationship(RelationshipCommands::Delete(_))
        )
    }
}
