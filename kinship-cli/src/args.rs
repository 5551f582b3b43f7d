//! Command argument structures
//!
//! This module contains all CLI argument structs organized by command category.

use clap::Args;

// Member command arguments

#[derive(Args)]
pub struct AddMemberArgs {
    /// Member id
    pub id: u64,

    /// Full name
    pub name: String,

    /// Gender (male, female)
    #[arg(long, short)]
    pub gender: Option<String>,

    /// Current city
    #[arg(long, default_value = "")]
    pub city: String,

    /// Current state
    #[arg(long, default_value = "")]
    pub state: String,

    /// Current country
    #[arg(long, default_value = "")]
    pub country: String,

    /// Father's name as entered on the form (free text)
    #[arg(long)]
    pub father_name: Option<String>,

    /// Mother's name as entered on the form (free text)
    #[arg(long)]
    pub mother_name: Option<String>,

    /// Spouse's name as entered on the form (free text)
    #[arg(long)]
    pub spouse_name: Option<String>,
}

#[derive(Args)]
pub struct MemberIdArgs {
    /// Member id
    pub id: u64,
}

#[derive(Args)]
pub struct ListMembersArgs {
    /// Filter by current city
    #[arg(long)]
    pub city: Option<String>,

    /// Filter by current state
    #[arg(long)]
    pub state: Option<String>,
}

// Relationship command arguments

#[derive(Args)]
pub struct AddRelationshipArgs {
    /// Source member id
    pub member: u64,

    /// Related member id
    pub related: u64,

    /// Relationship label, e.g. "Father" or "Sister-in-law"
    pub label: String,
}

#[derive(Args)]
pub struct DeleteRelationshipArgs {
    /// Relationship id
    pub id: String,
}

// Derivation command arguments

#[derive(Args)]
pub struct TreeArgs {
    /// Root member id
    pub root: u64,

    /// Maximum expansion depth (defaults to the configured bound)
    #[arg(long, short)]
    pub depth: Option<u32>,
}

#[derive(Args)]
pub struct StoryArgs {
    /// Member id
    pub member: u64,
}
