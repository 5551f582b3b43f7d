//! Data models for the community directory

mod member;
mod relationship;

pub use member::{Gender, MaritalStatus, Member, MemberBuilder, MemberId};
pub use relationship::Relationship;
