//! Member model representing a person record in the directory

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable identifier assigned to a member at registration
pub type MemberId = u64;

/// Recorded gender of a member
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

/// Marital status of a member
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

impl Default for MaritalStatus {
    fn default() -> Self {
        Self::Single
    }
}

impl std::fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaritalStatus::Single => write!(f, "Single"),
            MaritalStatus::Married => write!(f, "Married"),
            MaritalStatus::Divorced => write!(f, "Divorced"),
            MaritalStatus::Widowed => write!(f, "Widowed"),
        }
    }
}

/// A person record in the directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Member {
    /// Unique identifier for the member
    pub id: MemberId,

    /// Full display name
    pub full_name: String,

    /// Recorded gender, if provided
    pub gender: Option<Gender>,

    /// Birth location
    pub birth_city: String,
    pub birth_state: String,
    pub birth_country: String,

    /// Current location
    pub current_city: String,
    pub current_state: String,
    pub current_country: String,

    /// Father's name as entered on the registration form.
    /// Free text, not a graph edge.
    pub father_name: String,

    /// Mother's name as entered on the registration form
    pub mother_name: String,

    /// Spouse's name, free text, not a graph edge
    pub spouse_name: Option<String>,

    /// Marital status
    pub marital_status: MaritalStatus,

    /// Optional temple/group affiliation reference
    pub temple_id: Option<String>,

    /// When the member was registered
    pub created_at: DateTime<Utc>,
}

impl Member {
    /// Current location as the "city, state" tuple used for density grouping
    pub fn location_key(&self) -> String {
        format!("{}, {}", self.current_city, self.current_state)
    }
}

/// Builder for member records
#[derive(Debug, Clone, Default)]
pub struct MemberBuilder {
    full_name: String,
    gender: Option<Gender>,
    birth_city: String,
    birth_state: String,
    birth_country: String,
    current_city: String,
    current_state: String,
    current_country: String,
    father_name: String,
    mother_name: String,
    spouse_name: Option<String>,
    marital_status: MaritalStatus,
    temple_id: Option<String>,
}

impl MemberBuilder {
    /// Start a builder with the member's full name
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            ..Default::default()
        }
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn birth_location(
        mut self,
        city: impl Into<String>,
        state: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        self.birth_city = city.into();
        self.birth_state = state.into();
        self.birth_country = country.into();
        self
    }

    pub fn current_location(
        mut self,
        city: impl Into<String>,
        state: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        self.current_city = city.into();
        self.current_state = state.into();
        self.current_country = country.into();
        self
    }

    pub fn father_name(mut self, name: impl Into<String>) -> Self {
        self.father_name = name.into();
        self
    }

    pub fn mother_name(mut self, name: impl Into<String>) -> Self {
        self.mother_name = name.into();
        self
    }

    pub fn spouse_name(mut self, name: impl Into<String>) -> Self {
        self.spouse_name = Some(name.into());
        self
    }

    pub fn marital_status(mut self, status: MaritalStatus) -> Self {
        self.marital_status = status;
        self
    }

    pub fn temple_id(mut self, temple_id: impl Into<String>) -> Self {
        self.temple_id = Some(temple_id.into());
        self
    }

    /// Finalize the record with the given identifier
    pub fn build(self, id: MemberId) -> Member {
        Member {
            id,
            full_name: self.full_name,
            gender: self.gender,
            birth_city: self.birth_city,
            birth_state: self.birth_state,
            birth_country: self.birth_country,
            current_city: self.current_city,
            current_state: self.current_state,
            current_country: self.current_country,
            father_name: self.father_name,
            mother_name: self.mother_name,
            spouse_name: self.spouse_name,
            marital_status: self.marital_status,
            temple_id: self.temple_id,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let member = MemberBuilder::new("Asha Patil").build(1);
        assert_eq!(member.id, 1);
        assert_eq!(member.full_name, "Asha Patil");
        assert_eq!(member.marital_status, MaritalStatus::Single);
        assert!(member.gender.is_none());
        assert!(member.spouse_name.is_none());
    }

    #[test]
    fn test_builder_full() {
        let member = MemberBuilder::new("Ravi Patil")
            .gender(Gender::Male)
            .birth_location("Pune", "Maharashtra", "India")
            .current_location("Mumbai", "Maharashtra", "India")
            .father_name("Vishnu Patil")
            .mother_name("Sita Patil")
            .spouse_name("Lakshmi Patil")
            .marital_status(MaritalStatus::Married)
            .temple_id("temple-12")
            .build(7);
        assert_eq!(member.current_city, "Mumbai");
        assert_eq!(member.location_key(), "Mumbai, Maharashtra");
        assert_eq!(member.temple_id.as_deref(), Some("temple-12"));
    }
}
