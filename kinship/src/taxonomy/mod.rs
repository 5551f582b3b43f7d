//! Relationship Taxonomy
//!
//! The closed vocabulary of relationship-type labels, their reciprocal
//! counterparts and their narrative categories. Every other component
//! consumes this one versioned table; type lists are never re-declared
//! per call site.

use serde::{Deserialize, Serialize};

use crate::models::Gender;

/// Version of the taxonomy table. Bumped whenever labels, reciprocals or
/// category assignments change, so stored data can be migrated.
pub const TAXONOMY_VERSION: u32 = 2;

/// Error types for taxonomy lookups
#[derive(Debug, Clone, thiserror::Error)]
pub enum TaxonomyError {
    #[error("Unknown relationship type: {0}")]
    UnknownRelationshipType(String),
}

/// Closed set of relationship-type labels accepted on an edge.
///
/// Labels describe what the *related* member is to the *source* member:
/// an edge `(asha, ravi, Father)` records that Ravi is Asha's father.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RelationshipType {
    Father,
    Mother,
    Son,
    Daughter,
    Brother,
    Sister,
    Husband,
    Wife,
    #[serde(rename = "Paternal Grandfather")]
    PaternalGrandfather,
    #[serde(rename = "Paternal Grandmother")]
    PaternalGrandmother,
    #[serde(rename = "Maternal Grandfather")]
    MaternalGrandfather,
    #[serde(rename = "Maternal Grandmother")]
    MaternalGrandmother,
    Grandson,
    Granddaughter,
    Uncle,
    Aunt,
    Nephew,
    Niece,
    Cousin,
    #[serde(rename = "Father-in-law")]
    FatherInLaw,
    #[serde(rename = "Mother-in-law")]
    MotherInLaw,
    #[serde(rename = "Son-in-law")]
    SonInLaw,
    #[serde(rename = "Daughter-in-law")]
    DaughterInLaw,
    #[serde(rename = "Brother-in-law")]
    BrotherInLaw,
    #[serde(rename = "Sister-in-law")]
    SisterInLaw,
}

/// Named grouping of relationship types used for tree layering and
/// narrative reporting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Parents,
    Spouse,
    Children,
    Siblings,
    Grandparents,
    Grandchildren,
    InLaws,
    Cousins,
    AuntsUncles,
    Other,
}

/// Side of the family a label carries, where it carries one at all.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LineageSide {
    Paternal,
    Maternal,
}

/// Outcome of resolving a reciprocal against the other member's gender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReciprocalResolution {
    /// A single reciprocal type could be determined
    Exact(RelationshipType),
    /// More than one candidate remains; callers should render the
    /// category's generic label instead of guessing
    Ambiguous {
        candidates: &'static [RelationshipType],
        category: Category,
    },
}

use RelationshipType::*;

/// All taxonomy entries, in canonical (form) order
pub const ALL_TYPES: &[RelationshipType] = &[
    Father,
    Mother,
    Son,
    Daughter,
    Brother,
    Sister,
    Husband,
    Wife,
    PaternalGrandfather,
    PaternalGrandmother,
    MaternalGrandfather,
    MaternalGrandmother,
    Grandson,
    Granddaughter,
    Uncle,
    Aunt,
    Nephew,
    Niece,
    Cousin,
    FatherInLaw,
    MotherInLaw,
    SonInLaw,
    DaughterInLaw,
    BrotherInLaw,
    SisterInLaw,
];

impl RelationshipType {
    /// Parse a form label into a taxonomy entry.
    ///
    /// Matching is case-insensitive and tolerant of surrounding
    /// whitespace; anything outside the closed vocabulary fails with
    /// `UnknownRelationshipType`.
    pub fn from_label(label: &str) -> Result<Self, TaxonomyError> {
        let normalized = label.trim().to_lowercase();
        ALL_TYPES
            .iter()
            .find(|t| t.label().to_lowercase() == normalized)
            .copied()
            .ok_or_else(|| TaxonomyError::UnknownRelationshipType(label.trim().to_string()))
    }

    /// Canonical display label for this type
    pub fn label(&self) -> &'static str {
        match self {
            Father => "Father",
            Mother => "Mother",
            Son => "Son",
            Daughter => "Daughter",
            Brother => "Brother",
            Sister => "Sister",
            Husband => "Husband",
            Wife => "Wife",
            PaternalGrandfather => "Paternal Grandfather",
            PaternalGrandmother => "Paternal Grandmother",
            MaternalGrandfather => "Maternal Grandfather",
            MaternalGrandmother => "Maternal Grandmother",
            Grandson => "Grandson",
            Granddaughter => "Granddaughter",
            Uncle => "Uncle",
            Aunt => "Aunt",
            Nephew => "Nephew",
            Niece => "Niece",
            Cousin => "Cousin",
            FatherInLaw => "Father-in-law",
            MotherInLaw => "Mother-in-law",
            SonInLaw => "Son-in-law",
            DaughterInLaw => "Daughter-in-law",
            BrotherInLaw => "Brother-in-law",
            SisterInLaw => "Sister-in-law",
        }
    }

    /// Narrative category this type belongs to
    pub fn category(&self) -> Category {
        match self {
            Father | Mother => Category::Parents,
            Husband | Wife => Category::Spouse,
            Son | Daughter => Category::Children,
            Brother | Sister => Category::Siblings,
            PaternalGrandfather | PaternalGrandmother | MaternalGrandfather
            | MaternalGrandmother => Category::Grandparents,
            Grandson | Granddaughter => Category::Grandchildren,
            FatherInLaw | MotherInLaw | SonInLaw | DaughterInLaw | BrotherInLaw | SisterInLaw => {
                Category::InLaws
            }
            Cousin => Category::Cousins,
            Uncle | Aunt => Category::AuntsUncles,
            Nephew | Niece => Category::Other,
        }
    }

    /// Reciprocal candidates: what the source member is to the related
    /// member. Multi-valued where gender or lineage side cannot be
    /// derived from the type alone.
    pub fn reciprocals(&self) -> &'static [RelationshipType] {
        match self {
            Father | Mother => &[Son, Daughter],
            Son | Daughter => &[Father, Mother],
            Brother | Sister => &[Brother, Sister],
            Husband => &[Wife],
            Wife => &[Husband],
            PaternalGrandfather | PaternalGrandmother | MaternalGrandfather
            | MaternalGrandmother => &[Grandson, Granddaughter],
            // Lineage side is not recorded on the edge, so even a known
            // gender leaves two grandparent candidates.
            Grandson | Granddaughter => &[
                PaternalGrandfather,
                MaternalGrandfather,
                PaternalGrandmother,
                MaternalGrandmother,
            ],
            Uncle | Aunt => &[Nephew, Niece],
            Nephew | Niece => &[Uncle, Aunt],
            Cousin => &[Cousin],
            FatherInLaw | MotherInLaw => &[SonInLaw, DaughterInLaw],
            SonInLaw | DaughterInLaw => &[FatherInLaw, MotherInLaw],
            BrotherInLaw | SisterInLaw => &[BrotherInLaw, SisterInLaw],
        }
    }

    /// Resolve the reciprocal for an edge, using the gender recorded on
    /// the member at the far end to pick between gendered candidates.
    pub fn reciprocal_for(&self, other_gender: Option<Gender>) -> ReciprocalResolution {
        let candidates = self.reciprocals();
        if candidates.len() == 1 {
            return ReciprocalResolution::Exact(candidates[0]);
        }

        if let Some(gender) = other_gender {
            let matching: Vec<RelationshipType> = candidates
                .iter()
                .filter(|c| c.gender_role() == Some(gender))
                .copied()
                .collect();
            if matching.len() == 1 {
                return ReciprocalResolution::Exact(matching[0]);
            }
        }

        ReciprocalResolution::Ambiguous {
            candidates,
            category: candidates[0].category(),
        }
    }

    /// Gender implied by the label itself, if any
    pub fn gender_role(&self) -> Option<Gender> {
        match self {
            Father | Son | Brother | Husband | PaternalGrandfather | MaternalGrandfather
            | Grandson | Uncle | Nephew | FatherInLaw | SonInLaw | BrotherInLaw => {
                Some(Gender::Male)
            }
            Mother | Daughter | Sister | Wife | PaternalGrandmother | MaternalGrandmother
            | Granddaughter | Aunt | Niece | MotherInLaw | DaughterInLaw | SisterInLaw => {
                Some(Gender::Female)
            }
            Cousin => None,
        }
    }

    /// Vertical distance the related member sits from the source member
    /// (negative = ancestor, positive = descendant)
    pub fn generation_delta(&self) -> i32 {
        match self {
            Father | Mother | Uncle | Aunt | FatherInLaw | MotherInLaw => -1,
            Son | Daughter | Nephew | Niece | SonInLaw | DaughterInLaw => 1,
            Brother | Sister | Husband | Wife | Cousin | BrotherInLaw | SisterInLaw => 0,
            PaternalGrandfather | PaternalGrandmother | MaternalGrandfather
            | MaternalGrandmother => -2,
            Grandson | Granddaughter => 2,
        }
    }

    /// Whether the tree builder keeps expanding through this edge.
    /// Only the core categories expand; everything else attaches as a
    /// satellite node so traversal cost stays proportional to direct
    /// family size.
    pub fn expands_in_tree(&self) -> bool {
        matches!(
            self.category(),
            Category::Parents | Category::Children | Category::Spouse | Category::Siblings
        )
    }

    /// Family side carried by the label, where derivable
    pub fn lineage_side(&self) -> Option<LineageSide> {
        match self {
            PaternalGrandfather | PaternalGrandmother => Some(LineageSide::Paternal),
            MaternalGrandfather | MaternalGrandmother => Some(LineageSide::Maternal),
            _ => None,
        }
    }
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Category display order used by the story composer and tree rendering
pub const CATEGORY_ORDER: &[Category] = &[
    Category::Parents,
    Category::Spouse,
    Category::Children,
    Category::Siblings,
    Category::Grandparents,
    Category::Grandchildren,
    Category::InLaws,
    Category::Cousins,
    Category::AuntsUncles,
    Category::Other,
];

impl Category {
    /// Section heading used in narrative reports
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Parents => "Parents",
            Category::Spouse => "Spouse",
            Category::Children => "Children",
            Category::Siblings => "Siblings",
            Category::Grandparents => "Grandparents",
            Category::Grandchildren => "Grandchildren",
            Category::InLaws => "In-Laws",
            Category::Cousins => "Cousins",
            Category::AuntsUncles => "Aunts & Uncles",
            Category::Other => "Other",
        }
    }

    /// Singular label rendered when a reciprocal stays ambiguous
    pub fn generic_label(&self) -> &'static str {
        match self {
            Category::Parents => "Parent",
            Category::Spouse => "Spouse",
            Category::Children => "Child",
            Category::Siblings => "Sibling",
            Category::Grandparents => "Grandparent",
            Category::Grandchildren => "Grandchild",
            Category::InLaws => "In-Law",
            Category::Cousins => "Cousin",
            Category::AuntsUncles => "Aunt or Uncle",
            Category::Other => "Relative",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_has_category_and_reciprocal() {
        for t in ALL_TYPES {
            let _ = t.category();
            assert!(!t.reciprocals().is_empty(), "{} has no reciprocal", t);
        }
    }

    #[test]
    fn test_from_label_round_trip() {
        for t in ALL_TYPES {
            assert_eq!(RelationshipType::from_label(t.label()).unwrap(), *t);
        }
    }

    #[test]
    fn test_from_label_case_insensitive() {
        assert_eq!(
            RelationshipType::from_label("  father ").unwrap(),
            RelationshipType::Father
        );
        assert_eq!(
            RelationshipType::from_label("mother-IN-LAW").unwrap(),
            RelationshipType::MotherInLaw
        );
    }

    #[test]
    fn test_unknown_label_rejected() {
        assert!(RelationshipType::from_label("Godparent").is_err());
    }

    #[test]
    fn test_reciprocal_uses_other_gender() {
        match RelationshipType::Father.reciprocal_for(Some(Gender::Female)) {
            ReciprocalResolution::Exact(t) => assert_eq!(t, RelationshipType::Daughter),
            other => panic!("expected exact reciprocal, got {:?}", other),
        }
    }

    #[test]
    fn test_reciprocal_without_gender_is_ambiguous() {
        match RelationshipType::Father.reciprocal_for(None) {
            ReciprocalResolution::Ambiguous { category, .. } => {
                assert_eq!(category, Category::Children);
            }
            other => panic!("expected ambiguous reciprocal, got {:?}", other),
        }
    }

    #[test]
    fn test_grandchild_reciprocal_ambiguous_even_with_gender() {
        // Lineage side is not derivable from the type alone
        match RelationshipType::Grandson.reciprocal_for(Some(Gender::Male)) {
            ReciprocalResolution::Ambiguous {
                candidates,
                category,
            } => {
                assert_eq!(category, Category::Grandparents);
                assert!(candidates.contains(&RelationshipType::PaternalGrandfather));
                assert!(candidates.contains(&RelationshipType::MaternalGrandfather));
            }
            other => panic!("expected ambiguous reciprocal, got {:?}", other),
        }
    }

    #[test]
    fn test_spouse_reciprocal_is_exact_without_gender() {
        assert_eq!(
            RelationshipType::Husband.reciprocal_for(None),
            ReciprocalResolution::Exact(RelationshipType::Wife)
        );
    }

    #[test]
    fn test_generation_deltas() {
        assert_eq!(RelationshipType::Father.generation_delta(), -1);
        assert_eq!(RelationshipType::Son.generation_delta(), 1);
        assert_eq!(RelationshipType::Wife.generation_delta(), 0);
        assert_eq!(RelationshipType::MaternalGrandmother.generation_delta(), -2);
        assert_eq!(RelationshipType::Granddaughter.generation_delta(), 2);
    }

    #[test]
    fn test_only_core_categories_expand() {
        assert!(RelationshipType::Father.expands_in_tree());
        assert!(RelationshipType::Sister.expands_in_tree());
        assert!(!RelationshipType::Cousin.expands_in_tree());
        assert!(!RelationshipType::PaternalGrandfather.expands_in_tree());
        assert!(!RelationshipType::FatherInLaw.expands_in_tree());
    }

    #[test]
    fn test_lineage_side() {
        assert_eq!(
            RelationshipType::PaternalGrandmother.lineage_side(),
            Some(LineageSide::Paternal)
        );
        assert_eq!(
            RelationshipType::MaternalGrandfather.lineage_side(),
            Some(LineageSide::Maternal)
        );
        assert_eq!(RelationshipType::Father.lineage_side(), None);
    }

    #[test]
    fn test_nephew_and_niece_group_under_other() {
        assert_eq!(RelationshipType::Nephew.category(), Category::Other);
        assert_eq!(RelationshipType::Niece.category(), Category::Other);
    }

    #[test]
    fn test_serde_uses_canonical_labels() {
        let json = serde_json::to_string(&RelationshipType::FatherInLaw).unwrap();
        assert_eq!(json, "\"Father-in-law\"");
        let back: RelationshipType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RelationshipType::FatherInLaw);
    }
}
