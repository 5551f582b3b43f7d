//! Story Composer
//!
//! Groups a member's resolved relationships into named categories and
//! renders a deterministic narrative report. Given identical input the
//! output is byte-identical run to run; downstream export and sharing
//! rely on stable output for diffing and caching.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::{Gender, Member, MemberId};
use crate::resolver::{ReciprocalResolver, ResolvedRelationship};
use crate::storage::{DirectoryStore, StorageError};
use crate::taxonomy::{Category, CATEGORY_ORDER};

/// One related member listed in a section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoryEntry {
    pub member_id: MemberId,
    pub full_name: String,
    /// Relation label as resolved (generic when ambiguous)
    pub label: String,
}

/// One non-empty category section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorySection {
    pub category: Category,
    pub heading: String,
    /// Members in original query order
    pub entries: Vec<StoryEntry>,
}

/// Statistics block of a story
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoryStatistics {
    pub total_connections: usize,
    pub distinct_relationship_types: usize,
    pub distinct_locations: usize,
    pub male_count: usize,
    pub female_count: usize,
    pub unspecified_gender_count: usize,
}

/// Sectioned narrative document for one member
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoryDocument {
    pub member_id: MemberId,
    pub title: String,
    /// Ordered label/value pairs for the personal-information section
    pub personal_info: Vec<(String, String)>,
    pub sections: Vec<StorySection>,
    pub statistics: StoryStatistics,
    pub narrative: String,
}

impl StoryDocument {
    /// Render the document as plain text. Byte-identical for identical
    /// input data.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== {} ===\n\n", self.title));

        out.push_str("Personal Information\n");
        for (label, value) in &self.personal_info {
            out.push_str(&format!("  {}: {}\n", label, value));
        }
        out.push('\n');

        for section in &self.sections {
            out.push_str(&format!("{}\n", section.heading));
            for entry in &section.entries {
                out.push_str(&format!("  - {} ({})\n", entry.full_name, entry.label));
            }
            out.push('\n');
        }

        out.push_str("Statistics\n");
        out.push_str(&format!(
            "  Total connections: {}\n",
            self.statistics.total_connections
        ));
        out.push_str(&format!(
            "  Distinct relationship types: {}\n",
            self.statistics.distinct_relationship_types
        ));
        out.push_str(&format!(
            "  Distinct locations: {}\n",
            self.statistics.distinct_locations
        ));
        out.push_str(&format!(
            "  Gender counts: {} male, {} female, {} unspecified\n\n",
            self.statistics.male_count,
            self.statistics.female_count,
            self.statistics.unspecified_gender_count
        ));

        out.push_str("Narrative\n");
        out.push_str(&format!("  {}\n", self.narrative));
        out
    }
}

/// Composes stories from the store
#[derive(Debug, Clone)]
pub struct StoryComposer {
    store: Arc<dyn DirectoryStore>,
    resolver: ReciprocalResolver,
}

impl StoryComposer {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        let resolver = ReciprocalResolver::new(store.clone());
        Self { store, resolver }
    }

    /// Compose the story for a member
    pub async fn compose(&self, member_id: MemberId) -> Result<StoryDocument, StorageError> {
        let member = self
            .store
            .get_member(member_id)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("member {}", member_id)))?;
        let resolved = self.resolver.resolve_for_member(member_id).await?;

        let mut related = HashMap::new();
        for rel in &resolved {
            if !related.contains_key(&rel.other_member_id) {
                if let Some(other) = self.store.get_member(rel.other_member_id).await? {
                    related.insert(other.id, other);
                }
            }
        }

        Ok(compose_story(&member, &resolved, &related))
    }
}

/// Pure composition over an already-resolved relationship set
pub fn compose_story(
    member: &Member,
    resolved: &[ResolvedRelationship],
    related: &HashMap<MemberId, Member>,
) -> StoryDocument {
    let display_name = |id: MemberId| -> String {
        related
            .get(&id)
            .map(|m| m.full_name.clone())
            .unwrap_or_else(|| format!("member {}", id))
    };

    // One subsection per non-empty category, members in query order
    let sections: Vec<StorySection> = CATEGORY_ORDER
        .iter()
        .filter_map(|&category| {
            let entries: Vec<StoryEntry> = resolved
                .iter()
                .filter(|r| r.category == category)
                .map(|r| StoryEntry {
                    member_id: r.other_member_id,
                    full_name: display_name(r.other_member_id),
                    label: r.label.clone(),
                })
                .collect();
            (!entries.is_empty()).then(|| StorySection {
                category,
                heading: category.display_name().to_string(),
                entries,
            })
        })
        .collect();

    let distinct_types: BTreeSet<&str> = resolved.iter().map(|r| r.label.as_str()).collect();
    let distinct_locations: BTreeSet<String> = resolved
        .iter()
        .filter_map(|r| related.get(&r.other_member_id))
        .filter(|m| !(m.current_city.is_empty() && m.current_state.is_empty()))
        .map(|m| m.location_key())
        .collect();

    let mut male_count = 0;
    let mut female_count = 0;
    let mut unspecified_gender_count = 0;
    for rel in resolved {
        match related.get(&rel.other_member_id).and_then(|m| m.gender) {
            Some(Gender::Male) => male_count += 1,
            Some(Gender::Female) => female_count += 1,
            None => unspecified_gender_count += 1,
        }
    }

    let statistics = StoryStatistics {
        total_connections: resolved.len(),
        distinct_relationship_types: distinct_types.len(),
        distinct_locations: distinct_locations.len(),
        male_count,
        female_count,
        unspecified_gender_count,
    };

    let narrative = compose_narrative(member, &sections);
    let personal_info = personal_info_pairs(member);

    StoryDocument {
        member_id: member.id,
        title: format!("Family Story: {}", member.full_name),
        personal_info,
        sections,
        statistics,
        narrative,
    }
}

fn personal_info_pairs(member: &Member) -> Vec<(String, String)> {
    let mut pairs = vec![("Name".to_string(), member.full_name.clone())];
    if let Some(gender) = member.gender {
        pairs.push(("Gender".to_string(), gender.to_string()));
    }
    pairs.push((
        "Marital Status".to_string(),
        member.marital_status.to_string(),
    ));
    pairs.push((
        "Birth Place".to_string(),
        format!(
            "{}, {}, {}",
            member.birth_city, member.birth_state, member.birth_country
        ),
    ));
    pairs.push((
        "Current Residence".to_string(),
        format!(
            "{}, {}, {}",
            member.current_city, member.current_state, member.current_country
        ),
    ));
    pairs.push(("Father's Name".to_string(), member.father_name.clone()));
    pairs.push(("Mother's Name".to_string(), member.mother_name.clone()));
    if let Some(ref spouse) = member.spouse_name {
        pairs.push(("Spouse's Name".to_string(), spouse.clone()));
    }
    if let Some(ref temple_id) = member.temple_id {
        pairs.push(("Temple".to_string(), temple_id.clone()));
    }
    pairs
}

fn compose_narrative(member: &Member, sections: &[StorySection]) -> String {
    let names_in = |category: Category| -> Option<Vec<String>> {
        sections
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.entries.iter().map(|e| e.full_name.clone()).collect())
    };

    let mut sentences: Vec<String> = Vec::new();

    if let Some(parents) = names_in(Category::Parents) {
        if parents.len() == 1 {
            sentences.push(format!(
                "{}'s recorded parent is {}.",
                member.full_name, parents[0]
            ));
        } else {
            sentences.push(format!(
                "{}'s recorded parents are {}.",
                member.full_name,
                join_names(&parents)
            ));
        }
    }
    if let Some(spouses) = names_in(Category::Spouse) {
        sentences.push(format!(
            "{} is married to {}.",
            member.full_name,
            join_names(&spouses)
        ));
    }
    if let Some(children) = names_in(Category::Children) {
        let noun = if children.len() == 1 {
            "child"
        } else {
            "children"
        };
        sentences.push(format!(
            "{} has {} {}: {}.",
            member.full_name,
            children.len(),
            noun,
            join_names(&children)
        ));
    }
    if let Some(siblings) = names_in(Category::Siblings) {
        let noun = if siblings.len() == 1 {
            "sibling"
        } else {
            "siblings"
        };
        sentences.push(format!(
            "{} has {} {}: {}.",
            member.full_name,
            siblings.len(),
            noun,
            join_names(&siblings)
        ));
    }

    if sentences.is_empty() {
        format!(
            "{} has no immediate family recorded in the directory.",
            member.full_name
        )
    } else {
        sentences.join(" ")
    }
}

/// "A", "A and B", "A, B and C"
fn join_names(names: &[String]) -> String {
    match names.len() {
        0 => String::new(),
        1 => names[0].clone(),
        2 => format!("{} and {}", names[0], names[1]),
        n => format!("{} and {}", names[..n - 1].join(", "), names[n - 1]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MaritalStatus, MemberBuilder, Relationship};
    use crate::resolver::resolve_edges;
    use crate::taxonomy::RelationshipType;

    fn member(id: MemberId, name: &str, gender: Option<Gender>) -> Member {
        let builder = MemberBuilder::new(name)
            .current_location("Pune", "Maharashtra", "India")
            .birth_location("Pune", "Maharashtra", "India");
        let builder = match gender {
            Some(g) => builder.gender(g),
            None => builder,
        };
        builder.build(id)
    }

    fn related_map(members: Vec<Member>) -> HashMap<MemberId, Member> {
        members.into_iter().map(|m| (m.id, m)).collect()
    }

    fn scenario_d() -> (Member, Vec<ResolvedRelationship>, HashMap<MemberId, Member>) {
        let asha = member(1, "Asha", Some(Gender::Female));
        let related = related_map(vec![
            member(2, "Ravi", Some(Gender::Male)),
            member(3, "Sita", Some(Gender::Female)),
            member(4, "Kiran", Some(Gender::Male)),
            member(5, "Dev", Some(Gender::Male)),
        ]);
        let edges = vec![
            Relationship::new(1, 2, RelationshipType::Father),
            Relationship::new(1, 3, RelationshipType::Mother),
            Relationship::new(1, 4, RelationshipType::Son),
            Relationship::new(1, 5, RelationshipType::Son),
        ];
        let resolved = resolve_edges(1, &edges, |id| related.get(&id).and_then(|m| m.gender));
        (asha, resolved, related)
    }

    #[test]
    fn test_sections_for_scenario_d() {
        let (asha, resolved, related) = scenario_d();
        let story = compose_story(&asha, &resolved, &related);

        let parents = story
            .sections
            .iter()
            .find(|s| s.category == Category::Parents)
            .expect("Parents section missing");
        assert_eq!(parents.entries.len(), 2);

        let children = story
            .sections
            .iter()
            .find(|s| s.category == Category::Children)
            .expect("Children section missing");
        assert_eq!(children.entries.len(), 2);

        assert!(story
            .sections
            .iter()
            .all(|s| s.category != Category::Siblings));
        assert_eq!(story.statistics.total_connections, 4);
    }

    #[test]
    fn test_statistics_block() {
        let (asha, resolved, related) = scenario_d();
        let story = compose_story(&asha, &resolved, &related);

        // Father, Mother, Son
        assert_eq!(story.statistics.distinct_relationship_types, 3);
        assert_eq!(story.statistics.distinct_locations, 1);
        assert_eq!(story.statistics.male_count, 3);
        assert_eq!(story.statistics.female_count, 1);
        assert_eq!(story.statistics.unspecified_gender_count, 0);
    }

    #[test]
    fn test_narrative_names_core_categories() {
        let (asha, resolved, related) = scenario_d();
        let story = compose_story(&asha, &resolved, &related);

        assert!(story.narrative.contains("Asha's recorded parents are Ravi and Sita."));
        assert!(story.narrative.contains("Asha has 2 children: Kiran and Dev."));
        assert!(!story.narrative.contains("married"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let (asha, resolved, related) = scenario_d();
        let first = compose_story(&asha, &resolved, &related).render();
        let second = compose_story(&asha, &resolved, &related).render();
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_family_narrative() {
        let solo = member(9, "Meera", Some(Gender::Female));
        let story = compose_story(&solo, &[], &HashMap::new());
        assert!(story.sections.is_empty());
        assert_eq!(story.statistics.total_connections, 0);
        assert_eq!(
            story.narrative,
            "Meera has no immediate family recorded in the directory."
        );
    }

    #[test]
    fn test_personal_info_includes_optional_fields() {
        let mut asha = member(1, "Asha", Some(Gender::Female));
        asha.spouse_name = Some("Vikram".to_string());
        asha.marital_status = MaritalStatus::Married;
        asha.temple_id = Some("temple-3".to_string());

        let story = compose_story(&asha, &[], &HashMap::new());
        let labels: Vec<&str> = story
            .personal_info
            .iter()
            .map(|(l, _)| l.as_str())
            .collect();
        assert!(labels.contains(&"Spouse's Name"));
        assert!(labels.contains(&"Temple"));
    }

    #[test]
    fn test_join_names() {
        let names: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
        assert_eq!(join_names(&names[..1]), "A");
        assert_eq!(join_names(&names[..2]), "A and B");
        assert_eq!(join_names(&names), "A, B and C");
    }
}
