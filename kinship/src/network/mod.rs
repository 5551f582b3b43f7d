//! Network Analyzer
//!
//! Whole-graph statistics over the full member/relationship set: degree,
//! relationship-type histogram, location density and connected
//! components. Component analysis treats the graph as undirected since
//! edge direction is a recording artifact, not a structural one.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Member, MemberId, Relationship};
use crate::storage::{DirectoryStore, StorageError};

/// Aggregate statistics for one query over the whole graph.
///
/// Valid only for the snapshot that produced it; recomputed on demand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkSnapshot {
    /// Total member count
    pub member_count: usize,

    /// Total relationship count
    pub relationship_count: usize,

    /// Count per taxonomy label; values sum to `relationship_count`
    pub type_histogram: BTreeMap<String, usize>,

    /// Relationships divided by members, rounded to two decimals
    pub average_degree: f64,

    /// Member count per "city, state" tuple
    pub location_density: BTreeMap<String, usize>,

    /// Number of distinct "city, state" tuples
    pub distinct_location_count: usize,

    /// Number of connected components in the undirected closure
    pub component_count: usize,

    /// Component sizes, descending
    pub component_sizes: Vec<usize>,

    /// When the snapshot was computed
    pub computed_at: DateTime<Utc>,
}

/// Disjoint-set forest over member ids
struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            // Path halving
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
    }
}

/// Computes network snapshots from the store
#[derive(Debug, Clone)]
pub struct NetworkAnalyzer {
    store: Arc<dyn DirectoryStore>,
}

impl NetworkAnalyzer {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    /// Fetch the full member/relationship set and compute a snapshot
    pub async fn analyze(&self) -> Result<NetworkSnapshot, StorageError> {
        let members = self.store.list_members(None).await?;
        let relationships = self.store.list_relationships(None).await?;
        Ok(analyze_snapshot(&members, &relationships))
    }
}

/// Pure computation over an already-fetched snapshot
pub fn analyze_snapshot(members: &[Member], relationships: &[Relationship]) -> NetworkSnapshot {
    let member_count = members.len();
    let relationship_count = relationships.len();

    let mut type_histogram: BTreeMap<String, usize> = BTreeMap::new();
    for edge in relationships {
        *type_histogram
            .entry(edge.relationship_type.label().to_string())
            .or_insert(0) += 1;
    }

    let average_degree = if member_count == 0 {
        0.0
    } else {
        let raw = relationship_count as f64 / member_count as f64;
        (raw * 100.0).round() / 100.0
    };

    let mut location_density: BTreeMap<String, usize> = BTreeMap::new();
    for member in members {
        if member.current_city.is_empty() && member.current_state.is_empty() {
            continue;
        }
        *location_density.entry(member.location_key()).or_insert(0) += 1;
    }
    let distinct_location_count = location_density.len();

    let (component_count, component_sizes) = connected_components(members, relationships);

    NetworkSnapshot {
        member_count,
        relationship_count,
        type_histogram,
        average_degree,
        location_density,
        distinct_location_count,
        component_count,
        component_sizes,
        computed_at: Utc::now(),
    }
}

/// Connected components over the undirected closure of the graph.
/// Members with no edges each form a singleton component.
fn connected_components(
    members: &[Member],
    relationships: &[Relationship],
) -> (usize, Vec<usize>) {
    let index: HashMap<MemberId, usize> = members
        .iter()
        .enumerate()
        .map(|(i, m)| (m.id, i))
        .collect();

    let mut forest = UnionFind::new(members.len());
    for edge in relationships {
        if let (Some(&a), Some(&b)) = (
            index.get(&edge.member_id),
            index.get(&edge.related_member_id),
        ) {
            forest.union(a, b);
        }
    }

    let mut sizes: HashMap<usize, usize> = HashMap::new();
    for i in 0..members.len() {
        let root = forest.find(i);
        *sizes.entry(root).or_insert(0) += 1;
    }

    let mut component_sizes: Vec<usize> = sizes.into_values().collect();
    component_sizes.sort_unstable_by(|a, b| b.cmp(a));
    (component_sizes.len(), component_sizes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, MemberBuilder};
    use crate::taxonomy::RelationshipType;

    fn member_in(id: MemberId, name: &str, city: &str, state: &str) -> Member {
        MemberBuilder::new(name)
            .gender(Gender::Male)
            .current_location(city, state, "India")
            .build(id)
    }

    #[test]
    fn test_empty_network() {
        let snapshot = analyze_snapshot(&[], &[]);
        assert_eq!(snapshot.member_count, 0);
        assert_eq!(snapshot.relationship_count, 0);
        assert_eq!(snapshot.average_degree, 0.0);
        assert_eq!(snapshot.component_count, 0);
    }

    #[test]
    fn test_histogram_sums_to_relationship_count() {
        let members = vec![
            member_in(1, "A", "Pune", "MH"),
            member_in(2, "B", "Pune", "MH"),
            member_in(3, "C", "Nashik", "MH"),
        ];
        let edges = vec![
            Relationship::new(1, 2, RelationshipType::Father),
            Relationship::new(1, 3, RelationshipType::Brother),
            Relationship::new(2, 3, RelationshipType::Father),
        ];

        let snapshot = analyze_snapshot(&members, &edges);
        assert_eq!(snapshot.relationship_count, 3);
        assert_eq!(
            snapshot.type_histogram.values().sum::<usize>(),
            snapshot.relationship_count
        );
        assert_eq!(snapshot.type_histogram["Father"], 2);
        assert_eq!(snapshot.type_histogram["Brother"], 1);
    }

    #[test]
    fn test_average_degree_rounded_to_two_decimals() {
        let members = vec![
            member_in(1, "A", "Pune", "MH"),
            member_in(2, "B", "Pune", "MH"),
            member_in(3, "C", "Pune", "MH"),
        ];
        let edges = vec![
            Relationship::new(1, 2, RelationshipType::Brother),
            Relationship::new(2, 3, RelationshipType::Brother),
        ];

        let snapshot = analyze_snapshot(&members, &edges);
        // 2 / 3 = 0.666... -> 0.67
        assert_eq!(snapshot.average_degree, 0.67);
    }

    #[test]
    fn test_location_density() {
        let members = vec![
            member_in(1, "A", "Pune", "MH"),
            member_in(2, "B", "Pune", "MH"),
            member_in(3, "C", "Nashik", "MH"),
        ];
        let snapshot = analyze_snapshot(&members, &[]);
        assert_eq!(snapshot.distinct_location_count, 2);
        assert_eq!(snapshot.location_density["Pune, MH"], 2);
        assert_eq!(snapshot.location_density["Nashik, MH"], 1);
    }

    #[test]
    fn test_two_disjoint_clusters() {
        // Ten members, clusters of six and four
        let members: Vec<Member> = (1..=10)
            .map(|i| member_in(i, &format!("M{}", i), "Pune", "MH"))
            .collect();
        let mut edges = Vec::new();
        for i in 1..6u64 {
            edges.push(Relationship::new(i, i + 1, RelationshipType::Brother));
        }
        for i in 7..10u64 {
            edges.push(Relationship::new(i, i + 1, RelationshipType::Cousin));
        }

        let snapshot = analyze_snapshot(&members, &edges);
        assert_eq!(snapshot.component_count, 2);
        assert_eq!(snapshot.component_sizes, vec![6, 4]);
    }

    #[test]
    fn test_isolated_members_are_singleton_components() {
        let members = vec![
            member_in(1, "A", "Pune", "MH"),
            member_in(2, "B", "Pune", "MH"),
            member_in(3, "C", "Pune", "MH"),
        ];
        let edges = vec![Relationship::new(1, 2, RelationshipType::Sister)];

        let snapshot = analyze_snapshot(&members, &edges);
        assert_eq!(snapshot.component_count, 2);
        assert_eq!(snapshot.component_sizes, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_store_backed_analyze() {
        use crate::storage::{MemberStore, MemoryDirectoryStore, RelationshipStore};

        let store = Arc::new(MemoryDirectoryStore::new());
        store
            .create_member(member_in(1, "A", "Pune", "MH"))
            .await
            .unwrap();
        store
            .create_member(member_in(2, "B", "Pune", "MH"))
            .await
            .unwrap();
        store
            .create_relationship(Relationship::new(1, 2, RelationshipType::Wife))
            .await
            .unwrap();

        let analyzer = NetworkAnalyzer::new(store);
        let snapshot = analyzer.analyze().await.unwrap();
        assert_eq!(snapshot.member_count, 2);
        assert_eq!(snapshot.relationship_count, 1);
        assert_eq!(snapshot.average_degree, 0.5);
    }
}
