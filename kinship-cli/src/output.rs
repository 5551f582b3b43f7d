//! Terminal output helpers

use colored::*;
use serde_json::json;

use kinship::models::Member;
use kinship::network::NetworkSnapshot;
use kinship::resolver::ResolvedRelationship;
use kinship::tree::FamilyTree;

pub struct CliColors;

impl CliColors {
    pub fn success() -> Color {
        Color::TrueColor {
            r: 34,
            g: 197,
            b: 94,
        }
    }

    pub fn error() -> Color {
        Color::TrueColor {
            r: 239,
            g: 68,
            b: 68,
        }
    }

    pub fn warning() -> Color {
        Color::TrueColor {
            r: 245,
            g: 158,
            b: 11,
        }
    }

    pub fn muted() -> Color {
        Color::TrueColor {
            r: 148,
            g: 163,
            b: 184,
        }
    }

    pub fn primary() -> Color {
        Color::White
    }

    pub fn accent() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }
}

pub fn output_error(error_msg: &str, output_format: &str) {
    if output_format == "json" {
        let error_response = json!({
            "error": true,
            "message": error_msg,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&error_response).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        eprintln!("{} {}", "error:".color(CliColors::error()).bold(), error_msg);
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn print_member(member: &Member) {
    println!(
        "{} {}",
        format!("#{}", member.id).color(CliColors::muted()),
        member.full_name.color(CliColors::primary()).bold()
    );
    if let Some(gender) = member.gender {
        println!(
            "  {}: {}",
            "Gender".color(CliColors::muted()),
            gender.to_string().color(CliColors::primary())
        );
    }
    if !member.current_city.is_empty() || !member.current_state.is_empty() {
        println!(
            "  {}: {}",
            "Location".color(CliColors::muted()),
            member.location_key().color(CliColors::primary())
        );
    }
    println!(
        "  {}: {}",
        "Marital status".color(CliColors::muted()),
        member.marital_status.to_string().color(CliColors::primary())
    );
}

pub fn print_member_list(members: &[Member]) {
    if members.is_empty() {
        println!("{}", "No members found".color(CliColors::muted()));
        return;
    }
    for member in members {
        let location = member.location_key();
        let location = if location == ", " { "-".to_string() } else { location };
        println!(
            "{:>6}  {:<30} {}",
            member.id.to_string().color(CliColors::muted()),
            member.full_name.color(CliColors::primary()),
            location.color(CliColors::muted())
        );
    }
    println!(
        "{}",
        format!("{} member(s)", members.len()).color(CliColors::muted())
    );
}

pub fn print_resolved_relationships(resolved: &[ResolvedRelationship], names: &[(u64, String)]) {
    if resolved.is_empty() {
        println!("{}", "No relationships recorded".color(CliColors::muted()));
        return;
    }
    let name_of = |id: u64| {
        names
            .iter()
            .find(|(nid, _)| *nid == id)
            .map(|(_, n)| n.as_str())
            .unwrap_or("(unknown)")
    };
    for rel in resolved {
        let marker = if rel.ambiguous_reciprocal { " ~" } else { "" };
        println!(
            "{:<20} {} {}{}",
            rel.label.color(CliColors::accent()),
            name_of(rel.other_member_id).color(CliColors::primary()),
            format!("#{}", rel.other_member_id).color(CliColors::muted()),
            marker.color(CliColors::warning())
        );
    }
}

pub fn print_tree(tree: &FamilyTree) {
    for layer in &tree.layers {
        println!(
            "{}",
            format!("━━━ Generation {:+} ━━━", layer.generation)
                .color(CliColors::accent())
                .bold()
        );
        for node in &layer.nodes {
            let satellite = if node.satellite { " *" } else { "" };
            println!(
                "  {:<20} {} {}{}",
                node.label.color(CliColors::accent()),
                node.full_name.color(CliColors::primary()),
                format!("#{}", node.member_id).color(CliColors::muted()),
                satellite.color(CliColors::muted())
            );
        }
    }
    if tree.truncated {
        println!(
            "{}",
            "Tree truncated at the depth bound".color(CliColors::warning())
        );
    }
    if !tree.anomalies.is_empty() {
        println!(
            "{}",
            format!("{} anomaly(ies) recorded", tree.anomalies.len())
                .color(CliColors::warning())
        );
    }
}

pub fn print_stats(snapshot: &NetworkSnapshot) {
    println!("{}", "━━━ Network ━━━".color(CliColors::accent()).bold());
    println!(
        "{}: {}",
        "Members".color(CliColors::muted()),
        snapshot.member_count.to_string().color(CliColors::primary())
    );
    println!(
        "{}: {}",
        "Relationships".color(CliColors::muted()),
        snapshot
            .relationship_count
            .to_string()
            .color(CliColors::primary())
    );
    println!(
        "{}: {:.2}",
        "Average degree".color(CliColors::muted()),
        snapshot.average_degree
    );
    println!(
        "{}: {} ({})",
        "Components".color(CliColors::muted()),
        snapshot
            .component_count
            .to_string()
            .color(CliColors::primary()),
        snapshot
            .component_sizes
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ")
            .color(CliColors::muted())
    );

    if !snapshot.type_histogram.is_empty() {
        println!(
            "{}",
            "━━━ Relationship types ━━━".color(CliColors::accent()).bold()
        );
        for (label, count) in &snapshot.type_histogram {
            println!(
                "  {:<24} {}",
                label.color(CliColors::primary()),
                count.to_string().color(CliColors::muted())
            );
        }
    }

    if !snapshot.location_density.is_empty() {
        println!(
            "{}",
            format!(
                "━━━ Locations ({}) ━━━",
                snapshot.distinct_location_count
            )
            .color(CliColors::accent())
            .bold()
        );
        for (location, count) in &snapshot.location_density {
            println!(
                "  {:<24} {}",
                location.color(CliColors::primary()),
                count.to_string().color(CliColors::muted())
            );
        }
    }
}
