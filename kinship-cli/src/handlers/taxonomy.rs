//! Taxonomy listing handler

use colored::Colorize;
use serde_json::json;

use kinship::taxonomy::ALL_TYPES;
use kinship::Result;

use crate::output::*;

pub fn handle_types(output_format: &str) -> Result<()> {
    if output_format == "json" {
        let types: Vec<_> = ALL_TYPES
            .iter()
            .map(|t| {
                json!({
                    "label": t.label(),
                    "category": t.category().display_name(),
                    "generation_delta": t.generation_delta(),
                    "expands_in_tree": t.expands_in_tree(),
                })
            })
            .collect();
        print_json(&types);
    } else {
        for t in ALL_TYPES {
            println!(
                "{:<24} {:<16} {:+}",
                t.label().color(CliColors::primary()),
                t.category().display_name().color(CliColors::muted()),
                t.generation_delta()
            );
        }
    }
    Ok(())
}
