//! Relationship command handlers

use colored::Colorize;
use serde_json::json;

use kinship::Result;

use crate::commands::RelationshipCommands;
use crate::context::KinshipCliContext;
use crate::output::*;

pub async fn handle_relationship_command(
    cmd: RelationshipCommands,
    ctx: &KinshipCliContext,
    output_format: &str,
) -> Result<()> {
    match cmd {
        RelationshipCommands::Add(args) => {
            let edge = ctx
                .directory
                .add_relationship(args.member, args.related, &args.label)
                .await?;
            if output_format == "json" {
                print_json(&edge);
            } else {
                println!(
                    "{} {} (#{} -> #{}) id {}",
                    "Recorded".color(CliColors::success()).bold(),
                    edge.relationship_type,
                    edge.member_id,
                    edge.related_member_id,
                    edge.id.color(CliColors::muted())
                );
            }
        }
        RelationshipCommands::List(args) => {
            let resolved = ctx.directory.relationships_of(args.id).await?;
            if output_format == "json" {
                print_json(&resolved);
            } else {
                let names: Vec<(u64, String)> = ctx
                    .directory
                    .list_members(None)
                    .await?
                    .into_iter()
                    .map(|m| (m.id, m.full_name))
                    .collect();
                print_resolved_relationships(&resolved, &names);
            }
        }
        RelationshipCommands::Delete(args) => {
            let removed = ctx.directory.delete_relationship(&args.id).await?;
            if output_format == "json" {
                print_json(&json!({ "deleted": removed, "relationship_id": args.id }));
            } else if removed {
                println!(
                    "{} relationship {}",
                    "Deleted".color(CliColors::success()).bold(),
                    args.id
                );
            } else {
                println!(
                    "{}",
                    format!("Relationship {} not found", args.id).color(CliColors::muted())
                );
            }
        }
    }
    Ok(())
}
