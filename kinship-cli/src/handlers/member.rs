//! Member command handlers

use colored::Colorize;
use serde_json::json;

use kinship::models::{Gender, MemberBuilder};
use kinship::storage::MemberFilter;
use kinship::{KinshipError, Result};

use crate::commands::MemberCommands;
use crate::context::KinshipCliContext;
use crate::output::*;

pub async fn handle_member_command(
    cmd: MemberCommands,
    ctx: &KinshipCliContext,
    output_format: &str,
) -> Result<()> {
    match cmd {
        MemberCommands::Add(args) => {
            let mut builder = MemberBuilder::new(&args.name)
                .current_location(&args.city, &args.state, &args.country);
            if let Some(gender) = &args.gender {
                builder = builder.gender(parse_gender(gender)?);
            }
            if let Some(name) = &args.father_name {
                builder = builder.father_name(name);
            }
            if let Some(name) = &args.mother_name {
                builder = builder.mother_name(name);
            }
            if let Some(name) = &args.spouse_name {
                builder = builder.spouse_name(name);
            }

            let member = ctx.directory.register_member(builder.build(args.id)).await?;
            if output_format == "json" {
                print_json(&member);
            } else {
                println!(
                    "{} member #{} ({})",
                    "Registered".color(CliColors::success()).bold(),
                    member.id,
                    member.full_name
                );
            }
        }
        MemberCommands::Get(args) => {
            let member = ctx
                .directory
                .get_member(args.id)
                .await?
                .ok_or_else(|| KinshipError::Other(format!("Member {} not found", args.id)))?;
            if output_format == "json" {
                print_json(&member);
            } else {
                print_member(&member);
            }
        }
        MemberCommands::List(args) => {
            let filter = MemberFilter {
                current_city: args.city.clone(),
                current_state: args.state.clone(),
                ..Default::default()
            };
            let members = ctx.directory.list_members(Some(filter)).await?;
            if output_format == "json" {
                print_json(&members);
            } else {
                print_member_list(&members);
            }
        }
        MemberCommands::Delete(args) => {
            let removed = ctx.directory.delete_member(args.id).await?;
            if output_format == "json" {
                print_json(&json!({ "deleted": removed, "member_id": args.id }));
            } else if removed {
                println!(
                    "{} member #{} and incident relationships",
                    "Deleted".color(CliColors::success()).bold(),
                    args.id
                );
            } else {
                println!("{}", format!("Member {} not found", args.id).color(CliColors::muted()));
            }
        }
    }
    Ok(())
}

fn parse_gender(value: &str) -> Result<Gender> {
    match value.to_lowercase().as_str() {
        "male" | "m" => Ok(Gender::Male),
        "female" | "f" => Ok(Gender::Female),
        other => Err(KinshipError::Other(format!(
            "Invalid gender '{}', expected male or female",
            other
        ))),
    }
}
