//! Tree, network, and story command handlers

use kinship::tree::TreeConfig;
use kinship::Result;

use crate::args::{StoryArgs, TreeArgs};
use crate::context::KinshipCliContext;
use crate::output::*;

pub async fn handle_tree(
    args: TreeArgs,
    ctx: &KinshipCliContext,
    output_format: &str,
) -> Result<()> {
    let tree = match args.depth {
        Some(max_depth) => {
            ctx.directory
                .build_tree_with(args.root, TreeConfig { max_depth })
                .await?
        }
        None => ctx.directory.build_tree(args.root).await?,
    };
    if output_format == "json" {
        print_json(&tree);
    } else {
        print_tree(&tree);
    }
    Ok(())
}

pub async fn handle_stats(ctx: &KinshipCliContext, output_format: &str) -> Result<()> {
    let snapshot = ctx.directory.analyze_network().await?;
    if output_format == "json" {
        print_json(&snapshot);
    } else {
        print_stats(&snapshot);
    }
    Ok(())
}

pub async fn handle_story(
    args: StoryArgs,
    ctx: &KinshipCliContext,
    output_format: &str,
) -> Result<()> {
    let story = ctx.directory.compose_story(args.member).await?;
    if output_format == "json" {
        print_json(&story);
    } else {
        println!("{}", story.render());
    }
    Ok(())
}
