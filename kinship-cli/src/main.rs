use clap::Parser;
use is_terminal::IsTerminal;
use tracing::Level;

mod args;
mod commands;
mod context;
mod handlers;
mod output;

use commands::Commands;
use context::KinshipCliContext;
use handlers::*;
use output::output_error;

#[derive(Parser)]
#[command(name = "kinship-cli")]
#[command(about = "Family relationship graph CLI", long_about = None)]
#[command(version = kinship::VERSION)]
struct Cli {
    /// JSON dataset file holding members and relationships
    #[arg(long, short, global = true)]
    data: Option<String>,

    /// Output format (table, json) - use json for tool integration
    #[arg(long, short, default_value = "table", global = true)]
    output: String,

    /// Maximum tree expansion depth
    #[arg(long, global = true)]
    max_depth: Option<u32>,

    /// Verbose output (debug level logging)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Quiet mode (suppress all logging output)
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if !std::io::stdout().is_terminal() || cli.output == "json" {
        colored::control::set_override(false);
    }

    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let _ = tracing_subscriber::fmt()
        .compact()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();

    let output_format = cli.output.clone();
    if let Err(e) = run(cli).await {
        output_error(&e.to_string(), &output_format);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> kinship::Result<()> {
    let output_format = cli.output.clone();

    // Version and taxonomy listing need no dataset
    match &cli.command {
        Commands::Version => {
            println!("kinship-cli {}", kinship::VERSION);
            return Ok(());
        }
        Commands::Types => return handle_types(&output_format),
        _ => {}
    }

    let ctx = KinshipCliContext::new(cli.data, cli.max_depth).await?;
    let mutates = cli.command.mutates();

    match cli.command {
        Commands::Version | Commands::Types => unreachable!(),
        Commands::Member(cmd) => handle_member_command(cmd, &ctx, &output_format).await?,
        Commands::Relationship(cmd) => {
            handle_relationship_command(cmd, &ctx, &output_format).await?
        }
        Commands::Tree(args) => handle_tree(args, &ctx, &output_format).await?,
        Commands::Stats => handle_stats(&ctx, &output_format).await?,
        Commands::Story(args) => handle_story(args, &ctx, &output_format).await?,
    }

    if mutates {
        ctx.save().await?;
    }
    Ok(())
}
