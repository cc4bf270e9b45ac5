mod cmd;
mod logging;

use clap::error::ErrorKind;
use clap::{ArgGroup, Args, Parser, Subcommand};
use mdmeta_core::config::ConfigLoader;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "mdmeta",
    version,
    about = "Read and update YAML frontmatter in markdown files",
    arg_required_else_help = true
)]
struct Cli {
    /// Path to a config file (default: ~/.config/mdmeta/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print a file's frontmatter as JSON
    ExtractFrontmatter(ExtractArgs),

    /// Replace, merge into, or remove fields from a file's frontmatter
    UpdateFrontmatter(UpdateArgs),

    /// Generate tags for a file (or every file matching a pattern) with an AI model
    GenerateTags(GenerateTagsArgs),
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Markdown file to read
    pub file: PathBuf,

    /// Only include these fields (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("mode").required(true).args(["update", "set", "remove"])))]
pub struct UpdateArgs {
    /// Markdown file to modify
    pub file: PathBuf,

    /// Replace the whole frontmatter with this JSON object
    #[arg(long, value_name = "JSON")]
    pub update: Option<String>,

    /// Set a field (repeatable)
    #[arg(long, value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Remove these fields (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub remove: Vec<String>,

    /// Create frontmatter if the file has none
    #[arg(long)]
    pub create: bool,
}

#[derive(Debug, Args)]
pub struct GenerateTagsArgs {
    /// Markdown file, or a pattern using * and ? (e.g. "notes/*.md")
    pub target: String,

    /// Create frontmatter if a file has none
    #[arg(long)]
    pub create: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                std::process::exit(1);
            }
        },
    };

    let cfg = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    logging::init(&cfg.logging);

    match cli.command {
        Commands::ExtractFrontmatter(args) => cmd::extract::run(&args),
        Commands::UpdateFrontmatter(args) => cmd::update::run(&args),
        Commands::GenerateTags(args) => cmd::tags::run(&cfg, &args),
    }
    logging::flush();
}
