//! Generate-tags command: ask an AI model for tags and write them to frontmatter.

use mdmeta_core::config::{AiSettings, ResolvedConfig};
use mdmeta_core::tagging::{OpenAiClient, TagOrchestrator};
use tracing::info;

use super::fail;
use crate::GenerateTagsArgs;

/// Run the generate-tags command.
///
/// A single file's failure is fatal. In batch mode every matched file is
/// attempted and failures are listed on stderr without changing the exit
/// status.
pub fn run(cfg: &ResolvedConfig, args: &GenerateTagsArgs) {
    let settings = AiSettings::from_env(&cfg.ai).unwrap_or_else(|e| fail(e));
    info!(model = %settings.model, base_url = %settings.base_url, "using AI endpoint");

    let client = OpenAiClient::new(settings).unwrap_or_else(|e| fail(e));
    let orchestrator =
        TagOrchestrator::new(args.target.as_str(), client).create_if_missing(args.create);

    let report = orchestrator.run().unwrap_or_else(|e| fail(e));

    if orchestrator.is_batch() && report.is_empty() {
        println!("No files matched {}", args.target);
        return;
    }

    if report.has_failures() {
        eprintln!(
            "Warning: {} of {} files could not be tagged:",
            report.failed.len(),
            report.failed.len() + report.tagged.len()
        );
        for (path, message) in &report.failed {
            eprintln!("  {}: {message}", path.display());
        }
    }

    println!("Tags generated successfully");
}
