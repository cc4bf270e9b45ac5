//! Prompt construction for tag generation.

use crate::frontmatter::Metadata;

pub const NO_FRONTMATTER_PLACEHOLDER: &str = "No frontmatter available";

/// Build the user prompt from a document's frontmatter, if it has any.
pub fn build_prompt(metadata: Option<&Metadata>) -> String {
    let details = match metadata {
        Some(fm) => serde_json::to_string_pretty(fm).unwrap_or_default(),
        None => NO_FRONTMATTER_PLACEHOLDER.to_string(),
    };
    format!(
        "Suggest up to {} tags that describe the markdown document with the following frontmatter.\n\n{}",
        super::MAX_TAGS,
        details
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_frontmatter_as_json() {
        let fm: Metadata = [("title", "Ownership in Rust")].into_iter().collect();
        let prompt = build_prompt(Some(&fm));
        assert!(prompt.contains("\"title\": \"Ownership in Rust\""));
        assert!(prompt.starts_with("Suggest up to 3 tags"));
    }

    #[test]
    fn uses_placeholder_without_frontmatter() {
        assert!(build_prompt(None).ends_with(NO_FRONTMATTER_PLACEHOLDER));
    }
}
