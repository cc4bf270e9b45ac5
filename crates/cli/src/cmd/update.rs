//! Update command: replace, merge into, or remove frontmatter fields.

use mdmeta_core::{Metadata, Updater, Value};
use tracing::debug;

use super::fail;
use crate::UpdateArgs;

/// Run the update-frontmatter command.
///
/// Clap guarantees exactly one of `--update`, `--set` or `--remove`.
pub fn run(args: &UpdateArgs) {
    let updater = Updater::new(&args.file).create_if_missing(args.create);

    let (result, message) = if let Some(json) = &args.update {
        let fields = parse_update_json(json).unwrap_or_else(|e| fail(e));
        (updater.update_frontmatter(fields), "Frontmatter updated successfully")
    } else if !args.set.is_empty() {
        let fields = parse_assignments(&args.set).unwrap_or_else(|e| fail(e));
        (updater.update_fields(fields), "Fields updated successfully")
    } else {
        (updater.remove_fields(args.remove.as_slice()), "Fields removed successfully")
    };

    if let Err(e) = result {
        fail(e);
    }
    debug!(path = %updater.path().display(), "{message}");
    println!("{message}");
}

/// Parse `--update` input, which must be a JSON object.
fn parse_update_json(json: &str) -> Result<Metadata, String> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| format!("invalid JSON for --update: {e}"))?;
    Metadata::try_from(value).map_err(|other| {
        format!("--update must be a JSON object, got {}", other.type_name())
    })
}

/// Parse repeated `--set key=value` pairs into string fields.
fn parse_assignments(pairs: &[String]) -> Result<Metadata, String> {
    let mut fields = Metadata::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("invalid --set '{pair}': expected key=value"))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("invalid --set '{pair}': empty key"));
        }
        fields.insert(key, Value::from(strip_quotes(value)));
    }
    Ok(fields)
}

/// Remove one pair of matching surrounding quotes.
fn strip_quotes(s: &str) -> &str {
    for q in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(q) && s.ends_with(q) {
            return &s[1..s.len() - 1];
        }
    }
    s
}
