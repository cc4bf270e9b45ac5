//! Extract command: print a file's frontmatter as JSON.

use mdmeta_core::Extractor;

use super::fail;
use crate::ExtractArgs;

/// Run the extract-frontmatter command.
pub fn run(args: &ExtractArgs) {
    let fields = (!args.fields.is_empty()).then_some(args.fields.as_slice());

    let metadata = match Extractor::new(&args.file).extract(fields) {
        Ok(m) => m,
        Err(e) => fail(e),
    };

    let Some(metadata) = metadata else {
        println!("No frontmatter found");
        return;
    };

    match serde_json::to_string_pretty(&metadata) {
        Ok(json) => println!("{json}"),
        Err(e) => fail(e),
    }
}
