//! List command - print the valid project entries

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use folio_collection::ProjectCollection;

use super::load_collection;

/// Run the list command.
///
/// Invalid entries are skipped with a note on stderr; run `check` for details.
pub fn run(config_path: &Path, json: bool) -> Result<()> {
    tracing::info!(?config_path, json, "Listing projects");

    let (_config, collection) = load_collection(config_path)?;

    if !collection.is_valid() {
        eprintln!(
            "⚠ {} invalid project entr(ies) skipped; run `folio check` for details",
            collection.failures.len()
        );
    }

    println!("{}", render(&collection, json)?);
    Ok(())
}

/// Render valid entries as a plain listing (slug, title, tags) or a JSON array.
pub fn render(collection: &ProjectCollection, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(&collection.projects)
            .wrap_err("Failed to serialize projects");
    }

    let lines: Vec<String> = collection
        .projects
        .iter()
        .map(|project| {
            let entry = &project.entry;
            let mut line = format!("{}  {}", project.slug, entry.title);
            if !entry.tags.is_empty() {
                line.push_str(&format!("  [{}]", entry.tags.join(", ")));
            }
            line
        })
        .collect();

    Ok(lines.join("\n"))
}
