//! Check command - validate configuration and the project collection

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use folio_collection::ProjectCollection;
use folio_core::Config;

use super::load_collection;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates the configuration and every entry of the project collection.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and projects");

    println!("Checking configuration...");
    let (config, collection) = load_collection(config_path)?;
    println!("  ✓ Configuration valid ({})", config.url_for("/"));

    println!("\nChecking projects...");
    let result = evaluate(&config, &collection);

    if collection.is_valid() {
        println!("  ✓ All {} project entries valid", collection.total());
    } else {
        println!(
            "  ✗ {}/{} project entries have errors",
            collection.failures.len(),
            collection.total()
        );
    }

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Turn a loaded collection into reportable errors and warnings.
///
/// Each schema violation becomes its own error line so every broken field is
/// listed.
pub fn evaluate(config: &Config, collection: &ProjectCollection) -> ValidationResult {
    let mut result = ValidationResult::default();

    for failure in &collection.failures {
        let path = failure.path.display();
        match failure.error.as_schema() {
            Some(schema) => {
                for violation in schema.violations() {
                    result.add_error(format!("{path}: {violation}"));
                }
            }
            None => result.add_error(format!("{path}: {}", failure.error)),
        }
    }

    for warning in collection.all_warnings() {
        result.add_warning(warning);
    }

    if collection.total() == 0 && collection.warnings.is_empty() {
        result.add_warning(format!(
            "No project entries found (extensions: {})",
            config.content_extensions().join(", ")
        ));
    }

    result
}
