//! Generate operation - render companion files for a directory.

use std::path::Path;

use breath_codegen::{Generator, TemplateRegistry};
use breath_manifest::TemplateFile;
use eyre::{Context, Result};

use crate::reports::GenerateReport;

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Directory whose source files are scanned.
    pub dir: &'a Path,
    /// Template file the registry was loaded from.
    pub template_path: &'a Path,
    /// Run-wide settings handed to the generator.
    pub codegen: breath_codegen::GenerateOptions,
}

/// Execute the generate operation.
///
/// Compiles every template, then processes each input in the directory.
pub fn generate(templates: &TemplateFile, opts: GenerateOptions) -> Result<GenerateReport> {
    let registry = TemplateRegistry::from_template_file(templates).wrap_err_with(|| {
        format!(
            "Failed to compile templates from {}",
            opts.template_path.display()
        )
    })?;
    tracing::debug!(
        path = %opts.template_path.display(),
        templates = registry.len(),
        "loaded template file"
    );

    let generator = Generator::new(registry, opts.codegen);
    let report = generator
        .generate(opts.dir)
        .wrap_err_with(|| format!("Failed to generate code in {}", opts.dir.display()))?;

    Ok(GenerateReport::new(report, opts.codegen))
}

#[cfg(test)]
mod tests {
    use std::{fs, str::FromStr};

    use tempfile::TempDir;

    use super::*;

    const TEMPLATES: &str = "Select:\n  func: \"// select from {{TableName}}\"\n";

    fn run(dir: &Path, templates: &str, dry_run: bool) -> Result<GenerateReport> {
        let templates = TemplateFile::from_str(templates).unwrap();
        generate(
            &templates,
            GenerateOptions {
                dir,
                template_path: &dir.join("gen.yml"),
                codegen: breath_codegen::GenerateOptions {
                    dry_run,
                    ..Default::default()
                },
            },
        )
    }

    #[test]
    fn test_generate_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("orders.rs"),
            "/// orders: Select\npub struct Order;\n",
        )
        .unwrap();

        let report = run(temp_dir.path(), TEMPLATES, false).unwrap();

        assert_eq!(report.generation.written_count(), 1);
        let content = fs::read_to_string(temp_dir.path().join("orders_gen.rs")).unwrap();
        assert!(content.ends_with("// select from orders\n"));
    }

    #[test]
    fn test_compile_error_has_context() {
        let temp_dir = TempDir::new().unwrap();
        let err = run(temp_dir.path(), "Broken:\n  func: \"{{#if}}\"\n", false).unwrap_err();
        assert!(err.to_string().starts_with("Failed to compile templates from"));
    }

    #[test]
    fn test_missing_directory_has_context() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");
        let err = run(&missing, TEMPLATES, false).unwrap_err();
        assert!(err.to_string().starts_with("Failed to generate code in"));
    }
}
