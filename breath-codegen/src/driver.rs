//! Directory-level generation: enumerate inputs, process each, aggregate.

use std::{
    fs,
    path::{Path, PathBuf},
};

use breath_core::{is_generated_file, is_source_file, module_name, output_path_for};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::{
    diagnostic::{Diagnostic, DiagnosticKind},
    error::{Error, Result},
    extract::extract,
    metadata::TypeMetadata,
    reconcile::{Outcome, OutputFile, WriteStatus, reconcile},
    registry::TemplateRegistry,
    render::{GeneratedFragment, render},
};

/// Run-wide settings, fixed for the lifetime of a [`Generator`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Report per-file progress and skip diagnostics
    pub verbose: bool,
    /// Suppress the summary line
    pub silent: bool,
    /// Compute outcomes without writing or deleting anything
    pub dry_run: bool,
    /// Process files on the rayon pool
    pub parallel: bool,
}

/// What happened to one input file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub outcome: Outcome,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    fn skipped(input: &Path, output: PathBuf, diagnostic: Diagnostic) -> Self {
        Self {
            input: input.to_path_buf(),
            output,
            outcome: Outcome::Skipped,
            diagnostics: vec![diagnostic],
        }
    }
}

/// Aggregated result of a generation run, in enumeration order.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub files: Vec<FileReport>,
}

impl GenerationReport {
    /// Outputs that hold rendered fragments after this run.
    pub fn written(&self) -> impl Iterator<Item = &OutputFile> {
        self.files.iter().filter_map(|file| match &file.outcome {
            Outcome::Written(output) => Some(output),
            _ => None,
        })
    }

    /// Stale outputs that were deleted.
    pub fn removed(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().filter_map(|file| match &file.outcome {
            Outcome::Removed(path) => Some(path.as_path()),
            _ => None,
        })
    }

    /// Dry-run previews of what would be written.
    pub fn previews(&self) -> impl Iterator<Item = &OutputFile> {
        self.written()
            .filter(|output| output.status == WriteStatus::Preview)
    }

    /// Number of generated files.
    pub fn written_count(&self) -> usize {
        self.written().count()
    }

    /// Every diagnostic, paired with the input it came from.
    pub fn diagnostics(&self) -> impl Iterator<Item = (&Path, &Diagnostic)> {
        self.files.iter().flat_map(|file| {
            file.diagnostics
                .iter()
                .map(move |diagnostic| (file.input.as_path(), diagnostic))
        })
    }

    /// Number of warning-level diagnostics.
    pub fn warning_count(&self) -> usize {
        self.diagnostics()
            .filter(|(_, d)| d.severity.is_warning())
            .count()
    }
}

/// Generates companion files for every annotated input in a directory.
#[derive(Debug)]
pub struct Generator {
    registry: TemplateRegistry,
    options: GenerateOptions,
}

impl Generator {
    pub fn new(registry: TemplateRegistry, options: GenerateOptions) -> Self {
        Self { registry, options }
    }

    /// Source files directly inside `dir`, sorted by name, excluding
    /// generated companions.
    ///
    /// Only failing to read `dir` itself is fatal. A source entry that cannot
    /// be resolved (e.g. a dangling symlink) is still returned so that reading
    /// it reports a diagnostic; other unreadable entries are ignored.
    pub fn input_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let is_input = |path: &Path| is_source_file(path) && !is_generated_file(path);

        let mut files = Vec::new();
        for entry in WalkDir::new(dir)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            match entry {
                Ok(entry) if entry.depth() == 0 => {}
                Ok(entry) => {
                    if entry.file_type().is_file() && is_input(entry.path()) {
                        files.push(entry.path().to_path_buf());
                    }
                }
                Err(source) if source.depth() == 0 => {
                    return Err(Error::Scan {
                        path: dir.to_path_buf(),
                        source,
                    });
                }
                Err(source) => match source.path() {
                    Some(path) if is_input(path) => files.push(path.to_path_buf()),
                    path => {
                        tracing::debug!(path = ?path, error = %source, "ignoring unreadable entry")
                    }
                },
            }
        }
        Ok(files)
    }

    /// Process every input in `dir`.
    ///
    /// The first fatal error aborts the run; per-file problems are collected
    /// as diagnostics.
    pub fn generate(&self, dir: &Path) -> Result<GenerationReport> {
        let inputs = self.input_files(dir)?;
        tracing::info!(
            dir = %dir.display(),
            inputs = inputs.len(),
            templates = self.registry.len(),
            parallel = self.options.parallel,
            "starting generation"
        );

        let files = if self.options.parallel {
            inputs
                .par_iter()
                .map(|input| self.generate_file(input))
                .collect::<Result<Vec<_>>>()?
        } else {
            inputs
                .iter()
                .map(|input| self.generate_file(input))
                .collect::<Result<Vec<_>>>()?
        };

        Ok(GenerationReport { files })
    }

    /// Extract, render and reconcile a single input file.
    pub fn generate_file(&self, input: &Path) -> Result<FileReport> {
        let output = output_path_for(input);
        let module = module_name(input);
        let location = input.display().to_string();
        tracing::debug!(input = %location, "processing");

        let source = match fs::read_to_string(input) {
            Ok(source) => source,
            Err(e) => {
                let diagnostic = Diagnostic::warning(
                    DiagnosticKind::ParseFailure,
                    format!("failed to read file: {}", e),
                )
                .at(location);
                return Ok(FileReport::skipped(input, output, diagnostic));
            }
        };

        let extraction = match syn::parse_file(&source).and_then(|file| extract(&file)) {
            Ok(extraction) => extraction,
            Err(e) => {
                let diagnostic = Diagnostic::warning(
                    DiagnosticKind::ParseFailure,
                    format!("failed to parse file: {}", e),
                )
                .at(location);
                return Ok(FileReport::skipped(input, output, diagnostic));
            }
        };

        let mut diagnostics = extraction.diagnostics;
        let mut fragments: Vec<GeneratedFragment> = Vec::new();
        for ty in &extraction.types {
            for generator in &ty.directive.generators {
                let Some(template) = self.registry.get(generator) else {
                    diagnostics.push(
                        Diagnostic::warning(
                            DiagnosticKind::UnknownGenerator,
                            format!("template '{}' not found", generator),
                        )
                        .at(&ty.type_name),
                    );
                    continue;
                };
                let metadata = TypeMetadata::new(
                    &ty.type_name,
                    &ty.directive.table_name,
                    &module,
                    &ty.fields,
                );
                fragments.push(render(&self.registry, &metadata, template)?);
            }
        }

        let outcome = reconcile(&output, &module, &fragments, self.options.dry_run)?;
        if let Outcome::Removed(path) = &outcome {
            let message = if self.options.dry_run {
                "would remove stale output"
            } else {
                "removed stale output"
            };
            diagnostics.push(
                Diagnostic::info(DiagnosticKind::RemovedOutput, message)
                    .at(path.display().to_string()),
            );
        }

        Ok(FileReport {
            input: input.to_path_buf(),
            output,
            outcome,
            diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use breath_manifest::TemplateSpec;
    use tempfile::TempDir;

    use super::*;

    fn generator(options: GenerateOptions) -> Generator {
        let registry = TemplateRegistry::load([(
            "Table",
            TemplateSpec {
                import: vec![],
                func: "// {{TypeName}} -> {{TableName}}".to_string(),
            },
        )])
        .unwrap();
        Generator::new(registry, options)
    }

    #[test]
    fn test_input_files_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["b.rs", "a.rs", "a_gen.rs", "notes.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/c.rs"), "").unwrap();

        let files = generator(GenerateOptions::default())
            .input_files(dir.path())
            .unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.rs", "b.rs"]);
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = generator(GenerateOptions::default())
            .input_files(&dir.path().join("missing"))
            .unwrap_err();
        assert!(matches!(err, Error::Scan { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlinks_are_not_fatal() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("users.rs"), "/// users: Table\npub struct User;\n").unwrap();
        symlink(dir.path().join("gone.txt"), dir.path().join("notes.txt")).unwrap();
        symlink(dir.path().join("gone.rs"), dir.path().join("broken.rs")).unwrap();

        let generator = generator(GenerateOptions::default());
        let files = generator.input_files(dir.path()).unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("broken.rs"), dir.path().join("users.rs")]
        );

        let report = generator.generate(dir.path()).unwrap();
        assert_eq!(report.files[0].outcome, Outcome::Skipped);
        assert_eq!(report.files[0].diagnostics[0].kind, DiagnosticKind::ParseFailure);
        assert!(report.files[1].outcome.is_written());
        assert_eq!(report.warning_count(), 1);
        assert!(dir.path().join("users_gen.rs").exists());
    }

    #[test]
    fn test_removed_output_message_follows_dry_run() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("plain.rs");
        fs::write(&input, "pub struct Plain;\n").unwrap();

        for (dry_run, message) in [
            (true, "would remove stale output"),
            (false, "removed stale output"),
        ] {
            fs::write(dir.path().join("plain_gen.rs"), "// stale\n").unwrap();
            let report = generator(GenerateOptions {
                dry_run,
                ..Default::default()
            })
            .generate_file(&input)
            .unwrap();

            assert!(matches!(report.outcome, Outcome::Removed(_)));
            assert_eq!(report.diagnostics[0].kind, DiagnosticKind::RemovedOutput);
            assert_eq!(report.diagnostics[0].message, message);
            assert_eq!(dir.path().join("plain_gen.rs").exists(), dry_run);
        }
    }

    #[test]
    fn test_generate_file_reports_unknown_generator() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("users.rs");
        fs::write(&input, "/// users: Table, Upsert\npub struct User;\n").unwrap();

        let report = generator(GenerateOptions::default())
            .generate_file(&input)
            .unwrap();

        assert!(report.outcome.is_written());
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].kind, DiagnosticKind::UnknownGenerator);
        assert_eq!(report.diagnostics[0].location.as_deref(), Some("User"));
    }

    #[test]
    fn test_generate_file_parse_failure_is_skipped() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("broken.rs");
        fs::write(&input, "pub struct {").unwrap();

        let report = generator(GenerateOptions::default())
            .generate_file(&input)
            .unwrap();

        assert_eq!(report.outcome, Outcome::Skipped);
        assert_eq!(report.diagnostics[0].kind, DiagnosticKind::ParseFailure);
        assert!(report.diagnostics[0].severity.is_warning());
    }
}
