//! Generate command report.

use breath_codegen::{GenerateOptions, GenerationReport, Outcome, WriteStatus};

use super::output::{Output, Report};

/// Report data from a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Per-file results from the generator.
    pub generation: GenerationReport,
    /// Settings the run was made with.
    pub options: GenerateOptions,
}

impl GenerateReport {
    pub fn new(generation: GenerationReport, options: GenerateOptions) -> Self {
        Self {
            generation,
            options,
        }
    }

    fn summary(&self) -> String {
        let count = self.generation.written_count();
        if self.options.dry_run {
            format!("{} file(s) would be generated.", count)
        } else {
            format!("{} file(s) generated.", count)
        }
    }

    fn render_progress(&self, out: &mut dyn Output) {
        for (input, diagnostic) in self.generation.diagnostics() {
            out.diagnostic(&format!("{}: {}", input.display(), diagnostic));
        }

        out.section("Files");
        for file in &self.generation.files {
            match &file.outcome {
                Outcome::Written(output) => match output.status {
                    WriteStatus::Unchanged => out.unchanged_item(&output.path.display().to_string()),
                    WriteStatus::Written | WriteStatus::Preview => {
                        out.added_item(&output.path.display().to_string())
                    }
                },
                Outcome::Removed(path) => out.removed_item(&path.display().to_string()),
                Outcome::Skipped => {}
            }
        }
    }

    fn render_preview(&self, out: &mut dyn Output) {
        for output in self.generation.previews() {
            out.divider(&output.path.display().to_string());
            out.preformatted(output.content.trim_end());
        }

        let removed: Vec<_> = self.generation.removed().collect();
        if !removed.is_empty() {
            out.section("Would remove");
            for path in removed {
                out.removed_item(&path.display().to_string());
            }
        }
        out.divider("Summary");
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        if self.options.verbose {
            self.render_progress(out);
        }

        if self.options.dry_run {
            self.render_preview(out);
        }

        if !self.options.silent {
            out.preformatted(&self.summary());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use breath_codegen::{Diagnostic, DiagnosticKind, FileReport, OutputFile};

    use super::*;

    #[derive(Default)]
    struct RecordingOutput {
        lines: Vec<String>,
    }

    impl Output for RecordingOutput {
        fn section(&mut self, name: &str) {
            self.lines.push(format!("{}:", name));
        }

        fn added_item(&mut self, text: &str) {
            self.lines.push(format!("+ {}", text));
        }

        fn unchanged_item(&mut self, text: &str) {
            self.lines.push(format!("= {}", text));
        }

        fn removed_item(&mut self, text: &str) {
            self.lines.push(format!("- {}", text));
        }

        fn diagnostic(&mut self, msg: &str) {
            self.lines.push(msg.to_string());
        }

        fn divider(&mut self, label: &str) {
            self.lines.push(format!("-- {} --", label));
        }

        fn preformatted(&mut self, text: &str) {
            self.lines.push(text.to_string());
        }
    }

    fn generation(status: WriteStatus) -> GenerationReport {
        GenerationReport {
            files: vec![
                FileReport {
                    input: PathBuf::from("models/users.rs"),
                    output: PathBuf::from("models/users_gen.rs"),
                    outcome: Outcome::Written(OutputFile {
                        path: PathBuf::from("models/users_gen.rs"),
                        content: "// users\n".to_string(),
                        status,
                    }),
                    diagnostics: vec![
                        Diagnostic::warning(
                            DiagnosticKind::UnknownGenerator,
                            "template 'Upsert' not found",
                        )
                        .at("User"),
                    ],
                },
                FileReport {
                    input: PathBuf::from("models/plain.rs"),
                    output: PathBuf::from("models/plain_gen.rs"),
                    outcome: Outcome::Removed(PathBuf::from("models/plain_gen.rs")),
                    diagnostics: vec![],
                },
            ],
        }
    }

    fn render(report: &GenerateReport) -> Vec<String> {
        let mut out = RecordingOutput::default();
        report.render(&mut out);
        out.lines
    }

    #[test]
    fn test_summary_only_by_default() {
        let report = GenerateReport::new(generation(WriteStatus::Written), GenerateOptions::default());
        assert_eq!(render(&report), vec!["1 file(s) generated."]);
    }

    #[test]
    fn test_silent_prints_nothing() {
        let report = GenerateReport::new(
            generation(WriteStatus::Written),
            GenerateOptions {
                silent: true,
                ..Default::default()
            },
        );
        assert!(render(&report).is_empty());
    }

    #[test]
    fn test_verbose_lists_diagnostics_and_files() {
        let report = GenerateReport::new(
            generation(WriteStatus::Unchanged),
            GenerateOptions {
                verbose: true,
                ..Default::default()
            },
        );
        assert_eq!(
            render(&report),
            vec![
                "models/users.rs: warning: template 'Upsert' not found (at User)",
                "Files:",
                "= models/users_gen.rs",
                "- models/plain_gen.rs",
                "1 file(s) generated.",
            ]
        );
    }

    #[test]
    fn test_dry_run_previews() {
        let report = GenerateReport::new(
            generation(WriteStatus::Preview),
            GenerateOptions {
                dry_run: true,
                ..Default::default()
            },
        );
        assert_eq!(
            render(&report),
            vec![
                "-- models/users_gen.rs --",
                "// users",
                "Would remove:",
                "- models/plain_gen.rs",
                "-- Summary --",
                "1 file(s) would be generated.",
            ]
        );
    }
}
