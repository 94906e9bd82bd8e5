//! Per-file write-or-delete decision for generated output.

use std::path::{Path, PathBuf};

use breath_core::{File, RemoveResult, WriteResult, remove_file};

use crate::{
    error::{Error, Result},
    imports::ImportCollector,
    render::GeneratedFragment,
};

/// What happened to the generated file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    /// New content was written.
    Written,
    /// The file already held identical content.
    Unchanged,
    /// Dry run, nothing touched.
    Preview,
}

/// A generated file and how it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    pub content: String,
    pub status: WriteStatus,
}

/// Result of reconciling one input file's fragments with its output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Fragments were rendered and the output holds them.
    Written(OutputFile),
    /// No fragments, and a stale output was deleted (or would be, in a dry run).
    Removed(PathBuf),
    /// No fragments and no output to clean up, or the input could not be parsed.
    Skipped,
}

impl Outcome {
    pub fn is_written(&self) -> bool {
        matches!(self, Outcome::Written(_))
    }

    pub fn is_removed(&self) -> bool {
        matches!(self, Outcome::Removed(_))
    }
}

/// Header line identifying generated files.
pub fn header(module: &str) -> String {
    format!("// @generated by breath from module `{}`. Do not edit.\n", module)
}

/// Assemble output content: header, deduplicated `use` lines, then each
/// fragment followed by a newline.
pub fn render_output(module: &str, fragments: &[GeneratedFragment]) -> String {
    let mut imports = ImportCollector::new();
    for fragment in fragments {
        imports.extend(&fragment.imports);
    }

    let mut out = header(module);
    if !imports.is_empty() {
        out.push('\n');
        out.push_str(&imports.render());
    }
    for fragment in fragments {
        out.push('\n');
        out.push_str(&fragment.code);
        out.push('\n');
    }
    out
}

/// Bring `output_path` in line with `fragments`.
///
/// With no fragments an existing output is deleted. Otherwise the output is
/// rebuilt and written if its content changed. A dry run computes the same
/// outcome without touching disk.
pub fn reconcile(
    output_path: &Path,
    module: &str,
    fragments: &[GeneratedFragment],
    dry_run: bool,
) -> Result<Outcome> {
    if fragments.is_empty() {
        return remove_stale(output_path, dry_run);
    }

    let file = File::new(output_path, render_output(module, fragments));
    let status = if dry_run {
        WriteStatus::Preview
    } else {
        match file.write() {
            Ok(WriteResult::Written) => WriteStatus::Written,
            Ok(WriteResult::Unchanged) => WriteStatus::Unchanged,
            Err(source) => {
                return Err(Error::Write {
                    path: output_path.to_path_buf(),
                    source,
                });
            }
        }
    };

    tracing::debug!(path = %output_path.display(), ?status, "reconciled output");
    Ok(Outcome::Written(OutputFile {
        path: output_path.to_path_buf(),
        content: file.into_content(),
        status,
    }))
}

fn remove_stale(output_path: &Path, dry_run: bool) -> Result<Outcome> {
    if dry_run {
        return Ok(if output_path.exists() {
            Outcome::Removed(output_path.to_path_buf())
        } else {
            Outcome::Skipped
        });
    }

    match remove_file(output_path) {
        Ok(RemoveResult::Removed) => {
            tracing::info!(path = %output_path.display(), "removed stale output");
            Ok(Outcome::Removed(output_path.to_path_buf()))
        }
        Ok(RemoveResult::Missing) => Ok(Outcome::Skipped),
        Err(source) => Err(Error::Remove {
            path: output_path.to_path_buf(),
            source,
        }),
    }
}
