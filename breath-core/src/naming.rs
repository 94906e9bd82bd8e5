//! Naming convention for generated companion files.
//!
//! Every input `foo.rs` owns exactly one companion `foo_gen.rs` in the same
//! directory. Companions are never treated as inputs themselves.

use std::path::{Path, PathBuf};

/// File extension for source files, without the leading dot.
pub const SOURCE_EXTENSION: &str = "rs";

/// Suffix appended to the file stem of a generated companion.
pub const GENERATED_SUFFIX: &str = "_gen";

/// Whether `path` has the source extension.
pub fn is_source_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}

/// Whether `path` is a generated companion (`*_gen.rs`).
pub fn is_generated_file(path: &Path) -> bool {
    is_source_file(path)
        && path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stem.ends_with(GENERATED_SUFFIX))
}

/// Companion path for an input: `dir/users.rs` -> `dir/users_gen.rs`.
pub fn output_path_for(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}.{}", stem, GENERATED_SUFFIX, SOURCE_EXTENSION))
}

/// Module name of an input file, i.e. its file stem.
pub fn module_name(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
