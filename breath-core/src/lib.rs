//! Core utilities and types for the breath code generator.
//!
//! This crate provides the file primitives, the generated-file naming
//! convention, and the string helpers shared by the other breath crates.

mod file;
mod naming;
mod utils;

// File operations
pub use file::{File, RemoveResult, WriteResult, remove_file};
// Naming convention for generated companions
pub use naming::{
    GENERATED_SUFFIX, SOURCE_EXTENSION, is_generated_file, is_source_file, module_name,
    output_path_for,
};
// String utilities
pub use utils::{join_quoted, quote};
