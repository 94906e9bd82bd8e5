//! Directive-driven code generation for annotated Rust structs.
//!
//! For every `*.rs` file in a directory, struct declarations whose last doc
//! line is a directive (`/// users: Insert, Update`) are rendered through
//! the named templates, and the results are collected into a `*_gen.rs`
//! companion file beside the input.
//!
//! # Module Organization
//!
//! - [`registry`] - Compiled templates keyed by generator name
//! - [`extract`] - Directive and column discovery on a parsed file
//! - [`metadata`] - The binding context exposed to templates
//! - [`render`] - Template execution
//! - [`reconcile`] - Writing or removing the companion file
//! - [`driver`] - Directory enumeration and aggregation

pub mod diagnostic;
pub mod driver;
pub mod error;
pub mod extract;
pub mod imports;
pub mod metadata;
pub mod reconcile;
pub mod registry;
pub mod render;

pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use driver::{FileReport, GenerateOptions, GenerationReport, Generator};
pub use error::{Error, Result};
pub use extract::{Directive, ExtractedType, Extraction, FieldMetadata, extract};
pub use imports::ImportCollector;
pub use metadata::TypeMetadata;
pub use reconcile::{Outcome, OutputFile, WriteStatus, reconcile, render_output};
pub use registry::{TemplateDefinition, TemplateRegistry};
pub use render::{GeneratedFragment, render};
