//! Template file parsing and validation for the breath code generator.
//!
//! A template file maps generator names to a Handlebars body and the imports
//! its output requires. YAML (`gen.yml`) is the default format; files ending
//! in `.toml` are read as TOML.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod template;
mod validate;

pub use error::{Error, Result, SourceContext};
pub use template::{DEFAULT_TEMPLATE_FILE, Format, TemplateFile, TemplateSpec, parse_template_file};
