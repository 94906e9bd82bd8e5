//! Fatal errors that abort a generation run.
//!
//! Anything recoverable (a file that fails to parse, a directive naming an
//! unknown template) is reported as a [`Diagnostic`](crate::Diagnostic)
//! instead.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to compile template '{name}'")]
    TemplateCompile {
        name: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    #[error("failed to render template '{template}' for type '{type_name}'")]
    TemplateRender {
        template: String,
        type_name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },

    #[error("failed to scan '{path}'")]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to write '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove '{path}'")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn template_compile(name: &str, source: handlebars::TemplateError) -> Self {
        Error::TemplateCompile {
            name: name.to_string(),
            source: Box::new(source),
        }
    }

    pub(crate) fn template_render(
        template: &str,
        type_name: &str,
        source: handlebars::RenderError,
    ) -> Self {
        Error::TemplateRender {
            template: template.to_string(),
            type_name: type_name.to_string(),
            source: Box::new(source),
        }
    }
}
