//! Template file schema and parsing.

use std::{path::Path, str::FromStr};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{Error, Result, error::SourceContext, validate::validate_names};

/// Default template file name, looked up inside the target directory.
pub const DEFAULT_TEMPLATE_FILE: &str = "gen.yml";

/// One named template: the body and the imports its output needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplateSpec {
    /// Import paths every output using this template must carry
    #[serde(default, alias = "imports")]
    pub import: Vec<String>,

    /// Handlebars template body
    #[serde(alias = "template")]
    pub func: String,
}

/// Parsed template file: generator name -> template, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct TemplateFile {
    pub templates: IndexMap<String, TemplateSpec>,
}

/// Serialization format of a template file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Toml,
}

impl Format {
    /// Pick the format from the file extension; anything but `.toml` is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Format::Toml,
            _ => Format::Yaml,
        }
    }
}

impl FromStr for TemplateFile {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_template_file(s, DEFAULT_TEMPLATE_FILE, Format::Yaml)
    }
}

impl TemplateFile {
    /// Parse a template file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_template_file(&content, &path.display().to_string(), Format::from_path(path))
    }

    /// Parse template file content with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str, format: Format) -> Result<Self> {
        parse_template_file(content, filename, format)
    }

    /// Get a template by generator name.
    pub fn get(&self, name: &str) -> Option<&TemplateSpec> {
        self.templates.get(name)
    }

    /// Number of templates declared.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the file declares no templates.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate over `(name, template)` in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TemplateSpec)> {
        self.templates.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Parse template file content in the given format.
pub fn parse_template_file(content: &str, filename: &str, format: Format) -> Result<TemplateFile> {
    let source_ctx = SourceContext::new(content, filename);
    let file: TemplateFile = match format {
        // An empty YAML document is a null, not an empty mapping
        Format::Yaml if content.trim().is_empty() => TemplateFile::default(),
        Format::Yaml => serde_yaml::from_str(content).map_err(|e| source_ctx.yaml_error(e))?,
        Format::Toml => toml::from_str(content).map_err(|e| source_ctx.toml_error(e))?,
    };
    validate_names(&file, &source_ctx)?;
    Ok(file)
}
