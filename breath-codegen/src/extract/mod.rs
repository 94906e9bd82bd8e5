//! Discovery of annotated struct declarations in a parsed source file.

pub mod directive;
pub mod fields;

pub use directive::{Directive, directive_line, doc_lines};
pub use fields::{ATTRIBUTE, FieldMetadata, extract_fields};

use syn::Item;

use crate::diagnostic::{Diagnostic, DiagnosticKind};

/// A struct declaration carrying a well-formed directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedType {
    pub type_name: String,
    pub directive: Directive,
    pub fields: Vec<FieldMetadata>,
}

/// Result of scanning one file.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Annotated types in declaration order
    pub types: Vec<ExtractedType>,
    /// Why other structs were passed over
    pub diagnostics: Vec<Diagnostic>,
}

/// Walk the top-level struct declarations of a file.
///
/// Structs without doc comments or whose last doc line is not a directive
/// are reported and skipped. A malformed `#[breath(...)]` attribute fails
/// the whole file.
pub fn extract(file: &syn::File) -> syn::Result<Extraction> {
    let mut extraction = Extraction::default();

    for item in &file.items {
        let Item::Struct(item) = item else {
            continue;
        };
        let type_name = item.ident.to_string();

        let docs = doc_lines(&item.attrs);
        let Some(line) = directive_line(&docs) else {
            extraction.diagnostics.push(
                Diagnostic::info(DiagnosticKind::MissingDocComment, "type has no doc comment")
                    .at(&type_name),
            );
            continue;
        };

        let Some(directive) = Directive::parse(&line) else {
            extraction.diagnostics.push(
                Diagnostic::info(
                    DiagnosticKind::MalformedDirective,
                    format!("last doc line is not a directive: {:?}", line),
                )
                .at(&type_name),
            );
            continue;
        };

        let fields = extract_fields(&item.fields)?;
        extraction.types.push(ExtractedType {
            type_name,
            directive,
            fields,
        });
    }

    Ok(extraction)
}
