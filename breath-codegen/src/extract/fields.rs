//! Per-field column metadata from `#[breath(...)]` attributes.

use syn::{Field, Fields, Lit, LitStr, meta::ParseNestedMeta};

/// Name of the field attribute carrying column metadata.
pub const ATTRIBUTE: &str = "breath";

/// Column metadata for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMetadata {
    /// Column name from `column = "..."`
    pub column: String,
    /// Field identifier (positional index for tuple structs)
    pub field_name: String,
    /// Value generated by the database (`auto`)
    pub auto: bool,
    /// Excluded from public projections (`private`)
    pub private: bool,
    /// Labels from `label = "a, b"`, trimmed, empties dropped
    pub labels: Vec<String>,
}

/// Extract metadata for every field that names a non-empty column.
///
/// Fields without a column are skipped. A malformed `#[breath(...)]`
/// attribute is an error for the whole declaration.
pub fn extract_fields(fields: &Fields) -> syn::Result<Vec<FieldMetadata>> {
    let mut columns = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        if let Some(metadata) = extract_field(index, field)? {
            columns.push(metadata);
        }
    }
    Ok(columns)
}

#[derive(Default)]
struct FieldAttrs {
    column: Option<String>,
    auto: bool,
    private: bool,
    labels: Vec<String>,
}

fn extract_field(index: usize, field: &Field) -> syn::Result<Option<FieldMetadata>> {
    let mut attrs = FieldAttrs::default();

    for attr in field.attrs.iter().filter(|a| a.path().is_ident(ATTRIBUTE)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("column") {
                let value: LitStr = meta.value()?.parse()?;
                attrs.column = Some(value.value());
            } else if meta.path.is_ident("auto") {
                attrs.auto = parse_flag(&meta)?;
            } else if meta.path.is_ident("private") {
                attrs.private = parse_flag(&meta)?;
            } else if meta.path.is_ident("label") {
                let value: LitStr = meta.value()?.parse()?;
                attrs.labels.extend(
                    value
                        .value()
                        .split(',')
                        .map(str::trim)
                        .filter(|label| !label.is_empty())
                        .map(str::to_string),
                );
            } else {
                return Err(meta.error(
                    "unsupported breath attribute, expected `column`, `auto`, `private` or `label`",
                ));
            }
            Ok(())
        })?;
    }

    let Some(column) = attrs.column.filter(|c| !c.is_empty()) else {
        return Ok(None);
    };

    let field_name = field
        .ident
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| index.to_string());

    Ok(Some(FieldMetadata {
        column,
        field_name,
        auto: attrs.auto,
        private: attrs.private,
        labels: attrs.labels,
    }))
}

/// `flag`, `flag = true` or `flag = "true"`.
fn parse_flag(meta: &ParseNestedMeta) -> syn::Result<bool> {
    if meta.input.is_empty() || meta.input.peek(syn::Token![,]) {
        return Ok(true);
    }
    match meta.value()?.parse::<Lit>()? {
        Lit::Bool(b) => Ok(b.value),
        Lit::Str(s) => Ok(s.value() == "true"),
        other => Err(syn::Error::new(
            other.span(),
            "expected `true`, `false` or a string",
        )),
    }
}
