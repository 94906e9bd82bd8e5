//! Directive parsing from struct doc comments.
//!
//! A directive is the last doc line of a struct:
//!
//! ```rust,ignore
//! /// A registered user.
//! /// users: Insert, Update
//! pub struct User { ... }
//! ```
//!
//! Only the last line counts, and it must contain exactly one `:`.

use syn::{Attribute, Expr, ExprLit, Lit, Meta};

/// A parsed `table: Generator, Generator` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Table name before the colon
    pub table_name: String,
    /// Generator names after the colon, trimmed, empties dropped
    pub generators: Vec<String>,
}

impl Directive {
    /// Parse one directive line. Returns `None` unless the line splits into
    /// exactly two parts on `:`.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split(':');
        let (Some(table), Some(generators), None) = (parts.next(), parts.next(), parts.next())
        else {
            return None;
        };

        Some(Self {
            table_name: table.trim().to_string(),
            generators: generators
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }
}

/// Doc comment lines of an item, one entry per `#[doc = "..."]` attribute.
pub fn doc_lines(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => Some(s.value()),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

/// The line a directive is read from: the last line of the last doc attribute.
///
/// Block doc comments (`/** ... */`) arrive as one multi-line attribute, so
/// the last non-blank line is taken and a leading `*` continuation marker is
/// stripped.
pub fn directive_line(docs: &[String]) -> Option<String> {
    let last = docs.last()?;
    let line = last
        .lines()
        .map(str::trim)
        .rev()
        .find(|line| !line.is_empty())
        .unwrap_or("");
    Some(line.trim_start_matches('*').trim().to_string())
}
