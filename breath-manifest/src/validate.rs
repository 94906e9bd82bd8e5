//! Validation of template names after parsing.

use miette::SourceSpan;

use crate::{Result, TemplateFile, error::SourceContext};

/// Reject template names that no directive could ever reference.
///
/// Directives are split on `:` and `,` and each name is trimmed, so a
/// template named `"a,b"` or `" Insert"` would be unreachable.
pub(crate) fn validate_names(file: &TemplateFile, ctx: &SourceContext) -> Result<()> {
    for (name, _) in file.iter() {
        if let Some(reason) = validate_template_name(name) {
            return Err(ctx.invalid_name_error(name, reason, find_name_span(ctx.src(), name)));
        }
    }
    Ok(())
}

/// Returns None if valid, Some(reason) if the name is unreachable from a directive
pub(crate) fn validate_template_name(name: &str) -> Option<&'static str> {
    if name.trim().is_empty() {
        return Some("name cannot be empty");
    }
    if name.trim() != name {
        return Some("name cannot start or end with whitespace");
    }
    if name.contains(',') {
        return Some("name cannot contain ','");
    }
    if name.contains(':') {
        return Some("name cannot contain ':'");
    }
    if name.contains('\n') {
        return Some("name cannot span lines");
    }
    None
}

/// Find the span of a template name in the YAML or TOML source.
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    if name.is_empty() {
        return None;
    }

    let patterns = [
        format!("[{}]", name),     // TOML table header
        format!("\"{}\"", name),   // quoted key in either format
        format!("'{}'", name),     // single-quoted YAML key
        format!("\n{}:", name),    // YAML block key
    ];

    for pattern in &patterns {
        if let Some(pos) = src.find(pattern.as_str()) {
            // Skip the opening delimiter
            return Some(SourceSpan::from((pos + 1, name.len())));
        }
    }

    if src.starts_with(&format!("{}:", name)) {
        return Some(SourceSpan::from((0, name.len())));
    }

    src.find(name).map(|pos| SourceSpan::from((pos, name.len())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Format};

    #[test]
    fn test_valid_names() {
        assert!(validate_template_name("Insert").is_none());
        assert!(validate_template_name("select_by_label").is_none());
        assert!(validate_template_name("Update-All").is_none());
    }

    #[test]
    fn test_invalid_names() {
        assert!(validate_template_name("").is_some());
        assert!(validate_template_name("   ").is_some());
        assert!(validate_template_name(" Insert").is_some());
        assert!(validate_template_name("Insert,Update").is_some());
        assert!(validate_template_name("users:Insert").is_some());
    }

    #[test]
    fn test_find_name_span_yaml() {
        let src = "Insert:\n  func: a\nUpdate:\n  func: b\n";
        assert_eq!(find_name_span(src, "Insert"), Some(SourceSpan::from((0, 6))));
        assert_eq!(find_name_span(src, "Update"), Some(SourceSpan::from((18, 6))));
    }

    #[test]
    fn test_find_name_span_toml() {
        let src = "[Insert]\nfunc = \"a\"\n";
        assert_eq!(find_name_span(src, "Insert"), Some(SourceSpan::from((1, 6))));
    }

    #[test]
    fn test_invalid_name_in_file() {
        let err = "\"Insert,Update\":\n  func: body\n"
            .parse::<TemplateFile>()
            .unwrap_err();
        match *err {
            Error::InvalidName { name, span, .. } => {
                assert_eq!(name, "Insert,Update");
                assert_eq!(span, Some(SourceSpan::from((1, 13))));
            }
            other => panic!("expected InvalidName, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_name_in_toml() {
        let err = TemplateFile::from_str_with_filename(
            "[\"a:b\"]\nfunc = \"x\"\n",
            "gen.toml",
            Format::Toml,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::InvalidName { .. }));
    }
}
