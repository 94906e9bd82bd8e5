//! Shared string helpers for template output.

/// Wrap a string in double quotes (e.g., `users` -> `"users"`)
pub fn quote(s: &str) -> String {
    format!("\"{}\"", s)
}

/// Render items as a comma-separated quoted list (e.g., `["a", "b"]` -> `"a", "b"`).
///
/// An empty sequence renders as an empty string, not `""`.
pub fn join_quoted<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let joined = items
        .iter()
        .map(|item| item.as_ref())
        .collect::<Vec<&str>>()
        .join("\", \"");
    quote(&joined)
}
