//! Import collection for generated files.

use indexmap::IndexSet;

/// Tracks `use` paths requested by rendered fragments and deduplicates them.
///
/// Maintains first-insertion order for deterministic output.
///
/// # Example
///
/// ```
/// use breath_codegen::ImportCollector;
///
/// let mut imports = ImportCollector::new();
/// imports.add("crate::db::Connection");
/// imports.add("std::fmt::Write");
/// imports.add("crate::db::Connection");
///
/// assert_eq!(imports.len(), 2);
/// assert_eq!(imports.render(), "use crate::db::Connection;\nuse std::fmt::Write;\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    imports: IndexSet<String>,
}

impl ImportCollector {
    /// Create a new empty import collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an import path. Surrounding whitespace is ignored, blank paths are dropped.
    pub fn add(&mut self, path: &str) {
        let path = path.trim();
        if !path.is_empty() {
            self.imports.insert(path.to_string());
        }
    }

    /// Add every path from an iterator.
    pub fn extend<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for path in paths {
            self.add(path.as_ref());
        }
    }

    /// Iterate over imports in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().map(String::as_str)
    }

    /// Render one `use` line per import.
    pub fn render(&self) -> String {
        self.imports
            .iter()
            .map(|path| format!("use {};\n", path))
            .collect()
    }

    /// Check if the collector is empty.
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Get the number of imports.
    pub fn len(&self) -> usize {
        self.imports.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_collector_dedup() {
        let mut imports = ImportCollector::new();
        imports.add("std::io::Read");
        imports.add("std::io::Read");
        imports.add(" std::io::Read ");

        assert_eq!(imports.iter().collect::<Vec<_>>(), vec!["std::io::Read"]);
    }

    #[test]
    fn test_import_collector_preserves_order() {
        let mut imports = ImportCollector::new();
        imports.extend(["zeta::Z", "alpha::A", "zeta::Z", "mid::M"]);

        let paths: Vec<_> = imports.iter().collect();
        assert_eq!(paths, vec!["zeta::Z", "alpha::A", "mid::M"]);
    }

    #[test]
    fn test_blank_paths_dropped() {
        let mut imports = ImportCollector::new();
        imports.add("");
        imports.add("   ");
        assert!(imports.is_empty());
        assert_eq!(imports.render(), "");
    }
}
