//! Template binding context built from one annotated struct.

use indexmap::IndexMap;
use serde::Serialize;

use crate::extract::FieldMetadata;

/// Everything a template can reference, exposed in PascalCase
/// (`{{TypeName}}`, `{{#each TableColumns}}`, `{{LabeledColumns.search}}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TypeMetadata {
    pub type_name: String,
    pub table_name: String,
    /// Module the struct was declared in (input file stem)
    pub module_name: String,
    /// Every column, in field order
    pub table_columns: Vec<String>,
    /// Columns without any label
    pub non_labeled_columns: Vec<String>,
    /// Label -> columns carrying it; labels in first-seen order
    pub labeled_columns: IndexMap<String, Vec<String>>,
    /// Column -> struct field identifier
    pub to_field_name: IndexMap<String, String>,
    /// Columns flagged `auto`
    pub auto_columns: Vec<String>,
    /// Columns not flagged `auto`
    pub updatable_columns: Vec<String>,
    /// Columns flagged `private`
    pub private_columns: Vec<String>,
    /// Columns not flagged `private`
    pub public_columns: Vec<String>,
}

impl TypeMetadata {
    /// Derive the binding context from a struct's column metadata.
    pub fn new(
        type_name: impl Into<String>,
        table_name: impl Into<String>,
        module_name: impl Into<String>,
        fields: &[FieldMetadata],
    ) -> Self {
        let mut metadata = Self {
            type_name: type_name.into(),
            table_name: table_name.into(),
            module_name: module_name.into(),
            table_columns: Vec::new(),
            non_labeled_columns: Vec::new(),
            labeled_columns: IndexMap::new(),
            to_field_name: IndexMap::new(),
            auto_columns: Vec::new(),
            updatable_columns: Vec::new(),
            private_columns: Vec::new(),
            public_columns: Vec::new(),
        };

        for field in fields {
            let column = &field.column;
            metadata.table_columns.push(column.clone());

            if field.labels.is_empty() {
                metadata.non_labeled_columns.push(column.clone());
            }
            for label in &field.labels {
                metadata
                    .labeled_columns
                    .entry(label.clone())
                    .or_default()
                    .push(column.clone());
            }

            if field.auto {
                metadata.auto_columns.push(column.clone());
            } else {
                metadata.updatable_columns.push(column.clone());
            }

            if field.private {
                metadata.private_columns.push(column.clone());
            } else {
                metadata.public_columns.push(column.clone());
            }

            metadata
                .to_field_name
                .insert(column.clone(), field.field_name.clone());
        }

        metadata
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn field(column: &str, auto: bool, private: bool, labels: &[&str]) -> FieldMetadata {
        FieldMetadata {
            column: column.to_string(),
            field_name: format!("{}_field", column),
            auto,
            private,
            labels: labels.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_column_subsets() {
        let metadata = TypeMetadata::new(
            "User",
            "users",
            "models",
            &[
                field("id", true, false, &[]),
                field("email", false, true, &[]),
                field("name", false, false, &["search", "display"]),
                field("bio", false, false, &["display"]),
            ],
        );

        assert_eq!(metadata.table_columns, ["id", "email", "name", "bio"]);
        assert_eq!(metadata.non_labeled_columns, ["id", "email"]);
        assert_eq!(metadata.auto_columns, ["id"]);
        assert_eq!(metadata.updatable_columns, ["email", "name", "bio"]);
        assert_eq!(metadata.private_columns, ["email"]);
        assert_eq!(metadata.public_columns, ["id", "name", "bio"]);
    }

    #[test]
    fn test_label_grouping() {
        let metadata = TypeMetadata::new(
            "User",
            "users",
            "models",
            &[
                field("name", false, false, &["search", "display"]),
                field("bio", false, false, &["display"]),
            ],
        );

        let labels: Vec<_> = metadata.labeled_columns.keys().collect();
        assert_eq!(labels, ["search", "display"]);
        assert_eq!(metadata.labeled_columns["search"], ["name"]);
        assert_eq!(metadata.labeled_columns["display"], ["name", "bio"]);
        assert!(!metadata.non_labeled_columns.contains(&"name".to_string()));
    }

    #[test]
    fn test_to_field_name() {
        let metadata = TypeMetadata::new("User", "users", "models", &[field("id", true, false, &[])]);
        assert_eq!(metadata.to_field_name["id"], "id_field");
    }

    #[test]
    fn test_serializes_pascal_case() {
        let metadata = TypeMetadata::new("User", "users", "models", &[field("id", true, false, &["pk"])]);
        let value = serde_json::to_value(&metadata).unwrap();

        assert_eq!(
            value,
            json!({
                "TypeName": "User",
                "TableName": "users",
                "ModuleName": "models",
                "TableColumns": ["id"],
                "NonLabeledColumns": [],
                "LabeledColumns": { "pk": ["id"] },
                "ToFieldName": { "id": "id_field" },
                "AutoColumns": ["id"],
                "UpdatableColumns": [],
                "PrivateColumns": [],
                "PublicColumns": ["id"],
            })
        );
    }
}
