//! Database schema types.
//!
//! Represents the structure of the evaluation database so it can be rendered
//! into the translation prompt: table/column listing plus the foreign-key
//! relationships the model needs for JOINs.

use serde::{Deserialize, Serialize};

/// The complete schema of a database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    /// All tables in the schema.
    pub tables: Vec<Table>,

    /// Foreign key relationships between tables.
    pub foreign_keys: Vec<ForeignKey>,
}

impl Schema {
    /// Creates a new empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Formats the table structure for inclusion in an LLM prompt.
    ///
    /// Compact one-line-per-table form; column types are deliberately
    /// omitted to keep the prompt small.
    pub fn format_for_llm(&self) -> String {
        let mut out = String::from("Database structure:\n");
        for table in &self.tables {
            let columns = table
                .columns
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!("   - {}: {}\n", table.name, columns));
        }
        out
    }

    /// Formats the foreign-key relationships for inclusion in an LLM prompt.
    pub fn format_relationships(&self) -> String {
        let mut out = String::new();
        for fk in &self.foreign_keys {
            out.push_str(&format!(
                "- {}.{} -> {}.{}\n",
                fk.from_table, fk.from_column, fk.to_table, fk.to_column
            ));
        }
        out
    }
}

/// A table in the schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    /// Table name.
    pub name: String,

    /// Columns in declaration order.
    pub columns: Vec<Column>,
}

/// A column within a table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,

    /// Declared column type (SQLite type affinity, e.g. "INTEGER", "TEXT").
    pub data_type: String,
}

impl Column {
    /// Creates a new column with the given name and declared type.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// A single-column foreign-key relationship.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForeignKey {
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
}

impl ForeignKey {
    /// Creates a new foreign key relationship.
    pub fn new(
        from_table: impl Into<String>,
        from_column: impl Into<String>,
        to_table: impl Into<String>,
        to_column: impl Into<String>,
    ) -> Self {
        Self {
            from_table: from_table.into(),
            from_column: from_column.into(),
            to_table: to_table.into(),
            to_column: to_column.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_schema() -> Schema {
        Schema {
            tables: vec![
                Table {
                    name: "team".to_string(),
                    columns: vec![
                        Column::new("id", "INTEGER"),
                        Column::new("full_name", "TEXT"),
                        Column::new("city", "TEXT"),
                    ],
                },
                Table {
                    name: "game".to_string(),
                    columns: vec![
                        Column::new("game_id", "TEXT"),
                        Column::new("team_id_home", "INTEGER"),
                        Column::new("pts_home", "INTEGER"),
                    ],
                },
            ],
            foreign_keys: vec![ForeignKey::new("game", "team_id_home", "team", "id")],
        }
    }

    #[test]
    fn test_format_for_llm_lists_tables_and_columns() {
        let text = sample_schema().format_for_llm();
        assert!(text.contains("- team: id, full_name, city"));
        assert!(text.contains("- game: game_id, team_id_home, pts_home"));
    }

    #[test]
    fn test_format_relationships() {
        let text = sample_schema().format_relationships();
        assert!(text.contains("game.team_id_home -> team.id"));
    }

    #[test]
    fn test_empty_schema_formats() {
        let schema = Schema::new();
        assert_eq!(schema.format_for_llm(), "Database structure:\n");
        assert_eq!(schema.format_relationships(), "");
    }
}
