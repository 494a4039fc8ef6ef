//! Declarative table definitions rendered to SQLite DDL.

use rusqlite::Connection;

/// Schema definition for the tracker database
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Schema {
    pub tables: Vec<TableDefinition>,
}

impl Schema {
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    pub fn add_table(mut self, table: TableDefinition) -> Self {
        self.tables.push(table);
        self
    }

    /// The single `parcel` table backing [`crate::ParcelStore`]
    pub fn parcel() -> Self {
        Self::new().add_table(
            TableDefinition::new("parcel")
                .add_column(
                    ColumnDefinition::new("number", DataType::Integer)
                        .with_constraint(ColumnConstraint::PrimaryKeyAutoincrement),
                )
                .add_column(
                    ColumnDefinition::new("client", DataType::Integer)
                        .with_constraint(ColumnConstraint::NotNull),
                )
                .add_column(
                    ColumnDefinition::new("status", DataType::Text)
                        .with_constraint(ColumnConstraint::NotNull),
                )
                .add_column(
                    ColumnDefinition::new("address", DataType::Text)
                        .with_constraint(ColumnConstraint::NotNull),
                )
                .add_column(
                    ColumnDefinition::new("created_at", DataType::Text)
                        .with_constraint(ColumnConstraint::NotNull),
                )
                .add_index(IndexDefinition::new("parcel_client_idx", &["client"])),
        )
    }

    /// All statements needed to create the schema, in order
    pub fn statements(&self) -> Vec<String> {
        self.tables
            .iter()
            .flat_map(|table| {
                std::iter::once(table.create_statement()).chain(table.index_statements())
            })
            .collect()
    }

    /// Create every table and index that does not exist yet
    pub fn apply(&self, conn: &Connection) -> rusqlite::Result<()> {
        for sql in self.statements() {
            tracing::debug!(%sql, "applying schema statement");
            conn.execute(&sql, [])?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
    pub indexes: Vec<IndexDefinition>,
}

impl TableDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
            indexes: Vec::new(),
        }
    }

    pub fn add_column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }

    pub fn add_index(mut self, index: IndexDefinition) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn create_statement(&self) -> String {
        let columns: Vec<String> = self.columns.iter().map(|c| c.to_sql()).collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.name,
            columns.join(", ")
        )
    }

    pub fn index_statements(&self) -> Vec<String> {
        self.indexes
            .iter()
            .map(|index| {
                format!(
                    "CREATE {}INDEX IF NOT EXISTS {} ON {} ({})",
                    if index.unique { "UNIQUE " } else { "" },
                    index.name,
                    self.name,
                    index.columns.join(", ")
                )
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    pub constraints: Vec<ColumnConstraint>,
}

impl ColumnDefinition {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            constraints: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, constraint: ColumnConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.data_type.as_sql());
        for constraint in &self.constraints {
            sql.push(' ');
            sql.push_str(constraint.as_sql());
        }
        sql
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DataType {
    Integer,
    Text,
}

impl DataType {
    fn as_sql(&self) -> &'static str {
        match self {
            DataType::Integer => "INTEGER",
            DataType::Text => "TEXT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnConstraint {
    /// Row ids are never reused, even after the newest row is deleted
    PrimaryKeyAutoincrement,
    NotNull,
    Unique,
}

impl ColumnConstraint {
    fn as_sql(&self) -> &'static str {
        match self {
            ColumnConstraint::PrimaryKeyAutoincrement => "PRIMARY KEY AUTOINCREMENT",
            ColumnConstraint::NotNull => "NOT NULL",
            ColumnConstraint::Unique => "UNIQUE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexDefinition {
    pub name: String,
    pub columns: Vec<String>,
    pub unique: bool,
}

impl IndexDefinition {
    pub fn new(name: &str, columns: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            unique: false,
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parcel_schema_statements() {
        let statements = Schema::parcel().statements();
        assert_eq!(
            statements,
            vec![
                "CREATE TABLE IF NOT EXISTS parcel (number INTEGER PRIMARY KEY AUTOINCREMENT, \
                 client INTEGER NOT NULL, status TEXT NOT NULL, address TEXT NOT NULL, \
                 created_at TEXT NOT NULL)"
                    .to_string(),
                "CREATE INDEX IF NOT EXISTS parcel_client_idx ON parcel (client)".to_string(),
            ]
        );
    }

    #[test]
    fn test_unique_index_statement() {
        let table = TableDefinition::new("labels")
            .add_column(
                ColumnDefinition::new("code", DataType::Text)
                    .with_constraint(ColumnConstraint::NotNull)
                    .with_constraint(ColumnConstraint::Unique),
            )
            .add_index(IndexDefinition::new("labels_code_idx", &["code"]).unique());
        assert_eq!(
            table.create_statement(),
            "CREATE TABLE IF NOT EXISTS labels (code TEXT NOT NULL UNIQUE)"
        );
        assert_eq!(
            table.index_statements(),
            vec!["CREATE UNIQUE INDEX IF NOT EXISTS labels_code_idx ON labels (code)".to_string()]
        );
    }

    #[test]
    fn test_apply_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        let schema = Schema::parcel();
        schema.apply(&conn).unwrap();
        schema.apply(&conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'parcel'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 1);
    }
}
