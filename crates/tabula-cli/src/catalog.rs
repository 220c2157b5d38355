//! Table catalogs loaded from JSON
//!
//! A catalog file lists tables in order. Each table is built through the
//! `Table` API, so every schema and row check applies and failures end up
//! as diagnostics rather than aborting the load. A foreign key can only
//! reference a table defined earlier in the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tabula_schema::{ColumnSpec, Diagnostic, RowValues, Table, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogFile {
    pub tables: Vec<TableDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableDef {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyDef>,
    #[serde(default)]
    pub rows: Vec<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub auto_increment: bool,
    #[serde(default)]
    pub not_null: bool,
    #[serde(default)]
    pub unique: bool,
}

impl ColumnDef {
    fn to_spec(&self) -> ColumnSpec {
        let mut spec = ColumnSpec::new(self.name.clone(), self.data_type.clone());
        spec.default_value = self.default.as_ref().map(json_to_value);
        spec.is_pk = self.primary_key;
        spec.auto_increment = self.auto_increment;
        spec.not_null = self.not_null;
        spec.unique = self.unique;
        spec
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForeignKeyDef {
    pub name: String,
    pub references: String,
    pub column: String,
}

/// Convert a JSON cell into a table value
pub fn json_to_value(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if n.is_u64() {
                // Beyond i64, kept exact
                Value::Decimal(n.to_string())
            } else {
                Value::Float(n.as_f64().unwrap_or_default())
            }
        }
        serde_json::Value::String(s) => Value::Text(s.clone()),
        serde_json::Value::Array(items) => Value::List(items.iter().map(json_to_value).collect()),
        serde_json::Value::Object(_) => Value::Text(value.to_string()),
    }
}

/// An ordered set of tables plus the diagnostics produced while building them
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: Vec<Table>,
    diagnostics: Vec<Diagnostic>,
}

impl Catalog {
    /// Wrap already built tables, collecting their diagnostics
    pub fn from_tables(tables: Vec<Table>) -> Self {
        let mut catalog = Self::default();
        for table in tables {
            catalog.push(table);
        }
        catalog
    }

    /// Read and build a catalog file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {:?}", path))?;
        let file: CatalogFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog file: {:?}", path))?;

        tracing::info!(path = %path.display(), tables = file.tables.len(), "Loading catalog");
        Ok(Self::build(&file))
    }

    /// Build every table of a parsed catalog file, in order
    pub fn build(file: &CatalogFile) -> Self {
        let mut catalog = Self::default();

        for def in &file.tables {
            let mut table = Table::new(def.name.clone());

            for column in &def.columns {
                table.add_column(column.to_spec());
            }

            for fk in &def.foreign_keys {
                match catalog.get(&fk.references) {
                    Some(reference) => {
                        table.add_foreign_key(&fk.name, reference, &fk.column);
                    }
                    None => catalog.diagnostics.push(Diagnostic::new(
                        format!("{}.add_foreign_key", def.name),
                        format!(
                            "Referenced table '{}' must be defined before '{}'",
                            fk.references, def.name
                        ),
                    )),
                }
            }

            for row in &def.rows {
                let values: RowValues = row
                    .iter()
                    .map(|(name, value)| (name.as_str(), json_to_value(value)))
                    .collect();
                table.add_row(values);
            }

            catalog.push(table);
        }

        catalog
    }

    fn push(&mut self, mut table: Table) {
        let name = table.table_name().to_string();
        self.diagnostics.extend(
            table
                .take_diagnostics()
                .into_iter()
                .map(|d| Diagnostic::new(format!("{}.{}", name, d.operation), d.message)),
        );
        self.tables.push(table);
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.table_name() == name)
    }

    /// Look up a table, failing with the list of known tables
    pub fn require(&self, name: &str) -> Result<&Table> {
        self.get(name).with_context(|| {
            let known: Vec<&str> = self.tables.iter().map(|t| t.table_name()).collect();
            format!("Unknown table '{}'. Known tables: {}", name, known.join(", "))
        })
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SHOP: &str = r#"{
        "tables": [
            {
                "name": "users",
                "columns": [
                    {"name": "id", "type": "int", "primary_key": true, "auto_increment": true},
                    {"name": "email", "type": "TEXT", "not_null": true, "unique": true}
                ],
                "rows": [{"email": "a@example.com"}, {"id": 2}]
            },
            {
                "name": "orders",
                "columns": [
                    {"name": "id", "type": "INT", "primary_key": true},
                    {"name": "total", "type": "DECIMAL", "default": 0},
                    {"name": "note", "type": "VARCHAR"}
                ],
                "foreign_keys": [
                    {"name": "user_id", "references": "users", "column": "id"},
                    {"name": "coupon_id", "references": "coupons", "column": "id"}
                ],
                "rows": [{"id": 1, "user_id": 1, "total": 12.5}]
            }
        ]
    }"#;

    fn shop() -> Catalog {
        let file: CatalogFile = serde_json::from_str(SHOP).expect("valid catalog json");
        Catalog::build(&file)
    }

    #[test]
    fn test_build_tables_in_order() {
        let catalog = shop();
        let names: Vec<&str> = catalog.tables().iter().map(|t| t.table_name()).collect();
        assert_eq!(names, vec!["users", "orders"]);
    }

    #[test]
    fn test_build_renders_ddl() {
        let catalog = shop();
        let orders = catalog.get("orders").expect("orders table");
        assert_eq!(
            orders.to_string(),
            "CREATE TABLE orders (\n    id INT PRIMARY KEY,\n    total DECIMAL DEFAULT 0,\n    FOREIGN KEY (user_id) REFERENCES users(id)\n)"
        );
    }

    #[test]
    fn test_build_collects_diagnostics() {
        let catalog = shop();
        let operations: Vec<&str> = catalog
            .diagnostics()
            .iter()
            .map(|d| d.operation.as_str())
            .collect();

        assert_eq!(
            operations,
            vec!["users.add_row", "orders.add_foreign_key", "orders.add_column"]
        );
    }

    #[test]
    fn test_rows_are_loaded() {
        let catalog = shop();
        let users = catalog.get("users").expect("users table");
        let orders = catalog.get("orders").expect("orders table");

        assert_eq!(users.rows().len(), 1);
        assert_eq!(orders.rows()[0].get("total"), Some(&Value::Float(12.5)));
    }

    #[test]
    fn test_require_unknown_table() {
        let err = shop().require("invoices").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown table 'invoices'. Known tables: users, orders"
        );
    }

    #[test]
    fn test_json_to_value() {
        let json = serde_json::json!([1, 2.5, "x", null, true]);
        assert_eq!(
            json_to_value(&json),
            Value::List(vec![
                Value::Int(1),
                Value::Float(2.5),
                Value::from("x"),
                Value::Null,
                Value::Bool(true),
            ])
        );
    }

    #[test]
    fn test_json_integer_beyond_i64_stays_exact() {
        let json = serde_json::json!(18446744073709551615u64);
        assert_eq!(
            json_to_value(&json),
            Value::Decimal("18446744073709551615".to_string())
        );
        assert_eq!(
            json_to_value(&serde_json::json!(i64::MAX)),
            Value::Int(i64::MAX)
        );
    }

    #[test]
    fn test_null_default_in_catalog_keeps_column_required() {
        let file: CatalogFile = serde_json::from_str(
            r#"{"tables": [{
                "name": "contacts",
                "columns": [{"name": "email", "type": "TEXT", "not_null": true, "default": null}],
                "rows": [{}]
            }]}"#,
        )
        .expect("valid catalog json");
        let catalog = Catalog::build(&file);
        let contacts = catalog.get("contacts").expect("contacts table");

        assert!(contacts.rows().is_empty());
        assert_eq!(
            contacts.to_string(),
            "CREATE TABLE contacts (\n    email TEXT NOT NULL\n)"
        );
    }
}
