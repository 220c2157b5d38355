//! DDL generation for tables
//!
//! Renders the `CREATE TABLE` statement for a table's current schema.
//! Identifiers are emitted unquoted and clauses follow a fixed order.

use crate::column::{Column, ForeignKey};
use crate::table::Table;

const INDENT: &str = "    ";

/// DDL Generator for creating SQL statements from tables
///
/// This is a stateless utility; all methods are associated functions
/// that take the schema data as input.
pub struct DdlGenerator;

impl DdlGenerator {
    /// Generate CREATE TABLE statement
    pub fn generate_create_table(table: &Table) -> String {
        let schema = table.column_repository();
        let definitions: Vec<String> = schema
            .columns()
            .iter()
            .map(Self::generate_column_definition)
            .chain(
                schema
                    .foreign_keys()
                    .iter()
                    .map(Self::generate_foreign_key_constraint),
            )
            .collect();

        format!(
            "CREATE TABLE {} (\n{}{}\n)",
            table.table_name(),
            INDENT,
            definitions.join(&format!(",\n{}", INDENT))
        )
    }

    /// Generate column definition SQL.
    ///
    /// Clause order: DEFAULT, PRIMARY KEY, AUTO_INCREMENT, NOT NULL, UNIQUE.
    pub fn generate_column_definition(column: &Column) -> String {
        let mut def = format!("{} {}", column.name(), column.data_type());

        if let Some(default) = column.default_value() {
            def.push_str(&format!(" DEFAULT {}", default));
        }
        if column.is_pk() {
            def.push_str(" PRIMARY KEY");
        }
        if column.auto_increment() {
            def.push_str(" AUTO_INCREMENT");
        }
        if column.not_null() {
            def.push_str(" NOT NULL");
        }
        if column.unique() {
            def.push_str(" UNIQUE");
        }

        def
    }

    /// Generate foreign key constraint SQL fragment
    pub fn generate_foreign_key_constraint(fk: &ForeignKey) -> String {
        format!(
            "FOREIGN KEY ({}) REFERENCES {}({})",
            fk.name, fk.reference_table_name, fk.reference_column_name
        )
    }
}
