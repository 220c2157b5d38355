//! Table: a named schema with its rows
//!
//! Every mutation returns `&mut Self` so calls can be chained. Failures
//! from the repositories never escape; they are logged and kept as
//! [`Diagnostic`]s, and the failed step is skipped.

use crate::column::{Column, ColumnSpec, ForeignKey};
use crate::column_repository::ColumnRepository;
use crate::ddl::DdlGenerator;
use crate::row::{Row, RowRepository, RowValues};
use crate::validation::Diagnostic;

#[derive(Debug, Clone)]
pub struct Table {
    table_name: String,
    column_repository: ColumnRepository,
    row_repository: RowRepository,
    diagnostics: Vec<Diagnostic>,
}

impl Table {
    /// Create a table with an empty schema and no rows
    pub fn new(table_name: impl Into<String>) -> Self {
        Self::from_parts(table_name, ColumnRepository::new(), RowRepository::new())
    }

    /// Compose a table from existing repositories
    pub fn from_parts(
        table_name: impl Into<String>,
        column_repository: ColumnRepository,
        row_repository: RowRepository,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            column_repository,
            row_repository,
            diagnostics: Vec::new(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn column_repository(&self) -> &ColumnRepository {
        &self.column_repository
    }

    pub fn row_repository(&self) -> &RowRepository {
        &self.row_repository
    }

    pub fn columns(&self) -> &[Column] {
        self.column_repository.columns()
    }

    pub fn foreign_keys(&self) -> &[ForeignKey] {
        self.column_repository.foreign_keys()
    }

    pub fn rows(&self) -> &[Row] {
        self.row_repository.rows()
    }

    /// Non-fatal failures recorded so far
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Drain the recorded diagnostics
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    fn record(&mut self, operation: &str, message: String) {
        tracing::warn!(
            table = %self.table_name,
            operation,
            "{}",
            message
        );
        self.diagnostics.push(Diagnostic::new(operation, message));
    }

    pub fn add_column(&mut self, spec: ColumnSpec) -> &mut Self {
        if let Err(e) = self.column_repository.add_column(spec) {
            self.record("add_column", format!("Something went wrong: {}", e));
        }
        self
    }

    pub fn remove_column(&mut self, column_name: &str) -> &mut Self {
        if self.column_repository.column(column_name).is_none() {
            let valid: Vec<&str> = self.columns().iter().map(|c| c.name()).collect();
            let message = format!(
                "Invalid column name '{}'. Must be one of: {}",
                column_name,
                valid.join(", ")
            );
            self.record("remove_column", message);
            return self;
        }

        self.column_repository.remove_column(column_name);
        self
    }

    /// Add a foreign key after checking that `reference_column_name` is a
    /// column of `reference_table`
    pub fn add_foreign_key(
        &mut self,
        name: &str,
        reference_table: &Table,
        reference_column_name: &str,
    ) -> &mut Self {
        if reference_table
            .column_repository
            .column(reference_column_name)
            .is_none()
        {
            self.record(
                "add_foreign_key",
                format!(
                    "{} doesn't exist in the {} table",
                    reference_column_name, reference_table.table_name
                ),
            );
            return self;
        }

        if let Err(e) = self.column_repository.add_foreign_key(
            name,
            &reference_table.table_name,
            reference_column_name,
        ) {
            self.record("add_foreign_key", format!("Something went wrong: {}", e));
        }
        self
    }

    pub fn remove_foreign_key(&mut self, key_name: &str) -> &mut Self {
        if !self.column_repository.remove_foreign_key(key_name) {
            self.record(
                "remove_foreign_key",
                format!("Foreign key '{}' doesn't exist", key_name),
            );
        }
        self
    }

    /// Validate and insert a row against the current schema
    pub fn add_row(&mut self, values: RowValues) -> &mut Self {
        let result = self.row_repository.try_add_row(
            values,
            self.column_repository.columns(),
            self.column_repository.foreign_keys(),
        );
        if let Err(e) = result {
            self.record("add_row", format!("Failed to create a row: {}", e));
        }
        self
    }

    pub fn remove_row(&mut self, row: &Row) -> &mut Self {
        if !self.row_repository.remove_row(row) {
            self.record("remove_row", "Row doesn't exist".to_string());
        }
        self
    }

    /// Render the CREATE TABLE statement
    pub fn to_create_statement(&self) -> String {
        DdlGenerator::generate_create_table(self)
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_create_statement())
    }
}
