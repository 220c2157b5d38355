//! Column repository
//!
//! Owns the columns and foreign keys of a single table. Schema mutations
//! return [`SchemaError`] so callers decide whether a failure is fatal.

use crate::column::{Column, ColumnSpec, ForeignKey};
use crate::error::{SchemaError, SchemaResult};

/// Ordered columns and foreign keys of one table.
///
/// No two entries, columns and foreign keys combined, share a name.
#[derive(Debug, Clone, Default)]
pub struct ColumnRepository {
    columns: Vec<Column>,
    foreign_keys: Vec<ForeignKey>,
}

impl ColumnRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn foreign_key(&self, name: &str) -> Option<&ForeignKey> {
        self.foreign_keys.iter().find(|fk| fk.name == name)
    }

    /// Whether a column or foreign key with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some() || self.foreign_key(name).is_some()
    }

    /// Column names followed by foreign key names
    pub fn field_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|c| c.name())
            .chain(self.foreign_keys.iter().map(|fk| fk.name.as_str()))
            .collect()
    }

    fn ensure_name_free(&self, name: &str) -> SchemaResult<()> {
        if self.contains(name) {
            return Err(SchemaError::NameCollision(name.to_string()));
        }
        Ok(())
    }

    /// Validate and append a column
    pub fn add_column(&mut self, spec: ColumnSpec) -> SchemaResult<&mut Self> {
        self.ensure_name_free(&spec.name)?;
        let column = Column::from_spec(spec)?;

        tracing::debug!(
            column = %column.name(),
            data_type = %column.data_type(),
            "Column added"
        );
        self.columns.push(column);
        Ok(self)
    }

    /// Remove a column by name. Foreign keys and rows are left untouched.
    pub fn remove_column(&mut self, name: &str) -> bool {
        match self.columns.iter().position(|c| c.name() == name) {
            Some(index) => {
                self.columns.remove(index);
                tracing::debug!(column = %name, "Column removed");
                true
            }
            None => {
                tracing::warn!(column = %name, "Column doesn't exist");
                false
            }
        }
    }

    /// Append a foreign key.
    ///
    /// The referenced column is not checked here; `Table::add_foreign_key`
    /// does that against the referenced table.
    pub fn add_foreign_key(
        &mut self,
        name: &str,
        reference_table_name: &str,
        reference_column_name: &str,
    ) -> SchemaResult<&mut Self> {
        self.ensure_name_free(name)?;

        tracing::debug!(
            foreign_key = %name,
            references = %format!("{}({})", reference_table_name, reference_column_name),
            "Foreign key added"
        );
        self.foreign_keys.push(ForeignKey::new(
            name,
            reference_table_name,
            reference_column_name,
        ));
        Ok(self)
    }

    /// Remove a foreign key by name
    pub fn remove_foreign_key(&mut self, name: &str) -> bool {
        match self.foreign_keys.iter().position(|fk| fk.name == name) {
            Some(index) => {
                self.foreign_keys.remove(index);
                tracing::debug!(foreign_key = %name, "Foreign key removed");
                true
            }
            None => {
                tracing::warn!(foreign_key = %name, "Foreign key doesn't exist");
                false
            }
        }
    }
}
