//! Rows and the row repository

use indexmap::IndexMap;
use uuid::Uuid;

use crate::column::{Column, ForeignKey};
use crate::error::{RowError, RowResult};
use crate::types::Value;

/// Field name to value mapping used to insert a row, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowValues(IndexMap<String, Value>);

impl RowValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set a field value
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// A field counts as present only when it holds a non-NULL value
    fn is_present(&self, name: &str) -> bool {
        self.0.get(name).is_some_and(|v| !v.is_null())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for RowValues {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl std::fmt::Display for RowValues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<String> = self
            .0
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect();
        write!(f, "{{{}}}", fields.join(", "))
    }
}

/// A validated, immutable row.
///
/// Every row gets its own identity at construction; clones share it.
#[derive(Debug, Clone)]
pub struct Row {
    id: Uuid,
    values: RowValues,
}

impl Row {
    /// Validate values against the current schema and build the row.
    ///
    /// Required fields are not-null columns without a default plus every
    /// foreign key. All missing fields are reported together.
    pub fn new(
        columns: &[Column],
        foreign_keys: &[ForeignKey],
        values: RowValues,
    ) -> RowResult<Self> {
        let missing: Vec<String> = columns
            .iter()
            .filter(|c| c.is_required())
            .map(|c| c.name())
            .chain(foreign_keys.iter().map(|fk| fk.name.as_str()))
            .filter(|name| !values.is_present(name))
            .map(str::to_string)
            .collect();

        if !missing.is_empty() {
            return Err(RowError::MissingValues(missing));
        }

        for column in columns {
            let Some(value) = values.get(column.name()) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            if !column.data_type().accepts(&value.to_string()) {
                tracing::debug!(
                    column = %column.name(),
                    value = %value,
                    data_type = %column.data_type(),
                    "Value rejected by type validator"
                );
                return Err(RowError::InvalidType {
                    column: column.name().to_string(),
                    expected: column.data_type().to_string(),
                });
            }
        }

        Ok(Self {
            id: Uuid::new_v4(),
            values,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn values(&self) -> &RowValues {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Row {}

/// Ordered rows of one table.
///
/// Rows are validated only on insertion; later schema changes do not
/// re-validate them.
#[derive(Debug, Clone, Default)]
pub struct RowRepository {
    rows: Vec<Row>,
}

impl RowRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Validate and append a row. Failures are logged, never returned.
    pub fn add_row(
        &mut self,
        values: RowValues,
        columns: &[Column],
        foreign_keys: &[ForeignKey],
    ) -> bool {
        self.try_add_row(values, columns, foreign_keys).is_ok()
    }

    /// Like [`RowRepository::add_row`] but hands the validation error back
    /// to the caller after logging it
    pub fn try_add_row(
        &mut self,
        values: RowValues,
        columns: &[Column],
        foreign_keys: &[ForeignKey],
    ) -> RowResult<()> {
        let rendered = values.to_string();
        match Row::new(columns, foreign_keys, values) {
            Ok(row) => {
                tracing::debug!(row_id = %row.id(), "Row added");
                self.rows.push(row);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    values = %rendered,
                    "Failed to create a row"
                );
                Err(e)
            }
        }
    }

    /// Remove a row by identity
    pub fn remove_row(&mut self, row: &Row) -> bool {
        match self.rows.iter().position(|r| r == row) {
            Some(index) => {
                self.rows.remove(index);
                tracing::debug!(row_id = %row.id(), "Row removed");
                true
            }
            None => {
                tracing::warn!(row_id = %row.id(), "Row doesn't exist");
                false
            }
        }
    }
}

impl<'a> IntoIterator for &'a RowRepository {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnSpec;
    use crate::types::DataType;

    fn user_columns() -> Vec<Column> {
        [
            ColumnSpec::new("id", DataType::Int)
                .primary_key()
                .auto_increment(),
            ColumnSpec::new("username", DataType::Text).not_null(),
            ColumnSpec::new("email", DataType::Text).not_null(),
            ColumnSpec::new("age", DataType::Int),
            ColumnSpec::new("created_at", DataType::DateTime)
                .not_null()
                .default("CURRENT_TIMESTAMP"),
        ]
        .into_iter()
        .map(|spec| Column::from_spec(spec).expect("valid column"))
        .collect()
    }

    fn john() -> RowValues {
        RowValues::new()
            .with("username", "john_doe")
            .with("email", "john@example.com")
    }

    #[test]
    fn test_valid_row_is_accepted() {
        let row = Row::new(&user_columns(), &[], john()).expect("valid row");
        assert_eq!(row.get("username"), Some(&Value::from("john_doe")));
        assert_eq!(row.get("created_at"), None);
    }

    #[test]
    fn test_missing_values_are_reported_together() {
        let err = Row::new(&user_columns(), &[], RowValues::new()).unwrap_err();
        assert_eq!(
            err,
            RowError::MissingValues(vec!["username".to_string(), "email".to_string()])
        );
    }

    #[test]
    fn test_null_counts_as_missing() {
        let values = john().with("email", Value::Null);
        let err = Row::new(&user_columns(), &[], values).unwrap_err();
        assert_eq!(err, RowError::MissingValues(vec!["email".to_string()]));
    }

    #[test]
    fn test_foreign_keys_are_required() {
        let fks = vec![ForeignKey::new("team_id", "teams", "id")];
        let err = Row::new(&user_columns(), &fks, john()).unwrap_err();
        assert_eq!(err, RowError::MissingValues(vec!["team_id".to_string()]));

        let row = Row::new(&user_columns(), &fks, john().with("team_id", 3));
        assert!(row.is_ok());
    }

    #[test]
    fn test_invalid_type_names_column() {
        let values = john().with("age", "thirty");
        let err = Row::new(&user_columns(), &[], values).unwrap_err();
        assert_eq!(
            err,
            RowError::InvalidType {
                column: "age".to_string(),
                expected: "INT".to_string(),
            }
        );
    }

    #[test]
    fn test_optional_null_value_passes() {
        let values = john().with("age", Value::Null);
        assert!(Row::new(&user_columns(), &[], values).is_ok());
    }

    #[test]
    fn test_rejected_row_is_not_appended() {
        let columns = user_columns();
        let mut repo = RowRepository::new();

        assert!(!repo.add_row(RowValues::new().with("username", "x"), &columns, &[]));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_add_and_remove_rows() {
        let columns = user_columns();
        let mut repo = RowRepository::new();

        for name in ["a", "b", "c"] {
            let values = RowValues::new()
                .with("username", name)
                .with("email", format!("{}@example.com", name));
            assert!(repo.add_row(values, &columns, &[]));
        }
        assert_eq!(repo.len(), 3);

        let second = repo.rows()[1].clone();
        assert!(repo.remove_row(&second));
        assert_eq!(repo.len(), 2);

        assert!(!repo.remove_row(&second));
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn test_equal_values_do_not_make_equal_rows() {
        let columns = user_columns();
        let mut repo = RowRepository::new();
        assert!(repo.add_row(john(), &columns, &[]));

        let lookalike = Row::new(&columns, &[], john()).expect("valid row");
        assert!(!repo.remove_row(&lookalike));
        assert_eq!(repo.len(), 1);
    }
}
