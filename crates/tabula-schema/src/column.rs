//! Column and foreign key models

use crate::error::{SchemaError, SchemaResult};
use crate::types::{DataType, Value};

/// Data type as requested by a caller: either already known, or a type name
/// that still has to be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataTypeRef {
    Known(DataType),
    Named(String),
}

impl DataTypeRef {
    /// Resolve to a known data type
    pub fn resolve(&self) -> SchemaResult<DataType> {
        match self {
            DataTypeRef::Known(data_type) => Ok(*data_type),
            DataTypeRef::Named(name) => name.parse(),
        }
    }
}

impl From<DataType> for DataTypeRef {
    fn from(data_type: DataType) -> Self {
        DataTypeRef::Known(data_type)
    }
}

impl From<&str> for DataTypeRef {
    fn from(name: &str) -> Self {
        DataTypeRef::Named(name.to_string())
    }
}

impl From<String> for DataTypeRef {
    fn from(name: String) -> Self {
        DataTypeRef::Named(name)
    }
}

/// Unvalidated request for a new column
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub name: String,
    pub data_type: DataTypeRef,
    pub default_value: Option<Value>,
    pub is_pk: bool,
    pub auto_increment: bool,
    pub not_null: bool,
    pub unique: bool,
}

impl ColumnSpec {
    /// Create a spec with every constraint switched off
    pub fn new(name: impl Into<String>, data_type: impl Into<DataTypeRef>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            default_value: None,
            is_pk: false,
            auto_increment: false,
            not_null: false,
            unique: false,
        }
    }

    /// Builder: set default value
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Builder: set as primary key
    pub fn primary_key(mut self) -> Self {
        self.is_pk = true;
        self
    }

    /// Builder: set as auto increment
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Builder: set as not null
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Builder: set as unique
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

/// A validated column. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data_type: DataType,
    default_value: Option<Value>,
    is_pk: bool,
    auto_increment: bool,
    not_null: bool,
    unique: bool,
}

impl Column {
    /// Validate a spec and build the column.
    ///
    /// Name uniqueness is checked by the owning repository, not here.
    pub fn from_spec(spec: ColumnSpec) -> SchemaResult<Self> {
        let data_type = spec.data_type.resolve()?;

        if spec.auto_increment {
            if !spec.is_pk {
                return Err(SchemaError::Constraint {
                    column: spec.name,
                    message: "AUTO_INCREMENT can only be used with PRIMARY KEY".to_string(),
                });
            }
            if !data_type.is_integer() {
                return Err(SchemaError::Constraint {
                    column: spec.name,
                    message: "AUTO_INCREMENT can only be used with INT or BIGINT data types"
                        .to_string(),
                });
            }
        }

        // A NULL default is no default
        let default_value = spec.default_value.filter(|v| !v.is_null());
        if let Some(ref default) = default_value {
            let text = default.to_string();
            if !data_type.accepts(&text) {
                return Err(SchemaError::DefaultValueType {
                    value: text,
                    data_type: data_type.to_string(),
                });
            }
        }

        Ok(Self {
            name: spec.name,
            data_type,
            default_value,
            is_pk: spec.is_pk,
            auto_increment: spec.auto_increment,
            not_null: spec.not_null,
            unique: spec.unique,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    pub fn is_pk(&self) -> bool {
        self.is_pk
    }

    pub fn auto_increment(&self) -> bool {
        self.auto_increment
    }

    pub fn not_null(&self) -> bool {
        self.not_null
    }

    pub fn unique(&self) -> bool {
        self.unique
    }

    /// A value must be supplied for this column when inserting a row
    pub fn is_required(&self) -> bool {
        self.not_null && self.default_value.is_none()
    }
}

/// Foreign key column referencing a column of another table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// Local column name
    pub name: String,
    /// Referenced table name
    pub reference_table_name: String,
    /// Referenced column name
    pub reference_column_name: String,
}

impl ForeignKey {
    pub fn new(
        name: impl Into<String>,
        reference_table_name: impl Into<String>,
        reference_column_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            reference_table_name: reference_table_name.into(),
            reference_column_name: reference_column_name.into(),
        }
    }
}
