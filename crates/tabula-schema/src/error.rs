//! Schema and row errors

use thiserror::Error;

pub type SchemaResult<T> = Result<T, SchemaError>;
pub type RowResult<T> = Result<T, RowError>;

/// Errors raised by schema mutations on a column repository
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Column '{0}' already exists in table")]
    NameCollision(String),

    #[error("Invalid data type '{given}'. Must be one of: {valid}")]
    InvalidDataType { given: String, valid: String },

    #[error("Constraint violation on column '{column}': {message}")]
    Constraint { column: String, message: String },

    #[error("Invalid default value '{value}' for type {data_type}")]
    DefaultValueType { value: String, data_type: String },
}

/// Errors raised while validating a row against a table schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("Missing required values for columns: {}", .0.join(", "))]
    MissingValues(Vec<String>),

    #[error("Invalid type for column {column}: expected {expected}")]
    InvalidType { column: String, expected: String },
}
