//! Tabula schema model
//!
//! In-memory tables for sketching relational schemas.
//!
//! ## Features
//!
//! - Typed columns with PRIMARY KEY, AUTO_INCREMENT, NOT NULL, UNIQUE and
//!   DEFAULT constraints
//! - Foreign keys checked against the referenced table when added
//! - Row validation against the current schema
//! - CREATE TABLE rendering
//!
//! ## Usage
//!
//! ```rust
//! use tabula_schema::{ColumnSpec, DataType, RowValues, Table};
//!
//! let mut users = Table::new("users");
//! users
//!     .add_column(ColumnSpec::new("id", DataType::Int).primary_key().auto_increment())
//!     .add_column(ColumnSpec::new("username", DataType::Text).not_null().unique())
//!     .add_row(RowValues::new().with("username", "john_doe"));
//!
//! assert_eq!(users.rows().len(), 1);
//! assert!(users.to_string().starts_with("CREATE TABLE users ("));
//! ```

pub mod column;
pub mod column_repository;
pub mod ddl;
pub mod error;
pub mod row;
pub mod table;
pub mod types;
pub mod validation;

// Re-exports for convenience
pub use column::{Column, ColumnSpec, DataTypeRef, ForeignKey};
pub use column_repository::ColumnRepository;
pub use ddl::DdlGenerator;
pub use error::{RowError, RowResult, SchemaError, SchemaResult};
pub use row::{Row, RowRepository, RowValues};
pub use table::Table;
pub use types::{DataType, Value};
pub use validation::Diagnostic;

#[cfg(test)]
mod tests;
