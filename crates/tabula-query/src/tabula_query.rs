//! Query builder for Tabula
//!
//! Renders SQL-like SELECT statements against the schema of a
//! [`tabula_schema::Table`]. Nothing is executed; the output is text.
//!
//! # Example
//!
//! ```
//! use tabula_query::QueryBuilder;
//! use tabula_schema::{ColumnSpec, DataType, Table};
//!
//! let mut orders = Table::new("orders");
//! orders
//!     .add_column(ColumnSpec::new("id", DataType::Int).primary_key())
//!     .add_column(ColumnSpec::new("total", DataType::Decimal));
//!
//! let sql = QueryBuilder::new(&orders)
//!     .select(["id", "total"])
//!     .where_gt("total", 100)
//!     .limit(10)
//!     .to_string();
//!
//! assert_eq!(sql, "SELECT id, total\nFROM orders\nWHERE total > 100\nLIMIT 10");
//! ```

mod builder;
pub mod condition;
pub mod format;
pub mod selector;

pub use builder::QueryBuilder;
pub use condition::{Condition, Operator};
pub use format::format_value;
pub use selector::{ColumnSelector, OrderBySelector, Selection};

#[cfg(test)]
mod tests;
