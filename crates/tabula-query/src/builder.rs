//! Fluent SELECT builder
//!
//! Every method checks the column and foreign key names it is given against
//! the bound table's current schema. A call naming an unknown field is
//! dropped as a whole: a warning is logged, a [`Diagnostic`] is recorded
//! and the builder state stays as it was.

use indexmap::IndexMap;
use tabula_schema::{Diagnostic, Table, Value};

use crate::condition::{Condition, Operator};
use crate::selector::{ColumnSelector, OrderBySelector, Selection};

#[derive(Debug, Clone)]
pub struct QueryBuilder<'a> {
    table: &'a Table,
    selection: Selection,
    avg: Vec<ColumnSelector>,
    sum: Vec<ColumnSelector>,
    where_conditions: IndexMap<String, Condition>,
    group_by: Vec<String>,
    order_by: Vec<OrderBySelector>,
    limit: Option<u64>,
    offset: Option<u64>,
    is_distinct: bool,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> QueryBuilder<'a> {
    /// Start a `SELECT * FROM <table>` query
    pub fn new(table: &'a Table) -> Self {
        Self {
            table,
            selection: Selection::All,
            avg: Vec::new(),
            sum: Vec::new(),
            where_conditions: IndexMap::new(),
            group_by: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
            is_distinct: false,
            diagnostics: Vec::new(),
        }
    }

    /// Returns true when every name is a column or foreign key of the table.
    /// Otherwise records `message` against `operation`.
    fn validate_fields<'n>(
        &mut self,
        operation: &str,
        names: impl IntoIterator<Item = &'n str>,
        message: &str,
    ) -> bool {
        let table = self.table;
        let schema = table.column_repository();
        let unknown: Vec<&str> = names.into_iter().filter(|n| !schema.contains(n)).collect();
        if unknown.is_empty() {
            return true;
        }

        let message = format!("{} (unknown: {})", message, unknown.join(", "));
        tracing::warn!(
            table = %table.table_name(),
            operation,
            "{}",
            message
        );
        self.diagnostics.push(Diagnostic::new(operation, message));
        false
    }

    /// Add columns to the SELECT list.
    ///
    /// The first accepted call replaces `*`; later calls append.
    pub fn select<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ColumnSelector>,
    {
        let columns: Vec<ColumnSelector> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return self;
        }

        let valid = self.validate_fields(
            "select",
            columns.iter().map(|c| c.column.as_str()),
            "Make sure you pass only existing columns and foreign keys to SELECT",
        );
        if valid {
            match self.selection {
                Selection::All => self.selection = Selection::Columns(columns),
                Selection::Columns(ref mut selected) => selected.extend(columns),
            }
        }
        self
    }

    /// Add `AVG(column)` aggregates
    pub fn avg<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ColumnSelector>,
    {
        let columns: Vec<ColumnSelector> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return self;
        }

        if self.validate_fields(
            "avg",
            columns.iter().map(|c| c.column.as_str()),
            "Cannot AVG properties that don't exist",
        ) {
            self.avg.extend(columns);
        }
        self
    }

    /// Add `SUM(column)` aggregates
    pub fn sum<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ColumnSelector>,
    {
        let columns: Vec<ColumnSelector> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return self;
        }

        if self.validate_fields(
            "sum",
            columns.iter().map(|c| c.column.as_str()),
            "Cannot SUM properties that don't exist",
        ) {
            self.sum.extend(columns);
        }
        self
    }

    /// Set whether the SELECT list is prefixed with DISTINCT
    pub fn distinct(mut self, is_distinct: bool) -> Self {
        self.is_distinct = is_distinct;
        self
    }

    /// Add WHERE conditions, all or nothing.
    ///
    /// A condition on a field that already has one replaces it.
    pub fn filter<I>(mut self, conditions: I) -> Self
    where
        I: IntoIterator<Item = Condition>,
    {
        let conditions: Vec<Condition> = conditions.into_iter().collect();
        if conditions.is_empty() {
            return self;
        }

        if self.validate_fields(
            "where",
            conditions.iter().map(|c| c.field.as_str()),
            "Make sure you pass only existing fields to your WHERE clause",
        ) {
            for condition in conditions {
                self.where_conditions
                    .insert(condition.field.clone(), condition);
            }
        }
        self
    }

    fn filter_one(self, field: &str, operator: Operator, value: Value) -> Self {
        self.filter([Condition::new(field, operator, value)])
    }

    /// `field = value`
    pub fn where_eq(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter_one(field, Operator::Eq, value.into())
    }

    /// `field > value`
    pub fn where_gt(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter_one(field, Operator::Gt, value.into())
    }

    /// `field < value`
    pub fn where_lt(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter_one(field, Operator::Lt, value.into())
    }

    /// `field >= value`
    pub fn where_gte(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter_one(field, Operator::Gte, value.into())
    }

    /// `field <= value`
    pub fn where_lte(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter_one(field, Operator::Lte, value.into())
    }

    /// `field LIKE 'pattern'`
    pub fn where_like(self, field: &str, pattern: impl Into<String>) -> Self {
        self.filter([Condition::like(field, pattern)])
    }

    /// `field IN (values...)`
    pub fn where_in<I>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.filter([Condition::is_in(field, values)])
    }

    /// Add ORDER BY entries
    pub fn order_by<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<OrderBySelector>,
    {
        let columns: Vec<OrderBySelector> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return self;
        }

        if self.validate_fields(
            "order_by",
            columns.iter().map(|c| c.column.as_str()),
            "Cannot ORDER BY properties that don't exist",
        ) {
            self.order_by.extend(columns);
        }
        self
    }

    /// Add GROUP BY columns
    pub fn group_by<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return self;
        }

        if self.validate_fields(
            "group_by",
            columns.iter().map(String::as_str),
            "Cannot GROUP BY properties that don't exist",
        ) {
            self.group_by.extend(columns);
        }
        self
    }

    pub fn limit(mut self, value: u64) -> Self {
        self.limit = Some(value);
        self
    }

    pub fn offset(mut self, value: u64) -> Self {
        self.offset = Some(value);
        self
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn avg_columns(&self) -> &[ColumnSelector] {
        &self.avg
    }

    pub fn sum_columns(&self) -> &[ColumnSelector] {
        &self.sum
    }

    /// WHERE conditions keyed by field, in first-insertion order
    pub fn where_conditions(&self) -> &IndexMap<String, Condition> {
        &self.where_conditions
    }

    pub fn group_by_columns(&self) -> &[String] {
        &self.group_by
    }

    pub fn order_by_columns(&self) -> &[OrderBySelector] {
        &self.order_by
    }

    pub fn limit_value(&self) -> Option<u64> {
        self.limit
    }

    pub fn offset_value(&self) -> Option<u64> {
        self.offset
    }

    pub fn is_distinct(&self) -> bool {
        self.is_distinct
    }

    /// Calls that were dropped, and why
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// `*` without an explicit selection; aggregates only follow selected columns
    fn select_list(&self) -> String {
        let Selection::Columns(ref columns) = self.selection else {
            return "*".to_string();
        };

        columns
            .iter()
            .map(|c| c.render(None))
            .chain(self.avg.iter().map(|c| c.render(Some("AVG"))))
            .chain(self.sum.iter().map(|c| c.render(Some("SUM"))))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Render the query text
    pub fn to_sql(&self) -> String {
        let distinct = if self.is_distinct { "DISTINCT " } else { "" };
        let mut sql = format!("SELECT {}{}", distinct, self.select_list());

        sql.push_str(&format!("\nFROM {}", self.table.table_name()));

        if !self.where_conditions.is_empty() {
            let conditions: Vec<String> = self
                .where_conditions
                .values()
                .map(|c| c.to_string())
                .collect();
            sql.push_str(&format!("\nWHERE {}", conditions.join(" AND ")));
        }

        if !self.group_by.is_empty() {
            sql.push_str(&format!("\nGROUP BY {}", self.group_by.join(", ")));
        }

        if !self.order_by.is_empty() {
            let columns: Vec<String> = self.order_by.iter().map(|o| o.render()).collect();
            sql.push_str(&format!("\nORDER BY {}", columns.join(", ")));
        }

        // Zero means unset
        if let Some(limit) = self.limit.filter(|n| *n > 0) {
            sql.push_str(&format!("\nLIMIT {}", limit));
        }

        if let Some(offset) = self.offset.filter(|n| *n > 0) {
            sql.push_str(&format!("\nOFFSET {}", offset));
        }

        sql
    }
}

impl std::fmt::Display for QueryBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_sql())
    }
}
