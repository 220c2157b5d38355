//! Tests for table composition and DDL rendering

use indoc::indoc;
use pretty_assertions::assert_eq;

use crate::{ColumnSpec, DataType, RowValues, Table, Value};

fn users() -> Table {
    let mut users = Table::new("users");
    users
        .add_column(
            ColumnSpec::new("id", DataType::Int)
                .primary_key()
                .auto_increment(),
        )
        .add_column(
            ColumnSpec::new("username", DataType::Text)
                .not_null()
                .unique(),
        );
    users
}

#[test]
fn test_create_table_for_users() {
    let expected = indoc! {"
        CREATE TABLE users (
            id INT PRIMARY KEY AUTO_INCREMENT,
            username TEXT NOT NULL UNIQUE
        )"};

    assert_eq!(users().to_string(), expected);
}

#[test]
fn test_create_table_with_default_and_foreign_key() {
    let users = users();
    let mut orders = Table::new("orders");
    orders
        .add_column(
            ColumnSpec::new("id", DataType::Int)
                .primary_key()
                .auto_increment(),
        )
        .add_column(ColumnSpec::new("total", DataType::Decimal).not_null())
        .add_column(ColumnSpec::new("order_date", DataType::DateTime).default("CURRENT_TIMESTAMP"))
        .add_foreign_key("user_id", &users, "id");

    let expected = indoc! {"
        CREATE TABLE orders (
            id INT PRIMARY KEY AUTO_INCREMENT,
            total DECIMAL NOT NULL,
            order_date DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (user_id) REFERENCES users(id)
        )"};

    assert_eq!(orders.to_create_statement(), expected);
    assert!(orders.diagnostics().is_empty());
}

#[test]
fn test_failed_steps_are_skipped_and_chain_completes() {
    let mut table = Table::new("products");
    table
        .add_column(ColumnSpec::new("id", DataType::Int).primary_key())
        .add_column(ColumnSpec::new("id", DataType::Text))
        .add_column(ColumnSpec::new("price", "MONEY"))
        .add_column(ColumnSpec::new("stock", DataType::Int).default("lots"))
        .add_column(ColumnSpec::new("serial", DataType::Text).auto_increment())
        .add_column(ColumnSpec::new("name", DataType::Text).not_null());

    let names: Vec<&str> = table.columns().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["id", "name"]);

    let operations: Vec<&str> = table
        .diagnostics()
        .iter()
        .map(|d| d.operation.as_str())
        .collect();
    assert_eq!(operations, vec!["add_column"; 4]);
    assert!(table.diagnostics()[1].message.contains("Must be one of"));
}

#[test]
fn test_foreign_key_to_missing_reference_column_is_skipped() {
    let users = users();
    let mut orders = Table::new("orders");
    orders.add_foreign_key("user_id", &users, "uuid");

    assert!(orders.foreign_keys().is_empty());
    assert_eq!(orders.diagnostics().len(), 1);
    assert_eq!(
        orders.diagnostics()[0].message,
        "uuid doesn't exist in the users table"
    );
}

#[test]
fn test_remove_unknown_column_lists_valid_names() {
    let mut table = users();
    table.remove_column("email");

    assert_eq!(table.columns().len(), 2);
    let diagnostic = &table.diagnostics()[0];
    assert_eq!(diagnostic.operation, "remove_column");
    assert!(diagnostic.message.ends_with("Must be one of: id, username"));

    table.remove_column("username");
    assert_eq!(table.columns().len(), 1);
}

#[test]
fn test_remove_foreign_key() {
    let users = users();
    let mut orders = Table::new("orders");
    orders
        .add_foreign_key("user_id", &users, "id")
        .remove_foreign_key("account_id");
    assert_eq!(orders.foreign_keys().len(), 1);
    assert_eq!(orders.diagnostics().len(), 1);

    orders.remove_foreign_key("user_id");
    assert!(orders.foreign_keys().is_empty());
}

#[test]
fn test_rows_are_validated_against_schema() {
    let mut table = users();
    table
        .add_row(RowValues::new().with("username", "john_doe"))
        .add_row(RowValues::new().with("id", 5))
        .add_row(RowValues::new().with("username", "jane_smith").with("id", "abc"))
        .add_row(RowValues::new().with("username", "jane_smith"));

    assert_eq!(table.rows().len(), 2);
    assert_eq!(table.diagnostics().len(), 2);
    assert!(
        table.diagnostics()[0]
            .message
            .contains("Missing required values for columns: username")
    );
    assert!(
        table.diagnostics()[1]
            .message
            .contains("Invalid type for column id: expected INT")
    );
}

#[test]
fn test_remove_row_by_reference() {
    let mut table = users();
    table
        .add_row(RowValues::new().with("username", "a"))
        .add_row(RowValues::new().with("username", "b"));

    let first = table.rows()[0].clone();
    table.remove_row(&first);
    assert_eq!(table.rows().len(), 1);
    assert_eq!(table.rows()[0].get("username"), Some(&Value::from("b")));

    table.remove_row(&first);
    assert_eq!(table.rows().len(), 1);
    assert_eq!(table.diagnostics().len(), 1);
}

#[test]
fn test_schema_changes_do_not_revalidate_rows() {
    let mut table = users();
    table.add_row(RowValues::new().with("username", "john_doe"));
    table.add_column(ColumnSpec::new("email", DataType::Text).not_null());

    assert_eq!(table.rows().len(), 1);
    assert_eq!(table.rows()[0].get("email"), None);
}

#[test]
fn test_take_diagnostics_drains() {
    let mut table = users();
    table.remove_column("missing");

    assert_eq!(table.take_diagnostics().len(), 1);
    assert!(table.diagnostics().is_empty());
}

#[test]
fn test_not_null_column_with_null_default_stays_required() {
    let mut table = Table::new("contacts");
    table
        .add_column(
            ColumnSpec::new("email", DataType::Text)
                .not_null()
                .default(Value::Null),
        )
        .add_row(RowValues::new());

    assert_eq!(
        table.to_string(),
        "CREATE TABLE contacts (\n    email TEXT NOT NULL\n)"
    );
    assert!(table.rows().is_empty());
    assert_eq!(
        table.diagnostics()[0].message,
        "Failed to create a row: Missing required values for columns: email"
    );
}

#[test]
fn test_row_repository_iterates_in_insertion_order() {
    let mut table = users();
    table
        .add_row(RowValues::new().with("username", "a"))
        .add_row(RowValues::new().with("username", "b"));

    let repository = table.row_repository();
    assert_eq!(repository.len(), 2);

    let names: Vec<String> = repository
        .iter()
        .filter_map(|row| row.get("username").map(ToString::to_string))
        .collect();
    assert_eq!(names, vec!["a", "b"]);

    let mut ids = Vec::new();
    for row in repository {
        ids.push(row.id());
    }
    assert_eq!(ids, table.rows().iter().map(|r| r.id()).collect::<Vec<_>>());
}
