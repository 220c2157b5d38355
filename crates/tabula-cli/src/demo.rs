//! Built-in demo catalog and showcase queries

use tabula_query::{ColumnSelector, OrderBySelector, QueryBuilder};
use tabula_schema::{ColumnSpec, DataType, RowValues, Table, Value};

use crate::catalog::Catalog;

pub fn users() -> Table {
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
        )
        .add_column(ColumnSpec::new("email", DataType::Text).not_null())
        .add_column(ColumnSpec::new("created_at", DataType::DateTime).default("CURRENT_TIMESTAMP"))
        .add_row(
            RowValues::new()
                .with("username", "john_doe")
                .with("email", "john@example.com"),
        )
        .add_row(
            RowValues::new()
                .with("username", "jane_smith")
                .with("email", "jane@example.com"),
        );
    users
}

pub fn orders(users: &Table) -> Table {
    let mut orders = Table::new("orders");
    orders
        .add_column(
            ColumnSpec::new("id", DataType::Int)
                .primary_key()
                .auto_increment(),
        )
        .add_column(ColumnSpec::new("total", DataType::Decimal).not_null())
        .add_column(ColumnSpec::new("order_date", DataType::DateTime).default("CURRENT_TIMESTAMP"))
        .add_foreign_key("user_id", users, "id")
        .add_row(
            RowValues::new()
                .with("user_id", 1)
                .with("total", Value::Decimal("99.99".to_string())),
        )
        .add_row(
            RowValues::new()
                .with("user_id", 2)
                .with("total", Value::Decimal("149.99".to_string())),
        );
    orders
}

pub fn products() -> Table {
    let mut products = Table::new("products");
    products
        .add_column(
            ColumnSpec::new("id", DataType::Int)
                .primary_key()
                .auto_increment(),
        )
        .add_column(ColumnSpec::new("name", DataType::Text).not_null())
        .add_column(ColumnSpec::new("price", DataType::Decimal).not_null())
        .add_column(ColumnSpec::new("stock", DataType::Int).default("0"))
        .add_row(
            RowValues::new()
                .with("name", "Laptop")
                .with("price", Value::Decimal("999.99".to_string()))
                .with("stock", 50),
        )
        .add_row(
            RowValues::new()
                .with("name", "Mouse")
                .with("price", Value::Decimal("24.99".to_string()))
                .with("stock", 100),
        );
    products
}

/// users, orders and products with two rows each
pub fn catalog() -> Catalog {
    let users = users();
    let orders = orders(&users);
    Catalog::from_tables(vec![users, orders, products()])
}

/// Titled example queries over the demo tables
pub fn showcase<'a>(
    users: &'a Table,
    orders: &'a Table,
    products: &'a Table,
) -> Vec<(&'static str, QueryBuilder<'a>)> {
    vec![
        (
            "Basic query",
            QueryBuilder::new(users).select(["username", "email"]),
        ),
        (
            "Query with conditions",
            QueryBuilder::new(orders)
                .select(["id", "total"])
                .where_gt("total", 100)
                .order_by(["order_date"])
                .limit(10),
        ),
        (
            "Aggregations and grouping",
            QueryBuilder::new(orders)
                .select(["user_id"])
                .avg(["total"])
                .sum(["total"])
                .group_by(["user_id"]),
        ),
        ("Empty select", QueryBuilder::new(users)),
        (
            "Distinct values",
            QueryBuilder::new(users).select(["email"]).distinct(true),
        ),
        (
            "Aggregations with aliases",
            QueryBuilder::new(products)
                .avg([ColumnSelector::new("price").alias("avg_price")])
                .sum([ColumnSelector::new("stock").alias("total_stock")]),
        ),
        (
            "Complex ordering",
            QueryBuilder::new(products)
                .select(["name", "price", "stock"])
                .order_by([OrderBySelector::desc("price"), OrderBySelector::desc("stock")])
                .limit(5),
        ),
        (
            "Offset pagination",
            QueryBuilder::new(users)
                .select(["username", "email"])
                .order_by(["username"])
                .limit(10)
                .offset(20),
        ),
        (
            "Unknown column is rejected",
            QueryBuilder::new(users)
                .select(["name", "email"])
                .where_in("id", [1, 2]),
        ),
    ]
}
