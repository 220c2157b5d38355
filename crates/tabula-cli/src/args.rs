//! Parsers for textual query arguments
//!
//! `--select total:sum_total`, `--order-by price:desc` and
//! `--where total__gt=100` style arguments are turned into the typed
//! selectors and conditions the query builder takes.

use tabula_query::{ColumnSelector, Condition, Operator, OrderBySelector};
use tabula_schema::Value;

/// `column` or `column:alias`
pub fn parse_selector(s: &str) -> Result<ColumnSelector, String> {
    match s.split_once(':') {
        Some((column, alias)) if !column.is_empty() && !alias.is_empty() => {
            Ok(ColumnSelector::new(column).alias(alias))
        }
        Some(_) => Err(format!("Invalid column selector '{}'", s)),
        None if s.is_empty() => Err("Column name cannot be empty".to_string()),
        None => Ok(ColumnSelector::new(s)),
    }
}

/// `column`, `column:asc` or `column:desc`
pub fn parse_order(s: &str) -> Result<OrderBySelector, String> {
    match s.split_once(':') {
        Some((column, dir)) if dir.eq_ignore_ascii_case("desc") => {
            Ok(OrderBySelector::desc(column))
        }
        Some((column, dir)) if dir.eq_ignore_ascii_case("asc") => {
            Ok(OrderBySelector::asc(column))
        }
        Some((_, dir)) => Err(format!(
            "Invalid sort direction '{}', expected asc or desc",
            dir
        )),
        None => Ok(OrderBySelector::asc(s)),
    }
}

/// `field=value` or `field__op=value`, where `op` is one of
/// eq, gt, lt, gte, lte, like, in. Values for `in` are comma separated.
pub fn parse_condition(s: &str) -> Result<Condition, String> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected field=value, got '{}'", s))?;

    let (field, operator) = match key.split_once("__") {
        Some((field, suffix)) => {
            let operator = Operator::from_suffix(suffix)
                .ok_or_else(|| format!("Unknown operator '{}' in '{}'", suffix, key))?;
            (field, operator)
        }
        None => (key, Operator::Eq),
    };

    if field.is_empty() {
        return Err(format!("Missing field name in '{}'", s));
    }

    let value = match operator {
        Operator::In => Value::List(raw.split(',').map(|v| parse_value(v.trim())).collect()),
        Operator::Like => Value::Text(raw.to_string()),
        _ => parse_value(raw),
    };

    Ok(Condition::new(field, operator, value))
}

/// Interpret a literal typed on the command line
pub fn parse_value(raw: &str) -> Value {
    if raw.eq_ignore_ascii_case("null") {
        return Value::Null;
    }
    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Int(i);
    }
    if raw.contains('.') && raw.parse::<f64>().is_ok() {
        return Value::Decimal(raw.to_string());
    }
    if let Some(quoted) = raw.strip_prefix('\'').and_then(|r| r.strip_suffix('\'')) {
        return Value::Text(quoted.to_string());
    }
    Value::Text(raw.to_string())
}
