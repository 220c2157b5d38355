//! Column references used by SELECT, aggregates and ORDER BY

/// A selected column with an optional alias
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelector {
    pub column: String,
    pub alias: Option<String>,
}

impl ColumnSelector {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            alias: None,
        }
    }

    /// Builder: set alias
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Render the selector, wrapping the column in `function` when given
    pub(crate) fn render(&self, function: Option<&str>) -> String {
        let expr = match function {
            Some(function) => format!("{}({})", function, self.column),
            None => self.column.clone(),
        };
        match self.alias {
            Some(ref alias) => format!("{} AS {}", expr, alias),
            None => expr,
        }
    }
}

impl From<&str> for ColumnSelector {
    fn from(column: &str) -> Self {
        Self::new(column)
    }
}

impl From<String> for ColumnSelector {
    fn from(column: String) -> Self {
        Self::new(column)
    }
}

impl From<(&str, &str)> for ColumnSelector {
    fn from((column, alias): (&str, &str)) -> Self {
        Self::new(column).alias(alias)
    }
}

impl From<(String, String)> for ColumnSelector {
    fn from((column, alias): (String, String)) -> Self {
        Self::new(column).alias(alias)
    }
}

/// An ORDER BY entry, ascending unless `is_desc`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBySelector {
    pub column: String,
    pub is_desc: bool,
}

impl OrderBySelector {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            is_desc: false,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            is_desc: true,
        }
    }

    pub(crate) fn render(&self) -> String {
        if self.is_desc {
            format!("{} DESC", self.column)
        } else {
            self.column.clone()
        }
    }
}

impl From<&str> for OrderBySelector {
    fn from(column: &str) -> Self {
        Self::asc(column)
    }
}

impl From<String> for OrderBySelector {
    fn from(column: String) -> Self {
        Self::asc(column)
    }
}

impl From<(&str, bool)> for OrderBySelector {
    fn from((column, is_desc): (&str, bool)) -> Self {
        Self {
            column: column.to_string(),
            is_desc,
        }
    }
}

impl From<(String, bool)> for OrderBySelector {
    fn from((column, is_desc): (String, bool)) -> Self {
        Self { column, is_desc }
    }
}

/// SELECT list state: every column, or an explicit list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Columns(Vec<ColumnSelector>),
}
