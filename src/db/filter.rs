//! Structured filters for listing settings.
//!
//! Internal callers narrow a listing through a closed set of columns and
//! comparisons. Values are always bound as parameters, never spliced into SQL.

use sqlx::{QueryBuilder, Sqlite};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingColumn {
    CompanyId,
    CompanyName,
    CompanyAddress,
    TimeZone,
    ThemeId,
}

impl SettingColumn {
    pub fn as_sql(self) -> &'static str {
        match self {
            SettingColumn::CompanyId => "CompanyID",
            SettingColumn::CompanyName => "CompanyName",
            SettingColumn::CompanyAddress => "CompanyAddress",
            SettingColumn::TimeZone => "TimeZone",
            SettingColumn::ThemeId => "ThemeID",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    NotEq,
    Lt,
    Gt,
    Like,
}

impl Comparison {
    fn as_sql(self) -> &'static str {
        match self {
            Comparison::Eq => " = ",
            Comparison::NotEq => " <> ",
            Comparison::Lt => " < ",
            Comparison::Gt => " > ",
            Comparison::Like => " LIKE ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Int(i64),
    Text(String),
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        FilterValue::Int(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Text(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::Text(v)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub column: SettingColumn,
    pub comparison: Comparison,
    pub value: FilterValue,
}

/// Conjunction of predicates plus optional ordering and limit.
/// The default filter matches every row in store order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingFilter {
    predicates: Vec<Predicate>,
    order_by: Option<(SettingColumn, bool)>,
    limit: Option<i64>,
}

impl SettingFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(
        mut self,
        column: SettingColumn,
        comparison: Comparison,
        value: impl Into<FilterValue>,
    ) -> Self {
        self.predicates.push(Predicate {
            column,
            comparison,
            value: value.into(),
        });
        self
    }

    pub fn order_by(mut self, column: SettingColumn, descending: bool) -> Self {
        self.order_by = Some((column, descending));
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty() && self.order_by.is_none() && self.limit.is_none()
    }

    /// Append `WHERE`/`ORDER BY`/`LIMIT` clauses to a query under construction.
    pub fn push_clauses(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        for (i, p) in self.predicates.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            qb.push(p.column.as_sql());
            qb.push(p.comparison.as_sql());
            match &p.value {
                FilterValue::Int(v) => qb.push_bind(*v),
                FilterValue::Text(v) => qb.push_bind(v.clone()),
            };
        }
        if let Some((column, descending)) = self.order_by {
            qb.push(" ORDER BY ");
            qb.push(column.as_sql());
            qb.push(if descending { " DESC" } else { " ASC" });
        }
        if let Some(limit) = self.limit {
            qb.push(" LIMIT ");
            qb.push_bind(limit);
        }
    }
}
