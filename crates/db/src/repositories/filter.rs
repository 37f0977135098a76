//! Dynamic `WHERE` clause assembly for listing queries.

use schooldesk_core::types::Timestamp;
use sqlx::postgres::PgArguments;
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::Postgres;

/// A value bound to a positional parameter in a dynamically built query.
#[derive(Debug, Clone)]
pub(crate) enum BindValue {
    BigInt(i64),
    Int(i32),
    Bool(bool),
    Text(String),
    TextArray(Vec<String>),
    Timestamp(Timestamp),
}

/// Accumulates `AND`-joined conditions and their bind values.
///
/// Placeholders are numbered in push order starting at `$1`, so the caller
/// can append `LIMIT`/`OFFSET` at [`next_idx`](Self::next_idx).
#[derive(Debug, Default)]
pub(crate) struct WhereBuilder {
    conditions: Vec<String>,
    values: Vec<BindValue>,
}

impl WhereBuilder {
    /// Start with conditions that take no parameters (e.g. soft-delete guards).
    pub(crate) fn with_static(conditions: &[&str]) -> Self {
        Self {
            conditions: conditions.iter().map(|c| c.to_string()).collect(),
            values: Vec::new(),
        }
    }

    /// Add a condition; `{}` in `template` is replaced by the next placeholder.
    pub(crate) fn push(&mut self, template: &str, value: BindValue) {
        let placeholder = format!("${}", self.values.len() + 1);
        self.conditions.push(template.replace("{}", &placeholder));
        self.values.push(value);
    }

    pub(crate) fn next_idx(&self) -> usize {
        self.values.len() + 1
    }

    pub(crate) fn finish(self) -> (String, Vec<BindValue>) {
        let clause = if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        };
        (clause, self.values)
    }
}

/// `%term%` with LIKE metacharacters escaped.
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
pub(crate) fn bind_values<'q, O>(
    mut q: QueryAs<'q, Postgres, O, PgArguments>,
    values: &'q [BindValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for val in values {
        q = match val {
            BindValue::BigInt(v) => q.bind(*v),
            BindValue::Int(v) => q.bind(*v),
            BindValue::Bool(v) => q.bind(*v),
            BindValue::Text(v) => q.bind(v.as_str()),
            BindValue::TextArray(v) => q.bind(v.clone()),
            BindValue::Timestamp(v) => q.bind(*v),
        };
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
pub(crate) fn bind_values_scalar<'q>(
    mut q: QueryScalar<'q, Postgres, i64, PgArguments>,
    values: &'q [BindValue],
) -> QueryScalar<'q, Postgres, i64, PgArguments> {
    for val in values {
        q = match val {
            BindValue::BigInt(v) => q.bind(*v),
            BindValue::Int(v) => q.bind(*v),
            BindValue::Bool(v) => q.bind(*v),
            BindValue::Text(v) => q.bind(v.as_str()),
            BindValue::TextArray(v) => q.bind(v.clone()),
            BindValue::Timestamp(v) => q.bind(*v),
        };
    }
    q
}
