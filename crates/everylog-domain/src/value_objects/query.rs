//! Parameterized queries
//!
//! A [`FilteredQuery`] carries both the SQL text (with `$n` placeholders) and
//! the structured predicates it was built from, so a SQL store binds
//! [`FilteredQuery::args`] while a non-SQL store evaluates
//! [`FilteredQuery::matches`] against its rows. Both see the same filter.

use chrono::{DateTime, Utc};

use crate::entities::{LogRecord, Org, OrgInvite, ProjectInvite};

/// A bound parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Int(i32),
    Timestamp(DateTime<Utc>),
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

/// Comparison used by an optional predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Exact match, `=`
    Eq,
    /// SQL `LIKE` pattern match
    Like,
    /// Lower bound, `>=`
    Gte,
    /// Upper bound, `<=`
    Lte,
}

impl FilterOp {
    /// SQL operator text
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Like => "LIKE",
            Self::Gte => ">=",
            Self::Lte => "<=",
        }
    }

    fn holds(self, actual: &FilterValue, expected: &FilterValue) -> bool {
        use FilterValue::{Int, Text, Timestamp};
        match (self, actual, expected) {
            (Self::Eq, a, e) => a == e,
            (Self::Like, Text(a), Text(pattern)) => like_matches(pattern, a),
            (Self::Gte, Timestamp(a), Timestamp(e)) => a >= e,
            (Self::Lte, Timestamp(a), Timestamp(e)) => a <= e,
            (Self::Gte, Int(a), Int(e)) => a >= e,
            (Self::Lte, Int(a), Int(e)) => a <= e,
            (Self::Gte, Text(a), Text(e)) => a >= e,
            (Self::Lte, Text(a), Text(e)) => a <= e,
            _ => false,
        }
    }
}

/// One `WHERE` clause term
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `<column> <op> $n`
    Compare {
        column: String,
        op: FilterOp,
        value: FilterValue,
    },
    /// `(<c1> = $n OR <c2> = $n ...)`, one bound parameter shared by all columns
    AnyOf {
        columns: Vec<String>,
        value: FilterValue,
    },
}

impl Predicate {
    /// Evaluate against a row
    pub fn matches(&self, row: &dyn Filterable) -> bool {
        match self {
            Self::Compare { column, op, value } => row
                .field(unqualified(column))
                .is_some_and(|actual| op.holds(&actual, value)),
            Self::AnyOf { columns, value } => columns.iter().any(|column| {
                row.field(unqualified(column))
                    .is_some_and(|actual| &actual == value)
            }),
        }
    }
}

/// A finished statement: SQL text, positional arguments and predicates
///
/// `args()[i]` is bound to placeholder `$(i + 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredQuery {
    sql: String,
    args: Vec<FilterValue>,
    predicates: Vec<Predicate>,
}

impl FilteredQuery {
    pub fn new(sql: String, args: Vec<FilterValue>, predicates: Vec<Predicate>) -> Self {
        Self {
            sql,
            args,
            predicates,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn args(&self) -> &[FilterValue] {
        &self.args
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Whether every predicate holds for `row`
    pub fn matches(&self, row: &dyn Filterable) -> bool {
        self.predicates.iter().all(|p| p.matches(row))
    }
}

/// Column lookup used to evaluate predicates outside SQL
///
/// Columns are looked up without their table qualifier (`org.id` → `id`).
/// Absent optional columns return `None`, which never matches.
pub trait Filterable {
    fn field(&self, column: &str) -> Option<FilterValue>;
}

fn unqualified(column: &str) -> &str {
    column.rsplit('.').next().unwrap_or(column)
}

fn text(value: &str) -> Option<FilterValue> {
    Some(FilterValue::Text(value.to_string()))
}

fn opt_text(value: Option<&String>) -> Option<FilterValue> {
    value.map(|v| FilterValue::Text(v.clone()))
}

impl Filterable for LogRecord {
    fn field(&self, column: &str) -> Option<FilterValue> {
        match column {
            "id" => text(&self.id),
            "created_at" => Some(FilterValue::Timestamp(self.created_at)),
            "user_id" => text(&self.user_id),
            "project_id" => text(&self.project_id),
            "level_id" => Some(FilterValue::Int(self.level_id)),
            "process_id" => opt_text(self.process_id.as_ref()),
            "message" => text(&self.message),
            "traceback" => opt_text(self.traceback.as_ref()),
            "org_id" => opt_text(self.org_id.as_ref()),
            _ => None,
        }
    }
}

impl Filterable for Org {
    fn field(&self, column: &str) -> Option<FilterValue> {
        match column {
            "id" => text(&self.id),
            "created_at" => Some(FilterValue::Timestamp(self.created_at)),
            "owner" => text(&self.owner),
            "name" => text(&self.name),
            "description" => opt_text(self.description.as_ref()),
            "location_id" => opt_text(self.location_id.as_ref()),
            _ => None,
        }
    }
}

impl Filterable for ProjectInvite {
    fn field(&self, column: &str) -> Option<FilterValue> {
        match column {
            "id" => text(&self.id),
            "created_at" => Some(FilterValue::Timestamp(self.created_at)),
            "from_user_id" => text(&self.from_user_id),
            "to_user_id" => text(&self.to_user_id),
            "project_id" => text(&self.project_id),
            "status" => text(&self.status),
            _ => None,
        }
    }
}

impl Filterable for OrgInvite {
    fn field(&self, column: &str) -> Option<FilterValue> {
        match column {
            "id" => text(&self.id),
            "created_at" => Some(FilterValue::Timestamp(self.created_at)),
            "from_user_id" => text(&self.from_user_id),
            "to_user_id" => text(&self.to_user_id),
            "org_id" => text(&self.org_id),
            "status" => text(&self.status),
            _ => None,
        }
    }
}

/// SQL `LIKE` semantics: `%` matches any run, `_` matches one character
pub fn like_matches(pattern: &str, input: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let input: Vec<char> = input.chars().collect();

    // reachable[j]: pattern prefix consumed so far matches input[..j]
    let mut reachable = vec![false; input.len() + 1];
    reachable[0] = true;

    for p in &pattern {
        let mut next = vec![false; input.len() + 1];
        match p {
            '%' => {
                let mut seen = false;
                for j in 0..=input.len() {
                    seen |= reachable[j];
                    next[j] = seen;
                }
            }
            '_' => {
                for j in 0..input.len() {
                    next[j + 1] = reachable[j];
                }
            }
            c => {
                for j in 0..input.len() {
                    next[j + 1] = reachable[j] && input[j] == *c;
                }
            }
        }
        reachable = next;
    }

    reachable[input.len()]
}
