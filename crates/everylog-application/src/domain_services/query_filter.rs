//! Query Filter Builder
//!
//! Builds one parameterized statement from a base `SELECT`, exactly one
//! mandatory predicate binding the caller at `$1`, and an ordered list of
//! optional predicates. Each present optional appends
//! ` AND <column> <op> $n` with `n` counting up from 2; absent ones add
//! nothing. Values only ever travel as arguments.

use everylog_domain::value_objects::{
    FilterOp, FilterValue, FilteredQuery, InviteFilter, LogFilter, OrgFilter, Predicate,
};

/// One optional filter slot: `(column, op, value if present)`
pub type FilterEntry = (&'static str, FilterOp, Option<FilterValue>);

/// Builder for caller-scoped listing statements
#[derive(Debug, Clone)]
pub struct QueryFilterBuilder {
    sql: String,
    args: Vec<FilterValue>,
    predicates: Vec<Predicate>,
}

impl QueryFilterBuilder {
    /// Bind `caller` to `column` at `$1`
    pub fn scoped(base: &str, column: &str, caller: impl Into<FilterValue>) -> Self {
        let caller = caller.into();
        Self {
            sql: format!("{base} WHERE {column} = $1"),
            predicates: vec![Predicate::Compare {
                column: column.to_string(),
                op: FilterOp::Eq,
                value: caller.clone(),
            }],
            args: vec![caller],
        }
    }

    /// Bind `caller` at `$1` to any of `columns`
    ///
    /// Still one predicate and one bound parameter.
    pub fn scoped_any(base: &str, columns: &[&str], caller: impl Into<FilterValue>) -> Self {
        let caller = caller.into();
        let alternatives = columns
            .iter()
            .map(|c| format!("{c} = $1"))
            .collect::<Vec<_>>()
            .join(" OR ");
        Self {
            sql: format!("{base} WHERE ({alternatives})"),
            predicates: vec![Predicate::AnyOf {
                columns: columns.iter().map(ToString::to_string).collect(),
                value: caller.clone(),
            }],
            args: vec![caller],
        }
    }

    /// Append ` AND <column> <op> $n` when `value` is present
    pub fn filter(mut self, column: &str, op: FilterOp, value: Option<FilterValue>) -> Self {
        if let Some(value) = value {
            self.args.push(value.clone());
            self.sql
                .push_str(&format!(" AND {column} {} ${}", op.as_sql(), self.args.len()));
            self.predicates.push(Predicate::Compare {
                column: column.to_string(),
                op,
                value,
            });
        }
        self
    }

    /// Fold `entries` in order
    pub fn filters<I>(self, entries: I) -> Self
    where
        I: IntoIterator<Item = FilterEntry>,
    {
        entries
            .into_iter()
            .fold(self, |builder, (column, op, value)| {
                builder.filter(column, op, value)
            })
    }

    pub fn build(self) -> FilteredQuery {
        FilteredQuery::new(self.sql, self.args, self.predicates)
    }
}

const LOG_SELECT: &str = "SELECT id, created_at, user_id, project_id, level_id, process_id, \
                          message, traceback, org_id FROM log";

const ORG_SELECT: &str = "SELECT org.id, org.created_at, org.owner, org.name, org.description, \
                          org.location_id FROM org JOIN user_org ON user_org.org_id = org.id";

const PROJECT_INVITE_SELECT: &str =
    "SELECT id, created_at, from_user_id, to_user_id, project_id, status FROM project_invite";

const ORG_INVITE_SELECT: &str =
    "SELECT id, created_at, from_user_id, to_user_id, org_id, status FROM org_invite";

/// Logs written by `caller`; filters: project, level, process, org, from, to
pub fn log_listing(caller: &str, filter: &LogFilter) -> FilteredQuery {
    QueryFilterBuilder::scoped(LOG_SELECT, "user_id", caller)
        .filters([
            ("project_id", FilterOp::Eq, text(filter.project_id.as_ref())),
            ("level_id", FilterOp::Eq, filter.level_id.map(FilterValue::Int)),
            ("process_id", FilterOp::Eq, text(filter.process_id.as_ref())),
            ("org_id", FilterOp::Eq, text(filter.org_id.as_ref())),
            ("created_at", FilterOp::Gte, filter.from.map(FilterValue::Timestamp)),
            ("created_at", FilterOp::Lte, filter.to.map(FilterValue::Timestamp)),
        ])
        .build()
}

/// Organizations `caller` belongs to; filters: org id, name (LIKE), from, to
pub fn org_listing(caller: &str, filter: &OrgFilter) -> FilteredQuery {
    QueryFilterBuilder::scoped(ORG_SELECT, "user_org.user_id", caller)
        .filters([
            ("org.id", FilterOp::Eq, text(filter.org_id.as_ref())),
            ("org.name", FilterOp::Like, text(filter.name.as_ref())),
            ("org.created_at", FilterOp::Gte, filter.from.map(FilterValue::Timestamp)),
            ("org.created_at", FilterOp::Lte, filter.to.map(FilterValue::Timestamp)),
        ])
        .build()
}

/// Project invites `caller` sent or received; filters: project, status,
/// from-user, to-user, from, to
pub fn project_invite_listing(caller: &str, filter: &InviteFilter) -> FilteredQuery {
    invite_listing(PROJECT_INVITE_SELECT, "project_id", caller, filter)
}

/// Org invites `caller` sent or received; filters: org, status, from-user,
/// to-user, from, to
pub fn org_invite_listing(caller: &str, filter: &InviteFilter) -> FilteredQuery {
    invite_listing(ORG_INVITE_SELECT, "org_id", caller, filter)
}

fn invite_listing(
    base: &str,
    target_column: &'static str,
    caller: &str,
    filter: &InviteFilter,
) -> FilteredQuery {
    QueryFilterBuilder::scoped_any(base, &["from_user_id", "to_user_id"], caller)
        .filters([
            (target_column, FilterOp::Eq, text(filter.target_id.as_ref())),
            ("status", FilterOp::Eq, text(filter.status.as_ref())),
            ("from_user_id", FilterOp::Eq, text(filter.from_user_id.as_ref())),
            ("to_user_id", FilterOp::Eq, text(filter.to_user_id.as_ref())),
            ("created_at", FilterOp::Gte, filter.from.map(FilterValue::Timestamp)),
            ("created_at", FilterOp::Lte, filter.to.map(FilterValue::Timestamp)),
        ])
        .build()
}

fn text(value: Option<&String>) -> Option<FilterValue> {
    value.map(|v| FilterValue::Text(v.clone()))
}
