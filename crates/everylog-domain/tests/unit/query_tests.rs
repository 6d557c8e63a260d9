//! Unit tests for predicate evaluation

use chrono::{Duration, TimeZone, Utc};
use everylog_domain::entities::{LogRecord, Org};
use everylog_domain::value_objects::{FilterOp, FilterValue, FilteredQuery, Predicate};

fn record(level_id: i32, minutes: i64) -> LogRecord {
    let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single();
    LogRecord {
        id: format!("log-{level_id}-{minutes}"),
        created_at: base.expect("valid timestamp") + Duration::minutes(minutes),
        user_id: "alice".to_string(),
        project_id: "p1".to_string(),
        level_id,
        process_id: Some("worker".to_string()),
        message: "hello".to_string(),
        traceback: None,
        org_id: Some("o1".to_string()),
    }
}

fn compare(column: &str, op: FilterOp, value: FilterValue) -> Predicate {
    Predicate::Compare {
        column: column.to_string(),
        op,
        value,
    }
}

#[test]
fn test_query_matches_all_predicates() {
    let query = FilteredQuery::new(
        String::new(),
        vec![],
        vec![
            compare("user_id", FilterOp::Eq, "alice".into()),
            compare("level_id", FilterOp::Eq, 3.into()),
        ],
    );

    assert!(query.matches(&record(3, 0)));
    assert!(!query.matches(&record(2, 0)));
}

#[test]
fn test_time_bounds_are_inclusive() {
    let at = record(1, 10).created_at;
    let query = FilteredQuery::new(
        String::new(),
        vec![],
        vec![
            compare("created_at", FilterOp::Gte, at.into()),
            compare("created_at", FilterOp::Lte, at.into()),
        ],
    );

    assert!(query.matches(&record(1, 10)));
    assert!(!query.matches(&record(1, 9)));
    assert!(!query.matches(&record(1, 11)));
}

#[test]
fn test_qualified_columns_resolve() {
    let org = Org {
        id: "o1".to_string(),
        created_at: Utc::now(),
        owner: "alice".to_string(),
        name: "Acme Corp".to_string(),
        description: None,
        location_id: None,
    };
    let query = FilteredQuery::new(
        String::new(),
        vec![],
        vec![
            compare("org.id", FilterOp::Eq, "o1".into()),
            compare("org.name", FilterOp::Like, "Acme%".into()),
        ],
    );

    assert!(query.matches(&org));
}
