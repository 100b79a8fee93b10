//! Integration tests for the public query builder API

use elif_query::{
    Command, Condition, ConditionClause, Dialect, Logic, QueryBuilder, QueryConfig, QueryError,
};
use serde_json::json;

#[test]
fn test_builder_from_json_config() {
    let config: QueryConfig = serde_json::from_str(r#"{"dialect": "mysql"}"#).unwrap();
    assert_eq!(config.node_chunk_size, 64);

    let mut query = QueryBuilder::with_config(config);
    query.from("events").unwrap();
    query.where_("kind", "=", "'click'").offset(100);

    assert_eq!(
        query.to_string(),
        "SELECT * FROM events WHERE kind = 'click' LIMIT 18446744073709551615 OFFSET 100"
    );
}

#[test]
fn test_filter_with_prebuilt_conditions() {
    let mut query = QueryBuilder::default();
    query.from("orders").unwrap();
    query
        .filter(ConditionClause::Where, Logic::And, Condition::compare("total", ">", 50))
        .filter(ConditionClause::Where, Logic::OrNot, "status = 'void'".into())
        .filter(
            ConditionClause::Where,
            Logic::And,
            Condition::compare_template("placed_at", ">=", "'%s'", &[json!("2024-01-01")]),
        );

    assert_eq!(
        query.into_sql(),
        "SELECT * FROM orders WHERE total > 50 OR NOT status = 'void' AND placed_at >= '2024-01-01'"
    );
}

#[test]
fn test_report_query() {
    let mut query = QueryBuilder::new();
    query
        .select(["u.id", "u.name", "count(o.id)"])
        .unwrap()
        .from("users")
        .unwrap()
        .alias("u");
    query
        .left_join("orders", "o.user_id", "=", "u.id")
        .alias("o")
        .where_not_null("u.email_verified_at")
        .group_by(["u.id", "u.name"])
        .having_raw("count(o.id) > 3")
        .order_by_desc(["count(o.id)"])
        .paginate(25, 2);

    assert_eq!(
        query.render(),
        "SELECT u.id, u.name, count(o.id) FROM users AS u \
         LEFT JOIN orders AS o ON o.user_id = u.id \
         WHERE u.email_verified_at IS NOT NULL \
         GROUP BY u.id, u.name HAVING count(o.id) > 3 \
         ORDER BY count(o.id) DESC LIMIT 25 OFFSET 25"
    );
    assert_eq!(query.command(), Command::Select);
}

#[test]
fn test_error_messages() {
    let mut query = QueryBuilder::new();
    query.truncate().unwrap().from("sessions").unwrap();

    let err = query.select(["id"]).unwrap_err();
    assert_eq!(err.to_string(), "Cannot apply SELECT to a TRUNCATE statement");

    let err = query.from("other").unwrap_err();
    assert_eq!(err, QueryError::TableAlreadySet);
    assert_eq!(err.to_string(), "Table clause is already set for this scope");

    assert_eq!(query.render_with(Dialect::Sqlite), "DELETE FROM sessions");
}

#[test]
fn test_reuse_after_clear() {
    let mut query = QueryBuilder::new();
    for table in ["users", "posts", "comments"] {
        query.clear();
        query.from(table).unwrap();
        query.where_("id", "=", 7);
        assert_eq!(query.render(), format!("SELECT * FROM {} WHERE id = 7", table));
    }
    assert_eq!(query.arena_stats().chunks, 1);
}
