use super::*;
use serde_json::json;

fn row(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        _ => panic!("row must be an object"),
    }
}

// =============================================================================
// PostgREST rendering
// =============================================================================

#[test]
fn bare_query_selects_everything() {
    let params = Query::select(Table::Trips).to_params();
    assert_eq!(params, vec![("select".to_owned(), "*".to_owned())]);
}

#[test]
fn member_query_renders_embed_and_filter() {
    let q = Query::select(Table::TripMembers)
        .columns(&["user_id"])
        .embed(Table::Profiles, "user_id", &["full_name", "email"])
        .eq("trip_id", "trip-1");
    assert_eq!(
        q.to_params(),
        vec![
            ("select".to_owned(), "user_id,profiles(full_name,email)".to_owned()),
            ("trip_id".to_owned(), "eq.trip-1".to_owned()),
        ]
    );
}

#[test]
fn in_filter_and_order_render() {
    let q = Query::select(Table::Trips).is_in("id", ["a", "b"]).order("start_date", Order::Asc);
    let params = q.to_params();
    assert_eq!(params[1], ("id".to_owned(), "in.(a,b)".to_owned()));
    assert_eq!(params[2], ("order".to_owned(), "start_date.asc".to_owned()));
}

// =============================================================================
// Row evaluation
// =============================================================================

#[test]
fn eq_filter_matches_string_column() {
    let f = Filter::Eq { column: "trip_id".into(), value: "t1".into() };
    assert!(f.matches(&row(json!({ "trip_id": "t1" }))));
    assert!(!f.matches(&row(json!({ "trip_id": "t2" }))));
}

#[test]
fn null_and_missing_columns_never_match() {
    let f = Filter::Eq { column: "assignee_id".into(), value: "u1".into() };
    assert!(!f.matches(&row(json!({ "assignee_id": null }))));
    assert!(!f.matches(&row(json!({}))));
}

#[test]
fn in_filter_matches_any_listed_value() {
    let f = Filter::In { column: "id".into(), values: vec!["a".into(), "b".into()] };
    assert!(f.matches(&row(json!({ "id": "b" }))));
    assert!(!f.matches(&row(json!({ "id": "c" }))));
}

#[test]
fn empty_in_list_matches_nothing() {
    let f = Filter::In { column: "id".into(), values: Vec::new() };
    assert!(!f.matches(&row(json!({ "id": "a" }))));
}

#[test]
fn numeric_values_compare_by_text() {
    assert_eq!(value_text(&json!(3)), Some("3".to_owned()));
    assert_eq!(value_text(&json!(null)), None);
}
