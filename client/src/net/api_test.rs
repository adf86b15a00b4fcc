use super::*;

#[test]
fn endpoints_format_expected_paths() {
    assert_eq!(trip_endpoint("t1"), "/api/trips/t1");
    assert_eq!(category_board_endpoint("t1", "c9"), "/api/trips/t1/categories/c9");
    assert_eq!(category_tasks_endpoint("c9"), "/api/categories/c9/tasks");
    assert_eq!(task_endpoint("k2"), "/api/tasks/k2");
}

#[test]
fn error_from_body_reads_error_field() {
    let err = error_from_body(403, r#"{"error":"You are not a member of this trip"}"#);
    assert_eq!(err.status, Some(403));
    assert_eq!(err.message, "You are not a member of this trip");
    assert!(err.is_forbidden());
}

#[test]
fn error_from_body_falls_back_to_status() {
    let err = error_from_body(502, "<html>bad gateway</html>");
    assert_eq!(err.message, "request failed: 502");
    assert!(!err.is_not_found());
}

#[test]
fn status_predicates() {
    assert!(error_from_body(401, "").is_unauthorized());
    assert!(error_from_body(404, "{}").is_not_found());
    assert!(!RequestError::transport("offline").is_unauthorized());
}

#[test]
fn display_is_message() {
    assert_eq!(RequestError::transport("offline").to_string(), "offline");
}
