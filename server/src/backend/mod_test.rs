use super::*;

fn identity(email: Option<&str>, full_name: Option<&str>) -> Identity {
    Identity { id: "u1".into(), email: email.map(str::to_owned), full_name: full_name.map(str::to_owned) }
}

#[test]
fn display_name_prefers_full_name() {
    assert_eq!(identity(Some("ada@example.com"), Some("Ada Lovelace")).display_name(), "Ada Lovelace");
}

#[test]
fn display_name_falls_back_to_email_local_part() {
    assert_eq!(identity(Some("ada@example.com"), None).display_name(), "ada");
    assert_eq!(identity(Some("ada@example.com"), Some("  ")).display_name(), "ada");
}

#[test]
fn display_name_empty_without_email_or_name() {
    assert_eq!(identity(None, None).display_name(), "");
}

#[test]
fn access_token_debug_is_redacted() {
    let token = AccessToken::new("secret-token");
    assert_eq!(format!("{token:?}"), "AccessToken(..)");
    assert_eq!(token.as_str(), "secret-token");
}

#[test]
fn table_names_match_backend_relations() {
    assert_eq!(Table::TripMembers.as_str(), "trip_members");
    assert_eq!(Table::Invitations.to_string(), "invitations");
}

#[test]
fn encode_row_rejects_non_objects() {
    assert!(matches!(encode_row(&42), Err(BackendError::Parse(_))));
    let row = encode_row(&serde_json::json!({ "a": 1 })).unwrap();
    assert_eq!(row["a"], 1);
}

#[test]
fn decode_rows_reports_shape_mismatch() {
    let rows = vec![encode_row(&serde_json::json!({ "id": 1 })).unwrap()];
    let decoded: Result<Vec<model::Profile>, _> = decode_rows(rows);
    assert!(matches!(decoded, Err(BackendError::Parse(_))));
}

#[test]
fn rejected_error_displays_backend_message() {
    let err = BackendError::Rejected { status: 400, message: "Invalid login credentials".into() };
    assert_eq!(err.to_string(), "Invalid login credentials");
}
