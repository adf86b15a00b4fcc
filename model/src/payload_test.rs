use super::*;

fn task() -> Task {
    Task {
        id: "t1".to_owned(),
        category_id: "c1".to_owned(),
        title: "Book hotel".to_owned(),
        description: Some("near the beach".to_owned()),
        status: TaskStatus::NotStarted,
        assignee_id: None,
        due_date: Some("2025-06-01".to_owned()),
        created_at: "2025-05-01T00:00:00Z".to_owned(),
    }
}

// =============================================================================
// Categories
// =============================================================================

#[test]
fn default_categories_are_the_five_named_buckets() {
    let names: Vec<String> = CategoryDraft::defaults().into_iter().map(|c| c.name).collect();
    assert_eq!(names, ["Lodging", "Activities", "Food", "Transportation", "Home & Away"]);
}

#[test]
fn custom_category_defaults_icon_when_blank() {
    let c = CategoryDraft::custom("  Museums ", "  ");
    assert_eq!(c.name, "Museums");
    assert_eq!(c.icon, CUSTOM_CATEGORY_ICON);
}

#[test]
fn custom_category_keeps_given_icon() {
    let c = CategoryDraft::custom("Hikes", "⛰");
    assert_eq!(c.icon, "⛰");
}

// =============================================================================
// NewTask
// =============================================================================

#[test]
fn new_task_from_form_maps_blanks_to_none() {
    let t = NewTask::from_form("  Snorkel tour ", "   ", "", TaskStatus::NotStarted);
    assert_eq!(t.title, "Snorkel tour");
    assert_eq!(t.description, None);
    assert_eq!(t.due_date, None);
}

#[test]
fn new_task_status_defaults_when_missing_on_wire() {
    let t: NewTask = serde_json::from_value(serde_json::json!({ "title": "x" })).unwrap();
    assert_eq!(t.status, TaskStatus::NotStarted);
}

// =============================================================================
// TaskPatch
// =============================================================================

#[test]
fn task_patch_wire_shape_is_field_and_value() {
    let patch = TaskPatch::Status(TaskStatus::Completed);
    assert_eq!(
        serde_json::to_value(&patch).unwrap(),
        serde_json::json!({ "field": "status", "value": "completed" })
    );
    let parsed: TaskPatch = serde_json::from_value(serde_json::json!({ "field": "due_date", "value": null })).unwrap();
    assert_eq!(parsed, TaskPatch::DueDate(None));
}

#[test]
fn task_patch_update_contains_only_its_column() {
    let update = TaskPatch::Status(TaskStatus::Completed).to_update();
    assert_eq!(update.len(), 1);
    assert_eq!(update["status"], "completed");
}

#[test]
fn task_patch_assignee_writes_assignee_id_column() {
    let update = TaskPatch::Assignee(None).to_update();
    assert_eq!(update.get("assignee_id"), Some(&serde_json::Value::Null));
}

#[test]
fn task_patch_normalizes_blank_optionals_to_null() {
    assert_eq!(TaskPatch::Description(Some("  ".into())).normalized(), TaskPatch::Description(None));
    assert_eq!(TaskPatch::DueDate(Some(String::new())).normalized(), TaskPatch::DueDate(None));
    assert_eq!(TaskPatch::Title(" Hotel ".into()).normalized(), TaskPatch::Title("Hotel".into()));
}

#[test]
fn task_patch_apply_merges_single_field() {
    let mut t = task();
    TaskPatch::Description(None).apply(&mut t);
    assert_eq!(t.description, None);
    assert_eq!(t.title, "Book hotel");
    assert_eq!(t.due_date.as_deref(), Some("2025-06-01"));

    TaskPatch::Assignee(Some("u2".into())).apply(&mut t);
    assert_eq!(t.assignee_id.as_deref(), Some("u2"));
}

#[test]
fn create_trip_request_invitees_default_empty() {
    let req: CreateTripRequest = serde_json::from_value(serde_json::json!({
        "basics": {
            "name": "Beach",
            "destination": "Miami",
            "start_date": "2025-06-01",
            "end_date": "2025-06-07"
        },
        "categories": [{ "name": "Lodging", "icon": "🏠" }]
    }))
    .unwrap();
    assert!(req.invitees.is_empty());
    assert_eq!(req.basics.description, "");
}
