use super::*;
use model::{BoardTrip, Category};

fn task(id: &str, title: &str) -> Task {
    Task {
        id: id.to_owned(),
        category_id: "c1".to_owned(),
        title: title.to_owned(),
        description: None,
        status: TaskStatus::NotStarted,
        assignee_id: None,
        due_date: None,
        created_at: "2025-01-01T00:00:00.000000Z".to_owned(),
    }
}

fn board(tasks: Vec<Task>) -> CategoryBoard {
    CategoryBoard {
        trip: BoardTrip { id: "t1".to_owned(), name: "Beach".to_owned() },
        category: Category {
            id: "c1".to_owned(),
            trip_id: "t1".to_owned(),
            name: "Food".to_owned(),
            icon: "🍴".to_owned(),
            created_at: None,
        },
        tasks,
        members: vec![MemberView {
            user_id: "u1".to_owned(),
            full_name: Some("Ada".to_owned()),
            email: Some("ada@example.com".to_owned()),
        }],
    }
}

fn loaded() -> TaskBoardState {
    let mut state = TaskBoardState::default();
    state.begin_load();
    state.loaded(board(vec![task("k1", "Book dinner"), task("k2", "Buy snacks")]));
    state
}

// =============================================================
// Loading
// =============================================================

#[test]
fn first_load_failure_shows_message() {
    let mut state = TaskBoardState::default();
    state.begin_load();
    state.load_failed("Category not found".to_owned());
    assert_eq!(state.error.as_deref(), Some("Category not found"));
    assert!(state.tasks().is_empty());
}

#[test]
fn reload_failure_keeps_stale_board() {
    let mut state = loaded();
    state.begin_load();
    state.load_failed("boom".to_owned());
    assert!(state.error.is_none());
    assert_eq!(state.tasks().len(), 2);
}

// =============================================================
// Edit session
// =============================================================

#[test]
fn starting_second_edit_discards_first_scratch() {
    let mut state = loaded();
    state.start_edit("k1", TaskField::Title);
    state.edit_input("Changed".to_owned());
    state.start_edit("k2", TaskField::Description);
    assert!(state.is_editing("k2", TaskField::Description));
    assert!(!state.is_editing("k1", TaskField::Title));
    assert_eq!(state.task("k1").unwrap().title, "Book dinner");
    assert!(state.saving_task_id.is_none());
}

#[test]
fn switching_field_on_same_task_discards_scratch() {
    let mut state = loaded();
    state.start_edit("k1", TaskField::Title);
    state.edit_input("Changed".to_owned());
    state.start_edit("k1", TaskField::DueDate);
    let session = state.editing.as_ref().unwrap();
    assert_eq!(session.draft.title, "Book dinner");
    assert_eq!(session.text(), "");
}

#[test]
fn commit_produces_single_field_patch_and_marks_saving() {
    let mut state = loaded();
    state.start_edit("k1", TaskField::Title);
    state.edit_input("  Book brunch ".to_owned());
    let (id, patch) = state.commit_edit().unwrap();
    assert_eq!(id, "k1");
    assert_eq!(patch, TaskPatch::Title("Book brunch".to_owned()));
    assert!(state.editing.is_none());
    assert_eq!(state.saving_task_id.as_deref(), Some("k1"));
    assert_eq!(state.task("k1").unwrap().title, "Book dinner");

    state.patch_saved(&id, &patch);
    assert_eq!(state.task("k1").unwrap().title, "Book brunch");
    assert!(state.saving_task_id.is_none());
}

#[test]
fn failed_save_leaves_task_unchanged() {
    let mut state = loaded();
    state.start_edit("k2", TaskField::Description);
    state.edit_input("Chips".to_owned());
    let (id, _patch) = state.commit_edit().unwrap();
    state.patch_failed(&id);
    assert!(state.task("k2").unwrap().description.is_none());
    assert!(state.saving_task_id.is_none());
}

#[test]
fn empty_description_and_due_date_commit_as_null() {
    let mut state = loaded();
    state.start_edit("k1", TaskField::Description);
    state.edit_input("   ".to_owned());
    assert_eq!(state.commit_edit().unwrap().1, TaskPatch::Description(None));
    state.start_edit("k1", TaskField::DueDate);
    state.edit_input(String::new());
    assert_eq!(state.commit_edit().unwrap().1, TaskPatch::DueDate(None));
}

#[test]
fn empty_title_commit_is_cancel() {
    let mut state = loaded();
    state.start_edit("k1", TaskField::Title);
    state.edit_input("  ".to_owned());
    assert!(state.commit_edit().is_none());
    assert!(state.editing.is_none());
    assert!(state.saving_task_id.is_none());
}

#[test]
fn status_edit_ignores_unknown_values() {
    let mut state = loaded();
    state.start_edit("k1", TaskField::Status);
    state.edit_input("in_progress".to_owned());
    state.edit_input("bogus".to_owned());
    assert_eq!(state.commit_edit().unwrap().1, TaskPatch::Status(TaskStatus::InProgress));
}

#[test]
fn cancel_edit_writes_nothing() {
    let mut state = loaded();
    state.start_edit("k1", TaskField::Title);
    state.edit_input("x".to_owned());
    state.cancel_edit();
    assert!(state.commit_edit().is_none());
}

#[test]
fn escaped_status_edit_leaves_status_unchanged() {
    let mut state = loaded();
    state.start_edit("k1", TaskField::Status);
    state.edit_input("completed".to_owned());
    assert!(state.task("k1").is_some_and(|t| t.status == TaskStatus::NotStarted));
    state.cancel_edit();
    assert!(state.commit_edit().is_none());
    assert_eq!(state.task("k1").unwrap().status, TaskStatus::NotStarted);
    assert!(state.saving_task_id.is_none());
}

#[test]
fn edit_of_unknown_task_is_ignored() {
    let mut state = loaded();
    state.start_edit("missing", TaskField::Title);
    assert!(state.editing.is_none());
}

// =============================================================
// Status toggle / assignee
// =============================================================

#[test]
fn toggle_not_started_completes_only_after_write() {
    let mut state = loaded();
    let (id, patch) = state.toggle_status("k1").unwrap();
    assert_eq!(patch, TaskPatch::Status(TaskStatus::Completed));
    assert_eq!(patch.to_update().len(), 1);
    assert_eq!(state.task("k1").unwrap().status, TaskStatus::NotStarted);
    state.patch_saved(&id, &patch);
    assert_eq!(state.task("k1").unwrap().status, TaskStatus::Completed);

    let (_, back) = state.toggle_status("k1").unwrap();
    assert_eq!(back, TaskPatch::Status(TaskStatus::NotStarted));
}

#[test]
fn assign_and_unassign() {
    let mut state = loaded();
    let (id, patch) = state.assign("k1", "u1").unwrap();
    assert_eq!(patch, TaskPatch::Assignee(Some("u1".to_owned())));
    state.patch_saved(&id, &patch);
    let k1 = state.task("k1").unwrap().clone();
    assert_eq!(state.assignee_label(&k1), "Ada");

    let (_, clear) = state.assign("k1", UNASSIGNED).unwrap();
    assert_eq!(clear, TaskPatch::Assignee(None));
    state.patch_saved("k1", &clear);
    let k1 = state.task("k1").unwrap().clone();
    assert_eq!(state.assignee_label(&k1), "Unassigned");
}

#[test]
fn failed_writes_leave_persisted_control_values() {
    let mut state = loaded();
    let (id, _) = state.toggle_status("k1").unwrap();
    state.patch_failed(&id);
    assert!(!state.is_completed("k1"));

    let (id, _) = state.assign("k1", "u1").unwrap();
    state.patch_failed(&id);
    assert_eq!(state.assignee_value("k1"), UNASSIGNED);
    assert!(state.saving_task_id.is_none());
}

#[test]
fn saved_writes_move_control_values() {
    let mut state = loaded();
    let (id, patch) = state.toggle_status("k1").unwrap();
    state.patch_saved(&id, &patch);
    assert!(state.is_completed("k1"));

    let (id, patch) = state.assign("k1", "u1").unwrap();
    state.patch_saved(&id, &patch);
    assert_eq!(state.assignee_value("k1"), "u1");
}

// =============================================================
// Creation
// =============================================================

#[test]
fn blank_title_cannot_submit() {
    let mut state = loaded();
    state.toggle_form();
    state.form.title = "   ".to_owned();
    assert!(!state.form.can_submit());
    assert!(state.begin_create().is_none());
    assert!(!state.creating);
}

#[test]
fn title_only_task_has_defaults() {
    let mut state = loaded();
    state.toggle_form();
    state.form.title = " Pack ".to_owned();
    let request = state.begin_create().unwrap();
    assert_eq!(request.title, "Pack");
    assert!(request.description.is_none());
    assert!(request.due_date.is_none());
    assert_eq!(request.status, TaskStatus::NotStarted);
    assert!(state.begin_create().is_none());

    state.task_created();
    assert!(!state.creating);
    assert_eq!(state.form, NewTaskForm::default());
}

#[test]
fn toggling_form_closed_discards_input() {
    let mut state = loaded();
    state.toggle_form();
    state.form.title = "Draft".to_owned();
    state.toggle_form();
    assert!(!state.form.open);
    assert!(state.form.title.is_empty());
}

// =============================================================
// Deletion
// =============================================================

#[test]
fn delete_confirm_flow() {
    let mut state = loaded();
    state.request_delete("k1");
    state.cancel_delete();
    assert!(state.confirm_delete().is_none());

    state.request_delete("k1");
    state.request_delete("k2");
    assert_eq!(state.confirm_delete().as_deref(), Some("k2"));
    state.delete_succeeded("k2");
    assert!(state.confirm_delete_id.is_none());
}

#[test]
fn failed_delete_keeps_confirm_open() {
    let mut state = loaded();
    state.request_delete("k1");
    assert_eq!(state.confirm_delete().as_deref(), Some("k1"));
    assert_eq!(state.confirm_delete_id.as_deref(), Some("k1"));
    assert_eq!(state.confirm_delete().as_deref(), Some("k1"));
}

#[test]
fn stale_delete_success_leaves_newer_confirm() {
    let mut state = loaded();
    state.request_delete("k1");
    state.request_delete("k2");
    state.delete_succeeded("k1");
    assert_eq!(state.confirm_delete_id.as_deref(), Some("k2"));
}
