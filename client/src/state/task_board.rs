//! Category task board state.
//!
//! DESIGN
//! ======
//! One explicit struct owns the whole board. The "single in-flight edit" and
//! "single pending delete confirm" rules are `Option` fields, so starting a
//! second edit or confirm replaces the first by construction.
//!
//! Transitions that need a backend write return the `(task_id, TaskPatch)` to
//! send; the page performs the call and reports back with [`patch_saved`] or
//! [`patch_failed`]. Local tasks only change after a successful write.
//!
//! [`patch_saved`]: TaskBoardState::patch_saved
//! [`patch_failed`]: TaskBoardState::patch_failed

#[cfg(test)]
#[path = "task_board_test.rs"]
mod task_board_test;

use model::{CategoryBoard, MemberView, NewTask, Task, TaskField, TaskPatch, TaskStatus, assignee_label};

/// Selector value meaning "no assignee".
pub const UNASSIGNED: &str = "unassigned";

/// The one `(task, field)` pair being edited, with a scratch copy of the task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditSession {
    pub task_id: String,
    pub field: TaskField,
    pub draft: Task,
}

impl EditSession {
    /// Current scratch value of the edited field, as form text.
    #[must_use]
    pub fn text(&self) -> String {
        match self.field {
            TaskField::Title => self.draft.title.clone(),
            TaskField::Description => self.draft.description.clone().unwrap_or_default(),
            TaskField::DueDate => self.draft.due_date.clone().unwrap_or_default(),
            TaskField::Status => self.draft.status.as_str().to_owned(),
        }
    }

    fn set_text(&mut self, value: String) {
        match self.field {
            TaskField::Title => self.draft.title = value,
            TaskField::Description => self.draft.description = Some(value),
            TaskField::DueDate => self.draft.due_date = Some(value),
            TaskField::Status => {
                if let Some(status) = TaskStatus::parse(&value) {
                    self.draft.status = status;
                }
            }
        }
    }

    fn into_patch(self) -> TaskPatch {
        let patch = match self.field {
            TaskField::Title => TaskPatch::Title(self.draft.title),
            TaskField::Description => TaskPatch::Description(self.draft.description),
            TaskField::DueDate => TaskPatch::DueDate(self.draft.due_date),
            TaskField::Status => TaskPatch::Status(self.draft.status),
        };
        patch.normalized()
    }
}

/// Inline "add item" form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewTaskForm {
    pub open: bool,
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub status: TaskStatus,
}

impl NewTaskForm {
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.title.trim().is_empty()
    }

    #[must_use]
    pub fn to_request(&self) -> Option<NewTask> {
        self.can_submit()
            .then(|| NewTask::from_form(&self.title, &self.description, &self.due_date, self.status))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskBoardState {
    pub board: Option<CategoryBoard>,
    pub loading: bool,
    /// Load failure shown in place of the board ("Category not found", ...).
    pub error: Option<String>,
    pub editing: Option<EditSession>,
    pub saving_task_id: Option<String>,
    pub confirm_delete_id: Option<String>,
    pub form: NewTaskForm,
    pub creating: bool,
}

impl TaskBoardState {
    // =========================================================================
    // LOADING
    // =========================================================================

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    pub fn loaded(&mut self, board: CategoryBoard) {
        self.board = Some(board);
        self.loading = false;
        self.error = None;
    }

    /// A failed first load shows `message`; a failed reload keeps the stale board.
    pub fn load_failed(&mut self, message: String) {
        self.loading = false;
        if self.board.is_none() {
            self.error = Some(message);
        }
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        self.board.as_ref().map(|b| b.tasks.as_slice()).unwrap_or_default()
    }

    #[must_use]
    pub fn members(&self) -> &[MemberView] {
        self.board.as_ref().map(|b| b.members.as_slice()).unwrap_or_default()
    }

    #[must_use]
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks().iter().find(|t| t.id == task_id)
    }

    fn task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.board.as_mut()?.tasks.iter_mut().find(|t| t.id == task_id)
    }

    #[must_use]
    pub fn assignee_label(&self, task: &Task) -> String {
        assignee_label(self.members(), task.assignee_id.as_deref())
    }

    /// Persisted completion, what the row checkbox shows.
    #[must_use]
    pub fn is_completed(&self, task_id: &str) -> bool {
        self.task(task_id).is_some_and(|t| t.status == TaskStatus::Completed)
    }

    /// Persisted selector value for the assignee dropdown.
    #[must_use]
    pub fn assignee_value(&self, task_id: &str) -> String {
        self.task(task_id).and_then(|t| t.assignee_id.clone()).unwrap_or_else(|| UNASSIGNED.to_owned())
    }

    // =========================================================================
    // FIELD EDITS
    // =========================================================================

    /// Begin editing `field` of `task_id`, discarding any other edit.
    pub fn start_edit(&mut self, task_id: &str, field: TaskField) {
        self.editing = self
            .task(task_id)
            .cloned()
            .map(|draft| EditSession { task_id: task_id.to_owned(), field, draft });
    }

    #[must_use]
    pub fn is_editing(&self, task_id: &str, field: TaskField) -> bool {
        self.editing.as_ref().is_some_and(|e| e.task_id == task_id && e.field == field)
    }

    pub fn edit_input(&mut self, value: String) {
        if let Some(session) = self.editing.as_mut() {
            session.set_text(value);
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// End the edit session and return the write to perform. An empty title
    /// cancels instead.
    pub fn commit_edit(&mut self) -> Option<(String, TaskPatch)> {
        let session = self.editing.take()?;
        let task_id = session.task_id.clone();
        let patch = session.into_patch();
        if matches!(&patch, TaskPatch::Title(t) if t.is_empty()) {
            return None;
        }
        self.saving_task_id = Some(task_id.clone());
        Some((task_id, patch))
    }

    /// Single-click completion checkbox.
    pub fn toggle_status(&mut self, task_id: &str) -> Option<(String, TaskPatch)> {
        let status = self.task(task_id)?.status.toggled();
        self.saving_task_id = Some(task_id.to_owned());
        Some((task_id.to_owned(), TaskPatch::Status(status)))
    }

    /// Assignee selector change; [`UNASSIGNED`] or blank clears the assignee.
    pub fn assign(&mut self, task_id: &str, value: &str) -> Option<(String, TaskPatch)> {
        self.task(task_id)?;
        let assignee = (value != UNASSIGNED).then(|| value.to_owned());
        self.saving_task_id = Some(task_id.to_owned());
        Some((task_id.to_owned(), TaskPatch::Assignee(assignee).normalized()))
    }

    pub fn patch_saved(&mut self, task_id: &str, patch: &TaskPatch) {
        if let Some(task) = self.task_mut(task_id) {
            patch.apply(task);
        }
        self.clear_saving(task_id);
    }

    pub fn patch_failed(&mut self, task_id: &str) {
        self.clear_saving(task_id);
    }

    fn clear_saving(&mut self, task_id: &str) {
        if self.saving_task_id.as_deref() == Some(task_id) {
            self.saving_task_id = None;
        }
    }

    // =========================================================================
    // CREATION
    // =========================================================================

    pub fn toggle_form(&mut self) {
        if self.form.open {
            self.close_form();
        } else {
            self.form.open = true;
        }
    }

    /// Close and discard the form.
    pub fn close_form(&mut self) {
        self.form = NewTaskForm::default();
    }

    pub fn begin_create(&mut self) -> Option<NewTask> {
        if self.creating {
            return None;
        }
        let request = self.form.to_request()?;
        self.creating = true;
        Some(request)
    }

    /// The caller reloads the board after this.
    pub fn task_created(&mut self) {
        self.creating = false;
        self.close_form();
    }

    pub fn create_failed(&mut self) {
        self.creating = false;
    }

    // =========================================================================
    // DELETION
    // =========================================================================

    pub fn request_delete(&mut self, task_id: &str) {
        self.confirm_delete_id = Some(task_id.to_owned());
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete_id = None;
    }

    /// The task awaiting deletion. The prompt stays open until
    /// [`Self::delete_succeeded`], so a failed delete can be retried.
    #[must_use]
    pub fn confirm_delete(&self) -> Option<String> {
        self.confirm_delete_id.clone()
    }

    /// The caller reloads the board after this.
    pub fn delete_succeeded(&mut self, task_id: &str) {
        if self.confirm_delete_id.as_deref() == Some(task_id) {
            self.confirm_delete_id = None;
        }
    }
}
