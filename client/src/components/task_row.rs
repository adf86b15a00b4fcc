//! One task on the category board, with inline editing.
//!
//! DESIGN
//! ======
//! Rows read their task from the board signal by id, so a write only
//! re-renders the cells that changed. Each editable cell swaps between a
//! clickable display and an input behind a `Show`, which keeps the input
//! alive (and focused) while the scratch value changes.
//!
//! The checkbox and assignee dropdown write straight through. Their DOM state
//! is reset to the persisted value as soon as the user changes it, and only
//! follows the change once the write succeeds.

use leptos::ev::KeyboardEvent;
use leptos::prelude::*;
use model::format::format_day;
use model::{Task, TaskField, TaskPatch, TaskStatus};

use crate::state::task_board::{EditSession, TaskBoardState, UNASSIGNED};

/// Colored pill for a task status.
#[component]
pub fn StatusBadge(#[prop(into)] status: Signal<TaskStatus>) -> impl IntoView {
    view! {
        <span class=move || format!("status-badge status-badge--{}", status.get().as_str())>
            {move || status.get().label()}
        </span>
    }
}

fn display_text(task: &Task, field: TaskField) -> Option<String> {
    match field {
        TaskField::Title => Some(task.title.clone()),
        TaskField::Description => task.description.clone(),
        TaskField::DueDate => task.due_date.as_deref().map(format_day),
        TaskField::Status => Some(task.status.label().to_owned()),
    }
}

/// Commit the active edit and hand its write to `persist`.
fn commit(board: RwSignal<TaskBoardState>, persist: Callback<(String, TaskPatch)>) {
    if let Some(write) = board.try_update(TaskBoardState::commit_edit).flatten() {
        persist.run(write);
    }
}

#[component]
fn EditableField(
    board: RwSignal<TaskBoardState>,
    task_id: String,
    field: TaskField,
    placeholder: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    persist: Callback<(String, TaskPatch)>,
) -> impl IntoView {
    let editing = {
        let id = task_id.clone();
        Memo::new(move |_| board.with(|b| b.is_editing(&id, field)))
    };
    let display = {
        let id = task_id.clone();
        move || board.with(|b| b.task(&id).and_then(|t| display_text(t, field)))
    };
    let start = move || {
        let id = task_id.clone();
        move |_: leptos::ev::MouseEvent| board.update(|b| b.start_edit(&id, field))
    };
    let value = move || board.with(|b| b.editing.as_ref().map(EditSession::text).unwrap_or_default());
    let on_keydown = move |ev: KeyboardEvent| match ev.key().as_str() {
        "Enter" if field != TaskField::Description => commit(board, persist),
        "Escape" => board.update(TaskBoardState::cancel_edit),
        _ => {}
    };

    view! {
        <Show
            when=move || editing.get()
            fallback=move || {
                let shown = display.clone();
                view! {
                    <span class="task-field" class:task-field--empty=move || shown().is_none() on:click=start()>
                        {let shown = display.clone(); move || shown().unwrap_or_else(|| placeholder.to_owned())}
                    </span>
                }
            }
        >
            {if field == TaskField::Description {
                view! {
                    <textarea
                        class="task-field__input"
                        autofocus=true
                        prop:value=value
                        on:input=move |ev| board.update(|b| b.edit_input(event_target_value(&ev)))
                        on:keydown=on_keydown
                        on:blur=move |_| commit(board, persist)
                    ></textarea>
                }
                    .into_any()
            } else {
                view! {
                    <input
                        class="task-field__input"
                        type=input_type
                        autofocus=true
                        prop:value=value
                        on:input=move |ev| board.update(|b| b.edit_input(event_target_value(&ev)))
                        on:keydown=on_keydown
                        on:blur=move |_| commit(board, persist)
                    />
                }
                    .into_any()
            }}
        </Show>
    }
}

#[component]
pub fn TaskRow(
    board: RwSignal<TaskBoardState>,
    task_id: String,
    persist: Callback<(String, TaskPatch)>,
    on_confirm_delete: Callback<()>,
) -> impl IntoView {
    let id = StoredValue::new(task_id.clone());
    let status = Signal::derive(move || {
        board.with(|b| b.task(&id.get_value()).map(|t| t.status).unwrap_or_default())
    });
    let saving = move || board.with(|b| b.saving_task_id.as_deref() == Some(id.get_value().as_str()));
    let confirming = move || board.with(|b| b.confirm_delete_id.as_deref() == Some(id.get_value().as_str()));
    let editing_status = Memo::new(move |_| board.with(|b| b.is_editing(&id.get_value(), TaskField::Status)));
    let assignee = move || board.with(|b| b.assignee_value(&id.get_value()));
    let check_ref = NodeRef::<leptos::html::Input>::new();
    let assignee_ref = NodeRef::<leptos::html::Select>::new();
    let assignee_label = move || {
        board.with(|b| b.task(&id.get_value()).map(|t| b.assignee_label(t)).unwrap_or_default())
    };

    let on_toggle = move |_: leptos::ev::Event| {
        if let Some(el) = check_ref.get() {
            el.set_checked(board.with_untracked(|b| b.is_completed(&id.get_value())));
        }
        if let Some(write) = board.try_update(|b| b.toggle_status(&id.get_value())).flatten() {
            persist.run(write);
        }
    };
    let on_assign = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        if let Some(el) = assignee_ref.get() {
            el.set_value(&board.with_untracked(|b| b.assignee_value(&id.get_value())));
        }
        if let Some(write) = board.try_update(|b| b.assign(&id.get_value(), &value)).flatten() {
            persist.run(write);
        }
    };
    let on_status_keydown = move |ev: KeyboardEvent| match ev.key().as_str() {
        "Enter" => commit(board, persist),
        "Escape" => board.update(TaskBoardState::cancel_edit),
        _ => {}
    };

    view! {
        <div
            class="task-row"
            class:task-row--saving=saving
            class:task-row--completed=move || status.get() == TaskStatus::Completed
        >
            <input
                class="task-row__check"
                type="checkbox"
                node_ref=check_ref
                prop:checked=move || status.get() == TaskStatus::Completed
                on:change=on_toggle
            />
            <div class="task-row__body">
                <EditableField
                    board=board
                    task_id=task_id.clone()
                    field=TaskField::Title
                    placeholder="Untitled"
                    persist=persist
                />
                <EditableField
                    board=board
                    task_id=task_id.clone()
                    field=TaskField::Description
                    placeholder="Add description..."
                    persist=persist
                />
                <div class="task-row__meta">
                    <Show
                        when=move || editing_status.get()
                        fallback=move || {
                            view! {
                                <span
                                    class="task-row__status"
                                    on:click=move |_| board.update(|b| b.start_edit(&id.get_value(), TaskField::Status))
                                >
                                    <StatusBadge status=status/>
                                </span>
                            }
                        }
                    >
                        <select
                            class="task-row__status-select"
                            autofocus=true
                            on:change=move |ev| board.update(|b| b.edit_input(event_target_value(&ev)))
                            on:keydown=on_status_keydown
                            on:blur=move |_| commit(board, persist)
                        >
                            {TaskStatus::ALL
                                .into_iter()
                                .map(|s| {
                                    view! {
                                        <option value=s.as_str() selected=move || status.get() == s>
                                            {s.label()}
                                        </option>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </select>
                    </Show>
                    <EditableField
                        board=board
                        task_id=task_id.clone()
                        field=TaskField::DueDate
                        placeholder="Add due date..."
                        input_type="date"
                        persist=persist
                    />
                    <select
                        class="task-row__assignee"
                        node_ref=assignee_ref
                        title=assignee_label
                        on:change=on_assign
                        prop:value=assignee
                    >
                        <option value=UNASSIGNED>"Unassigned"</option>
                        {move || {
                            board
                                .with(|b| b.members().to_vec())
                                .into_iter()
                                .map(|m| {
                                    let label = m.label();
                                    view! { <option value=m.user_id>{label}</option> }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </select>
                </div>
            </div>
            <div class="task-row__actions">
                <Show
                    when=confirming
                    fallback=move || {
                        view! {
                            <button
                                class="btn btn--ghost task-row__delete"
                                on:click=move |_| board.update(|b| b.request_delete(&id.get_value()))
                            >
                                "Delete"
                            </button>
                        }
                    }
                >
                    <button class="btn btn--danger" on:click=move |_| on_confirm_delete.run(())>
                        "Confirm"
                    </button>
                    <button class="btn btn--ghost" on:click=move |_| board.update(TaskBoardState::cancel_delete)>
                        "Cancel"
                    </button>
                </Show>
            </div>
        </div>
    }
}
