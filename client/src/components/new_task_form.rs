//! Inline "add item" form on the category board.

use leptos::ev::KeyboardEvent;
use leptos::prelude::*;
use model::TaskStatus;

use crate::state::task_board::TaskBoardState;

#[component]
pub fn AddTaskForm(board: RwSignal<TaskBoardState>, on_submit: Callback<()>) -> impl IntoView {
    let close = move || board.update(TaskBoardState::close_form);
    let on_keydown = move |ev: KeyboardEvent| {
        if ev.key() == "Escape" {
            close();
        }
    };
    let disabled = move || board.with(|b| !b.form.can_submit() || b.creating);

    view! {
        <form
            class="new-task-form"
            on:submit=move |ev: leptos::ev::SubmitEvent| {
                ev.prevent_default();
                on_submit.run(());
            }
            on:keydown=on_keydown
        >
            <input
                class="new-task-form__title"
                type="text"
                placeholder="Task title *"
                autofocus=true
                prop:value=move || board.with(|b| b.form.title.clone())
                on:input=move |ev| board.update(|b| b.form.title = event_target_value(&ev))
            />
            <textarea
                class="new-task-form__description"
                placeholder="Description (optional)"
                prop:value=move || board.with(|b| b.form.description.clone())
                on:input=move |ev| board.update(|b| b.form.description = event_target_value(&ev))
            ></textarea>
            <div class="new-task-form__row">
                <input
                    class="new-task-form__due"
                    type="date"
                    prop:value=move || board.with(|b| b.form.due_date.clone())
                    on:input=move |ev| board.update(|b| b.form.due_date = event_target_value(&ev))
                />
                <select
                    class="new-task-form__status"
                    on:change=move |ev| {
                        if let Some(status) = TaskStatus::parse(&event_target_value(&ev)) {
                            board.update(|b| b.form.status = status);
                        }
                    }
                >
                    {TaskStatus::ALL
                        .into_iter()
                        .map(|s| {
                            view! {
                                <option value=s.as_str() selected=move || board.with(|b| b.form.status == s)>
                                    {s.label()}
                                </option>
                            }
                        })
                        .collect::<Vec<_>>()}
                </select>
            </div>
            <div class="new-task-form__actions">
                <button class="btn btn--ghost" type="button" on:click=move |_| close()>
                    "Cancel"
                </button>
                <button class="btn btn--primary" type="submit" disabled=disabled>
                    {move || if board.with(|b| b.creating) { "Adding..." } else { "Add Item" }}
                </button>
            </div>
        </form>
    }
}
