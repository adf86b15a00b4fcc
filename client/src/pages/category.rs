//! Category task board page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owns the board signal and every backend call the board makes. Rows and
//! the add form only run `TaskBoardState` transitions and hand writes back
//! through `persist`. Field saves, toggles, assignee changes, and deletes
//! log on failure and leave the local task as it was.

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};
use model::TaskPatch;

use crate::components::app_header::AppHeader;
use crate::components::new_task_form::AddTaskForm;
use crate::components::task_row::TaskRow;
use crate::state::auth::AuthState;
use crate::state::task_board::TaskBoardState;
use crate::util::auth::install_unauth_redirect;

/// Fetch the whole board into `board`. A failed reload keeps stale data.
fn load(board: RwSignal<TaskBoardState>, trip_id: String, category_id: String) {
    board.update(TaskBoardState::begin_load);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_category_board(&trip_id, &category_id).await {
            Ok(loaded) => board.update(|b| b.loaded(loaded)),
            Err(e) => board.update(|b| b.load_failed(e.message)),
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (trip_id, category_id);
    }
}

#[component]
pub fn CategoryPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    let params = use_params_map();
    let ids = Memo::new(move |_| {
        params.with(|p| (p.get("id").unwrap_or_default(), p.get("category_id").unwrap_or_default()))
    });
    let board = RwSignal::new(TaskBoardState { loading: true, ..TaskBoardState::default() });
    let reload = move || {
        let (trip_id, category_id) = ids.get_untracked();
        load(board, trip_id, category_id);
    };

    Effect::new(move || {
        let (trip_id, category_id) = ids.get();
        if auth.with(|a| a.user.is_none()) || trip_id.is_empty() || category_id.is_empty() {
            return;
        }
        load(board, trip_id, category_id);
    });

    let persist = Callback::new(move |(task_id, patch): (String, TaskPatch)| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::update_task(&task_id, &patch).await {
                Ok(()) => board.update(|b| b.patch_saved(&task_id, &patch)),
                Err(_) => board.update(|b| b.patch_failed(&task_id)),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = patch;
            board.update(|b| b.patch_failed(&task_id));
        }
    });

    let on_confirm_delete = Callback::new(move |()| {
        let Some(task_id) = board.with_untracked(TaskBoardState::confirm_delete) else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            if crate::net::api::delete_task(&task_id).await.is_ok() {
                board.update(|b| b.delete_succeeded(&task_id));
                reload();
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            board.update(|b| b.delete_succeeded(&task_id));
            reload();
        }
    });

    let on_create = Callback::new(move |()| {
        let Some(request) = board.try_update(TaskBoardState::begin_create).flatten() else {
            return;
        };
        let (_, category_id) = ids.get_untracked();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::create_task(&category_id, &request).await {
                Ok(_) => {
                    board.update(TaskBoardState::task_created);
                    reload();
                }
                Err(_) => board.update(TaskBoardState::create_failed),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (request, category_id);
            board.update(TaskBoardState::create_failed);
        }
    });

    let trip_href = move || format!("/trips/{}", ids.with(|(trip_id, _)| trip_id.clone()));
    let back_label = Memo::new(move |_| {
        board
            .with(|b| b.board.as_ref().map(|loaded| loaded.trip.name.clone()))
            .unwrap_or_else(|| "Back to Trip".to_owned())
    });
    // Memos keep the row list mounted while a row's scratch value changes.
    let load_error = Memo::new(move |_| board.with(|b| b.error.clone()));
    let ready = Memo::new(move |_| board.with(|b| b.board.is_some()));
    let has_tasks = move || board.with(|b| !b.tasks().is_empty());

    view! {
        <div class="category-page">
            {move || view! { <AppHeader back=(trip_href(), back_label.get())/> }}
            {move || {
                if let Some(message) = load_error.get() {
                    return view! {
                        <main class="category-page__missing">
                            <h1>{message}</h1>
                            <a class="btn btn--primary" href="/dashboard">"Back to Dashboard"</a>
                        </main>
                    }
                        .into_any();
                }
                if !ready.get() {
                    return view! { <p class="category-page__loading">"Loading..."</p> }.into_any();
                }
                view! {
                    <main class="category-page__main">
                        <section class="category-page__header">
                            <h1>
                                {move || {
                                    board.with(|b| {
                                        b.board
                                            .as_ref()
                                            .map(|loaded| format!("{} {}", loaded.category.icon, loaded.category.name))
                                            .unwrap_or_default()
                                    })
                                }}
                            </h1>
                            <Show when=has_tasks>
                                <button class="btn btn--primary" on:click=move |_| board.update(TaskBoardState::toggle_form)>
                                    "+ Add Item"
                                </button>
                            </Show>
                        </section>
                        <Show when=move || board.with(|b| b.form.open)>
                            <AddTaskForm board=board on_submit=on_create/>
                        </Show>
                        <Show
                            when=has_tasks
                            fallback=move || {
                                view! {
                                    <section class="category-page__empty">
                                        <h2>"No items yet"</h2>
                                        <p>"Start adding things to plan for this category."</p>
                                        <Show when=move || board.with(|b| !b.form.open)>
                                            <button
                                                class="btn btn--primary"
                                                on:click=move |_| board.update(TaskBoardState::toggle_form)
                                            >
                                                "Add First Item"
                                            </button>
                                        </Show>
                                    </section>
                                }
                            }
                        >
                            <div class="category-page__tasks">
                                <For
                                    each=move || board.with(|b| b.tasks().iter().map(|t| t.id.clone()).collect::<Vec<_>>())
                                    key=String::clone
                                    let:task_id
                                >
                                    <TaskRow
                                        board=board
                                        task_id=task_id
                                        persist=persist
                                        on_confirm_delete=on_confirm_delete
                                    />
                                </For>
                            </div>
                        </Show>
                    </main>
                }
                    .into_any()
            }}
        </div>
    }
}
