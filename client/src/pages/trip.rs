//! Trip detail page: header, tabs, and category tiles.

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};
use model::format::format_date_range;

use crate::components::app_header::AppHeader;
use crate::components::category_tile::CategoryTileLink;
use crate::state::auth::AuthState;
use crate::state::trip::{TripState, TripTab};
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn TripPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    install_unauth_redirect(auth, navigate.clone());

    let params = use_params_map();
    let trip_id = Memo::new(move |_| params.with(|p| p.get("id")).unwrap_or_default());
    let state = RwSignal::new(TripState { loading: true, ..TripState::default() });

    Effect::new(move || {
        let id = trip_id.get();
        if auth.with(|a| a.user.is_none()) || id.is_empty() {
            return;
        }
        state.update(TripState::begin_load);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::fetch_trip_detail(&id).await {
                    Ok(detail) => state.update(|s| s.loaded(detail)),
                    Err(e) => {
                        if let Some(path) = state.try_update(|s| s.load_failed(&e)).flatten() {
                            navigate(path, leptos_router::NavigateOptions::default());
                        }
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &navigate;
        }
    });

    view! {
        <div class="trip-page">
            <AppHeader back=("/dashboard".to_owned(), "Back to Dashboard".to_owned())/>
            {move || {
                if state.with(|s| s.not_found) {
                    return view! {
                        <main class="trip-page__missing">
                            <h1>"Trip not found"</h1>
                            <a class="btn btn--primary" href="/dashboard">"Back to Dashboard"</a>
                        </main>
                    }
                        .into_any();
                }
                let Some(detail) = state.with(|s| s.detail.clone()) else {
                    return view! { <p class="trip-page__loading">"Loading trip..."</p> }.into_any();
                };
                let trip = detail.trip;
                let trip_id = trip.id.clone();
                let tiles = detail.categories;
                view! {
                    <main class="trip-page__main">
                        <section class="trip-page__header">
                            <h1>{trip.name}</h1>
                            <p class="trip-page__meta">
                                <span>{format!("📍 {}", trip.destination)}</span>
                                <span>{format!("📅 {}", format_date_range(&trip.start_date, &trip.end_date))}</span>
                                <span>{move || format!("👥 {}", state.with(TripState::member_label))}</span>
                            </p>
                            {trip.description.map(|d| view! { <p class="trip-page__description">{d}</p> })}
                        </section>
                        <nav class="trip-page__tabs">
                            {TripTab::ALL
                                .into_iter()
                                .map(|tab| {
                                    view! {
                                        <button
                                            class="trip-page__tab"
                                            class:trip-page__tab--active=move || state.with(|s| s.tab == tab)
                                            on:click=move |_| state.update(|s| s.select_tab(tab))
                                        >
                                            {tab.label()}
                                        </button>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </nav>
                        {move || match state.with(|s| s.tab) {
                            TripTab::Planning => {
                                let trip_id = trip_id.clone();
                                let tiles = tiles.clone();
                                view! { <PlanningTab trip_id=trip_id tiles=tiles/> }.into_any()
                            }
                            TripTab::Itinerary => {
                                view! {
                                    <section class="trip-page__placeholder">
                                        <h2>"Itinerary"</h2>
                                        <p>"Day-by-day planning is coming soon."</p>
                                    </section>
                                }
                                    .into_any()
                            }
                            TripTab::Settings => {
                                view! {
                                    <section class="trip-page__placeholder">
                                        <h2>"Trip Settings"</h2>
                                        <p>"Manage trip settings, members, and more coming soon!"</p>
                                    </section>
                                }
                                    .into_any()
                            }
                        }}
                    </main>
                }
                    .into_any()
            }}
        </div>
    }
}

#[component]
fn PlanningTab(trip_id: String, tiles: Vec<model::CategoryTile>) -> impl IntoView {
    let empty = tiles.is_empty();
    view! {
        <section class="trip-page__planning">
            <h2>"Categories"</h2>
            <Show when=move || !empty fallback=|| view! { <p class="trip-page__empty">"No categories yet."</p> }>
                <div class="trip-page__tiles">
                    {tiles
                        .iter()
                        .cloned()
                        .map(|tile| view! { <CategoryTileLink trip_id=trip_id.clone() tile=tile/> })
                        .collect::<Vec<_>>()}
                </div>
            </Show>
            <aside class="trip-page__quick-actions">
                <h3>"Quick Actions"</h3>
                <button class="btn btn--outline" disabled=true>"Invite People"</button>
                <button class="btn btn--outline" disabled=true>"Add Category"</button>
            </aside>
        </section>
    }
}
