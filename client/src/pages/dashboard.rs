//! Dashboard page listing the signed-in user's trips.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated home route. Trips load once the auth context
//! has a user; an empty list shows the call-to-action into the wizard.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::app_header::AppHeader;
use crate::components::trip_card::TripCard;
use crate::state::auth::AuthState;
use crate::state::trips::TripsState;
use crate::util::auth::install_unauth_redirect;

/// Dashboard page. Redirects to `/login` if the user is not authenticated.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    let trips = RwSignal::new(TripsState::default());
    let requested = RwSignal::new(false);
    Effect::new(move || {
        if requested.get_untracked() || auth.with(|a| a.user.is_none()) {
            return;
        }
        requested.set(true);
        trips.update(TripsState::begin_load);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::list_trips().await {
                Ok(items) => trips.update(|s| s.loaded(items)),
                Err(_) => trips.update(TripsState::load_failed),
            }
        });
    });

    view! {
        <Show
            when=move || auth.with(|a| !a.loading && a.user.is_some())
            fallback=move || {
                view! {
                    <div class="dashboard-page">
                        <p>{move || if auth.get().loading { "Loading..." } else { "Redirecting to login..." }}</p>
                    </div>
                }
            }
        >
            <div class="dashboard-page">
                <AppHeader/>
                <main class="dashboard-page__main">
                    <section class="dashboard-page__welcome">
                        <h1>{move || auth.with(AuthState::greeting)}</h1>
                        <p>"Plan your next adventure with friends and family."</p>
                    </section>
                    <Show
                        when=move || !trips.with(TripsState::is_empty)
                        fallback=|| {
                            view! {
                                <section class="dashboard-page__empty">
                                    <div class="dashboard-page__empty-icon">"✈️"</div>
                                    <h2>"No trips yet"</h2>
                                    <p>
                                        "Start planning your first trip! Invite friends and family to collaborate on destinations, accommodations, and activities."
                                    </p>
                                    <a class="btn btn--primary" href="/dashboard/create-trip">
                                        "Create New Trip"
                                    </a>
                                </section>
                            }
                        }
                    >
                        <section class="dashboard-page__trips">
                            <div class="dashboard-page__trips-header">
                                <h2>"Your Trips"</h2>
                                <a class="btn btn--primary" href="/dashboard/create-trip">
                                    "+ New Trip"
                                </a>
                            </div>
                            <Show when=move || trips.with(|t| t.loading)>
                                <p class="dashboard-page__loading">"Loading trips..."</p>
                            </Show>
                            <div class="dashboard-page__cards">
                                {move || {
                                    trips
                                        .get()
                                        .items
                                        .into_iter()
                                        .map(|trip| view! { <TripCard trip=trip/> })
                                        .collect::<Vec<_>>()
                                }}
                            </div>
                        </section>
                    </Show>
                </main>
            </div>
        </Show>
    }
}
