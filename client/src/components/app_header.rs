//! Top bar shared by the signed-in pages.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;
use crate::util::auth::sign_out;

/// Brand plus a Sign Out button. `back` renders a link before the brand.
#[component]
pub fn AppHeader(#[prop(optional)] back: Option<(String, String)>) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let on_sign_out = move |_| sign_out(auth, navigate.clone());

    view! {
        <header class="app-header">
            {back.map(|(href, label)| view! { <a class="app-header__back" href=href>{format!("← {label}")}</a> })}
            <a class="app-header__brand" href="/dashboard">
                <span class="app-header__logo">"✈️"</span>
                <span class="app-header__name">"TripPlanner"</span>
            </a>
            <span class="app-header__spacer"></span>
            <button class="btn app-header__sign-out" on:click=on_sign_out>
                "Sign Out"
            </button>
        </header>
    }
}
