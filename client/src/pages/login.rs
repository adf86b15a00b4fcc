//! Email + password sign-in page.
//!
//! Validation runs before any request; a backend rejection shows the
//! server's message verbatim. An optional `?message=` query parameter is
//! shown as an info banner.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};
use model::validate::validate_credentials;
use model::{LoginRequest, ValidationError};

use crate::state::auth::AuthState;

/// Validate the form and build the request body.
fn login_request(email: &str, password: &str) -> Result<LoginRequest, ValidationError> {
    validate_credentials(email, password)?;
    Ok(LoginRequest { email: email.trim().to_owned(), password: password.to_owned() })
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let query = use_query_map();
    let message = move || query.with(|q| q.get("message")).filter(|m| !m.is_empty());

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        error.set(None);
        let request = match login_request(&email.get(), &password.get()) {
            Ok(request) => request,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::login(&request).await {
                    Ok(user) => {
                        auth.update(|a| a.resolved(Some(user)));
                        navigate("/dashboard", leptos_router::NavigateOptions::default());
                    }
                    Err(e) => {
                        error.set(Some(e.message));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (request, &navigate, auth);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-card__logo">"✈️"</div>
                <h1>"Welcome Back"</h1>
                <p class="login-card__subtitle">"Sign in to your account"</p>
                <form class="login-form" on:submit=on_submit>
                    {move || message().map(|m| view! { <p class="login-message login-message--info">{m}</p> })}
                    {move || error.get().map(|e| view! { <p class="login-message login-message--error">{e}</p> })}
                    <label class="login-label" for="email">"Email"</label>
                    <input
                        id="email"
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <label class="login-label" for="password">"Password"</label>
                    <input
                        id="password"
                        class="login-input"
                        type="password"
                        placeholder="Your password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing In..." } else { "Sign In" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
