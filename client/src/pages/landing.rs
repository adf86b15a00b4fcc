//! Public landing page.

use leptos::prelude::*;

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <div class="landing-page">
            <div class="landing-page__hero">
                <div class="landing-page__logo">"✈️"</div>
                <h1>"TripPlanner"</h1>
                <p class="landing-page__tagline">
                    "Plan amazing trips together with friends and family. Coordinate everything in one place."
                </p>
                <div class="landing-page__actions">
                    <a class="btn btn--primary" href="/login">"Get Started"</a>
                    <a class="btn btn--outline" href="/login">"Sign In"</a>
                </div>
            </div>
            <footer class="landing-page__footer">"© 2025 TripPlanner"</footer>
        </div>
    }
}
