//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{
    category::CategoryPage, create_trip::CreateTripPage, dashboard::DashboardPage, landing::LandingPage,
    login::LoginPage, trip::TripPage,
};
use crate::state::auth::AuthState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the auth context and sets up client-side routing. The current
/// user is requested once here; pages only read the context.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::pending());
    provide_context(auth);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let user = crate::net::api::fetch_current_user().await;
        auth.update(|a| a.resolved(user));
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/trip-planner.css"/>
        <Title text="TripPlanner"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=LandingPage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
                <Route path=(StaticSegment("dashboard"), StaticSegment("create-trip")) view=CreateTripPage/>
                <Route path=(StaticSegment("trips"), ParamSegment("id")) view=TripPage/>
                <Route
                    path=(StaticSegment("trips"), ParamSegment("id"), StaticSegment("categories"), ParamSegment("category_id"))
                    view=CategoryPage
                />
            </Routes>
        </Router>
    }
}
