//! Three-step trip creation wizard.
//!
//! All transitions live on `WizardState`; this page binds inputs and, on
//! submit, posts the request and returns to the dashboard.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::app_header::AppHeader;
use crate::state::auth::AuthState;
use crate::state::wizard::{WizardState, WizardStep};
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn CreateTripPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    install_unauth_redirect(auth, navigate.clone());

    let wizard = RwSignal::new(WizardState::default());
    let step = Memo::new(move |_| wizard.with(|w| w.step));

    let on_submit = move |_| {
        let Some(request) = wizard.try_update(WizardState::begin_submit).flatten() else {
            return;
        };

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::create_trip(&request).await {
                    Ok(_trip_id) => navigate("/dashboard", leptos_router::NavigateOptions::default()),
                    Err(e) => wizard.update(|w| w.submit_failed(e.message)),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (request, &navigate);
        }
    };

    view! {
        <div class="wizard-page">
            <AppHeader back=("/dashboard".to_owned(), "Back to Dashboard".to_owned())/>
            <main class="wizard-page__main">
                <div class="wizard-page__progress">
                    <span class="wizard-page__step">
                        {move || format!("Step {} of {}", step.get().number(), WizardStep::COUNT)}
                    </span>
                    <span class="wizard-page__title">{move || step.get().title()}</span>
                    <div class="wizard-page__bar">
                        <div
                            class="wizard-page__bar-fill"
                            style:width=move || format!("{}%", wizard.with(WizardState::progress_percent))
                        ></div>
                    </div>
                </div>
                {move || {
                    wizard
                        .with(|w| w.error.clone())
                        .map(|e| view! { <p class="wizard-page__error">{e}</p> })
                }}
                {move || match step.get() {
                    WizardStep::Basics => view! { <BasicsStep wizard=wizard/> }.into_any(),
                    WizardStep::Invitees => view! { <InviteesStep wizard=wizard/> }.into_any(),
                    WizardStep::Categories => {
                        let on_submit = on_submit.clone();
                        view! {
                            <CategoriesStep wizard=wizard/>
                            <div class="wizard-page__nav">
                                <button class="btn btn--ghost" on:click=move |_| wizard.update(WizardState::back)>
                                    "Back"
                                </button>
                                <button
                                    class="btn btn--primary"
                                    disabled=move || wizard.with(|w| w.submitting)
                                    on:click=on_submit
                                >
                                    {move || if wizard.with(|w| w.submitting) { "Creating Trip..." } else { "Create Trip" }}
                                </button>
                            </div>
                        }
                            .into_any()
                    }
                }}
            </main>
        </div>
    }
}

#[component]
fn BasicsStep(wizard: RwSignal<WizardState>) -> impl IntoView {
    view! {
        <section class="wizard-step">
            <p class="wizard-step__hint">"Let's start with the essentials."</p>
            <label class="wizard-label">
                "Trip Name *"
                <input
                    type="text"
                    placeholder="Summer Beach Getaway"
                    prop:value=move || wizard.with(|w| w.basics.name.clone())
                    on:input=move |ev| wizard.update(|w| w.basics.name = event_target_value(&ev))
                />
            </label>
            <label class="wizard-label">
                "Destination *"
                <input
                    type="text"
                    placeholder="Miami, Florida"
                    prop:value=move || wizard.with(|w| w.basics.destination.clone())
                    on:input=move |ev| wizard.update(|w| w.basics.destination = event_target_value(&ev))
                />
            </label>
            <div class="wizard-step__dates">
                <label class="wizard-label">
                    "Start Date *"
                    <input
                        type="date"
                        prop:value=move || wizard.with(|w| w.basics.start_date.clone())
                        on:input=move |ev| wizard.update(|w| w.basics.start_date = event_target_value(&ev))
                    />
                </label>
                <label class="wizard-label">
                    "End Date *"
                    <input
                        type="date"
                        prop:value=move || wizard.with(|w| w.basics.end_date.clone())
                        on:input=move |ev| wizard.update(|w| w.basics.end_date = event_target_value(&ev))
                    />
                </label>
            </div>
            <label class="wizard-label">
                "Description"
                <textarea
                    placeholder="A fun week at the beach with the family..."
                    prop:value=move || wizard.with(|w| w.basics.description.clone())
                    on:input=move |ev| wizard.update(|w| w.basics.description = event_target_value(&ev))
                ></textarea>
            </label>
            <div class="wizard-page__nav">
                <button class="btn btn--primary" on:click=move |_| {
                    wizard.update(|w| {
                        w.next();
                    });
                }>
                    "Next"
                </button>
            </div>
        </section>
    }
}

#[component]
fn InviteesStep(wizard: RwSignal<WizardState>) -> impl IntoView {
    let add = move || wizard.update(WizardState::add_invitee);

    view! {
        <section class="wizard-step">
            <p class="wizard-step__hint">"Add friends and family to collaborate on this trip."</p>
            <div class="wizard-step__invite">
                <input
                    type="email"
                    placeholder="friend@example.com"
                    prop:value=move || wizard.with(|w| w.invitee_input.clone())
                    on:input=move |ev| wizard.update(|w| w.set_invitee_input(event_target_value(&ev)))
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            add();
                        }
                    }
                />
                <button class="btn btn--primary" on:click=move |_| add()>
                    "Add"
                </button>
            </div>
            <Show
                when=move || wizard.with(|w| !w.invitees.is_empty())
                fallback=|| {
                    view! {
                        <div class="wizard-step__empty">
                            <p>"No invitations added yet."</p>
                            <p>"You can always add people later."</p>
                        </div>
                    }
                }
            >
                <ul class="wizard-step__invitees">
                    {move || {
                        wizard
                            .with(|w| w.invitees.clone())
                            .into_iter()
                            .map(|email| {
                                let target = email.clone();
                                view! {
                                    <li class="wizard-step__invitee">
                                        <span>{email}</span>
                                        <button
                                            class="btn btn--ghost"
                                            aria-label="Remove"
                                            on:click=move |_| wizard.update(|w| w.remove_invitee(&target))
                                        >
                                            "✕"
                                        </button>
                                    </li>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </ul>
            </Show>
            <div class="wizard-page__nav">
                <button class="btn btn--ghost" on:click=move |_| wizard.update(WizardState::back)>
                    "Back"
                </button>
                <button class="btn btn--primary" on:click=move |_| {
                    wizard.update(|w| {
                        w.next();
                    });
                }>
                    "Next"
                </button>
            </div>
        </section>
    }
}

#[component]
fn CategoriesStep(wizard: RwSignal<WizardState>) -> impl IntoView {
    view! {
        <section class="wizard-step">
            <p class="wizard-step__hint">"Choose how you want to organize your trip planning."</p>
            <div class="wizard-step__categories">
                {move || {
                    wizard
                        .with(|w| w.categories.clone())
                        .into_iter()
                        .enumerate()
                        .map(|(index, option)| {
                            view! {
                                <label class="category-option" class:category-option--off=!option.enabled>
                                    <input
                                        type="checkbox"
                                        prop:checked=option.enabled
                                        on:change=move |_| wizard.update(|w| w.toggle_category(index))
                                    />
                                    <span class="category-option__icon">{option.draft.icon}</span>
                                    <span class="category-option__name">{option.draft.name}</span>
                                </label>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </div>
            <div class="wizard-step__custom">
                <p>"Add Custom Category"</p>
                <input
                    class="wizard-step__custom-icon"
                    type="text"
                    placeholder="📌"
                    prop:value=move || wizard.with(|w| w.custom_icon.clone())
                    on:input=move |ev| wizard.update(|w| w.custom_icon = event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Category name"
                    prop:value=move || wizard.with(|w| w.custom_name.clone())
                    on:input=move |ev| wizard.update(|w| w.custom_name = event_target_value(&ev))
                />
                <button class="btn btn--outline" on:click=move |_| wizard.update(WizardState::add_custom_category)>
                    "Add"
                </button>
            </div>
        </section>
    }
}
