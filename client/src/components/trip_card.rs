//! Dashboard card for one trip.

use leptos::prelude::*;
use model::Trip;

use crate::state::trips::trip_dates;

#[component]
pub fn TripCard(trip: Trip) -> impl IntoView {
    let href = format!("/trips/{}", trip.id);
    let dates = trip_dates(&trip);

    view! {
        <a class="trip-card" href=href>
            <span class="trip-card__name">{trip.name}</span>
            <span class="trip-card__destination">{format!("📍 {}", trip.destination)}</span>
            <span class="trip-card__dates">{dates}</span>
        </a>
    }
}
