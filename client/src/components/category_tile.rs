//! Category tile on the trip detail planning tab.

use leptos::prelude::*;
use model::CategoryTile;

use crate::state::trip::item_label;

/// Links to the category's task board.
#[component]
pub fn CategoryTileLink(trip_id: String, tile: CategoryTile) -> impl IntoView {
    let href = format!("/trips/{trip_id}/categories/{}", tile.category.id);

    view! {
        <a class="category-tile" href=href>
            <span class="category-tile__icon">{tile.category.icon}</span>
            <span class="category-tile__name">{tile.category.name}</span>
            <span class="category-tile__count">{item_label(tile.task_count)}</span>
        </a>
    }
}
