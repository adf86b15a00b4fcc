//! Trip detail view state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page loads one `TripDetail` aggregate. A `403` sends the user back to
//! the dashboard, a `401` to the login page; anything else renders the
//! "Trip not found" view with a link back.

#[cfg(test)]
#[path = "trip_test.rs"]
mod trip_test;

use model::TripDetail;
use model::format::pluralize;

use crate::net::api::RequestError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TripTab {
    #[default]
    Planning,
    Itinerary,
    Settings,
}

impl TripTab {
    pub const ALL: [Self; 3] = [Self::Planning, Self::Itinerary, Self::Settings];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::Itinerary => "Itinerary",
            Self::Settings => "Settings",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TripState {
    pub detail: Option<TripDetail>,
    pub tab: TripTab,
    pub loading: bool,
    pub not_found: bool,
}

impl TripState {
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.not_found = false;
    }

    pub fn loaded(&mut self, detail: TripDetail) {
        self.detail = Some(detail);
        self.loading = false;
    }

    /// Record a failed load. Returns the path to navigate to, if any.
    pub fn load_failed(&mut self, err: &RequestError) -> Option<&'static str> {
        self.loading = false;
        if err.is_forbidden() {
            return Some("/dashboard");
        }
        if err.is_unauthorized() {
            return Some("/login");
        }
        self.not_found = true;
        None
    }

    pub fn select_tab(&mut self, tab: TripTab) {
        self.tab = tab;
    }

    /// `"1 person"`, `"4 people"`.
    #[must_use]
    pub fn member_label(&self) -> String {
        pluralize(self.detail.as_ref().map_or(1, |d| d.member_count), "person", "people")
    }
}

/// Tile counter: `"1 item"`, `"3 items"`.
#[must_use]
pub fn item_label(count: u64) -> String {
    pluralize(count, "item", "items")
}
