#[cfg(test)]
#[path = "trips_test.rs"]
mod trips_test;

use model::Trip;
use model::format::format_date_range;

/// Dashboard trip list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TripsState {
    pub items: Vec<Trip>,
    pub loading: bool,
    pub loaded: bool,
}

impl TripsState {
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    pub fn loaded(&mut self, items: Vec<Trip>) {
        self.items = items;
        self.loading = false;
        self.loaded = true;
    }

    /// A failed load keeps whatever was shown before.
    pub fn load_failed(&mut self) {
        self.loading = false;
        self.loaded = true;
    }

    /// Whether to render the "No trips yet" call-to-action.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loaded && self.items.is_empty()
    }
}

/// Card subtitle for a trip: `Jun 1 - Jun 7, 2025`.
#[must_use]
pub fn trip_dates(trip: &Trip) -> String {
    format_date_range(&trip.start_date, &trip.end_date)
}
