use super::*;
use model::{Category, CategoryTile, Trip};

fn detail(member_count: u64) -> TripDetail {
    TripDetail {
        trip: Trip {
            id: "t1".to_owned(),
            name: "Beach".to_owned(),
            destination: "Miami".to_owned(),
            start_date: "2025-06-01".to_owned(),
            end_date: "2025-06-07".to_owned(),
            description: None,
            created_by: "u1".to_owned(),
            created_at: None,
        },
        member_count,
        categories: vec![CategoryTile {
            category: Category {
                id: "c1".to_owned(),
                trip_id: "t1".to_owned(),
                name: "Food".to_owned(),
                icon: "🍴".to_owned(),
                created_at: None,
            },
            task_count: 0,
        }],
    }
}

fn status_error(status: u16) -> RequestError {
    RequestError { status: Some(status), message: "x".to_owned() }
}

#[test]
fn planning_is_default_tab() {
    let mut state = TripState::default();
    assert_eq!(state.tab, TripTab::Planning);
    state.select_tab(TripTab::Settings);
    assert_eq!(state.tab.label(), "Settings");
}

#[test]
fn forbidden_redirects_to_dashboard() {
    let mut state = TripState::default();
    state.begin_load();
    assert_eq!(state.load_failed(&status_error(403)), Some("/dashboard"));
    assert!(!state.not_found);
    assert!(!state.loading);
}

#[test]
fn unauthorized_redirects_to_login() {
    let mut state = TripState::default();
    assert_eq!(state.load_failed(&status_error(401)), Some("/login"));
}

#[test]
fn missing_trip_shows_not_found() {
    let mut state = TripState::default();
    assert_eq!(state.load_failed(&status_error(404)), None);
    assert!(state.not_found);
    let mut state = TripState::default();
    assert_eq!(state.load_failed(&RequestError::transport("offline")), None);
    assert!(state.not_found);
}

#[test]
fn member_label_pluralizes() {
    let mut state = TripState::default();
    state.loaded(detail(1));
    assert_eq!(state.member_label(), "1 person");
    state.loaded(detail(4));
    assert_eq!(state.member_label(), "4 people");
}

#[test]
fn item_label_pluralizes() {
    assert_eq!(item_label(0), "0 items");
    assert_eq!(item_label(1), "1 item");
}
