//! Render tests over states produced by real dispatch sequences.

use cityscope::action::Action;
use cityscope::components::{
    CityTable, CityTableProps, Component, DetailView, DetailViewProps, SearchBar, SearchBarProps,
};
use cityscope::reducer::reducer;
use cityscope::state::{suggestions, AppState, City, CurrentConditions, Focus};
use cityscope_core::testing::RenderHarness;
use cityscope_core::EffectStore;

fn city(name: &str, country: &str, timezone: &str) -> City {
    City {
        geoname_id: format!("id-{}", name.to_lowercase()),
        name: name.to_string(),
        ascii_name: name.to_string(),
        country_code: country.to_string(),
        timezone: timezone.to_string(),
    }
}

fn loaded_store() -> EffectStore<AppState, Action, cityscope::effect::Effect> {
    let mut store = EffectStore::new(AppState::new(), reducer);
    store.dispatch(Action::CitiesPageRequest);
    store.dispatch(Action::CitiesPageDidLoad {
        total_count: 60,
        results: vec![
            city("London", "GB", "Europe/London"),
            city("Paris", "FR", "Europe/Paris"),
            city("Tokyo", "JP", "Asia/Tokyo"),
        ],
    });
    store
}

#[test]
fn list_screen_shows_loaded_cities() {
    let store = loaded_store();
    let state = store.state();

    let mut render = RenderHarness::new(72, 16);
    let mut table = CityTable::new();
    let output = render.render_to_string_plain(|frame| {
        table.render(
            frame,
            frame.area(),
            CityTableProps {
                cities: &state.list.cities,
                selected: state.list.selected,
                is_loading: state.list.is_loading,
                page: state.list.page,
                total_pages: state.list.total_pages,
                is_focused: true,
                tick_count: state.tick_count,
            },
        );
    });

    assert!(output.contains("London"));
    assert!(output.contains("Europe/Paris"));
    assert!(output.contains("Asia/Tokyo"));
    assert!(output.contains("page 1/3"));
}

#[test]
fn dropdown_reflects_typed_query() {
    let mut store = loaded_store();
    store.dispatch(Action::SearchFocus);
    store.dispatch(Action::SearchQueryChange("lond".into()));
    let state = store.state();

    let subs = suggestions(&state.list.cities, &state.search.query);
    assert_eq!(subs.len(), 1);

    let mut render = RenderHarness::new(50, 14);
    let mut bar = SearchBar::new();
    let output = render.render_to_string_plain(|frame| {
        bar.render(
            frame,
            frame.area(),
            SearchBarProps {
                query: &state.search.query,
                suggestions: &subs,
                selected: state.search.selected,
                suggesting: state.search.suggesting,
                is_focused: state.focus == Focus::Search,
            },
        );
    });

    assert!(output.contains("lond"));
    assert!(output.contains("London"));
}

#[test]
fn detail_screen_after_responses() {
    let mut store = loaded_store();
    store.dispatch(Action::ListConfirm); // opens "London"
    let generation = store.state().detail_generation;

    store.dispatch(Action::WeatherDidLoad {
        generation,
        conditions: CurrentConditions {
            temp_c: 17.3,
            feels_like_c: 16.8,
            temp_min_c: 15.0,
            temp_max_c: 19.2,
            humidity: 72,
            condition: "Rain".into(),
            description: "light rain".into(),
        },
    });

    let state = store.state();
    let detail = state.detail.as_ref().expect("detail open");

    let mut render = RenderHarness::new(72, 20);
    let mut view = DetailView::new();
    let output = render.render_to_string_plain(|frame| {
        view.render(
            frame,
            frame.area(),
            DetailViewProps {
                detail,
                tick_count: state.tick_count,
                is_focused: true,
            },
        );
    });

    assert!(output.contains("Weather for London"));
    assert!(output.contains("17.3 °C"));
    // Forecast still in flight.
    assert!(output.contains("Fetching forecast"));
}
