//! Application state.
//!
//! Two independent containers back the two screens: [`CityListState`] (plus
//! its [`SearchState`]) for the directory, and [`DetailState`] for the
//! weather view. The detail state is created fresh per navigation and holds
//! no references into the list, so tearing one down never disturbs the
//! other. Derived values (suggestions, total page count) are computed by
//! pure functions rather than stored as mutable fields.

use serde::Deserialize;

/// Records requested per directory page.
pub const PAGE_SIZE: u64 = 20;

/// Rows from the bottom of the loaded list at which the next page loads.
pub const SCROLL_THRESHOLD: usize = 5;

/// Tick period driving the loading spinner.
pub const TICK_INTERVAL_MS: u64 = 120;

/// One record from the city directory. Immutable once decoded.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct City {
    pub geoname_id: String,
    pub name: String,
    pub ascii_name: String,
    pub country_code: String,
    pub timezone: String,
}

/// Total page count for a directory of `total_count` records.
pub fn total_pages(total_count: u64) -> u32 {
    total_count.div_ceil(PAGE_SIZE) as u32
}

/// The paginated, append-only city collection.
///
/// `page` is the cursor of the page most recently requested; it only ever
/// advances, and only while no request is in flight. `total_pages` is
/// overwritten from every successful response, so a shifting upstream count
/// converges rather than wedging the cursor.
#[derive(Clone, Debug)]
pub struct CityListState {
    /// Accumulated records in arrival order. Never deduplicated: the
    /// upstream dataset is trusted not to repeat records across pages.
    pub cities: Vec<City>,
    /// Page cursor, 1-based.
    pub page: u32,
    /// Known page count; corrected by the first response.
    pub total_pages: u32,
    /// True while a page request is in flight.
    pub is_loading: bool,
    /// Row highlighted in the table.
    pub selected: usize,
}

impl Default for CityListState {
    fn default() -> Self {
        Self {
            cities: Vec::new(),
            page: 1,
            total_pages: 1,
            is_loading: false,
            selected: 0,
        }
    }
}

impl CityListState {
    /// Whether the highlight sits within [`SCROLL_THRESHOLD`] rows of the
    /// end of the loaded list.
    pub fn near_bottom(&self) -> bool {
        !self.cities.is_empty() && self.selected + SCROLL_THRESHOLD >= self.cities.len()
    }

    /// Whether the cursor may advance and trigger the next page fetch.
    pub fn can_advance(&self) -> bool {
        self.near_bottom() && self.page < self.total_pages && !self.is_loading
    }
}

/// Search input state. The suggestion list itself is not stored; it is
/// recomputed from the query and the loaded cities via [`suggestions`].
#[derive(Clone, Debug, Default)]
pub struct SearchState {
    pub query: String,
    /// Highlighted suggestion index.
    pub selected: usize,
    /// Whether the suggestion dropdown is visible.
    pub suggesting: bool,
}

/// Case-insensitive substring filter over the loaded cities.
///
/// Matches against the display name, preserves load order, and returns
/// nothing for an empty or whitespace-only query. Only cities already
/// fetched can ever appear; pages not yet loaded are invisible to search.
pub fn suggestions<'a>(cities: &'a [City], query: &str) -> Vec<&'a City> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    cities
        .iter()
        .filter(|city| city.name.to_lowercase().contains(&needle))
        .collect()
}

/// Current conditions for one city, metric units.
#[derive(Clone, Debug, PartialEq)]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub feels_like_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub humidity: u8,
    pub condition: String,
    pub description: String,
}

/// One forecast step (3-hourly), metric units.
#[derive(Clone, Debug, PartialEq)]
pub struct ForecastEntry {
    /// Upstream timestamp text, e.g. "2026-08-07 12:00:00".
    pub timestamp: String,
    pub temp_c: f64,
    pub feels_like_c: f64,
    pub description: String,
}

/// Lifecycle of one independent fetch.
///
/// A failed slot stays failed; there is no automatic retry, and failure is
/// rendered as absence rather than an error message.
#[derive(Clone, Debug, PartialEq)]
pub enum FetchSlot<T> {
    InFlight,
    Ready(T),
    Failed,
}

impl<T> FetchSlot<T> {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, FetchSlot::InFlight)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            FetchSlot::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// State of the weather detail view.
///
/// The two feeds load concurrently and independently; one failing never
/// clears the other. `generation` stamps this navigation so responses that
/// arrive after the view was torn down (or replaced) are discarded.
#[derive(Clone, Debug)]
pub struct DetailState {
    /// The city identifier used against the weather API (display name).
    pub city: String,
    pub generation: u64,
    pub current: FetchSlot<CurrentConditions>,
    pub forecast: FetchSlot<Vec<ForecastEntry>>,
}

impl DetailState {
    pub fn new(city: String, generation: u64) -> Self {
        Self {
            city,
            generation,
            current: FetchSlot::InFlight,
            forecast: FetchSlot::InFlight,
        }
    }
}

/// Which screen is on top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    List,
    Detail,
}

/// Which list-screen widget has input focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Table,
    Search,
}

/// Everything the UI renders from.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub list: CityListState,
    pub search: SearchState,
    pub detail: Option<DetailState>,
    /// Monotonic stamp source for [`DetailState::generation`].
    pub detail_generation: u64,
    pub screen: Screen,
    pub focus: Focus,
    /// Animation counter for spinners.
    pub tick_count: u32,
    pub terminal_size: (u16, u16),
}

impl AppState {
    pub fn new() -> Self {
        Self {
            terminal_size: (80, 24),
            ..Self::default()
        }
    }

    /// True while any fetch is outstanding (keeps the spinner animating).
    pub fn anything_loading(&self) -> bool {
        self.list.is_loading
            || self
                .detail
                .as_ref()
                .is_some_and(|d| d.current.is_in_flight() || d.forecast.is_in_flight())
    }
}
