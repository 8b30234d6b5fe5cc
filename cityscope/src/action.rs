//! Application actions.
//!
//! Naming follows the intent/result convention: a bare verb form requests
//! async work (`CitiesPageRequest`), a `Did*` form carries its outcome back
//! onto the main loop. Detail results are stamped with the navigation
//! generation so the reducer can discard late arrivals.

use crate::state::{City, CurrentConditions, ForecastEntry};

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ===== City directory =====
    /// Request the page at the current cursor (no-op while one is in flight).
    CitiesPageRequest,
    /// A page arrived: append results, refresh the page count.
    CitiesPageDidLoad {
        total_count: u64,
        results: Vec<City>,
    },
    /// A page fetch failed; carries the message for the action log only.
    CitiesPageDidError(String),

    // ===== List navigation =====
    /// Move the table highlight (also the scroll trigger for pagination).
    ListSelect(usize),
    /// Open the detail view for the highlighted row.
    ListConfirm,

    // ===== Search =====
    /// Give the search input focus.
    SearchFocus,
    /// The query changed (every keystroke).
    SearchQueryChange(String),
    /// Move the suggestion highlight.
    SearchSelect(usize),
    /// Confirm the highlighted suggestion.
    SearchConfirm,
    /// Dismiss the dropdown and return focus to the table.
    SearchClose,

    // ===== Weather detail =====
    WeatherDidLoad {
        generation: u64,
        conditions: CurrentConditions,
    },
    WeatherDidError {
        generation: u64,
        error: String,
    },
    ForecastDidLoad {
        generation: u64,
        entries: Vec<ForecastEntry>,
    },
    ForecastDidError {
        generation: u64,
        error: String,
    },
    /// Leave the detail view; in-flight detail fetches are cancelled.
    DetailClose,

    // ===== UI =====
    /// Animation tick.
    Tick,
    UiTerminalResize(u16, u16),
    /// Exit the application.
    Quit,
}

impl cityscope_core::Action for Action {
    fn name(&self) -> &'static str {
        match self {
            Action::CitiesPageRequest => "CitiesPageRequest",
            Action::CitiesPageDidLoad { .. } => "CitiesPageDidLoad",
            Action::CitiesPageDidError(_) => "CitiesPageDidError",
            Action::ListSelect(_) => "ListSelect",
            Action::ListConfirm => "ListConfirm",
            Action::SearchFocus => "SearchFocus",
            Action::SearchQueryChange(_) => "SearchQueryChange",
            Action::SearchSelect(_) => "SearchSelect",
            Action::SearchConfirm => "SearchConfirm",
            Action::SearchClose => "SearchClose",
            Action::WeatherDidLoad { .. } => "WeatherDidLoad",
            Action::WeatherDidError { .. } => "WeatherDidError",
            Action::ForecastDidLoad { .. } => "ForecastDidLoad",
            Action::ForecastDidError { .. } => "ForecastDidError",
            Action::DetailClose => "DetailClose",
            Action::Tick => "Tick",
            Action::UiTerminalResize(_, _) => "UiTerminalResize",
            Action::Quit => "Quit",
        }
    }
}
