//! Reducer: all state transitions in one pure function.
//!
//! `(state, action) -> DispatchResult<Effect>`, no I/O here. Async work is
//! declared as effects; results come back as `Did*` actions.

use cityscope_core::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{total_pages, suggestions, AppState, DetailState, FetchSlot, Focus, Screen};

/// Open the detail view for `city`, leaving the list state untouched
/// underneath. Stamps a fresh generation and declares both weather fetches.
fn open_detail(state: &mut AppState, city: String) -> DispatchResult<Effect> {
    state.detail_generation += 1;
    let generation = state.detail_generation;
    state.detail = Some(DetailState::new(city.clone(), generation));
    state.screen = Screen::Detail;
    DispatchResult::changed_with_many(vec![
        Effect::FetchCurrentWeather {
            city: city.clone(),
            generation,
        },
        Effect::FetchForecast { city, generation },
    ])
}

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== City directory =====
        Action::CitiesPageRequest => {
            // Single-flight gate: never two page requests at once.
            if state.list.is_loading {
                return DispatchResult::unchanged();
            }
            state.list.is_loading = true;
            DispatchResult::changed_with(Effect::FetchCitiesPage {
                page: state.list.page,
            })
        }

        Action::CitiesPageDidLoad {
            total_count,
            results,
        } => {
            state.list.cities.extend(results);
            state.list.total_pages = total_pages(total_count);
            state.list.is_loading = false;
            DispatchResult::changed()
        }

        Action::CitiesPageDidError(_) => {
            // Already logged at the fetch site. The cursor keeps the failed
            // page number; the next scroll advance moves past it, so the
            // failed page is skipped rather than retried.
            state.list.is_loading = false;
            DispatchResult::changed()
        }

        // ===== List navigation =====
        Action::ListSelect(index) => {
            if state.list.cities.is_empty() {
                return DispatchResult::unchanged();
            }
            let clamped = index.min(state.list.cities.len() - 1);
            let moved = clamped != state.list.selected;
            state.list.selected = clamped;

            // The scroll trigger: advance the cursor when the highlight
            // reaches the bottom region and another page exists.
            if state.list.can_advance() {
                state.list.page += 1;
                state.list.is_loading = true;
                return DispatchResult::changed_with(Effect::FetchCitiesPage {
                    page: state.list.page,
                });
            }

            if moved {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::ListConfirm => match state.list.cities.get(state.list.selected) {
            Some(city) => {
                let name = city.name.clone();
                open_detail(state, name)
            }
            None => DispatchResult::unchanged(),
        },

        // ===== Search =====
        Action::SearchFocus => {
            state.focus = Focus::Search;
            DispatchResult::changed()
        }

        Action::SearchQueryChange(query) => {
            state.search.suggesting = !query.trim().is_empty();
            state.search.query = query;
            state.search.selected = 0;
            DispatchResult::changed()
        }

        Action::SearchSelect(index) => {
            let count = suggestions(&state.list.cities, &state.search.query).len();
            if count == 0 {
                return DispatchResult::unchanged();
            }
            let clamped = index.min(count - 1);
            if clamped == state.search.selected {
                return DispatchResult::unchanged();
            }
            state.search.selected = clamped;
            DispatchResult::changed()
        }

        Action::SearchConfirm => {
            let name = suggestions(&state.list.cities, &state.search.query)
                .get(state.search.selected)
                .map(|city| city.name.clone());
            match name {
                Some(name) => {
                    state.search.query = name.clone();
                    state.search.suggesting = false;
                    state.focus = Focus::Table;
                    open_detail(state, name)
                }
                None => DispatchResult::unchanged(),
            }
        }

        Action::SearchClose => {
            state.search.suggesting = false;
            state.focus = Focus::Table;
            DispatchResult::changed()
        }

        // ===== Weather detail =====
        Action::WeatherDidLoad {
            generation,
            conditions,
        } => match state.detail.as_mut() {
            Some(detail) if detail.generation == generation => {
                detail.current = FetchSlot::Ready(conditions);
                DispatchResult::changed()
            }
            // Stale response from a torn-down or replaced view.
            _ => DispatchResult::unchanged(),
        },

        Action::WeatherDidError { generation, .. } => match state.detail.as_mut() {
            Some(detail) if detail.generation == generation => {
                detail.current = FetchSlot::Failed;
                DispatchResult::changed()
            }
            _ => DispatchResult::unchanged(),
        },

        Action::ForecastDidLoad {
            generation,
            entries,
        } => match state.detail.as_mut() {
            Some(detail) if detail.generation == generation => {
                detail.forecast = FetchSlot::Ready(entries);
                DispatchResult::changed()
            }
            _ => DispatchResult::unchanged(),
        },

        Action::ForecastDidError { generation, .. } => match state.detail.as_mut() {
            Some(detail) if detail.generation == generation => {
                detail.forecast = FetchSlot::Failed;
                DispatchResult::changed()
            }
            _ => DispatchResult::unchanged(),
        },

        Action::DetailClose => {
            if state.screen != Screen::Detail {
                return DispatchResult::unchanged();
            }
            state.screen = Screen::List;
            state.detail = None;
            DispatchResult::changed_with(Effect::CancelDetailFetches)
        }

        // ===== UI =====
        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            if state.anything_loading() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size == (width, height) {
                return DispatchResult::unchanged();
            }
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Quit => DispatchResult::unchanged(), // handled by the main loop
    }
}
