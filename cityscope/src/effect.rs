//! Effects declared by the reducer and executed by the main loop.

/// Declarative side effects. The reducer emits these; `main` maps them onto
/// keyed tasks against the HTTP clients.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch one directory page.
    FetchCitiesPage { page: u32 },
    /// Fetch current conditions for the detail view.
    FetchCurrentWeather { city: String, generation: u64 },
    /// Fetch the forecast for the detail view.
    FetchForecast { city: String, generation: u64 },
    /// Abort any in-flight detail fetches (view was torn down).
    CancelDetailFetches,
}
