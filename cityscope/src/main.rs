//! cityscope entry point.
//!
//! Wiring follows the runtime's shape: parse config, build the HTTP
//! client, enter the terminal, then hand the loop a render closure, an
//! event mapper, a quit predicate, and the effect handler. The first page
//! request is enqueued before the loop starts (the mount fetch).

use std::cell::RefCell;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, KeyCode};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::{Frame, Terminal};
use tracing_subscriber::EnvFilter;

use cityscope::action::Action;
use cityscope::api::ApiClient;
use cityscope::components::{
    CityTable, CityTableProps, DetailView, DetailViewProps, HelpBar, HelpBarProps, SearchBar,
    SearchBarProps,
};
use cityscope::config::Config;
use cityscope::effect::Effect;
use cityscope::reducer::reducer;
use cityscope::state::{suggestions, AppState, Focus, Screen, TICK_INTERVAL_MS};
use cityscope_core::{EffectContext, EffectRuntime, EventKind, EventOutcome, TaskKey};

fn init_tracing(config: &Config) -> io::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let config = Config::parse();
    init_tracing(&config)?;

    let api = match ApiClient::new(&config) {
        Ok(api) => Arc::new(api),
        Err(e) => {
            eprintln!("Error: could not build HTTP client: {e}");
            std::process::exit(1);
        }
    };

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, api).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

struct Ui {
    search: SearchBar,
    table: CityTable,
    detail: DetailView,
    help: HelpBar,
}

impl Ui {
    fn new() -> Self {
        Self {
            search: SearchBar::new(),
            table: CityTable::new(),
            detail: DetailView::new(),
            help: HelpBar,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        use cityscope_core::Component;

        match state.screen {
            Screen::List => {
                let chunks = Layout::vertical([
                    Constraint::Length(3), // search input
                    Constraint::Min(1),    // city table
                    Constraint::Length(1), // help bar
                ])
                .split(area);

                self.table.render(
                    frame,
                    chunks[1],
                    CityTableProps {
                        cities: &state.list.cities,
                        selected: state.list.selected,
                        is_loading: state.list.is_loading,
                        page: state.list.page,
                        total_pages: state.list.total_pages,
                        is_focused: state.focus == Focus::Table,
                        tick_count: state.tick_count,
                    },
                );

                // The search bar draws last so its dropdown overlays the
                // table rows beneath the input.
                let subs = suggestions(&state.list.cities, &state.search.query);
                let search_area = Rect {
                    height: chunks[0].height + chunks[1].height,
                    ..chunks[0]
                };
                self.search.render(
                    frame,
                    search_area,
                    SearchBarProps {
                        query: &state.search.query,
                        suggestions: &subs,
                        selected: state.search.selected,
                        suggesting: state.search.suggesting,
                        is_focused: state.focus == Focus::Search,
                    },
                );

                self.help.render(
                    frame,
                    chunks[2],
                    HelpBarProps {
                        screen: state.screen,
                        focus: state.focus,
                    },
                );
            }
            Screen::Detail => {
                let chunks =
                    Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

                if let Some(detail) = &state.detail {
                    self.detail.render(
                        frame,
                        chunks[0],
                        DetailViewProps {
                            detail,
                            tick_count: state.tick_count,
                            is_focused: true,
                        },
                    );
                }
                self.help.render(
                    frame,
                    chunks[1],
                    HelpBarProps {
                        screen: state.screen,
                        focus: state.focus,
                    },
                );
            }
        }
    }

    fn map_event(&mut self, event: &EventKind, state: &AppState) -> EventOutcome<Action> {
        use cityscope_core::Component;

        if let EventKind::Resize(width, height) = event {
            return EventOutcome::action(Action::UiTerminalResize(*width, *height)).with_render();
        }

        match state.screen {
            Screen::Detail => {
                if let EventKind::Key(key) = event {
                    if key.code == KeyCode::Char('q') {
                        return EventOutcome::action(Action::Quit);
                    }
                }
                match &state.detail {
                    Some(detail) => {
                        let props = DetailViewProps {
                            detail,
                            tick_count: state.tick_count,
                            is_focused: true,
                        };
                        EventOutcome::from_actions(self.detail.handle_event(event, props))
                    }
                    None => EventOutcome::ignored(),
                }
            }
            Screen::List => match state.focus {
                Focus::Search => {
                    let subs = suggestions(&state.list.cities, &state.search.query);
                    let props = SearchBarProps {
                        query: &state.search.query,
                        suggestions: &subs,
                        selected: state.search.selected,
                        suggesting: state.search.suggesting,
                        is_focused: true,
                    };
                    EventOutcome::from_actions(self.search.handle_event(event, props))
                }
                Focus::Table => {
                    if let EventKind::Key(key) = event {
                        match key.code {
                            KeyCode::Char('/') | KeyCode::Tab => {
                                return EventOutcome::action(Action::SearchFocus);
                            }
                            KeyCode::Char('q') | KeyCode::Esc => {
                                return EventOutcome::action(Action::Quit);
                            }
                            _ => {}
                        }
                    }
                    let props = CityTableProps {
                        cities: &state.list.cities,
                        selected: state.list.selected,
                        is_loading: state.list.is_loading,
                        page: state.list.page,
                        total_pages: state.list.total_pages,
                        is_focused: true,
                        tick_count: state.tick_count,
                    };
                    EventOutcome::from_actions(self.table.handle_event(event, props))
                }
            },
        }
    }
}

fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, api: &Arc<ApiClient>) {
    match effect {
        Effect::FetchCitiesPage { page } => {
            let api = api.clone();
            ctx.tasks().spawn("cities_page", async move {
                match api.fetch_cities_page(page).await {
                    Ok(city_page) => Action::CitiesPageDidLoad {
                        total_count: city_page.total_count,
                        results: city_page.results,
                    },
                    Err(e) => {
                        tracing::warn!(page, error = %e, "city page fetch failed");
                        Action::CitiesPageDidError(e.to_string())
                    }
                }
            });
        }
        Effect::FetchCurrentWeather { city, generation } => {
            let api = api.clone();
            ctx.tasks().spawn("detail_current", async move {
                match api.fetch_current_weather(&city).await {
                    Ok(conditions) => Action::WeatherDidLoad {
                        generation,
                        conditions,
                    },
                    Err(e) => {
                        tracing::warn!(city = %city, error = %e, "current weather fetch failed");
                        Action::WeatherDidError {
                            generation,
                            error: e.to_string(),
                        }
                    }
                }
            });
        }
        Effect::FetchForecast { city, generation } => {
            let api = api.clone();
            ctx.tasks().spawn("detail_forecast", async move {
                match api.fetch_forecast(&city).await {
                    Ok(entries) => Action::ForecastDidLoad {
                        generation,
                        entries,
                    },
                    Err(e) => {
                        tracing::warn!(city = %city, error = %e, "forecast fetch failed");
                        Action::ForecastDidError {
                            generation,
                            error: e.to_string(),
                        }
                    }
                }
            });
        }
        Effect::CancelDetailFetches => {
            ctx.tasks().cancel(&TaskKey::new("detail_current"));
            ctx.tasks().cancel(&TaskKey::new("detail_forecast"));
        }
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    api: Arc<ApiClient>,
) -> io::Result<()> {
    let mut runtime = EffectRuntime::new(AppState::new(), reducer)
        .with_tick(Duration::from_millis(TICK_INTERVAL_MS), || Action::Tick);

    // Implicit first page request on mount.
    runtime.enqueue(Action::CitiesPageRequest);

    let ui = RefCell::new(Ui::new());

    runtime
        .run(
            terminal,
            |frame, area, state| ui.borrow_mut().render(frame, area, state),
            |event, state| ui.borrow_mut().map_event(event, state),
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &api),
        )
        .await
}
