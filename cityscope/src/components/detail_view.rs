//! The weather detail screen.
//!
//! Two sections, one per feed. Each renders whatever its fetch slot holds:
//! a spinner while in flight, the payload once ready, or a dimmed
//! "unavailable" placeholder after a failure. The sections never wait for
//! each other.

use crossterm::event::KeyCode;
use cityscope_core::{Component, EventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::spinner_frame;
use crate::action::Action;
use crate::state::{CurrentConditions, DetailState, FetchSlot, ForecastEntry};

pub struct DetailViewProps<'a> {
    pub detail: &'a DetailState,
    pub tick_count: u32,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct DetailView;

impl DetailView {
    pub fn new() -> Self {
        Self
    }
}

fn spinner_line(label: &str, tick_count: u32) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            spinner_frame(tick_count).to_string(),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(format!(" {label}"), Style::default().fg(Color::Gray)),
    ])
}

fn unavailable_line(label: &str) -> Line<'static> {
    Line::styled(label.to_string(), Style::default().fg(Color::DarkGray))
}

fn current_lines(current: &CurrentConditions) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled("Temperature  ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:.1} °C", current.temp_c),
                Style::default().fg(Color::White).bold(),
            ),
        ]),
        Line::from(vec![
            Span::styled("Feels like   ", Style::default().fg(Color::Gray)),
            Span::raw(format!("{:.1} °C", current.feels_like_c)),
        ]),
        Line::from(vec![
            Span::styled("Min / Max    ", Style::default().fg(Color::Gray)),
            Span::raw(format!(
                "{:.1} °C / {:.1} °C",
                current.temp_min_c, current.temp_max_c
            )),
        ]),
        Line::from(vec![
            Span::styled("Humidity     ", Style::default().fg(Color::Gray)),
            Span::raw(format!("{}%", current.humidity)),
        ]),
        Line::from(vec![
            Span::styled("Conditions   ", Style::default().fg(Color::Gray)),
            Span::raw(current.description.clone()),
        ]),
    ]
}

fn forecast_lines(entries: &[ForecastEntry], max_rows: usize) -> Vec<Line<'static>> {
    entries
        .iter()
        .take(max_rows)
        .map(|entry| {
            Line::from(vec![
                Span::styled(
                    format!("{:<20}", entry.timestamp),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!("{:>6.1} °C", entry.temp_c),
                    Style::default().fg(Color::White),
                ),
                Span::raw(format!("  feels {:>6.1} °C  ", entry.feels_like_c)),
                Span::styled(entry.description.clone(), Style::default().fg(Color::Gray)),
            ])
        })
        .collect()
}

impl Component<Action> for DetailView {
    type Props<'a> = DetailViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        match event {
            EventKind::Key(key) if key.code == KeyCode::Esc => Some(Action::DetailClose),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let detail = props.detail;

        let outer = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Weather for {} ", detail.city))
            .title_style(Style::default().fg(Color::Cyan).bold())
            .border_style(Style::default().fg(Color::Cyan));
        frame.render_widget(outer.clone(), area);
        let inner = outer.inner(area);

        let chunks = Layout::vertical([
            Constraint::Length(7), // current conditions
            Constraint::Min(3),    // forecast
        ])
        .split(inner);

        let current_block = Block::default()
            .borders(Borders::ALL)
            .title(" Current conditions ")
            .border_style(Style::default().fg(Color::DarkGray));
        let current_inner = current_block.inner(chunks[0]);
        frame.render_widget(current_block, chunks[0]);

        let lines = match &detail.current {
            FetchSlot::Ready(current) => current_lines(current),
            FetchSlot::InFlight => {
                vec![spinner_line("Fetching current conditions", props.tick_count)]
            }
            FetchSlot::Failed => vec![unavailable_line("Current conditions unavailable")],
        };
        frame.render_widget(Paragraph::new(lines), current_inner);

        let forecast_block = Block::default()
            .borders(Borders::ALL)
            .title(" 5-day forecast (3-hourly) ")
            .border_style(Style::default().fg(Color::DarkGray));
        let forecast_inner = forecast_block.inner(chunks[1]);
        frame.render_widget(forecast_block, chunks[1]);

        let lines = match &detail.forecast {
            FetchSlot::Ready(entries) => {
                forecast_lines(entries, forecast_inner.height as usize)
            }
            FetchSlot::InFlight => vec![spinner_line("Fetching forecast", props.tick_count)],
            FetchSlot::Failed => vec![unavailable_line("Forecast unavailable")],
        };
        frame.render_widget(Paragraph::new(lines), forecast_inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cityscope_core::testing::{key, RenderHarness};

    fn detail() -> DetailState {
        DetailState::new("London".into(), 1)
    }

    fn ready_detail() -> DetailState {
        let mut detail = detail();
        detail.current = FetchSlot::Ready(CurrentConditions {
            temp_c: 17.3,
            feels_like_c: 16.8,
            temp_min_c: 15.0,
            temp_max_c: 19.2,
            humidity: 72,
            condition: "Rain".into(),
            description: "light rain".into(),
        });
        detail.forecast = FetchSlot::Ready(vec![ForecastEntry {
            timestamp: "2026-08-07 12:00:00".into(),
            temp_c: 18.1,
            feels_like_c: 17.5,
            description: "broken clouds".into(),
        }]);
        detail
    }

    #[test]
    fn esc_closes_detail() {
        let mut view = DetailView::new();
        let detail = detail();
        let props = DetailViewProps {
            detail: &detail,
            tick_count: 0,
            is_focused: true,
        };
        let actions: Vec<_> = view
            .handle_event(&EventKind::Key(key("esc")), props)
            .into_iter()
            .collect();
        assert_eq!(actions, vec![Action::DetailClose]);
    }

    #[test]
    fn unfocused_ignores_esc() {
        let mut view = DetailView::new();
        let detail = detail();
        let props = DetailViewProps {
            detail: &detail,
            tick_count: 0,
            is_focused: false,
        };
        let actions: Vec<_> = view
            .handle_event(&EventKind::Key(key("esc")), props)
            .into_iter()
            .collect();
        assert!(actions.is_empty());
    }

    #[test]
    fn renders_both_feeds_when_ready() {
        let mut render = RenderHarness::new(70, 20);
        let mut view = DetailView::new();
        let detail = ready_detail();
        let output = render.render_to_string_plain(|frame| {
            let props = DetailViewProps {
                detail: &detail,
                tick_count: 0,
                is_focused: true,
            };
            view.render(frame, frame.area(), props);
        });
        assert!(output.contains("Weather for London"));
        assert!(output.contains("17.3 °C"));
        assert!(output.contains("72%"));
        assert!(output.contains("light rain"));
        assert!(output.contains("2026-08-07 12:00:00"));
        assert!(output.contains("broken clouds"));
    }

    #[test]
    fn renders_loading_spinners_while_in_flight() {
        let mut render = RenderHarness::new(70, 20);
        let mut view = DetailView::new();
        let detail = detail();
        let output = render.render_to_string_plain(|frame| {
            let props = DetailViewProps {
                detail: &detail,
                tick_count: 0,
                is_focused: true,
            };
            view.render(frame, frame.area(), props);
        });
        assert!(output.contains("Fetching current conditions"));
        assert!(output.contains("Fetching forecast"));
    }

    #[test]
    fn one_feed_failing_leaves_the_other_rendered() {
        let mut render = RenderHarness::new(70, 20);
        let mut view = DetailView::new();
        let mut detail = ready_detail();
        detail.forecast = FetchSlot::Failed;
        let output = render.render_to_string_plain(|frame| {
            let props = DetailViewProps {
                detail: &detail,
                tick_count: 0,
                is_focused: true,
            };
            view.render(frame, frame.area(), props);
        });
        assert!(output.contains("17.3 °C"));
        assert!(output.contains("Forecast unavailable"));
    }
}
