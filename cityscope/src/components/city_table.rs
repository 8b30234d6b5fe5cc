//! The city directory table.
//!
//! Keyboard and wheel movement emit `ListSelect`, which doubles as the
//! pagination trigger: the reducer advances the page cursor whenever the
//! highlight lands near the bottom of the loaded rows.

use crossterm::event::KeyCode;
use cityscope_core::{Component, EventKind};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style, Stylize},
    widgets::{Block, Borders, Row, Table, TableState},
    Frame,
};

use super::spinner_frame;
use crate::action::Action;
use crate::state::City;

/// Rows jumped by PageUp/PageDown.
const PAGE_JUMP: usize = 10;

/// Rows moved per wheel notch.
const WHEEL_STEP: usize = 3;

pub struct CityTableProps<'a> {
    pub cities: &'a [City],
    pub selected: usize,
    pub is_loading: bool,
    pub page: u32,
    pub total_pages: u32,
    pub is_focused: bool,
    pub tick_count: u32,
}

#[derive(Default)]
pub struct CityTable {
    scroll_offset: usize,
}

impl CityTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_visible(&mut self, selected: usize, viewport_rows: usize) {
        if viewport_rows == 0 {
            return;
        }
        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        } else if selected >= self.scroll_offset + viewport_rows {
            self.scroll_offset = selected + 1 - viewport_rows;
        }
    }
}

impl Component<Action> for CityTable {
    type Props<'a> = CityTableProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || props.cities.is_empty() {
            return None;
        }

        let last = props.cities.len() - 1;
        let selected = props.selected;

        match event {
            EventKind::Key(key) => match key.code {
                // Moving against the bottom row still re-emits the
                // selection: every scroll-at-bottom event re-runs the
                // pagination eligibility check in the reducer.
                KeyCode::Down | KeyCode::Char('j') => {
                    Some(Action::ListSelect((selected + 1).min(last)))
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    Some(Action::ListSelect(selected.saturating_sub(1)))
                }
                KeyCode::PageDown => Some(Action::ListSelect((selected + PAGE_JUMP).min(last))),
                KeyCode::PageUp => Some(Action::ListSelect(selected.saturating_sub(PAGE_JUMP))),
                KeyCode::Home | KeyCode::Char('g') => Some(Action::ListSelect(0)),
                KeyCode::End | KeyCode::Char('G') => Some(Action::ListSelect(last)),
                KeyCode::Enter => Some(Action::ListConfirm),
                _ => None,
            },
            EventKind::Scroll { delta, .. } => {
                let next = if *delta > 0 {
                    (selected + WHEEL_STEP * *delta as usize).min(last)
                } else {
                    selected.saturating_sub(WHEEL_STEP * delta.unsigned_abs())
                };
                Some(Action::ListSelect(next))
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        // Area minus borders and the header row.
        let viewport_rows = area.height.saturating_sub(3) as usize;
        self.ensure_visible(props.selected, viewport_rows);

        let title = format!(
            " Cities ({} loaded, page {}/{}) ",
            props.cities.len(),
            props.page,
            props.total_pages
        );

        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_style(Style::default().fg(Color::Cyan).bold())
            .border_style(if props.is_focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            });
        if props.is_loading {
            block = block.title_bottom(format!(
                " {} Loading more cities ",
                spinner_frame(props.tick_count)
            ));
        }

        let header = Row::new(["City", "Country", "Timezone"])
            .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = props
            .cities
            .iter()
            .map(|city| {
                Row::new([
                    city.name.clone(),
                    city.country_code.clone(),
                    city.timezone.clone(),
                ])
            })
            .collect();

        let widths = [
            Constraint::Min(24),
            Constraint::Length(9),
            Constraint::Min(18),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD),
            );

        let mut table_state = TableState::default().with_selected(Some(props.selected));
        *table_state.offset_mut() = self.scroll_offset;
        frame.render_stateful_widget(table, area, &mut table_state);
    }
}
