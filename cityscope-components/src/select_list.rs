//! Scrollable highlight list.

use crossterm::event::KeyCode;
use cityscope_core::{Component, EventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Props for [`SelectList`].
pub struct SelectListProps<'a, A> {
    /// Items in display order.
    pub items: &'a [String],
    /// Highlighted index (owned by application state).
    pub selected: usize,
    /// Whether this list receives key events.
    pub is_focused: bool,
    /// Draw a border around the list.
    pub show_border: bool,
    /// Substring to emphasize inside each item (case-insensitive).
    pub highlight_query: Option<&'a str>,
    /// Emitted when the highlight moves or Enter confirms the current row.
    pub on_select: fn(usize) -> A,
}

/// A vertical list with a movable highlight. The highlighted index is
/// application state; only the viewport scroll offset lives in the widget.
///
/// Up/Down (and j/k) move the highlight, g/G and Home/End jump, Enter
/// re-emits the current index as a confirmation.
#[derive(Default)]
pub struct SelectList {
    scroll_offset: usize,
}

impl SelectList {
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

/// Split `text` into spans with the first case-insensitive occurrence of
/// `query` emphasized. Falls back to an unstyled line when the lowercase
/// mapping shifts byte offsets off a boundary.
fn emphasized_line(text: &str, query: Option<&str>) -> Line<'static> {
    let Some(query) = query.filter(|q| !q.is_empty()) else {
        return Line::raw(text.to_string());
    };

    let haystack = text.to_lowercase();
    let needle = query.to_lowercase();
    let Some(start) = haystack.find(&needle) else {
        return Line::raw(text.to_string());
    };
    let end = start + needle.len();
    if !text.is_char_boundary(start) || end > text.len() || !text.is_char_boundary(end) {
        return Line::raw(text.to_string());
    }

    Line::from(vec![
        Span::raw(text[..start].to_string()),
        Span::styled(
            text[start..end].to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(text[end..].to_string()),
    ])
}

impl<A> Component<A> for SelectList {
    type Props<'a> = SelectListProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if !props.is_focused || props.items.is_empty() {
            return None;
        }

        let last = props.items.len() - 1;
        let EventKind::Key(key) = event else {
            return None;
        };

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                let next = (props.selected + 1).min(last);
                (next != props.selected).then(|| (props.on_select)(next))
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let next = props.selected.saturating_sub(1);
                (next != props.selected).then(|| (props.on_select)(next))
            }
            KeyCode::Home | KeyCode::Char('g') => {
                (props.selected != 0).then(|| (props.on_select)(0))
            }
            KeyCode::End | KeyCode::Char('G') => {
                (props.selected != last).then(|| (props.on_select)(last))
            }
            KeyCode::Enter => Some((props.on_select)(props.selected)),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let border = u16::from(props.show_border);
        let viewport_rows = area.height.saturating_sub(border * 2) as usize;
        self.ensure_visible(props.selected, viewport_rows);

        let items: Vec<ListItem> = props
            .items
            .iter()
            .map(|item| ListItem::new(emphasized_line(item, props.highlight_query)))
            .collect();

        let mut list = List::new(items).highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
        if props.show_border {
            list = list.block(Block::default().borders(Borders::ALL).border_style(
                if props.is_focused {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                },
            ));
        }

        let mut state = ListState::default().with_selected(Some(props.selected));
        *state.offset_mut() = self.scroll_offset;
        frame.render_stateful_widget(list, area, &mut state);
    }
}
