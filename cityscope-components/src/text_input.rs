//! Single-line text input with cursor.

use crossterm::event::{KeyCode, KeyModifiers};
use cityscope_core::{Component, EventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Props for [`TextInput`].
pub struct TextInputProps<'a, A> {
    /// Current value (owned by application state).
    pub value: &'a str,
    /// Shown dimmed while the value is empty.
    pub placeholder: &'a str,
    /// Whether this input receives key events.
    pub is_focused: bool,
    /// Draw a border around the input.
    pub show_border: bool,
    /// Emitted for every edit.
    pub on_change: fn(String) -> A,
    /// Emitted on Enter.
    pub on_submit: fn(String) -> A,
}

/// A single-line input. The value lives in application state; the widget
/// keeps only the cursor position (in characters) as presentation state.
///
/// Emits `on_change` per keystroke and `on_submit` on Enter. Supports
/// arrow/Home/End movement plus Ctrl+A/E/U.
#[derive(Default)]
pub struct TextInput {
    /// Cursor position as a character index into the value.
    cursor: usize,
}

fn byte_offset(value: &str, char_idx: usize) -> usize {
    value
        .char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(value.len())
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn clamp_cursor(&mut self, value: &str) {
        self.cursor = self.cursor.min(value.chars().count());
    }

    fn insert_char(&mut self, value: &str, c: char) -> String {
        let at = byte_offset(value, self.cursor);
        let mut edited = String::with_capacity(value.len() + c.len_utf8());
        edited.push_str(&value[..at]);
        edited.push(c);
        edited.push_str(&value[at..]);
        self.cursor += 1;
        edited
    }

    fn delete_before_cursor(&mut self, value: &str) -> Option<String> {
        if self.cursor == 0 {
            return None;
        }
        let start = byte_offset(value, self.cursor - 1);
        let end = byte_offset(value, self.cursor);
        let mut edited = String::with_capacity(value.len());
        edited.push_str(&value[..start]);
        edited.push_str(&value[end..]);
        self.cursor -= 1;
        Some(edited)
    }

    fn delete_at_cursor(&self, value: &str) -> Option<String> {
        if self.cursor >= value.chars().count() {
            return None;
        }
        let start = byte_offset(value, self.cursor);
        let end = byte_offset(value, self.cursor + 1);
        let mut edited = String::with_capacity(value.len());
        edited.push_str(&value[..start]);
        edited.push_str(&value[end..]);
        Some(edited)
    }
}

impl<A> Component<A> for TextInput {
    type Props<'a> = TextInputProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if !props.is_focused {
            return None;
        }

        self.clamp_cursor(props.value);

        let EventKind::Key(key) = event else {
            return None;
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    None
                }
                KeyCode::Char('e') => {
                    self.cursor = props.value.chars().count();
                    None
                }
                KeyCode::Char('u') => {
                    self.cursor = 0;
                    Some((props.on_change)(String::new()))
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => {
                let edited = self.insert_char(props.value, c);
                Some((props.on_change)(edited))
            }
            KeyCode::Backspace => self
                .delete_before_cursor(props.value)
                .map(|v| (props.on_change)(v)),
            KeyCode::Delete => self.delete_at_cursor(props.value).map(|v| (props.on_change)(v)),
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(props.value.chars().count());
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = props.value.chars().count();
                None
            }
            KeyCode::Enter => Some((props.on_submit)(props.value.to_string())),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.clamp_cursor(props.value);

        let display = if props.value.is_empty() {
            props.placeholder
        } else {
            props.value
        };
        let style = if props.value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        let mut paragraph = Paragraph::new(display).style(style);
        if props.show_border {
            paragraph = paragraph.block(Block::default().borders(Borders::ALL).border_style(
                if props.is_focused {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                },
            ));
        }
        frame.render_widget(paragraph, area);

        if props.is_focused {
            let border = u16::from(props.show_border);
            let cursor_x = area.x + border + self.cursor as u16;
            let cursor_y = area.y + border;
            if cursor_x < area.x + area.width.saturating_sub(border) {
                frame.set_cursor_position((cursor_x, cursor_y));
            }
        }
    }
}
