//! Search input with a suggestion dropdown.
//!
//! The dropdown content is derived state: the caller computes it from the
//! loaded cities and the live query, so this component never filters
//! anything itself. Up/Down and Enter drive the dropdown; every other key
//! edits the query.

use crossterm::event::KeyCode;
use cityscope_core::{Component, EventKind};
use cityscope_components::{SelectList, SelectListProps, TextInput, TextInputProps};
use ratatui::{
    layout::Rect,
    widgets::Clear,
    Frame,
};

use crate::action::Action;
use crate::state::City;

/// Maximum dropdown height, including its border.
const DROPDOWN_MAX_ROWS: u16 = 12;

/// Height of the input row, including its border.
pub const INPUT_HEIGHT: u16 = 3;

pub struct SearchBarProps<'a> {
    pub query: &'a str,
    /// Suggestions derived from the loaded cities, in load order.
    pub suggestions: &'a [&'a City],
    /// Highlighted suggestion index.
    pub selected: usize,
    /// Whether the dropdown is visible.
    pub suggesting: bool,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct SearchBar {
    input: TextInput,
    list: SelectList,
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    fn suggestion_names(suggestions: &[&City]) -> Vec<String> {
        suggestions.iter().map(|city| city.name.clone()).collect()
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Esc => return vec![Action::SearchClose],
            KeyCode::Enter => {
                if props.suggesting && !props.suggestions.is_empty() {
                    return vec![Action::SearchConfirm];
                }
                return Vec::new();
            }
            KeyCode::Up | KeyCode::Down => {
                if props.suggesting && !props.suggestions.is_empty() {
                    let items = Self::suggestion_names(props.suggestions);
                    let list_props = SelectListProps {
                        items: &items,
                        selected: props.selected,
                        is_focused: true,
                        show_border: false,
                        highlight_query: None,
                        on_select: Action::SearchSelect,
                    };
                    return self.list.handle_event(event, list_props).into_iter().collect();
                }
                return Vec::new();
            }
            _ => {}
        }

        let input_props = TextInputProps {
            value: props.query,
            placeholder: "Search cities...",
            is_focused: true,
            show_border: true,
            on_change: Action::SearchQueryChange,
            on_submit: |_| Action::SearchConfirm,
        };
        self.input.handle_event(event, input_props).into_iter().collect()
    }

    /// Renders the input into the top rows of `area` and, when visible, the
    /// dropdown over whatever sits below it. Call after the table so the
    /// dropdown lands on top.
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let input_area = Rect {
            height: INPUT_HEIGHT.min(area.height),
            ..area
        };
        let input_props = TextInputProps {
            value: props.query,
            placeholder: "Search cities...",
            is_focused: props.is_focused,
            show_border: true,
            on_change: Action::SearchQueryChange,
            on_submit: |_| Action::SearchConfirm,
        };
        self.input.render(frame, input_area, input_props);

        if !props.suggesting || props.suggestions.is_empty() || area.height <= INPUT_HEIGHT {
            return;
        }

        let available = area.height - INPUT_HEIGHT;
        let wanted = props.suggestions.len() as u16 + 2;
        let dropdown_area = Rect {
            x: area.x,
            y: area.y + INPUT_HEIGHT,
            width: area.width,
            height: wanted.min(DROPDOWN_MAX_ROWS).min(available),
        };

        frame.render_widget(Clear, dropdown_area);
        let items = Self::suggestion_names(props.suggestions);
        let list_props = SelectListProps {
            items: &items,
            selected: props.selected,
            is_focused: props.is_focused,
            show_border: true,
            highlight_query: Some(props.query),
            on_select: Action::SearchSelect,
        };
        self.list.render(frame, dropdown_area, list_props);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cityscope_core::testing::{key, RenderHarness};

    fn city(name: &str) -> City {
        City {
            geoname_id: format!("id-{name}"),
            name: name.to_string(),
            ascii_name: name.to_string(),
            country_code: "XX".into(),
            timezone: "Etc/UTC".into(),
        }
    }

    #[test]
    fn typing_emits_query_change() {
        let mut bar = SearchBar::new();
        let props = SearchBarProps {
            query: "",
            suggestions: &[],
            selected: 0,
            suggesting: false,
            is_focused: true,
        };
        let actions: Vec<_> = bar
            .handle_event(&EventKind::Key(key("l")), props)
            .into_iter()
            .collect();
        assert_eq!(actions, vec![Action::SearchQueryChange("l".into())]);
    }

    #[test]
    fn arrows_navigate_dropdown() {
        let mut bar = SearchBar::new();
        let london = city("London");
        let londrina = city("Londrina");
        let suggestions = [&london, &londrina];
        let props = SearchBarProps {
            query: "lon",
            suggestions: &suggestions,
            selected: 0,
            suggesting: true,
            is_focused: true,
        };
        let actions: Vec<_> = bar
            .handle_event(&EventKind::Key(key("down")), props)
            .into_iter()
            .collect();
        assert_eq!(actions, vec![Action::SearchSelect(1)]);
    }

    #[test]
    fn enter_confirms_when_suggesting() {
        let mut bar = SearchBar::new();
        let london = city("London");
        let suggestions = [&london];
        let props = SearchBarProps {
            query: "lon",
            suggestions: &suggestions,
            selected: 0,
            suggesting: true,
            is_focused: true,
        };
        let actions: Vec<_> = bar
            .handle_event(&EventKind::Key(key("enter")), props)
            .into_iter()
            .collect();
        assert_eq!(actions, vec![Action::SearchConfirm]);
    }

    #[test]
    fn enter_without_suggestions_is_silent() {
        let mut bar = SearchBar::new();
        let props = SearchBarProps {
            query: "zzz",
            suggestions: &[],
            selected: 0,
            suggesting: true,
            is_focused: true,
        };
        let actions: Vec<_> = bar
            .handle_event(&EventKind::Key(key("enter")), props)
            .into_iter()
            .collect();
        assert!(actions.is_empty());
    }

    #[test]
    fn esc_closes() {
        let mut bar = SearchBar::new();
        let props = SearchBarProps {
            query: "lon",
            suggestions: &[],
            selected: 0,
            suggesting: true,
            is_focused: true,
        };
        let actions: Vec<_> = bar
            .handle_event(&EventKind::Key(key("esc")), props)
            .into_iter()
            .collect();
        assert_eq!(actions, vec![Action::SearchClose]);
    }

    #[test]
    fn unfocused_ignores_everything() {
        let mut bar = SearchBar::new();
        let props = SearchBarProps {
            query: "",
            suggestions: &[],
            selected: 0,
            suggesting: false,
            is_focused: false,
        };
        let actions: Vec<_> = bar
            .handle_event(&EventKind::Key(key("a")), props)
            .into_iter()
            .collect();
        assert!(actions.is_empty());
    }

    #[test]
    fn render_shows_dropdown_when_suggesting() {
        let mut render = RenderHarness::new(40, 12);
        let mut bar = SearchBar::new();
        let london = city("London");
        let londrina = city("Londrina");
        let suggestions = [&london, &londrina];
        let output = render.render_to_string_plain(|frame| {
            let props = SearchBarProps {
                query: "lon",
                suggestions: &suggestions,
                selected: 0,
                suggesting: true,
                is_focused: true,
            };
            bar.render(frame, frame.area(), props);
        });
        assert!(output.contains("lon"));
        assert!(output.contains("Londrina"));
    }

    #[test]
    fn render_hides_dropdown_when_not_suggesting() {
        let mut render = RenderHarness::new(40, 12);
        let mut bar = SearchBar::new();
        let london = city("London");
        let suggestions = [&london];
        let output = render.render_to_string_plain(|frame| {
            let props = SearchBarProps {
                query: "London",
                suggestions: &suggestions,
                selected: 0,
                suggesting: false,
                is_focused: true,
            };
            bar.render(frame, frame.area(), props);
        });
        // Only the input echoes the name; no dropdown row repeats it.
        assert_eq!(output.matches("London").count(), 1);
    }
}
