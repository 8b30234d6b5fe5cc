use cityscope_core::Component;
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::Action;
use crate::state::{Focus, Screen};

pub struct HelpBar;

pub struct HelpBarProps {
    pub screen: Screen,
    pub focus: Focus,
}

fn hint(key: &'static str, label: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(format!(" {key}"), Style::default().fg(Color::Cyan).bold()),
        Span::styled(format!(" {label} "), Style::default().fg(Color::DarkGray)),
    ]
}

impl Component<Action> for HelpBar {
    type Props<'a> = HelpBarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let hints: Vec<[Span<'static>; 2]> = match (props.screen, props.focus) {
            (Screen::Detail, _) => vec![hint("Esc", "back"), hint("q", "quit")],
            (Screen::List, Focus::Search) => vec![
                hint("↑↓", "suggestions"),
                hint("Enter", "open"),
                hint("Esc", "done"),
            ],
            (Screen::List, Focus::Table) => vec![
                hint("/", "search"),
                hint("↑↓", "move"),
                hint("Enter", "open"),
                hint("q", "quit"),
            ],
        };

        let spans: Vec<Span<'static>> = hints.into_iter().flatten().collect();
        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cityscope_core::testing::RenderHarness;

    #[test]
    fn list_hints_mention_search_and_quit() {
        let mut render = RenderHarness::new(60, 1);
        let mut bar = HelpBar;
        let output = render.render_to_string_plain(|frame| {
            bar.render(
                frame,
                frame.area(),
                HelpBarProps {
                    screen: Screen::List,
                    focus: Focus::Table,
                },
            );
        });
        assert!(output.contains("search"));
        assert!(output.contains("quit"));
    }

    #[test]
    fn detail_hints_mention_back() {
        let mut render = RenderHarness::new(60, 1);
        let mut bar = HelpBar;
        let output = render.render_to_string_plain(|frame| {
            bar.render(
                frame,
                frame.area(),
                HelpBarProps {
                    screen: Screen::Detail,
                    focus: Focus::Table,
                },
            );
        });
        assert!(output.contains("back"));
    }
}
