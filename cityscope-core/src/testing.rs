//! Test utilities: key-event constructors, a render harness over ratatui's
//! `TestBackend`, an action-channel harness, and assertion macros.
//!
//! ```ignore
//! use cityscope_core::testing::{key, RenderHarness};
//!
//! let mut render = RenderHarness::new(40, 10);
//! let output = render.render_to_string_plain(|frame| {
//!     component.render(frame, frame.area(), props);
//! });
//! assert!(output.contains("London"));
//! ```

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;

use crate::action::Action;

fn key_event_from(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Parse a key description like `"q"`, `"enter"`, or `"ctrl+p"`.
///
/// Returns `None` for descriptions this parser does not know.
pub fn parse_key_string(s: &str) -> Option<KeyEvent> {
    let mut modifiers = KeyModifiers::empty();
    let mut base = s;

    while let Some((prefix, rest)) = base.split_once('+') {
        match prefix.to_ascii_lowercase().as_str() {
            "ctrl" => modifiers |= KeyModifiers::CONTROL,
            "alt" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            _ => return None,
        }
        base = rest;
    }

    // shift+tab arrives as BackTab on most terminals
    if base.eq_ignore_ascii_case("tab") && modifiers.contains(KeyModifiers::SHIFT) {
        return Some(key_event_from(
            KeyCode::BackTab,
            modifiers - KeyModifiers::SHIFT,
        ));
    }

    let code = match base.to_ascii_lowercase().as_str() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "tab" => KeyCode::Tab,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "space" => KeyCode::Char(' '),
        _ => {
            let mut chars = base.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c)
        }
    };

    Some(key_event_from(code, modifiers))
}

/// Create a `KeyEvent` from a key string, panicking on unknown input.
///
/// # Panics
///
/// Panics if the key string cannot be parsed; suitable for tests only.
pub fn key(s: &str) -> KeyEvent {
    parse_key_string(s).unwrap_or_else(|| panic!("invalid key string: {:?}", s))
}

/// A bare character key with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    key_event_from(KeyCode::Char(c), KeyModifiers::empty())
}

/// A character key with Ctrl held.
pub fn ctrl_key(c: char) -> KeyEvent {
    key_event_from(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Renders into an off-screen buffer and exposes it as plain text.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    pub fn new(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("test terminal");
        Self { terminal }
    }

    /// Run one draw call and return the buffer contents, one line per row,
    /// styling stripped.
    pub fn render_to_string_plain<F>(&mut self, render: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render).expect("draw");

        let buffer = self.terminal.backend().buffer();
        let area = buffer.area;
        let mut out = String::with_capacity((area.width as usize + 1) * area.height as usize);
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }
}

/// Action-channel harness for exercising handlers outside the runtime.
pub struct TestHarness<S, A: Action> {
    /// The state under test.
    pub state: S,
    tx: mpsc::UnboundedSender<A>,
    rx: mpsc::UnboundedReceiver<A>,
}

impl<S, A: Action> TestHarness<S, A> {
    pub fn new(state: S) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { state, tx, rx }
    }

    /// A sender to hand to code that posts actions.
    pub fn sender(&self) -> mpsc::UnboundedSender<A> {
        self.tx.clone()
    }

    /// Post an action as a handler would.
    pub fn emit(&self, action: A) {
        let _ = self.tx.send(action);
    }

    /// Drain everything posted so far.
    pub fn drain_emitted(&mut self) -> Vec<A> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }
}

impl<S: Default, A: Action> Default for TestHarness<S, A> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

/// Assert that an action matching the pattern was emitted.
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "expected action matching `{}`, got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that no action matching the pattern was emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "expected no action matching `{}`, got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}
