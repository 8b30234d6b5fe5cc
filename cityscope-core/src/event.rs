//! Terminal event plumbing.
//!
//! A background task polls crossterm and forwards [`RawEvent`]s over a
//! channel; the runtime converts them into the [`EventKind`] values that
//! components consume. Mouse wheel movement is normalized into
//! [`EventKind::Scroll`] with a signed row delta.

use std::time::Duration;

use crossterm::event::{self, KeyEvent, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Raw event from crossterm before processing.
#[derive(Debug)]
pub enum RawEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Processed event delivered to components.
#[derive(Debug, Clone)]
pub enum EventKind {
    /// Keyboard event.
    Key(KeyEvent),
    /// Mouse event other than wheel scrolling.
    Mouse(MouseEvent),
    /// Wheel scroll at the given cell, delta in rows (positive = down).
    Scroll { column: u16, row: u16, delta: isize },
    /// Terminal resize (columns, rows).
    Resize(u16, u16),
}

/// Spawn the crossterm polling task.
///
/// Runs until the token is cancelled or the receiving side is dropped.
/// Each cycle sleeps `loop_sleep`, then drains up to a small batch of
/// pending events using `poll_timeout` per probe.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<RawEvent>,
    poll_timeout: Duration,
    loop_sleep: Duration,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        const MAX_EVENTS_PER_BATCH: usize = 20;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    // Drain whatever crossterm buffered so it does not leak
                    // into the shell after teardown.
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(loop_sleep) => {
                    let mut processed = 0;
                    while processed < MAX_EVENTS_PER_BATCH
                        && event::poll(poll_timeout).unwrap_or(false)
                    {
                        processed += 1;
                        let raw = match event::read() {
                            Ok(event::Event::Key(key)) => Some(RawEvent::Key(key)),
                            Ok(event::Event::Mouse(mouse)) => Some(RawEvent::Mouse(mouse)),
                            Ok(event::Event::Resize(w, h)) => Some(RawEvent::Resize(w, h)),
                            _ => None,
                        };
                        if let Some(raw) = raw {
                            if tx.send(raw).is_err() {
                                debug!("event channel closed, stopping poller");
                                return;
                            }
                        }
                    }
                }
            }
        }
    })
}

/// Convert a raw event into the form components consume.
pub fn process_raw_event(raw: RawEvent) -> EventKind {
    match raw {
        RawEvent::Key(key) => EventKind::Key(key),
        RawEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollDown => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: 1,
            },
            MouseEventKind::ScrollUp => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: -1,
            },
            _ => EventKind::Mouse(mouse),
        },
        RawEvent::Resize(w, h) => EventKind::Resize(w, h),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventKind, KeyEventState, KeyModifiers};

    #[test]
    fn key_passes_through() {
        let key = KeyEvent {
            code: KeyCode::Char('x'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        };
        assert!(matches!(
            process_raw_event(RawEvent::Key(key)),
            EventKind::Key(_)
        ));
    }

    #[test]
    fn wheel_becomes_scroll() {
        let down = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 4,
            row: 9,
            modifiers: KeyModifiers::NONE,
        };
        match process_raw_event(RawEvent::Mouse(down)) {
            EventKind::Scroll { column, row, delta } => {
                assert_eq!((column, row, delta), (4, 9, 1));
            }
            other => panic!("expected scroll, got {:?}", other),
        }

        let up = MouseEvent {
            kind: MouseEventKind::ScrollUp,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        match process_raw_event(RawEvent::Mouse(up)) {
            EventKind::Scroll { delta, .. } => assert_eq!(delta, -1),
            other => panic!("expected scroll, got {:?}", other),
        }
    }

    #[test]
    fn resize_passes_through() {
        assert!(matches!(
            process_raw_event(RawEvent::Resize(120, 40)),
            EventKind::Resize(120, 40)
        ));
    }
}
