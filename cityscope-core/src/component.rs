//! Component trait for prop-driven UI elements.

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A UI element that renders from read-only props and emits actions.
///
/// Rules:
/// 1. Props carry everything the component needs to render, borrowed from
///    application state.
/// 2. `handle_event` translates input into actions; it never mutates
///    application state directly.
/// 3. Presentation-only state (a scroll offset, a cursor column) may live
///    in `&mut self`; data lives in the store.
///
/// Focus is passed through props rather than inferred from the event, so a
/// parent decides which child currently receives input.
pub trait Component<A> {
    /// Read-only data required to render.
    type Props<'a>;

    /// Translate an event into zero or more actions.
    ///
    /// May return `None`, `Some(action)`, or a `Vec` of actions. The
    /// default implementation emits nothing (render-only components).
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Render into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
