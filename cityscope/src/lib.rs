//! City directory and weather TUI.
//!
//! Browse a paginated city dataset, filter it as you type, and open a
//! weather detail screen per city. Built on the `cityscope-core` runtime:
//! state mutates only in [`reducer::reducer`], HTTP work runs as keyed
//! tasks declared through [`effect::Effect`], and the UI is a set of
//! prop-driven components.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod reducer;
pub mod state;
