//! Event-driven state runtime for the cityscope TUI.
//!
//! A small Redux/Elm-style engine: state lives in one store, mutates only
//! through a pure reducer, and the reducer declares side effects instead of
//! performing them. The runtime loop owns the terminal, converts crossterm
//! events into actions via the application's components, executes effects
//! by spawning keyed tokio tasks, and re-renders when a dispatch reports a
//! state change.
//!
//! # Concepts
//!
//! - [`Action`]: a described intent to change state
//! - [`EffectStore`]: state + reducer; dispatch returns changed-flag and effects
//! - [`Component`]: prop-driven UI element emitting actions from events
//! - [`TaskManager`]: keyed async tasks that post result actions
//! - [`EffectRuntime`]: the `tokio::select!` loop tying it all together
//!
//! The two-phase async pattern follows from these pieces: an intent action
//! (`CitiesPageRequest`) makes the reducer emit an effect; the effect
//! handler spawns a task; the task posts a result action
//! (`CitiesPageDidLoad` / `CitiesPageDidError`) back onto the loop.

pub mod action;
pub mod component;
pub mod event;
pub mod runtime;
pub mod store;
pub mod tasks;
pub mod testing;

pub use action::Action;
pub use component::Component;
pub use event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};
pub use runtime::{EffectContext, EffectRuntime, EventOutcome, PollerConfig};
pub use store::{DispatchResult, EffectReducer, EffectStore};
pub use tasks::{TaskKey, TaskManager};
