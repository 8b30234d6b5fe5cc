//! Action trait for type-safe state mutations

use std::fmt::Debug;

/// Marker trait for actions dispatched to the store.
///
/// Actions describe intents to change state, never the change itself.
/// They must be `Clone` (the runtime may log or re-route them), `Debug`,
/// and `Send + 'static` so async tasks can post result actions back onto
/// the main loop's channel.
pub trait Action: Clone + Debug + Send + 'static {
    /// Action name used for logging and filtering.
    fn name(&self) -> &'static str;
}
