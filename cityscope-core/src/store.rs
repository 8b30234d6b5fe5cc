//! Centralized state store with an effect-emitting reducer.
//!
//! The reducer is the only place state mutates. It receives the current
//! state and one action and returns a [`DispatchResult`]: whether the state
//! changed (which drives re-rendering) and a list of declarative effects.
//! Effects describe work to be done (an HTTP fetch, a task cancellation);
//! they never perform it. The main loop hands them to an effect handler.

use std::marker::PhantomData;

use crate::action::Action;

/// Outcome of dispatching one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    /// Whether the state was modified.
    pub changed: bool,
    /// Effects to hand to the effect handler, in emission order.
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    /// No state change, no effects.
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    /// State changed, no effects.
    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// State changed and one effect was emitted.
    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    /// State changed and several effects were emitted.
    #[inline]
    pub fn changed_with_many(effects: Vec<E>) -> Self {
        Self {
            changed: true,
            effects,
        }
    }

    /// Append an effect to this result.
    #[inline]
    pub fn with(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    /// True if any effects were emitted.
    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// A reducer that may emit effects alongside state changes.
pub type EffectReducer<S, A, E> = fn(&mut S, A) -> DispatchResult<E>;

/// State container driven by an [`EffectReducer`].
///
/// All mutations flow through [`EffectStore::dispatch`]; the store itself
/// never interprets effects.
pub struct EffectStore<S, A, E> {
    state: S,
    reducer: EffectReducer<S, A, E>,
    _marker: PhantomData<(A, E)>,
}

impl<S, A, E> EffectStore<S, A, E>
where
    A: Action,
{
    /// Create a store with the given initial state and reducer.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self {
            state,
            reducer,
            _marker: PhantomData,
        }
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Mutable state access, for initialization only; prefer actions.
    #[inline]
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Run the reducer for one action.
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        let name = action.name();
        let result = (self.reducer)(&mut self.state, action);
        tracing::trace!(
            action = name,
            changed = result.changed,
            effects = result.effects.len(),
            "dispatched"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Add(i32),
        Reset,
        Noop,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Add(_) => "Add",
                TestAction::Reset => "Reset",
                TestAction::Noop => "Noop",
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum TestEffect {
        Announce(i32),
    }

    #[derive(Default)]
    struct TestState {
        total: i32,
    }

    fn test_reducer(state: &mut TestState, action: TestAction) -> DispatchResult<TestEffect> {
        match action {
            TestAction::Add(n) => {
                state.total += n;
                DispatchResult::changed_with(TestEffect::Announce(state.total))
            }
            TestAction::Reset => {
                state.total = 0;
                DispatchResult::changed()
            }
            TestAction::Noop => DispatchResult::unchanged(),
        }
    }

    #[test]
    fn dispatch_runs_reducer_and_collects_effects() {
        let mut store = EffectStore::new(TestState::default(), test_reducer);

        let result = store.dispatch(TestAction::Add(3));
        assert!(result.changed);
        assert_eq!(result.effects, vec![TestEffect::Announce(3)]);
        assert_eq!(store.state().total, 3);

        let result = store.dispatch(TestAction::Reset);
        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(store.state().total, 0);
    }

    #[test]
    fn noop_dispatch_reports_unchanged() {
        let mut store = EffectStore::new(TestState::default(), test_reducer);
        let result = store.dispatch(TestAction::Noop);
        assert!(!result.changed);
        assert!(!result.has_effects());
    }

    #[test]
    fn result_builders() {
        let r: DispatchResult<TestEffect> = DispatchResult::unchanged();
        assert!(!r.changed && r.effects.is_empty());

        let r = DispatchResult::changed_with(TestEffect::Announce(1)).with(TestEffect::Announce(2));
        assert!(r.changed);
        assert_eq!(r.effects.len(), 2);

        let r = DispatchResult::changed_with_many(vec![TestEffect::Announce(9)]);
        assert!(r.changed && r.has_effects());
    }
}
