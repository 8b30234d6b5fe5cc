//! The event/action/render loop.
//!
//! [`EffectRuntime`] owns the store, the action channel, and the task
//! manager, and drives the single-threaded loop: draw when state changed,
//! then wait on terminal events, completed-task actions, and the optional
//! tick interval. All state mutation happens on this loop; async work only
//! ever re-enters it through the action channel.

use std::io;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::action::Action;
use crate::event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};
use crate::store::{EffectReducer, EffectStore};
use crate::tasks::TaskManager;

/// Configuration for the crossterm poller task.
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// Timeout passed to each `crossterm::event::poll` probe.
    pub poll_timeout: Duration,
    /// Sleep between poll cycles.
    pub loop_sleep: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            loop_sleep: Duration::from_millis(16),
        }
    }
}

/// Actions produced by mapping one event, plus an optional render hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome<A> {
    pub actions: Vec<A>,
    pub needs_render: bool,
}

impl<A> EventOutcome<A> {
    /// No actions, no render.
    pub fn ignored() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: false,
        }
    }

    /// A single action.
    pub fn action(action: A) -> Self {
        Self {
            actions: vec![action],
            needs_render: false,
        }
    }

    /// Collect actions from any iterator (e.g. `Component::handle_event`).
    pub fn from_actions(iter: impl IntoIterator<Item = A>) -> Self {
        Self {
            actions: iter.into_iter().collect(),
            needs_render: false,
        }
    }

    /// Request a re-render regardless of reducer outcome.
    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }
}

impl<A> Default for EventOutcome<A> {
    fn default() -> Self {
        Self::ignored()
    }
}

impl<A> From<A> for EventOutcome<A> {
    fn from(action: A) -> Self {
        Self::action(action)
    }
}

impl<A> From<Option<A>> for EventOutcome<A> {
    fn from(action: Option<A>) -> Self {
        match action {
            Some(action) => Self::action(action),
            None => Self::ignored(),
        }
    }
}

impl<A> From<Vec<A>> for EventOutcome<A> {
    fn from(actions: Vec<A>) -> Self {
        Self {
            actions,
            needs_render: false,
        }
    }
}

/// Handle given to the effect handler for spawning and cancelling work.
pub struct EffectContext<'a, A: Action> {
    action_tx: &'a mpsc::UnboundedSender<A>,
    tasks: &'a mut TaskManager<A>,
}

impl<'a, A: Action> EffectContext<'a, A> {
    /// Post an action directly onto the loop.
    pub fn emit(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    /// The keyed task registry.
    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        self.tasks
    }
}

/// Runtime for effect-emitting stores.
pub struct EffectRuntime<S, A: Action, E> {
    store: EffectStore<S, A, E>,
    action_tx: mpsc::UnboundedSender<A>,
    action_rx: mpsc::UnboundedReceiver<A>,
    poller_config: PollerConfig,
    tick: Option<(Duration, fn() -> A)>,
    tasks: TaskManager<A>,
    should_render: bool,
}

impl<S: 'static, A: Action, E> EffectRuntime<S, A, E> {
    /// Create a runtime from initial state and a reducer.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let tasks = TaskManager::new(action_tx.clone());
        Self {
            store: EffectStore::new(state, reducer),
            action_tx,
            action_rx,
            poller_config: PollerConfig::default(),
            tick: None,
            tasks,
            should_render: true,
        }
    }

    /// Emit `make_action()` every `period` (animation ticks and the like).
    pub fn with_tick(mut self, period: Duration, make_action: fn() -> A) -> Self {
        self.tick = Some((period, make_action));
        self
    }

    /// Override event polling behavior.
    pub fn with_event_poller(mut self, config: PollerConfig) -> Self {
        self.poller_config = config;
        self
    }

    /// Queue an action before or during the loop.
    pub fn enqueue(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    /// Clone the action sender.
    pub fn action_tx(&self) -> mpsc::UnboundedSender<A> {
        self.action_tx.clone()
    }

    /// Current state.
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// The keyed task registry.
    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        &mut self.tasks
    }

    /// Run until `should_quit` matches a dispatched action.
    pub async fn run<B, FRender, FEvent, FQuit, FEffect, R>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
        mut should_quit: FQuit,
        mut handle_effect: FEffect,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &S),
        FEvent: FnMut(&EventKind, &S) -> R,
        R: Into<EventOutcome<A>>,
        FQuit: FnMut(&A) -> bool,
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let cancel_token = CancellationToken::new();
        let _poller = spawn_event_poller(
            event_tx,
            self.poller_config.poll_timeout,
            self.poller_config.loop_sleep,
            cancel_token.clone(),
        );

        let mut tick_interval = self.tick.map(|(period, _)| tokio::time::interval(period));

        loop {
            if self.should_render {
                let state = self.store.state();
                terminal.draw(|frame| {
                    render(frame, frame.area(), state);
                })?;
                self.should_render = false;
            }

            tokio::select! {
                Some(raw_event) = event_rx.recv() => {
                    let event = process_raw_event(raw_event);
                    let outcome: EventOutcome<A> = map_event(&event, self.store.state()).into();
                    if outcome.needs_render {
                        self.should_render = true;
                    }
                    for action in outcome.actions {
                        let _ = self.action_tx.send(action);
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    if should_quit(&action) {
                        break;
                    }

                    let result = self.store.dispatch(action);
                    if result.has_effects() {
                        let mut ctx = EffectContext {
                            action_tx: &self.action_tx,
                            tasks: &mut self.tasks,
                        };
                        for effect in result.effects {
                            handle_effect(effect, &mut ctx);
                        }
                    }
                    if result.changed {
                        self.should_render = true;
                    }
                }

                _ = next_tick(&mut tick_interval) => {
                    if let Some((_, make_action)) = self.tick {
                        let _ = self.action_tx.send(make_action());
                    }
                }

                else => {
                    break;
                }
            }
        }

        cancel_token.cancel();
        self.tasks.cancel_all();
        Ok(())
    }
}

/// Resolves on the next tick, or never when no tick is configured.
async fn next_tick(interval: &mut Option<tokio::time::Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
