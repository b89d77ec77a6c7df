//! Table-driven finite state machine.
//!
//! A machine is a current state plus a table mapping `(state, event)` to a
//! handler. The event key a handler is registered under is also the state the
//! machine lands in once that handler returns, so states and events share one
//! identifier type.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use thiserror::Error;

/// A transition handler.
///
/// Receives the machine itself so it can dispatch further events
/// re-entrantly, the caller-owned context, and the event parameters.
pub type Handler<S, C, P> = fn(&mut Fsm<S, C, P>, &mut C, P);

/// Errors raised while building a machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsmError {
    #[error("Initial state {0} is not in the transition table")]
    UnknownInitialState(String),
    #[error("Handler {event} registered in state {state} has no matching destination state")]
    DanglingHandler { state: String, event: String },
}

/// Mapping from state to the handlers it accepts, keyed by event.
pub struct TransitionTable<S, C, P> {
    transitions: HashMap<S, HashMap<S, Handler<S, C, P>>>,
}

impl<S: Copy + Eq + Hash, C, P> Default for TransitionTable<S, C, P> {
    fn default() -> Self {
        Self {
            transitions: HashMap::new(),
        }
    }
}

impl<S: Copy + Eq + Hash, C, P> TransitionTable<S, C, P> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a state, even if it accepts no events.
    pub fn state(mut self, state: S) -> Self {
        self.transitions.entry(state).or_default();
        self
    }

    /// Register `handler` for `event` while in `state`.
    pub fn on(mut self, state: S, event: S, handler: Handler<S, C, P>) -> Self {
        self.transitions.entry(state).or_default().insert(event, handler);
        self
    }

    /// Number of declared states.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Check if no state has been declared.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

/// A finite state machine driven by named events.
///
/// Only [`Fsm::dispatch`] changes the current state.
pub struct Fsm<S, C, P> {
    state: S,
    transitions: HashMap<S, HashMap<S, Handler<S, C, P>>>,
    /// Destination state -> states holding a transition into it.
    sources: HashMap<S, Vec<S>>,
}

impl<S: fmt::Debug, C, P> fmt::Debug for Fsm<S, C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fsm")
            .field("state", &self.state)
            .field("states", &self.transitions.len())
            .finish()
    }
}

impl<S: Copy + Eq + Hash + fmt::Debug, C, P> Fsm<S, C, P> {
    /// Build a machine starting in `initial`.
    ///
    /// Fails if `initial` is not a state of the table, or if any handler is
    /// registered under an event that is not itself a state.
    pub fn new(initial: S, table: TransitionTable<S, C, P>) -> Result<Self, FsmError> {
        let transitions = table.transitions;
        if !transitions.contains_key(&initial) {
            return Err(FsmError::UnknownInitialState(format!("{:?}", initial)));
        }

        let mut sources: HashMap<S, Vec<S>> = HashMap::new();
        for (state, handlers) in &transitions {
            for event in handlers.keys() {
                if !transitions.contains_key(event) {
                    return Err(FsmError::DanglingHandler {
                        state: format!("{:?}", state),
                        event: format!("{:?}", event),
                    });
                }
                sources.entry(*event).or_default().push(*state);
            }
        }

        Ok(Self {
            state: initial,
            transitions,
            sources,
        })
    }

    /// Current state.
    pub fn state(&self) -> S {
        self.state
    }

    /// Check if the current state has a handler for `event`.
    pub fn accepts(&self, event: S) -> bool {
        self.transitions
            .get(&self.state)
            .is_some_and(|handlers| handlers.contains_key(&event))
    }

    /// States with a transition into `state`.
    pub fn sources(&self, state: S) -> &[S] {
        self.sources.get(&state).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Dispatch `event` with `params`.
    ///
    /// Without a handler for `event` in the current state this does nothing
    /// and returns `false`. Otherwise the handler runs, the machine moves to
    /// the state named `event`, and `true` is returned. A handler may dispatch
    /// again; the nested transition completes first and the outer dispatch
    /// still lands in its own state.
    pub fn dispatch(&mut self, ctx: &mut C, event: S, params: P) -> bool {
        let handler = self
            .transitions
            .get(&self.state)
            .and_then(|handlers| handlers.get(&event))
            .copied();

        let Some(handler) = handler else {
            log::trace!("Ignoring {:?} in state {:?}", event, self.state);
            return false;
        };

        let from = self.state;
        handler(self, ctx, params);
        self.state = event;
        log::debug!("Transition {:?} -> {:?}", from, event);
        true
    }
}
