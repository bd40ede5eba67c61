//! State Machine Runtime
//!
//! Small typed state machines over `Copy` state and event enums, with
//! wildcard transitions that apply from any state.

use std::fmt;

/// A transition, `from == None` for a wildcard
#[derive(Clone, Copy, Debug)]
struct Rule<S, E> {
    from: Option<S>,
    event: E,
    to: S,
}

/// Builder for creating state machines
pub struct StateMachineBuilder<S, E> {
    initial_state: S,
    rules: Vec<Rule<S, E>>,
}

impl<S: Copy + Eq, E: Copy + Eq> StateMachineBuilder<S, E> {
    /// Add a simple transition (from, event, to)
    pub fn on(mut self, from: S, event: E, to: S) -> Self {
        self.rules.push(Rule {
            from: Some(from),
            event,
            to,
        });
        self
    }

    /// Add a transition taken from any state.
    ///
    /// Specific transitions are checked first, so a wildcard only applies
    /// when no specific transition matched.
    pub fn on_any(mut self, event: E, to: S) -> Self {
        self.rules.push(Rule {
            from: None,
            event,
            to,
        });
        self
    }

    /// Build the state machine
    pub fn build(self) -> StateMachine<S, E> {
        StateMachine {
            current_state: self.initial_state,
            rules: self.rules,
        }
    }
}

/// A state machine instance
pub struct StateMachine<S, E> {
    current_state: S,
    rules: Vec<Rule<S, E>>,
}

impl<S: fmt::Debug, E> fmt::Debug for StateMachine<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("current_state", &self.current_state)
            .field("transitions", &self.rules.len())
            .finish()
    }
}

impl<S: Copy + Eq + fmt::Debug, E: Copy + Eq + fmt::Debug> StateMachine<S, E> {
    /// Create a builder for a state machine
    pub fn builder(initial_state: S) -> StateMachineBuilder<S, E> {
        StateMachineBuilder {
            initial_state,
            rules: Vec::new(),
        }
    }

    /// Get the current state
    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Send an event, potentially triggering a transition.
    ///
    /// Returns the new state, or `None` if the event is not valid in the
    /// current state (the machine is left unchanged).
    pub fn send(&mut self, event: E) -> Option<S> {
        let current = self.current_state;
        let rule = self
            .rules
            .iter()
            .find(|r| r.event == event && r.from == Some(current))
            .or_else(|| {
                self.rules
                    .iter()
                    .find(|r| r.event == event && r.from.is_none())
            })?;

        let to = rule.to;
        self.current_state = to;
        tracing::trace!(from = ?current, ?event, ?to, "fsm transition");
        Some(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Phase {
        Closed,
        Opening,
        Open,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Ev {
        Toggle,
        Settled,
        Reset,
    }

    #[test]
    fn test_simple_transitions() {
        let mut fsm = StateMachine::builder(Phase::Closed)
            .on(Phase::Closed, Ev::Toggle, Phase::Opening)
            .on(Phase::Opening, Ev::Settled, Phase::Open)
            .on(Phase::Open, Ev::Toggle, Phase::Closed)
            .build();

        assert_eq!(fsm.current_state(), Phase::Closed);
        assert_eq!(fsm.send(Ev::Toggle), Some(Phase::Opening));
        assert_eq!(fsm.send(Ev::Settled), Some(Phase::Open));
        assert_eq!(fsm.send(Ev::Toggle), Some(Phase::Closed));
    }

    #[test]
    fn test_invalid_event_no_transition() {
        let mut fsm = StateMachine::builder(Phase::Closed)
            .on(Phase::Closed, Ev::Toggle, Phase::Opening)
            .build();

        assert_eq!(fsm.send(Ev::Settled), None);
        assert!(fsm.is_in(Phase::Closed));
    }

    #[test]
    fn test_wildcard_applies_after_specific() {
        let mut fsm = StateMachine::builder(Phase::Open)
            .on_any(Ev::Reset, Phase::Closed)
            .on(Phase::Open, Ev::Reset, Phase::Opening)
            .build();

        // Specific transition wins even though the wildcard was registered first
        assert_eq!(fsm.send(Ev::Reset), Some(Phase::Opening));
        // No specific transition from Opening, wildcard applies
        assert_eq!(fsm.send(Ev::Reset), Some(Phase::Closed));
        // Wildcard applies from its own target too
        assert_eq!(fsm.send(Ev::Reset), Some(Phase::Closed));
    }
}
