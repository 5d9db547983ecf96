//! # Trigger bindings: condition-to-action glue.
//!
//! A [`Binding`] polls a boolean predicate once per cycle (after subsystem
//! periodic hooks, before the execute pass) and issues a schedule or cancel
//! request on the configured [`Edge`]. Requests land in the same deferred
//! queue as everything else and resolve in the drain step of the cycle
//! that observed the edge.
//!
//! Typical predicates are gamepad buttons, beam-break sensors, or match
//! timers surfaced by the host runtime:
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use commandeer::{Binding, CommandExt, Edge, FnCommand, Scheduler};
//!
//! let pressed = Rc::new(Cell::new(false));
//! let button = pressed.clone();
//!
//! let mut scheduler = Scheduler::new();
//! let intake = FnCommand::new("intake").into_ref();
//! scheduler.bind(Binding::schedule(
//!     Edge::WhileTrue,
//!     move || button.get(),
//!     &intake,
//! ));
//! ```

use std::collections::VecDeque;

use crate::command::CommandRef;
use crate::scheduler::context::Request;

/// When a binding fires, relative to its predicate's transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Fire once when the predicate goes false → true.
    OnRising,
    /// Fire once when the predicate goes true → false.
    OnFalling,
    /// Fire on any transition.
    OnChange,
    /// Schedule when the predicate becomes true, cancel when it becomes
    /// false: the command runs while the condition holds.
    WhileTrue,
    /// Schedule when the predicate becomes false, cancel when it becomes
    /// true.
    WhileFalse,
}

/// What an edge binding does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Schedule,
    Cancel,
}

/// A polled predicate bound to a command.
///
/// The previous sample is seeded `false`: a predicate that is already true
/// when the first cycle runs counts as a rising edge.
pub struct Binding {
    predicate: Box<dyn FnMut() -> bool>,
    edge: Edge,
    action: Action,
    command: CommandRef,
    last: bool,
}

impl Binding {
    /// Binds `command` to be scheduled on the given edge. For the `While*`
    /// modes this schedules on enter and cancels on exit.
    pub fn schedule(
        edge: Edge,
        predicate: impl FnMut() -> bool + 'static,
        command: &CommandRef,
    ) -> Self {
        Self {
            predicate: Box::new(predicate),
            edge,
            action: Action::Schedule,
            command: command.clone(),
            last: false,
        }
    }

    /// Binds `command` to be cancelled on the given edge. With a `While*`
    /// mode, cancels on enter and does nothing on exit.
    pub fn cancel(
        edge: Edge,
        predicate: impl FnMut() -> bool + 'static,
        command: &CommandRef,
    ) -> Self {
        Self {
            predicate: Box::new(predicate),
            edge,
            action: Action::Cancel,
            command: command.clone(),
            last: false,
        }
    }

    /// Samples the predicate and queues requests for any edge observed.
    pub(crate) fn poll(&mut self, queue: &mut VecDeque<Request>) {
        let current = (self.predicate)();
        let last = std::mem::replace(&mut self.last, current);

        let (enter, exit) = match self.edge {
            Edge::OnRising => (current && !last, false),
            Edge::OnFalling => (!current && last, false),
            Edge::OnChange => (current != last, false),
            Edge::WhileTrue => (current && !last, !current && last),
            Edge::WhileFalse => (!current && last, current && !last),
        };

        if enter {
            queue.push_back(match self.action {
                Action::Schedule => Request::Schedule(self.command.clone()),
                Action::Cancel => Request::Cancel(self.command.clone()),
            });
        }
        if exit && self.action == Action::Schedule {
            queue.push_back(Request::Cancel(self.command.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandExt;
    use crate::testkit::{trace, Probe};

    fn fired(queue: &VecDeque<Request>) -> Vec<&'static str> {
        queue
            .iter()
            .map(|r| match r {
                Request::Schedule(_) => "schedule",
                Request::Cancel(_) => "cancel",
                Request::Default { .. } => "default",
            })
            .collect()
    }

    fn drive(binding: &mut Binding, samples: &[bool]) -> VecDeque<Request> {
        // The binding samples a scripted predicate once per poll.
        let mut queue = VecDeque::new();
        for _ in samples {
            binding.poll(&mut queue);
        }
        queue
    }

    fn scripted(samples: &'static [bool]) -> impl FnMut() -> bool {
        let mut i = 0;
        move || {
            let v = samples[i];
            i += 1;
            v
        }
    }

    #[test]
    fn test_on_rising_fires_once_per_edge() {
        let log = trace();
        let cmd = Probe::new("c", &log).into_ref();
        let samples: &[bool] = &[false, true, true, false, true];
        let mut b = Binding::schedule(Edge::OnRising, scripted(samples), &cmd);
        let queue = drive(&mut b, samples);
        assert_eq!(fired(&queue), vec!["schedule", "schedule"]);
    }

    #[test]
    fn test_predicate_true_at_start_counts_as_rising() {
        let log = trace();
        let cmd = Probe::new("c", &log).into_ref();
        let samples: &[bool] = &[true, true];
        let mut b = Binding::schedule(Edge::OnRising, scripted(samples), &cmd);
        let queue = drive(&mut b, samples);
        assert_eq!(fired(&queue), vec!["schedule"]);
    }

    #[test]
    fn test_on_falling_cancel_binding() {
        let log = trace();
        let cmd = Probe::new("c", &log).into_ref();
        let samples: &[bool] = &[true, false, false];
        let mut b = Binding::cancel(Edge::OnFalling, scripted(samples), &cmd);
        let queue = drive(&mut b, samples);
        assert_eq!(fired(&queue), vec!["cancel"]);
    }

    #[test]
    fn test_while_true_pairs_schedule_and_cancel() {
        let log = trace();
        let cmd = Probe::new("c", &log).into_ref();
        let samples: &[bool] = &[false, true, true, false];
        let mut b = Binding::schedule(Edge::WhileTrue, scripted(samples), &cmd);
        let queue = drive(&mut b, samples);
        assert_eq!(fired(&queue), vec!["schedule", "cancel"]);
    }

    #[test]
    fn test_on_change_fires_on_both_transitions() {
        let log = trace();
        let cmd = Probe::new("c", &log).into_ref();
        let samples: &[bool] = &[false, true, false];
        let mut b = Binding::schedule(Edge::OnChange, scripted(samples), &cmd);
        let queue = drive(&mut b, samples);
        assert_eq!(fired(&queue), vec!["schedule", "schedule"]);
    }
}
