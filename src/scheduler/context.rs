//! # Deferred scheduling requests and the command-side context.
//!
//! Schedule and cancel operations are never applied synchronously: every
//! request lands in a per-cycle FIFO queue that the scheduler drains at a
//! well-defined point of each cycle. Deferral is what makes the system
//! reentrant-safe — a command scheduling or cancelling other commands from
//! inside its own `execute`/`end` callback cannot mutate the active set
//! while the scheduler is iterating it.
//!
//! [`Context`] is the handle commands receive in their lifecycle callbacks.
//! It exposes exactly the operations that are safe from inside a callback:
//! queueing requests and reading the cycle counter.

use std::collections::VecDeque;

use crate::command::CommandRef;
use crate::subsystem::SubsystemId;

/// A deferred scheduling request.
pub(crate) enum Request {
    /// Schedule the command at the next drain point.
    Schedule(CommandRef),
    /// Cancel the command if it is running at the next drain point.
    Cancel(CommandRef),
    /// Activate a subsystem's default command, dropped if the subsystem has
    /// found a holder by the time the request is drained.
    Default {
        subsystem: SubsystemId,
        command: CommandRef,
    },
}

/// Scheduler handle passed to command callbacks.
///
/// Requests made through a context are queued, never applied synchronously;
/// they resolve during the request-drain step of the current or next cycle.
pub struct Context<'a> {
    queue: &'a mut VecDeque<Request>,
    cycle: u64,
}

impl<'a> Context<'a> {
    pub(crate) fn new(queue: &'a mut VecDeque<Request>, cycle: u64) -> Self {
        Self { queue, cycle }
    }

    /// Queues a schedule request for `command`.
    ///
    /// If `command` is already running when the request resolves, it is
    /// restarted: `end(true)`, then `initialize` afresh.
    pub fn schedule(&mut self, command: &CommandRef) {
        self.queue.push_back(Request::Schedule(command.clone()));
    }

    /// Queues a cancel request for `command`. A no-op if the command is not
    /// running when the request resolves.
    pub fn cancel(&mut self, command: &CommandRef) {
        self.queue.push_back(Request::Cancel(command.clone()));
    }

    /// The current cycle number (1-based; 0 means the scheduler has not
    /// cycled yet).
    pub fn cycle(&self) -> u64 {
        self.cycle
    }
}
