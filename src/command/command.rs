//! # The command contract.
//!
//! A [`Command`] is the atomic unit of schedulable behavior: a four-phase
//! lifecycle (`initialize`, `execute`*, `is_finished`, `end`) plus a
//! declared set of required subsystems. All four callbacks are invoked
//! exclusively by the scheduler (or by an owning command group); user code
//! never drives them directly.
//!
//! ## Lifecycle ordering
//! For every scheduled run of a command, the call sequence is a prefix of
//!
//! ```text
//! initialize, execute*, end
//! ```
//!
//! `initialize` strictly precedes any `execute`; `end` is called exactly
//! once, strictly after the last `execute`; `execute` is never called after
//! `end`. A command instance is not reusable once ended except by being
//! scheduled afresh, which restarts the lifecycle from `initialize`.
//!
//! ## Waiting
//! Commands never block. All waiting is expressed by [`Command::is_finished`]
//! returning `false` across many cycles; that polling is the system's only
//! suspension mechanism.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::command::RepeatCommand;
use crate::error::ComposeError;
use crate::groups::{Parallel, Race, Sequential};
use crate::scheduler::Context;
use crate::subsystem::SubsystemId;

/// The set of subsystems a command must exclusively hold while running.
///
/// Ordered so that conflict detection and rejection reporting are
/// deterministic.
pub type RequirementSet = BTreeSet<SubsystemId>;

/// Shared handle to a command.
///
/// The scheduler identifies command *instances* by pointer: scheduling the
/// same `CommandRef` twice while it is running restarts it rather than
/// running a second copy.
pub type CommandRef = Rc<RefCell<dyn Command>>;

static EMPTY_REQUIREMENTS: RequirementSet = RequirementSet::new();

/// A schedulable unit of behavior with a four-phase lifecycle.
///
/// Implementations hold whatever state the behavior needs; the scheduler
/// guarantees exclusive ownership of every subsystem in
/// [`Command::requirements`] between `initialize` and `end`.
pub trait Command {
    /// Short stable name used in events and logs.
    fn name(&self) -> &str {
        "<unnamed>"
    }

    /// The subsystems this command must exclusively hold while running.
    ///
    /// Must be stable for the lifetime of the instance; the scheduler
    /// captures it when a schedule request is resolved.
    fn requirements(&self) -> &RequirementSet {
        &EMPTY_REQUIREMENTS
    }

    /// Whether this command may be ended early (`end(true)`) to grant its
    /// subsystems to a newer request. Defaults to `true`.
    fn is_interruptible(&self) -> bool {
        true
    }

    /// Runs once when the command transitions into `Running`.
    fn initialize(&mut self, _ctx: &mut Context<'_>) {}

    /// Runs once per cycle while `Running`, after `initialize` and before
    /// the finish check for that cycle.
    fn execute(&mut self, _ctx: &mut Context<'_>) {}

    /// Pure completion query. When it returns `true` the command ends
    /// normally on this cycle, with `execute` still having run first.
    fn is_finished(&self) -> bool {
        false
    }

    /// Runs exactly once when the command ends: `interrupted = false` after
    /// [`Command::is_finished`] returned true, `interrupted = true` when
    /// the scheduler cancelled or interrupted it.
    ///
    /// Implementations must not release subsystems themselves; the
    /// scheduler reclaims requirement-registry entries.
    fn end(&mut self, _interrupted: bool, _ctx: &mut Context<'_>) {}
}

/// Composition helpers on every sized command type.
///
/// These mirror the chaining style of hand-written robot routines:
///
/// ```rust
/// use commandeer::{CommandExt, FnCommand, WaitCommand};
///
/// let routine = FnCommand::instant("open_claw", |_| {})
///     .then(WaitCommand::cycles(10))
///     .then(FnCommand::instant("close_claw", |_| {}));
/// ```
pub trait CommandExt: Command + Sized + 'static {
    /// Boxes this command for group construction.
    fn boxed(self) -> Box<dyn Command> {
        Box::new(self)
    }

    /// Wraps this command in the shared handle the scheduler consumes.
    fn into_ref(self) -> CommandRef {
        Rc::new(RefCell::new(self))
    }

    /// Runs `next` after this command finishes.
    fn then(self, next: impl Command + 'static) -> Sequential {
        Sequential::new(vec![self.boxed(), Box::new(next)])
    }

    /// Runs `other` in parallel with this command; both run until each has
    /// finished. Fails if the two requirement sets overlap.
    fn along_with(self, other: impl Command + 'static) -> Result<Parallel, ComposeError> {
        Parallel::new(vec![self.boxed(), Box::new(other)])
    }

    /// Races `other` against this command; the first to finish interrupts
    /// the rest. Fails if the two requirement sets overlap.
    fn race_with(self, other: impl Command + 'static) -> Result<Race, ComposeError> {
        Race::new(vec![self.boxed(), Box::new(other)])
    }

    /// Repeats this command `times` times.
    fn repeated(self, times: u32) -> RepeatCommand {
        RepeatCommand::times(self, times)
    }
}

impl<T: Command + Sized + 'static> CommandExt for T {}
