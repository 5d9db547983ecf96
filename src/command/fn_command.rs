//! # Closure-backed commands (`FnCommand`).
//!
//! [`FnCommand`] assembles a command out of closures, one per lifecycle
//! phase. It is the workhorse for simple inline behaviors that do not
//! deserve their own type.
//!
//! ## Example
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use commandeer::{Command, FnCommand};
//!
//! let fired = Rc::new(Cell::new(0u32));
//! let counter = fired.clone();
//!
//! let cmd = FnCommand::new("spin_up")
//!     .on_execute(move |_| counter.set(counter.get() + 1))
//!     .finish_when({
//!         let fired = fired.clone();
//!         move || fired.get() >= 5
//!     });
//!
//! assert_eq!(cmd.name(), "spin_up");
//! ```
//!
//! The default completion predicate never fires: an `FnCommand` with no
//! `finish_when` runs until it is cancelled or interrupted. Use
//! [`FnCommand::instant`] for run-once commands.

use std::borrow::Cow;

use crate::command::command::Command;
use crate::command::RequirementSet;
use crate::scheduler::Context;
use crate::subsystem::SubsystemId;

type InitFn = Box<dyn FnMut(&mut Context<'_>)>;
type ExecFn = Box<dyn FnMut(&mut Context<'_>)>;
type EndFn = Box<dyn FnMut(bool, &mut Context<'_>)>;
type FinishFn = Box<dyn Fn() -> bool>;

/// A command whose phases are defined by closures.
pub struct FnCommand {
    name: Cow<'static, str>,
    requirements: RequirementSet,
    interruptible: bool,
    init: Option<InitFn>,
    exec: Option<ExecFn>,
    on_end: Option<EndFn>,
    finished: Option<FinishFn>,
}

impl FnCommand {
    /// Creates a command with no-op phases that never finishes on its own.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            requirements: RequirementSet::new(),
            interruptible: true,
            init: None,
            exec: None,
            on_end: None,
            finished: None,
        }
    }

    /// Creates a command that runs `f` once in `initialize` and finishes
    /// immediately.
    pub fn instant(
        name: impl Into<Cow<'static, str>>,
        f: impl FnMut(&mut Context<'_>) + 'static,
    ) -> Self {
        Self::new(name).on_init(f).finish_when(|| true)
    }

    /// Sets the `initialize` phase.
    pub fn on_init(mut self, f: impl FnMut(&mut Context<'_>) + 'static) -> Self {
        self.init = Some(Box::new(f));
        self
    }

    /// Sets the `execute` phase.
    pub fn on_execute(mut self, f: impl FnMut(&mut Context<'_>) + 'static) -> Self {
        self.exec = Some(Box::new(f));
        self
    }

    /// Sets the `end` phase.
    pub fn on_end(mut self, f: impl FnMut(bool, &mut Context<'_>) + 'static) -> Self {
        self.on_end = Some(Box::new(f));
        self
    }

    /// Sets the completion predicate.
    pub fn finish_when(mut self, f: impl Fn() -> bool + 'static) -> Self {
        self.finished = Some(Box::new(f));
        self
    }

    /// Adds subsystems to the requirement set.
    pub fn requires(mut self, ids: impl IntoIterator<Item = SubsystemId>) -> Self {
        self.requirements.extend(ids);
        self
    }

    /// Marks the command uninterruptible: conflicting schedule requests
    /// against it will be rejected instead of interrupting it.
    pub fn uninterruptible(mut self) -> Self {
        self.interruptible = false;
        self
    }
}

impl Command for FnCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn requirements(&self) -> &RequirementSet {
        &self.requirements
    }

    fn is_interruptible(&self) -> bool {
        self.interruptible
    }

    fn initialize(&mut self, ctx: &mut Context<'_>) {
        if let Some(f) = &mut self.init {
            f(ctx);
        }
    }

    fn execute(&mut self, ctx: &mut Context<'_>) {
        if let Some(f) = &mut self.exec {
            f(ctx);
        }
    }

    fn is_finished(&self) -> bool {
        self.finished.as_ref().is_some_and(|f| f())
    }

    fn end(&mut self, interrupted: bool, ctx: &mut Context<'_>) {
        if let Some(f) = &mut self.on_end {
            f(interrupted, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use super::*;
    use crate::scheduler::Context;

    #[test]
    fn test_instant_finishes_immediately() {
        let ran = Rc::new(Cell::new(false));
        let flag = ran.clone();
        let mut cmd = FnCommand::instant("once", move |_| flag.set(true));

        let mut queue = VecDeque::new();
        let mut ctx = Context::new(&mut queue, 0);
        cmd.initialize(&mut ctx);

        assert!(ran.get());
        assert!(cmd.is_finished());
    }

    #[test]
    fn test_default_never_finishes() {
        let cmd = FnCommand::new("forever");
        assert!(!cmd.is_finished());
        assert!(cmd.is_interruptible());
    }

    #[test]
    fn test_uninterruptible_flag() {
        let cmd = FnCommand::new("hold").uninterruptible();
        assert!(!cmd.is_interruptible());
    }
}
