//! Repetition decorator.

use crate::command::command::Command;
use crate::command::RequirementSet;
use crate::scheduler::Context;

/// A command that re-runs a child command a fixed number of times, or
/// forever.
///
/// Each repetition is a full lifecycle of the child: when the child
/// finishes it is ended normally and re-initialized in the same outer
/// `execute`, so back-to-back repetitions lose no cycles.
pub struct RepeatCommand {
    child: Box<dyn Command>,
    /// `None` repeats indefinitely.
    times: Option<u32>,
    completed: u32,
}

impl RepeatCommand {
    /// Repeats `child` exactly `times` times.
    pub fn times(child: impl Command + 'static, times: u32) -> Self {
        Self {
            child: Box::new(child),
            times: Some(times),
            completed: 0,
        }
    }

    /// Repeats `child` until the repeat command itself is interrupted.
    pub fn forever(child: impl Command + 'static) -> Self {
        Self {
            child: Box::new(child),
            times: None,
            completed: 0,
        }
    }
}

impl Command for RepeatCommand {
    fn name(&self) -> &str {
        "repeat"
    }

    fn requirements(&self) -> &RequirementSet {
        self.child.requirements()
    }

    fn is_interruptible(&self) -> bool {
        self.child.is_interruptible()
    }

    fn initialize(&mut self, ctx: &mut Context<'_>) {
        self.completed = 0;
        self.child.initialize(ctx);
    }

    fn execute(&mut self, ctx: &mut Context<'_>) {
        if self.is_finished() {
            return;
        }
        self.child.execute(ctx);
        if self.child.is_finished() {
            self.child.end(false, ctx);
            self.completed += 1;
            if !self.is_finished() {
                self.child.initialize(ctx);
            }
        }
    }

    fn is_finished(&self) -> bool {
        self.times.is_some_and(|n| self.completed >= n)
    }

    fn end(&mut self, interrupted: bool, ctx: &mut Context<'_>) {
        // The child already ended normally when its last repetition
        // finished; only a mid-run interruption reaches it here.
        if interrupted && !self.is_finished() {
            self.child.end(true, ctx);
        }
    }
}
