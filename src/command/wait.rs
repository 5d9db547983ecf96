//! Cycle-counting wait command.

use crate::command::command::Command;
use crate::scheduler::Context;

/// A command that finishes after a fixed number of cycles.
///
/// The core has no clock; durations are expressed in control cycles. At a
/// 50 Hz loop, `WaitCommand::cycles(50)` waits one second.
///
/// ```rust
/// use commandeer::{Command, WaitCommand};
///
/// let w = WaitCommand::cycles(3);
/// assert!(!w.is_finished());
/// ```
pub struct WaitCommand {
    cycles: u32,
    elapsed: u32,
}

impl WaitCommand {
    /// Waits for `cycles` execute passes before finishing.
    pub fn cycles(cycles: u32) -> Self {
        Self { cycles, elapsed: 0 }
    }
}

impl Command for WaitCommand {
    fn name(&self) -> &str {
        "wait"
    }

    fn initialize(&mut self, _ctx: &mut Context<'_>) {
        self.elapsed = 0;
    }

    fn execute(&mut self, _ctx: &mut Context<'_>) {
        self.elapsed += 1;
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= self.cycles
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    #[test]
    fn test_counts_execute_passes() {
        let mut queue = VecDeque::new();
        let mut w = WaitCommand::cycles(2);
        let mut ctx = Context::new(&mut queue, 0);

        w.initialize(&mut ctx);
        assert!(!w.is_finished());
        w.execute(&mut ctx);
        assert!(!w.is_finished());
        w.execute(&mut ctx);
        assert!(w.is_finished());
    }

    #[test]
    fn test_reinitialize_restarts_the_count() {
        let mut queue = VecDeque::new();
        let mut w = WaitCommand::cycles(1);
        let mut ctx = Context::new(&mut queue, 0);

        w.initialize(&mut ctx);
        w.execute(&mut ctx);
        assert!(w.is_finished());

        w.initialize(&mut ctx);
        assert!(!w.is_finished());
    }

    #[test]
    fn test_zero_cycles_is_instant() {
        let w = WaitCommand::cycles(0);
        assert!(w.is_finished());
    }
}
