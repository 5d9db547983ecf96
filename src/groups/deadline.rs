//! Run children until a designated deadline child finishes.

use crate::command::{Command, RequirementSet};
use crate::error::ComposeError;
use crate::groups::{all_interruptible, disjoint_union};
use crate::scheduler::Context;

/// A parallel group whose lifetime is pinned to one designated child.
///
/// Every child runs interleaved; the group finishes exactly when the
/// deadline child does. Other children that finish first end normally and
/// sit out; others still running when the deadline falls are interrupted.
/// A common shape is `Deadline::new(WaitCommand::cycles(n), work)` to cap
/// a routine at `n` cycles.
///
/// Requirements must be pairwise disjoint across the deadline child and
/// the others.
pub struct Deadline {
    /// The deadline child is `children[0]`.
    children: Vec<Box<dyn Command>>,
    finished: Vec<bool>,
    requirements: RequirementSet,
    interruptible: bool,
}

impl Deadline {
    pub fn new(
        deadline: impl Command + 'static,
        others: Vec<Box<dyn Command>>,
    ) -> Result<Self, ComposeError> {
        let mut children: Vec<Box<dyn Command>> = Vec::with_capacity(others.len() + 1);
        children.push(Box::new(deadline));
        children.extend(others);

        let requirements = disjoint_union(&children)?;
        let interruptible = all_interruptible(&children);
        let finished = vec![false; children.len()];
        Ok(Self {
            children,
            finished,
            requirements,
            interruptible,
        })
    }
}

impl Command for Deadline {
    fn name(&self) -> &str {
        "deadline"
    }

    fn requirements(&self) -> &RequirementSet {
        &self.requirements
    }

    fn is_interruptible(&self) -> bool {
        self.interruptible
    }

    fn initialize(&mut self, ctx: &mut Context<'_>) {
        self.finished.iter_mut().for_each(|f| *f = false);
        for child in &mut self.children {
            child.initialize(ctx);
        }
    }

    fn execute(&mut self, ctx: &mut Context<'_>) {
        for (child, done) in self.children.iter_mut().zip(&mut self.finished) {
            if *done {
                continue;
            }
            child.execute(ctx);
            if child.is_finished() {
                child.end(false, ctx);
                *done = true;
            }
        }
    }

    fn is_finished(&self) -> bool {
        self.finished[0]
    }

    fn end(&mut self, _interrupted: bool, ctx: &mut Context<'_>) {
        for (child, done) in self.children.iter_mut().zip(&self.finished) {
            if !done {
                child.end(true, ctx);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::command::{CommandExt, WaitCommand};
    use crate::testkit::{trace, Probe};

    #[test]
    fn test_deadline_caps_the_group_lifetime() {
        let log = trace();
        let mut group = Deadline::new(
            WaitCommand::cycles(2),
            vec![Probe::new("work", &log).boxed()],
        )
        .unwrap();

        let mut queue = VecDeque::new();
        let mut ctx = Context::new(&mut queue, 0);

        group.initialize(&mut ctx);
        group.execute(&mut ctx);
        assert!(!group.is_finished());
        group.execute(&mut ctx); // wait elapses
        assert!(group.is_finished());
        group.end(false, &mut ctx);

        assert_eq!(
            *log.borrow(),
            vec!["work.init", "work.exec", "work.exec", "work.end(true)"],
        );
    }

    #[test]
    fn test_early_finishers_do_not_end_the_group() {
        let log = trace();
        let mut group = Deadline::new(
            Probe::new("deadline", &log).finish_after(3),
            vec![Probe::new("quick", &log).finish_after(1).boxed()],
        )
        .unwrap();

        let mut queue = VecDeque::new();
        let mut ctx = Context::new(&mut queue, 0);

        group.initialize(&mut ctx);
        group.execute(&mut ctx); // quick finishes normally
        assert!(!group.is_finished());
        group.execute(&mut ctx);
        group.execute(&mut ctx);
        assert!(group.is_finished());
        group.end(false, &mut ctx);

        assert_eq!(
            *log.borrow(),
            vec![
                "deadline.init",
                "quick.init",
                "deadline.exec",
                "quick.exec",
                "quick.end(false)",
                "deadline.exec",
                "deadline.exec",
                "deadline.end(false)",
            ],
        );
    }
}
