//! Run children at the same time until any one finishes.

use crate::command::{Command, RequirementSet};
use crate::error::ComposeError;
use crate::groups::{all_interruptible, disjoint_union};
use crate::scheduler::Context;

/// Interleaves its children within each cycle and finishes as soon as any
/// child does.
///
/// The winner ends normally during the execute pass; the losers are
/// interrupted (`end(true)`) when the group itself ends. Child
/// requirements must be pairwise disjoint.
pub struct Race {
    children: Vec<Box<dyn Command>>,
    finished: Vec<bool>,
    requirements: RequirementSet,
    interruptible: bool,
}

impl Race {
    pub fn new(children: Vec<Box<dyn Command>>) -> Result<Self, ComposeError> {
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

impl Command for Race {
    fn name(&self) -> &str {
        "race"
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
        self.finished.iter().any(|&f| f)
    }

    /// Losers are interrupted whether the group ended normally (a winner
    /// emerged) or was itself interrupted.
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
    use crate::command::CommandExt;
    use crate::testkit::{trace, Probe};

    #[test]
    fn test_first_finisher_wins_and_losers_are_interrupted() {
        let log = trace();
        let mut group = Race::new(vec![
            Probe::new("slow", &log).finish_after(5).boxed(),
            Probe::new("fast", &log).finish_after(2).boxed(),
        ])
        .unwrap();

        let mut queue = VecDeque::new();
        let mut ctx = Context::new(&mut queue, 0);

        group.initialize(&mut ctx);
        group.execute(&mut ctx);
        assert!(!group.is_finished());
        group.execute(&mut ctx); // fast finishes
        assert!(group.is_finished());
        group.end(false, &mut ctx);

        assert_eq!(
            *log.borrow(),
            vec![
                "slow.init",
                "fast.init",
                "slow.exec",
                "fast.exec",
                "slow.exec",
                "fast.exec",
                "fast.end(false)",
                "slow.end(true)",
            ],
        );
    }

    #[test]
    fn test_interrupting_the_race_interrupts_every_live_child() {
        let log = trace();
        let mut group = Race::new(vec![
            Probe::new("a", &log).boxed(),
            Probe::new("b", &log).boxed(),
        ])
        .unwrap();

        let mut queue = VecDeque::new();
        let mut ctx = Context::new(&mut queue, 0);

        group.initialize(&mut ctx);
        group.execute(&mut ctx);
        group.end(true, &mut ctx);

        assert_eq!(
            *log.borrow(),
            vec!["a.init", "b.init", "a.exec", "b.exec", "a.end(true)", "b.end(true)"],
        );
    }
}
