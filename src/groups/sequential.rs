//! Run children one after another.

use crate::command::{Command, RequirementSet};
use crate::groups::all_interruptible;
use crate::scheduler::Context;

/// Runs its children in order, each to completion, then finishes.
///
/// Only the child at the cursor is live; when it finishes the next child
/// is initialized in the same cycle and takes its first `execute` the
/// cycle after. Children may share requirements — the group holds the
/// union for its whole run, so the subsystems never change hands
/// mid-sequence.
///
/// An empty sequence finishes on its first cycle without doing anything.
pub struct Sequential {
    children: Vec<Box<dyn Command>>,
    requirements: RequirementSet,
    interruptible: bool,
    cursor: usize,
}

impl Sequential {
    pub fn new(children: Vec<Box<dyn Command>>) -> Self {
        let requirements = children
            .iter()
            .flat_map(|c| c.requirements().iter().copied())
            .collect();
        let interruptible = all_interruptible(&children);
        Self {
            children,
            requirements,
            interruptible,
            cursor: 0,
        }
    }
}

impl Command for Sequential {
    fn name(&self) -> &str {
        "sequential"
    }

    fn requirements(&self) -> &RequirementSet {
        &self.requirements
    }

    fn is_interruptible(&self) -> bool {
        self.interruptible
    }

    fn initialize(&mut self, ctx: &mut Context<'_>) {
        self.cursor = 0;
        if let Some(first) = self.children.first_mut() {
            first.initialize(ctx);
        }
    }

    fn execute(&mut self, ctx: &mut Context<'_>) {
        let Some(child) = self.children.get_mut(self.cursor) else {
            return;
        };
        child.execute(ctx);
        if child.is_finished() {
            child.end(false, ctx);
            self.cursor += 1;
            if let Some(next) = self.children.get_mut(self.cursor) {
                next.initialize(ctx);
            }
        }
    }

    fn is_finished(&self) -> bool {
        self.cursor >= self.children.len()
    }

    fn end(&mut self, interrupted: bool, ctx: &mut Context<'_>) {
        if interrupted {
            if let Some(child) = self.children.get_mut(self.cursor) {
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
    fn test_children_run_in_order_with_a_handoff_cycle() {
        let log = trace();
        let mut group = Sequential::new(vec![
            Probe::new("a", &log).finish_after(2).boxed(),
            Probe::new("b", &log).finish_after(1).boxed(),
        ]);

        let mut queue = VecDeque::new();
        let mut ctx = Context::new(&mut queue, 0);

        group.initialize(&mut ctx);
        group.execute(&mut ctx); // a runs
        assert!(!group.is_finished());
        group.execute(&mut ctx); // a finishes, b initialized same cycle
        assert!(!group.is_finished());
        group.execute(&mut ctx); // b runs and finishes
        assert!(group.is_finished());
        group.end(false, &mut ctx);

        assert_eq!(
            *log.borrow(),
            vec![
                "a.init", "a.exec", "a.exec", "a.end(false)", "b.init", "b.exec",
                "b.end(false)",
            ],
        );
    }

    #[test]
    fn test_interruption_ends_only_the_live_child() {
        let log = trace();
        let mut group = Sequential::new(vec![
            Probe::new("a", &log).finish_after(1).boxed(),
            Probe::new("b", &log).boxed(),
        ]);

        let mut queue = VecDeque::new();
        let mut ctx = Context::new(&mut queue, 0);

        group.initialize(&mut ctx);
        group.execute(&mut ctx); // a finishes, b live
        group.end(true, &mut ctx);

        assert_eq!(
            *log.borrow(),
            vec!["a.init", "a.exec", "a.end(false)", "b.init", "b.end(true)"],
        );
    }

    #[test]
    fn test_requirements_are_the_union_and_overlap_is_allowed() {
        use crate::subsystem::SubsystemId;

        let log = trace();
        let group = Sequential::new(vec![
            Probe::new("a", &log).requires([SubsystemId(0)]).boxed(),
            Probe::new("b", &log)
                .requires([SubsystemId(0), SubsystemId(1)])
                .boxed(),
        ]);

        let union: Vec<SubsystemId> = group.requirements().iter().copied().collect();
        assert_eq!(union, vec![SubsystemId(0), SubsystemId(1)]);
    }

    #[test]
    fn test_empty_sequence_finishes_immediately() {
        let mut group = Sequential::new(Vec::new());
        let mut queue = VecDeque::new();
        let mut ctx = Context::new(&mut queue, 0);

        group.initialize(&mut ctx);
        group.execute(&mut ctx);
        assert!(group.is_finished());
    }

    #[test]
    fn test_uninterruptible_child_makes_the_group_uninterruptible() {
        let log = trace();
        let group = Sequential::new(vec![
            Probe::new("a", &log).boxed(),
            Probe::new("b", &log).uninterruptible().boxed(),
        ]);
        assert!(!group.is_interruptible());
    }
}
