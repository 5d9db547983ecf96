//! Run children at the same time, all to completion.

use crate::command::{Command, RequirementSet};
use crate::error::ComposeError;
use crate::groups::{all_interruptible, disjoint_union};
use crate::scheduler::Context;

/// Interleaves its children within each cycle and finishes once every
/// child has finished.
///
/// Children that finish early are ended (`end(false)`) and sit out the
/// remaining cycles. Child requirements must be pairwise disjoint.
pub struct Parallel {
    children: Vec<Box<dyn Command>>,
    finished: Vec<bool>,
    requirements: RequirementSet,
    interruptible: bool,
}

impl std::fmt::Debug for Parallel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parallel")
            .field("children", &self.children.len())
            .field("finished", &self.finished)
            .field("requirements", &self.requirements)
            .field("interruptible", &self.interruptible)
            .finish()
    }
}

impl Parallel {
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

impl Command for Parallel {
    fn name(&self) -> &str {
        "parallel"
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
        self.finished.iter().all(|&f| f)
    }

    fn end(&mut self, interrupted: bool, ctx: &mut Context<'_>) {
        if interrupted {
            for (child, done) in self.children.iter_mut().zip(&self.finished) {
                if !done {
                    child.end(true, ctx);
                }
            }
        }
    }
}
