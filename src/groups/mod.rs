//! # Command groups: composing commands into routines.
//!
//! A group is itself a [`Command`]: it owns its children outright
//! (`Box<dyn Command>`), presents the union of their requirements, and
//! forwards lifecycle calls according to its composition rule. The
//! scheduler never sees the children — a group is one opaque command to
//! it, so children can never be scheduled, cancelled, or conflicted with
//! individually.
//!
//! | group        | children advance      | finishes when          |
//! |--------------|-----------------------|------------------------|
//! | [`Sequential`] | one at a time, in order | the last child finishes |
//! | [`Parallel`]   | all, interleaved      | every child has finished |
//! | [`Race`]       | all, interleaved      | any child finishes     |
//! | [`Deadline`]   | all, interleaved      | the deadline child finishes |
//!
//! The interleaved groups require pairwise-disjoint child requirements;
//! violating that is a construction error ([`ComposeError`]), never a
//! runtime race. A group is interruptible only if every child is.

mod deadline;
mod parallel;
mod race;
mod sequential;

pub use deadline::Deadline;
pub use parallel::Parallel;
pub use race::Race;
pub use sequential::Sequential;

use crate::command::{Command, RequirementSet};
use crate::error::ComposeError;

/// Union of the children's requirements, rejecting any overlap.
pub(crate) fn disjoint_union(
    children: &[Box<dyn Command>],
) -> Result<RequirementSet, ComposeError> {
    let mut union = RequirementSet::new();
    for child in children {
        for &id in child.requirements() {
            if !union.insert(id) {
                return Err(ComposeError::ConflictingRequirements { subsystem: id });
            }
        }
    }
    Ok(union)
}

/// Whether every child tolerates being ended early.
pub(crate) fn all_interruptible(children: &[Box<dyn Command>]) -> bool {
    children.iter().all(|c| c.is_interruptible())
}
