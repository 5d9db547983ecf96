//! # Requirement registry: the single source of truth for ownership.
//!
//! Maps each subsystem to the command currently holding it. Mutated only by
//! the scheduler, never by commands; reads drive conflict resolution.
//!
//! ## Tie-break policy
//! A newly issued schedule request always wins against interruptible
//! incumbents and never wins against an uninterruptible one. On rejection
//! no entry is reassigned: the original holders are unaffected and the new
//! request is dropped.
//!
//! ## Defensive invariant
//! [`Requirements::assign`] asserts every entry it writes is vacant. A
//! violation would mean two commands own one subsystem simultaneously,
//! which the per-cycle algorithm makes unreachable; if it ever trips, the
//! scheduler halts rather than continuing with corrupted ownership state.

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use crate::command::{CommandRef, RequirementSet};
use crate::subsystem::SubsystemId;

/// A registry entry: the holding command plus the facts conflict resolution
/// needs without borrowing it.
struct Holder {
    command: CommandRef,
    name: Arc<str>,
    interruptible: bool,
}

/// Outcome of a claim analysis.
pub(crate) enum ClaimResult {
    /// Every requested subsystem can be taken. `displaced` lists the
    /// interruptible incumbents (deduplicated) that must be interrupted
    /// before the claim is assigned.
    Granted { displaced: Vec<CommandRef> },
    /// At least one requested subsystem is held by an uninterruptible
    /// command; nothing was changed.
    Rejected {
        blocking: CommandRef,
        blocking_name: Arc<str>,
    },
}

/// Per-subsystem ownership map.
#[derive(Default)]
pub(crate) struct Requirements {
    held: HashMap<SubsystemId, Holder>,
}

impl Requirements {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Analyzes a claim over `requirements` without mutating anything.
    ///
    /// Rejection reports the first uninterruptible incumbent in requirement
    /// order, which is deterministic because requirement sets are ordered.
    pub(crate) fn try_claim(&self, requirements: &RequirementSet) -> ClaimResult {
        let mut displaced: Vec<CommandRef> = Vec::new();
        for id in requirements {
            let Some(holder) = self.held.get(id) else {
                continue;
            };
            if !holder.interruptible {
                return ClaimResult::Rejected {
                    blocking: holder.command.clone(),
                    blocking_name: holder.name.clone(),
                };
            }
            if !displaced.iter().any(|d| Rc::ptr_eq(d, &holder.command)) {
                displaced.push(holder.command.clone());
            }
        }
        ClaimResult::Granted { displaced }
    }

    /// Records `command` as the holder of every subsystem in
    /// `requirements`. Every entry must be vacant; the caller releases
    /// displaced incumbents first.
    pub(crate) fn assign(
        &mut self,
        command: &CommandRef,
        name: &Arc<str>,
        interruptible: bool,
        requirements: &RequirementSet,
    ) {
        for id in requirements {
            let prev = self.held.insert(
                *id,
                Holder {
                    command: command.clone(),
                    name: name.clone(),
                    interruptible,
                },
            );
            assert!(
                prev.is_none(),
                "requirement registry corrupted: {id} already held while granting {name:?}",
            );
        }
    }

    /// Clears every entry currently pointing to `command`.
    pub(crate) fn release(&mut self, command: &CommandRef) {
        self.held
            .retain(|_, holder| !Rc::ptr_eq(&holder.command, command));
    }

    /// Returns the command currently holding `id`, if any.
    pub(crate) fn holder(&self, id: SubsystemId) -> Option<&CommandRef> {
        self.held.get(&id).map(|h| &h.command)
    }

    /// Drops all entries.
    pub(crate) fn clear(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandExt;
    use crate::subsystem::SubsystemId;
    use crate::testkit::{trace, Probe};

    fn named(cmd: &CommandRef) -> Arc<str> {
        Arc::from(cmd.borrow().name())
    }

    fn reqs(ids: &[u32]) -> RequirementSet {
        ids.iter().map(|&i| SubsystemId(i)).collect()
    }

    #[test]
    fn test_claim_on_vacant_entries_is_granted() {
        let registry = Requirements::new();
        match registry.try_claim(&reqs(&[0, 1])) {
            ClaimResult::Granted { displaced } => assert!(displaced.is_empty()),
            ClaimResult::Rejected { .. } => panic!("vacant claim rejected"),
        }
    }

    #[test]
    fn test_interruptible_incumbent_is_displaced_once() {
        let log = trace();
        let mut registry = Requirements::new();
        let a = Probe::new("a", &log).requires([SubsystemId(0), SubsystemId(1)]).into_ref();
        registry.assign(&a, &named(&a), true, &reqs(&[0, 1]));

        match registry.try_claim(&reqs(&[0, 1])) {
            ClaimResult::Granted { displaced } => {
                assert_eq!(displaced.len(), 1);
                assert!(Rc::ptr_eq(&displaced[0], &a));
            }
            ClaimResult::Rejected { .. } => panic!("interruptible incumbent blocked the claim"),
        }
    }

    #[test]
    fn test_uninterruptible_incumbent_rejects_and_keeps_entries() {
        let log = trace();
        let mut registry = Requirements::new();
        let a = Probe::new("a", &log)
            .requires([SubsystemId(0)])
            .uninterruptible()
            .into_ref();
        registry.assign(&a, &named(&a), false, &reqs(&[0]));

        match registry.try_claim(&reqs(&[0, 1])) {
            ClaimResult::Rejected {
                blocking,
                blocking_name,
            } => {
                assert!(Rc::ptr_eq(&blocking, &a));
                assert_eq!(&*blocking_name, "a");
            }
            ClaimResult::Granted { .. } => panic!("uninterruptible incumbent was displaced"),
        }
        assert!(registry.holder(SubsystemId(0)).is_some());
    }

    #[test]
    fn test_release_clears_every_entry_of_the_command() {
        let log = trace();
        let mut registry = Requirements::new();
        let a = Probe::new("a", &log).requires([SubsystemId(0), SubsystemId(2)]).into_ref();
        registry.assign(&a, &named(&a), true, &reqs(&[0, 2]));

        registry.release(&a);
        assert!(registry.holder(SubsystemId(0)).is_none());
        assert!(registry.holder(SubsystemId(2)).is_none());
    }

    #[test]
    #[should_panic(expected = "requirement registry corrupted")]
    fn test_double_ownership_halts() {
        let log = trace();
        let mut registry = Requirements::new();
        let a = Probe::new("a", &log).requires([SubsystemId(0)]).into_ref();
        let b = Probe::new("b", &log).requires([SubsystemId(0)]).into_ref();
        registry.assign(&a, &named(&a), true, &reqs(&[0]));
        registry.assign(&b, &named(&b), true, &reqs(&[0]));
    }
}
