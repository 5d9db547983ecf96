//! Shared test fixtures: a trace log, a scriptable probe command, and a
//! stub subsystem. Tests assert scheduler behavior as exact call-sequence
//! comparisons against the log.

use std::cell::RefCell;
use std::rc::Rc;

use crate::command::{Command, RequirementSet};
use crate::events::{Event, Subscribe};
use crate::scheduler::Context;
use crate::subsystem::{Subsystem, SubsystemId};

pub(crate) type Trace = Rc<RefCell<Vec<String>>>;

pub(crate) fn trace() -> Trace {
    Rc::new(RefCell::new(Vec::new()))
}

/// A command that appends every lifecycle call to the shared trace.
pub(crate) struct Probe {
    name: &'static str,
    log: Trace,
    requirements: RequirementSet,
    interruptible: bool,
    /// `None` never finishes; `Some(n)` finishes once `execute` has run
    /// `n` times.
    finish_after: Option<u32>,
    executed: u32,
}

impl Probe {
    pub(crate) fn new(name: &'static str, log: &Trace) -> Self {
        Self {
            name,
            log: log.clone(),
            requirements: RequirementSet::new(),
            interruptible: true,
            finish_after: None,
            executed: 0,
        }
    }

    pub(crate) fn requires(mut self, ids: impl IntoIterator<Item = SubsystemId>) -> Self {
        self.requirements.extend(ids);
        self
    }

    pub(crate) fn uninterruptible(mut self) -> Self {
        self.interruptible = false;
        self
    }

    pub(crate) fn finish_after(mut self, executes: u32) -> Self {
        self.finish_after = Some(executes);
        self
    }
}

impl Command for Probe {
    fn name(&self) -> &str {
        self.name
    }

    fn requirements(&self) -> &RequirementSet {
        &self.requirements
    }

    fn is_interruptible(&self) -> bool {
        self.interruptible
    }

    fn initialize(&mut self, _ctx: &mut Context<'_>) {
        self.executed = 0;
        self.log.borrow_mut().push(format!("{}.init", self.name));
    }

    fn execute(&mut self, _ctx: &mut Context<'_>) {
        self.executed += 1;
        self.log.borrow_mut().push(format!("{}.exec", self.name));
    }

    fn is_finished(&self) -> bool {
        self.finish_after.is_some_and(|n| self.executed >= n)
    }

    fn end(&mut self, interrupted: bool, _ctx: &mut Context<'_>) {
        self.log
            .borrow_mut()
            .push(format!("{}.end({})", self.name, interrupted));
    }
}

/// A subsystem that logs its periodic hook.
pub(crate) struct StubSystem {
    name: &'static str,
    log: Trace,
}

impl StubSystem {
    pub(crate) fn new(name: &'static str, log: &Trace) -> Self {
        Self {
            name,
            log: log.clone(),
        }
    }
}

impl Subsystem for StubSystem {
    fn name(&self) -> &str {
        self.name
    }

    fn periodic(&mut self) {
        self.log
            .borrow_mut()
            .push(format!("{}.periodic", self.name));
    }
}

/// A subscriber that records every event it sees.
pub(crate) struct Recorder {
    pub(crate) events: RefCell<Vec<Event>>,
}

impl Recorder {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self {
            events: RefCell::new(Vec::new()),
        })
    }
}

impl Subscribe for Recorder {
    fn on_event(&self, event: &Event) {
        self.events.borrow_mut().push(event.clone());
    }

    fn name(&self) -> &'static str {
        "recorder"
    }
}
