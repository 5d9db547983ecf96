//! # The command scheduler: per-cycle conflict resolution.
//!
//! [`Scheduler`] owns the registered subsystems, the active command set,
//! the requirement registry, the deferred request queue, and the
//! subscriber set. The host runtime drives it with one [`Scheduler::run_cycle`]
//! call per control-loop iteration.
//!
//! ## Per-cycle algorithm
//! ```text
//! run_cycle()
//!   ├─ 1. subsystem periodic hooks        (registration order)
//!   ├─ 2. poll trigger bindings           (edge → queue request)
//!   ├─ 3. advance active commands:
//!   │       execute(); if is_finished(): end(false), release, remove
//!   ├─ 4. drain the request queue (FIFO, to empty):
//!   │       Cancel   → end(true), release, remove (no-op if not active)
//!   │       Schedule → try_claim:
//!   │           Rejected → drop request, emit ScheduleRejected
//!   │           Granted  → interrupt incumbents (end(true), release),
//!   │                      then initialize / execute / finish-check
//!   │                      (the command's first advance happens in the
//!   │                       granting cycle)
//!   │       Default  → dropped if the subsystem found a holder, else
//!   │                  granted like Schedule
//!   └─ 5. for each idle subsystem with a default command:
//!           queue a Default request, resolved next cycle
//! ```
//!
//! ## Reentrancy
//! Schedule/cancel calls made from inside a command's own callbacks go
//! through [`Context`] into the same queue and are never applied
//! synchronously, so the active set stays stable mid-iteration. Requests
//! queued by callbacks during the drain itself are resolved in the same
//! drain (FIFO); requests queued by step 5 resolve next cycle, which is
//! what keeps a deferred default from ever preempting a command granted in
//! the same cycle.
//!
//! ## Execution model
//! Single-threaded and cooperative: commands never block, "parallel"
//! composition interleaves within one cycle's advance pass, and no locks
//! exist anywhere in the core.

use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

use crate::command::{Command, CommandExt, CommandRef, RequirementSet};
use crate::error::SchedulerError;
use crate::events::{Event, EventKind, Subscribe, SubscriberSet};
use crate::scheduler::bindings::Binding;
use crate::scheduler::context::{Context, Request};
use crate::scheduler::registry::{ClaimResult, Requirements};
use crate::subsystem::{Subsystem, SubsystemId, SubsystemSlot};

/// A command in the active (running) set.
struct ActiveEntry {
    command: CommandRef,
    /// Cached for event reporting; `name()` is not reachable while the
    /// command is mutably borrowed.
    name: Arc<str>,
    removed: bool,
}

/// Cooperative command scheduler.
///
/// See the [module docs](self) for the per-cycle algorithm.
///
/// ## Example
/// ```rust
/// use commandeer::{CommandExt, FnCommand, Scheduler, Subsystem};
///
/// struct Claw;
/// impl Subsystem for Claw {
///     fn name(&self) -> &str {
///         "claw"
///     }
/// }
///
/// # fn main() -> Result<(), commandeer::SchedulerError> {
/// let mut scheduler = Scheduler::new();
/// let claw = scheduler.register(Box::new(Claw))?;
///
/// let grab = FnCommand::new("grab")
///     .requires([claw])
///     .finish_when(|| true)
///     .into_ref();
/// scheduler.schedule(&grab);
///
/// scheduler.run_cycle();
/// assert!(!scheduler.is_scheduled(&grab)); // ran and finished
/// # Ok(())
/// # }
/// ```
pub struct Scheduler {
    subsystems: Vec<SubsystemSlot>,
    active: Vec<ActiveEntry>,
    registry: Requirements,
    pending: VecDeque<Request>,
    bindings: Vec<Binding>,
    subs: SubscriberSet,
    cycle: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    /// Creates a scheduler with no subscribers.
    pub fn new() -> Self {
        Self::with_subscribers(Vec::new())
    }

    /// Creates a scheduler that reports events to the given subscribers.
    pub fn with_subscribers(subscribers: Vec<Rc<dyn Subscribe>>) -> Self {
        Self {
            subsystems: Vec::new(),
            active: Vec::new(),
            registry: Requirements::new(),
            pending: VecDeque::new(),
            bindings: Vec::new(),
            subs: SubscriberSet::new(subscribers),
            cycle: 0,
        }
    }

    // ---------------------------
    // Configuration
    // ---------------------------

    /// Registers a subsystem and returns its id.
    ///
    /// Only supported before the first `run_cycle`.
    pub fn register(&mut self, subsystem: Box<dyn Subsystem>) -> Result<SubsystemId, SchedulerError> {
        if self.cycle > 0 || !self.active.is_empty() {
            return Err(SchedulerError::RegisteredAfterStart {
                subsystem: subsystem.name().to_string(),
            });
        }
        let id = SubsystemId(self.subsystems.len() as u32);
        self.subs.emit(
            &Event::new(EventKind::SubsystemRegistered)
                .with_subsystem(Arc::<str>::from(subsystem.name())),
        );
        self.subsystems.push(SubsystemSlot {
            id,
            subsystem,
            default: None,
        });
        Ok(id)
    }

    /// Installs the command a subsystem runs whenever nothing else holds it.
    ///
    /// The command must require exactly `id` and be interruptible.
    pub fn set_default_command(
        &mut self,
        id: SubsystemId,
        command: CommandRef,
    ) -> Result<(), SchedulerError> {
        let slot = self
            .subsystems
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(SchedulerError::UnknownSubsystem { id })?;
        {
            let c = command.borrow();
            let expected: RequirementSet = [id].into_iter().collect();
            if *c.requirements() != expected {
                return Err(SchedulerError::DefaultRequirementMismatch {
                    command: c.name().to_string(),
                    subsystem: id,
                });
            }
            if !c.is_interruptible() {
                return Err(SchedulerError::DefaultNotInterruptible {
                    command: c.name().to_string(),
                });
            }
        }
        slot.default = Some(command);
        Ok(())
    }

    /// Attaches a trigger binding, polled once per cycle.
    pub fn bind(&mut self, binding: Binding) {
        self.bindings.push(binding);
    }

    /// Attaches an event subscriber.
    pub fn add_subscriber(&mut self, subscriber: Rc<dyn Subscribe>) {
        self.subs.push(subscriber);
    }

    // ---------------------------
    // Requests
    // ---------------------------

    /// Queues a schedule request, resolved during the next cycle's drain.
    ///
    /// Scheduling a command instance that is already running restarts it:
    /// `end(true)`, then `initialize` afresh.
    pub fn schedule(&mut self, command: &CommandRef) {
        self.pending.push_back(Request::Schedule(command.clone()));
    }

    /// Wraps `command` in a [`CommandRef`], queues it, and returns the
    /// handle for later queries or cancellation.
    pub fn submit(&mut self, command: impl Command + 'static) -> CommandRef {
        let handle = command.into_ref();
        self.schedule(&handle);
        handle
    }

    /// Queues a cancel request. A no-op if the command is not running when
    /// the request resolves. Cancel ignores interruptibility.
    pub fn cancel(&mut self, command: &CommandRef) {
        self.pending.push_back(Request::Cancel(command.clone()));
    }

    // ---------------------------
    // Cycle driver
    // ---------------------------

    /// Advances the schedule by exactly one step.
    ///
    /// Called by the host runtime once per control-loop iteration; the core
    /// makes no timing guarantees beyond that.
    pub fn run_cycle(&mut self) {
        self.cycle += 1;

        // 1. Subsystem upkeep, registration order.
        for slot in &mut self.subsystems {
            slot.subsystem.periodic();
        }

        // 2. Trigger bindings.
        for binding in &mut self.bindings {
            binding.poll(&mut self.pending);
        }

        // 3. Advance every active command.
        self.advance_active();

        // 4. Resolve deferred requests.
        self.drain_requests();

        // 5. Queue defaults for idle subsystems (granted next cycle).
        self.queue_defaults();
    }

    /// Cancels every running command (`end(true)`) and clears the registry
    /// and pending queue. Subsystems and bindings stay registered; used at
    /// program stop or mode transition.
    pub fn disable(&mut self) {
        let entries: Vec<ActiveEntry> = self.active.drain(..).collect();
        for entry in entries {
            {
                let mut ctx = Context::new(&mut self.pending, self.cycle);
                entry.command.borrow_mut().end(true, &mut ctx);
            }
            self.subs.emit(
                &Event::new(EventKind::CommandInterrupted)
                    .with_cycle(self.cycle)
                    .with_command(entry.name),
            );
        }
        self.registry.clear();
        // Requests queued by the end() callbacks above die with the run.
        self.pending.clear();
        self.subs
            .emit(&Event::new(EventKind::SchedulerDisabled).with_cycle(self.cycle));
    }

    /// [`Scheduler::disable`], then forget subsystems, bindings, and the
    /// cycle counter. The scheduler is as new.
    pub fn reset(&mut self) {
        self.disable();
        self.subsystems.clear();
        self.bindings.clear();
        self.cycle = 0;
    }

    // ---------------------------
    // Queries
    // ---------------------------

    /// Whether `command` is currently in the active set.
    pub fn is_scheduled(&self, command: &CommandRef) -> bool {
        self.active
            .iter()
            .any(|e| Rc::ptr_eq(&e.command, command))
    }

    /// The command currently holding subsystem `id`, if any.
    pub fn requiring(&self, id: SubsystemId) -> Option<CommandRef> {
        self.registry.holder(id).cloned()
    }

    /// Number of commands in the active set.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Cycle counter: number of completed `run_cycle` calls.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Name of a registered subsystem.
    pub fn subsystem_name(&self, id: SubsystemId) -> Option<&str> {
        self.subsystems
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.subsystem.name())
    }

    // ---------------------------
    // Cycle internals
    // ---------------------------

    /// Step 3: one `execute` per active command, finish checks included.
    fn advance_active(&mut self) {
        let Self {
            active,
            registry,
            pending,
            subs,
            cycle,
            ..
        } = self;
        let cycle = *cycle;

        for entry in active.iter_mut() {
            let mut command = entry.command.borrow_mut();
            let mut ctx = Context::new(pending, cycle);
            command.execute(&mut ctx);
            if command.is_finished() {
                command.end(false, &mut ctx);
                drop(command);
                registry.release(&entry.command);
                entry.removed = true;
                subs.emit(
                    &Event::new(EventKind::CommandFinished)
                        .with_cycle(cycle)
                        .with_command(entry.name.clone()),
                );
            }
        }
        active.retain(|e| !e.removed);
    }

    /// Step 4: FIFO drain to empty. Requests queued by callbacks during
    /// the drain are resolved in the same pass.
    fn drain_requests(&mut self) {
        while let Some(request) = self.pending.pop_front() {
            match request {
                Request::Cancel(command) => self.interrupt(&command),
                Request::Schedule(command) => self.grant(command),
                Request::Default { subsystem, command } => {
                    // Re-check idleness at resolution time: a deferred
                    // default never preempts whatever claimed the
                    // subsystem since the request was queued.
                    if self.registry.holder(subsystem).is_none() {
                        self.grant(command);
                    }
                }
            }
        }
    }

    /// Step 5: one request per idle subsystem with a default command.
    fn queue_defaults(&mut self) {
        let Self {
            subsystems,
            registry,
            pending,
            subs,
            cycle,
            ..
        } = self;

        for slot in subsystems.iter() {
            let Some(default) = &slot.default else {
                continue;
            };
            if registry.holder(slot.id).is_some() {
                continue;
            }
            pending.push_back(Request::Default {
                subsystem: slot.id,
                command: default.clone(),
            });
            subs.emit(
                &Event::new(EventKind::DefaultRequested)
                    .with_cycle(*cycle)
                    .with_command(Arc::<str>::from(default.borrow().name()))
                    .with_subsystem(Arc::<str>::from(slot.subsystem.name())),
            );
        }
    }

    /// Ends a running command with `interrupted = true` and releases its
    /// requirements. A no-op if the command is not active.
    fn interrupt(&mut self, command: &CommandRef) {
        let Some(pos) = self
            .active
            .iter()
            .position(|e| Rc::ptr_eq(&e.command, command))
        else {
            return;
        };
        let entry = self.active.remove(pos);
        {
            let mut ctx = Context::new(&mut self.pending, self.cycle);
            entry.command.borrow_mut().end(true, &mut ctx);
        }
        self.registry.release(&entry.command);
        self.subs.emit(
            &Event::new(EventKind::CommandInterrupted)
                .with_cycle(self.cycle)
                .with_command(entry.name),
        );
    }

    /// Resolves one schedule request.
    fn grant(&mut self, command: CommandRef) {
        // Restart semantics: an instance that is already running is
        // interrupted first, then scheduled afresh below.
        if self.is_scheduled(&command) {
            self.interrupt(&command);
        }

        let (name, requirements, interruptible) = {
            let c = command.borrow();
            (
                Arc::<str>::from(c.name()),
                c.requirements().clone(),
                c.is_interruptible(),
            )
        };

        match self.registry.try_claim(&requirements) {
            ClaimResult::Rejected {
                blocking: _,
                blocking_name,
            } => {
                self.subs.emit(
                    &Event::new(EventKind::ScheduleRejected)
                        .with_cycle(self.cycle)
                        .with_command(name)
                        .with_blocking(blocking_name),
                );
            }
            ClaimResult::Granted { displaced } => {
                for incumbent in displaced {
                    self.interrupt(&incumbent);
                }
                self.registry
                    .assign(&command, &name, interruptible, &requirements);
                self.active.push(ActiveEntry {
                    command: command.clone(),
                    name: name.clone(),
                    removed: false,
                });
                self.subs.emit(
                    &Event::new(EventKind::CommandScheduled)
                        .with_cycle(self.cycle)
                        .with_command(name.clone()),
                );

                // The command's first advance happens in the granting
                // cycle: initialize, execute, finish check.
                let finished = {
                    let mut c = command.borrow_mut();
                    let mut ctx = Context::new(&mut self.pending, self.cycle);
                    c.initialize(&mut ctx);
                    c.execute(&mut ctx);
                    let finished = c.is_finished();
                    if finished {
                        c.end(false, &mut ctx);
                    }
                    finished
                };
                if finished {
                    self.registry.release(&command);
                    self.active.retain(|e| !Rc::ptr_eq(&e.command, &command));
                    self.subs.emit(
                        &Event::new(EventKind::CommandFinished)
                            .with_cycle(self.cycle)
                            .with_command(name),
                    );
                }
            }
        }
    }
}
