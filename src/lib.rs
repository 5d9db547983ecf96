//! # commandeer
//!
//! **Commandeer** is a cooperative command-scheduling core for robot
//! control loops.
//!
//! It provides primitives to express robot behaviors as commands with an
//! explicit lifecycle, declare which hardware subsystems each command
//! needs, and resolve conflicts deterministically once per control cycle.
//! The crate is designed as the scheduling layer under a host runtime
//! that owns timing and hardware I/O.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   ┌─────────────┐   ┌─────────────┐   ┌─────────────┐
//!   │   Command   │   │  Sequential │   │   Binding   │
//!   │ (user #1)   │   │ (user #2)   │   │ (trigger)   │
//!   └──────┬──────┘   └──────┬──────┘   └──────┬──────┘
//!          │ schedule()      │ schedule()      │ poll() each cycle
//!          ▼                 ▼                 ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │  Scheduler (cycle driver)                               │
//! │  - VecDeque<Request> (deferred schedule/cancel queue)   │
//! │  - Requirements (subsystem → holding command)           │
//! │  - active set (commands advancing each cycle)           │
//! │  - SubscriberSet (fans out events to user subscribers)  │
//! └──────┬──────────────────────────────────────────┬───────┘
//!        │ initialize / execute / end               │ Events:
//!        ▼                                          │ - CommandScheduled
//!   ┌──────────────┐  ┌──────────────┐              │ - CommandFinished
//!   │   Command    │  │   Command    │              │ - CommandInterrupted
//!   │  (running)   │  │  (running)   │              │ - ScheduleRejected
//!   └──────┬───────┘  └──────┬───────┘              │ - ...
//!          ▼                 ▼                      ▼
//!   ┌──────────────┐  ┌──────────────┐      ┌──────────────┐
//!   │  Subsystem   │  │  Subsystem   │      │  Subscribe   │
//!   │ (exclusive)  │  │ (exclusive)  │      │  (on_event)  │
//!   └──────────────┘  └──────────────┘      └──────────────┘
//! ```
//!
//! ### Lifecycle
//! ```text
//! schedule(cmd) ──► request queue ──► drain (once per cycle)
//!
//! run_cycle() {
//!   ├─► subsystem periodic hooks
//!   ├─► poll trigger bindings (edges queue requests)
//!   ├─► for each running command:
//!   │       execute()
//!   │       is_finished()? ─► end(false), release subsystems
//!   ├─► drain request queue (FIFO, to empty):
//!   │       Cancel   ─► end(true), release
//!   │       Schedule ─► claim subsystems:
//!   │           any holder uninterruptible ─► reject, report
//!   │           else ─► interrupt incumbents (end(true)),
//!   │                   initialize + first execute
//!   └─► queue default commands for idle subsystems
//! }
//! ```
//!
//! Everything is single-threaded and cooperative: commands never block,
//! and all waiting is `is_finished()` returning `false` across cycles.
//!
//! ## Features
//! | Area            | Description                                                      | Key types / traits                         |
//! |-----------------|------------------------------------------------------------------|--------------------------------------------|
//! | **Commands**    | Define behaviors with a four-phase lifecycle, easy to compose.   | [`Command`], [`FnCommand`], [`CommandExt`] |
//! | **Subsystems**  | Exclusive hardware resources with per-cycle upkeep.              | [`Subsystem`], [`SubsystemId`]             |
//! | **Scheduling**  | Per-cycle conflict resolution, interruption, default commands.   | [`Scheduler`], [`Context`]                 |
//! | **Groups**      | Sequence, parallel, race, and deadline composition.              | [`Sequential`], [`Parallel`], [`Race`], [`Deadline`] |
//! | **Triggers**    | Bind commands to condition edges (buttons, sensors).             | [`Binding`], [`Edge`]                      |
//! | **Subscriber API** | Hook into scheduling events (logging, telemetry).             | [`Subscribe`], [`Event`]                   |
//! | **Errors**      | Typed errors for configuration and composition.                  | [`SchedulerError`], [`ComposeError`]       |
//!
//! ## Optional features
//! - `logging`: exports a built-in [`LogWriter`] subscriber that renders
//!   events through `tracing`.
//!
//! ## Example
//! ```rust
//! use commandeer::{CommandExt, FnCommand, Scheduler, Subsystem, WaitCommand};
//!
//! struct Drive;
//! impl Subsystem for Drive {
//!     fn name(&self) -> &str {
//!         "drive"
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut scheduler = Scheduler::new();
//!     let drive = scheduler.register(Box::new(Drive))?;
//!
//!     // Hold position whenever nothing else wants the drivetrain.
//!     let idle = FnCommand::new("idle").requires([drive]).into_ref();
//!     scheduler.set_default_command(drive, idle)?;
//!
//!     // A routine: drive forward for 50 cycles, then stop.
//!     let forward = FnCommand::new("forward")
//!         .requires([drive])
//!         .on_execute(|_| { /* set motor power */ })
//!         .race_with(WaitCommand::cycles(50))?
//!         .into_ref();
//!     scheduler.schedule(&forward);
//!
//!     // One call per control-loop iteration.
//!     for _ in 0..60 {
//!         scheduler.run_cycle();
//!     }
//!     assert!(!scheduler.is_scheduled(&forward));
//!     Ok(())
//! }
//! ```

mod command;
mod error;
mod events;
mod groups;
mod scheduler;
mod subsystem;

#[cfg(test)]
pub(crate) mod testkit;

// ---- Public re-exports ----

pub use command::{Command, CommandExt, CommandRef, FnCommand, RepeatCommand, RequirementSet, WaitCommand};
pub use error::{ComposeError, SchedulerError};
pub use events::{Event, EventKind, Subscribe, SubscriberSet};
pub use groups::{Deadline, Parallel, Race, Sequential};
pub use scheduler::{Binding, Context, Edge, Scheduler};
pub use subsystem::{Subsystem, SubsystemId};

// Optional: expose a tracing-backed logger subscriber.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use events::LogWriter;
