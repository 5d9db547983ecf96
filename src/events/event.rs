//! # Scheduler events.
//!
//! The [`EventKind`] enum classifies everything the scheduler reports:
//! - **Lifecycle events**: commands being granted, finishing, being
//!   interrupted.
//! - **Resolution events**: rejected schedule requests, deferred default
//!   activations.
//! - **Administrative events**: subsystem registration, scheduler disable.
//!
//! The [`Event`] struct carries the cycle number plus optional metadata
//! such as command and subsystem names.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically in emission order. Within one cycle, events are emitted in
//! the order the per-cycle algorithm produced them.
//!
//! ## Example
//! ```rust
//! use commandeer::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::ScheduleRejected)
//!     .with_cycle(7)
//!     .with_command("drive_forward")
//!     .with_blocking("climb");
//!
//! assert_eq!(ev.kind, EventKind::ScheduleRejected);
//! assert_eq!(ev.command.as_deref(), Some("drive_forward"));
//! assert_eq!(ev.blocking.as_deref(), Some("climb"));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of scheduler events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Command lifecycle ===
    /// A schedule request was granted; the command ran `initialize`.
    ///
    /// Sets:
    /// - `command`: command name
    /// - `cycle`, `seq`
    CommandScheduled,

    /// A running command's completion predicate became true; it ran
    /// `end(false)` and released its requirements.
    ///
    /// Sets:
    /// - `command`: command name
    /// - `cycle`, `seq`
    CommandFinished,

    /// A running command was interrupted (conflicting grant, explicit
    /// cancel, restart, or scheduler disable); it ran `end(true)`.
    ///
    /// Sets:
    /// - `command`: command name
    /// - `cycle`, `seq`
    CommandInterrupted,

    // === Request resolution ===
    /// A schedule request was dropped because a required subsystem is held
    /// by an uninterruptible command. The incumbent keeps running.
    ///
    /// Sets:
    /// - `command`: the rejected command's name
    /// - `blocking`: the uninterruptible incumbent's name
    /// - `cycle`, `seq`
    ScheduleRejected,

    /// An idle subsystem queued its default command for the next cycle.
    ///
    /// Sets:
    /// - `command`: default command name
    /// - `subsystem`: subsystem name
    /// - `cycle`, `seq`
    DefaultRequested,

    // === Administrative ===
    /// A subsystem was registered.
    ///
    /// Sets:
    /// - `subsystem`: subsystem name
    /// - `cycle` (always 0), `seq`
    SubsystemRegistered,

    /// The scheduler was disabled; every running command was interrupted
    /// and the requirement registry cleared.
    ///
    /// Sets:
    /// - `cycle`, `seq`
    SchedulerDisabled,
}

/// Scheduler event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `cycle`: the cycle during which the event was emitted (0 before the
///   first cycle)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Debug, Clone)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Cycle counter at emission time.
    pub cycle: u64,
    /// Event classification.
    pub kind: EventKind,
    /// Name of the command involved, if any.
    pub command: Option<Arc<str>>,
    /// Name of the uninterruptible incumbent, for rejections.
    pub blocking: Option<Arc<str>>,
    /// Name of the subsystem involved, if any.
    pub subsystem: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with the next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            cycle: 0,
            kind,
            command: None,
            blocking: None,
            subsystem: None,
        }
    }

    /// Attaches the emitting cycle number.
    #[inline]
    pub fn with_cycle(mut self, cycle: u64) -> Self {
        self.cycle = cycle;
        self
    }

    /// Attaches a command name.
    #[inline]
    pub fn with_command(mut self, command: impl Into<Arc<str>>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Attaches the blocking command's name (rejections only).
    #[inline]
    pub fn with_blocking(mut self, blocking: impl Into<Arc<str>>) -> Self {
        self.blocking = Some(blocking.into());
        self
    }

    /// Attaches a subsystem name.
    #[inline]
    pub fn with_subsystem(mut self, subsystem: impl Into<Arc<str>>) -> Self {
        self.subsystem = Some(subsystem.into());
        self
    }
}
