//! # Subsystems: owners of physical resources.
//!
//! A [`Subsystem`] wraps one controllable piece of hardware (a drivetrain,
//! an arm, a sensor cluster) and is the unit of exclusive ownership the
//! scheduler arbitrates over. Commands declare the subsystems they use in
//! their requirement set; the scheduler guarantees at most one running
//! command holds a subsystem at any instant.
//!
//! Subsystems are registered once, before the first cycle, and live for the
//! whole run. Registration hands the subsystem to the scheduler and returns
//! a [`SubsystemId`], the value commands use in requirement sets.
//!
//! ## Example
//! ```rust
//! use commandeer::{Scheduler, Subsystem};
//!
//! struct Drive {
//!     ticks: u64,
//! }
//!
//! impl Subsystem for Drive {
//!     fn name(&self) -> &str {
//!         "drive"
//!     }
//!
//!     fn periodic(&mut self) {
//!         // read encoders, update odometry, ...
//!         self.ticks += 1;
//!     }
//! }
//!
//! # fn main() -> Result<(), commandeer::SchedulerError> {
//! let mut scheduler = Scheduler::new();
//! let drive = scheduler.register(Box::new(Drive { ticks: 0 }))?;
//! assert_eq!(scheduler.subsystem_name(drive), Some("drive"));
//! # Ok(())
//! # }
//! ```

use std::fmt;

/// Identifier of a registered subsystem.
///
/// Issued by [`Scheduler::register`](crate::Scheduler::register) and used in
/// command requirement sets. Ids are dense, assigned in registration order,
/// and valid for the lifetime of the scheduler that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubsystemId(pub(crate) u32);

impl fmt::Display for SubsystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subsystem#{}", self.0)
    }
}

/// A controllable physical resource (or resource group).
///
/// The scheduler calls [`Subsystem::periodic`] once per cycle, in
/// registration order, before any command executes. Use it for upkeep that
/// must happen regardless of which command holds the subsystem: sensor
/// reads, odometry updates, watchdog feeds.
///
/// Hardware access belongs to the subsystem; commands reach it through
/// whatever handle the host program shares with them. The scheduler only
/// arbitrates *who* may drive the subsystem, it never touches hardware.
pub trait Subsystem {
    /// Short stable name used in events and logs.
    fn name(&self) -> &str;

    /// Per-cycle upkeep hook. Runs before any command `execute`.
    fn periodic(&mut self) {}
}

/// Registration record: the subsystem plus its optional default command.
pub(crate) struct SubsystemSlot {
    pub(crate) id: SubsystemId,
    pub(crate) subsystem: Box<dyn Subsystem>,
    pub(crate) default: Option<crate::command::CommandRef>,
}
