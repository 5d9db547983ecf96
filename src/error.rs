//! Error types used by the scheduler and command composition.
//!
//! This module defines two error enums:
//!
//! - [`SchedulerError`] — configuration errors raised when wiring subsystems
//!   and default commands into a scheduler.
//! - [`ComposeError`] — construction-time errors raised when building
//!   parallel-style command groups.
//!
//! Both are programming errors surfaced eagerly, before any scheduling can
//! happen. Runtime conditions the scheduler recovers from on its own — a
//! rejected schedule request, most notably — are reported as
//! [`Event`](crate::events::Event)s instead, never as `Err`.

use thiserror::Error;

use crate::subsystem::SubsystemId;

/// Errors raised while configuring a [`Scheduler`](crate::Scheduler).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// A subsystem was registered after the scheduler had already started
    /// cycling. Registration is only supported before the first
    /// `run_cycle`.
    #[error("subsystem {subsystem:?} registered after the scheduler started")]
    RegisteredAfterStart {
        /// Name of the subsystem that arrived late.
        subsystem: String,
    },

    /// A subsystem id did not belong to this scheduler.
    #[error("{id} is not registered with this scheduler")]
    UnknownSubsystem {
        /// The offending id.
        id: SubsystemId,
    },

    /// A default command's requirement set was not exactly the subsystem it
    /// was installed on.
    #[error("default command {command:?} must require exactly {subsystem}")]
    DefaultRequirementMismatch {
        /// Name of the rejected command.
        command: String,
        /// The subsystem the default was installed on.
        subsystem: SubsystemId,
    },

    /// A default command was not interruptible. An uninterruptible default
    /// could never yield its subsystem to a real command.
    #[error("default command {command:?} must be interruptible")]
    DefaultNotInterruptible {
        /// Name of the rejected command.
        command: String,
    },
}

impl SchedulerError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            SchedulerError::RegisteredAfterStart { .. } => "registered_after_start",
            SchedulerError::UnknownSubsystem { .. } => "unknown_subsystem",
            SchedulerError::DefaultRequirementMismatch { .. } => "default_requirement_mismatch",
            SchedulerError::DefaultNotInterruptible { .. } => "default_not_interruptible",
        }
    }
}

/// Errors raised while composing command groups.
///
/// Conflicting composition is a configuration error, caught before the group
/// can ever be scheduled — it is never a runtime race.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ComposeError {
    /// Two children of a parallel-style group require the same subsystem.
    #[error("{subsystem} is required by more than one child of the group")]
    ConflictingRequirements {
        /// The subsystem claimed twice.
        subsystem: SubsystemId,
    },
}

impl ComposeError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ComposeError::ConflictingRequirements { .. } => "conflicting_requirements",
        }
    }
}
