//! # Scheduler observability: events and subscribers.
//!
//! Every transition the scheduler resolves is reported as an [`Event`] and
//! fanned out synchronously to the attached [`Subscribe`]rs:
//!
//! ```text
//! Scheduler ── emit(Event) ──► SubscriberSet
//!                                   │
//!                              ┌────┴────┬──────────┐
//!                              ▼         ▼          ▼
//!                          LogWriter  telemetry  test recorder
//! ```
//!
//! Rejected schedule requests surface here (as
//! [`EventKind::ScheduleRejected`]) rather than as errors: the request is
//! dropped, the incumbent keeps running, and the cycle continues.

mod event;
mod subscriber;

#[cfg(feature = "logging")]
mod log;

pub use event::{Event, EventKind};
pub use subscriber::{Subscribe, SubscriberSet};

#[cfg(feature = "logging")]
pub use log::LogWriter;
