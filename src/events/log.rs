//! # Built-in logging subscriber.
//!
//! [`LogWriter`] renders scheduler events through [`tracing`], one span-free
//! line per event. Useful during bring-up and in desktop simulations; for
//! telemetry on a real robot, implement a custom [`Subscribe`] that feeds
//! your dashboard instead.
//!
//! ## Output shape
//! ```text
//! INFO  scheduled cycle=1 command=drive_forward
//! INFO  finished cycle=3 command=drive_forward
//! WARN  rejected cycle=4 command=intake blocking=climb
//! ```

use crate::events::{Event, EventKind, Subscribe};

/// Renders events via `tracing`. Enabled with the `logging` feature.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogWriter;

impl LogWriter {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self
    }
}

fn opt(field: &Option<std::sync::Arc<str>>) -> &str {
    field.as_deref().unwrap_or("?")
}

impl Subscribe for LogWriter {
    fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::CommandScheduled => {
                tracing::info!(cycle = e.cycle, command = opt(&e.command), "scheduled");
            }
            EventKind::CommandFinished => {
                tracing::info!(cycle = e.cycle, command = opt(&e.command), "finished");
            }
            EventKind::CommandInterrupted => {
                tracing::info!(cycle = e.cycle, command = opt(&e.command), "interrupted");
            }
            EventKind::ScheduleRejected => {
                tracing::warn!(
                    cycle = e.cycle,
                    command = opt(&e.command),
                    blocking = opt(&e.blocking),
                    "rejected"
                );
            }
            EventKind::DefaultRequested => {
                tracing::debug!(
                    cycle = e.cycle,
                    command = opt(&e.command),
                    subsystem = opt(&e.subsystem),
                    "default requested"
                );
            }
            EventKind::SubsystemRegistered => {
                tracing::info!(subsystem = opt(&e.subsystem), "subsystem registered");
            }
            EventKind::SchedulerDisabled => {
                tracing::info!(cycle = e.cycle, "scheduler disabled");
            }
        }
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
