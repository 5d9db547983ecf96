//! # Scheduling: the cycle driver, its building blocks, and trigger glue.
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │                   Scheduler                    │
//! │                                                │
//! │  Binding ──poll──▶ VecDeque<Request> ◀── Context
//! │                          │                     │
//! │                        drain                   │
//! │                          ▼                     │
//! │                    Requirements                │
//! │              (subsystem → holding command)     │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! - [`Scheduler`] — owns everything; one [`Scheduler::run_cycle`] per
//!   control-loop iteration.
//! - [`Context`] — the handle commands receive in their lifecycle
//!   callbacks to queue schedule/cancel requests.
//! - [`Binding`] / [`Edge`] — polled predicates that turn condition
//!   transitions into requests.

mod bindings;
mod context;
mod core;
mod registry;

pub use bindings::{Binding, Edge};
pub use context::Context;
pub use core::Scheduler;
