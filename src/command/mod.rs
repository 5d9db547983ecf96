//! # Commands: the atomic unit of schedulable behavior.
//!
//! [`Command`] is the four-phase contract every behavior implements;
//! [`FnCommand`], [`WaitCommand`] and [`RepeatCommand`] are the built-in
//! implementations, and [`CommandExt`] provides chaining into groups.

#[allow(clippy::module_inception)]
mod command;
mod fn_command;
mod repeat;
mod wait;

pub use command::{Command, CommandExt, CommandRef, RequirementSet};
pub use fn_command::FnCommand;
pub use repeat::RepeatCommand;
pub use wait::WaitCommand;
