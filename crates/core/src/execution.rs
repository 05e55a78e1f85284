//! Task execution module
//!
//! This module handles running the task list: spawning shell commands,
//! classifying their outcome and reporting state transitions.

pub mod command;
pub mod reporter;
pub mod runner;

pub use command::{ShellExecutor, ShellOutput, ShellProcess, SystemShell};
pub use reporter::{NullReporter, TaskReporter};
pub use runner::{TaskRunner, TaskRunnerConfig};
