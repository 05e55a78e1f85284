//! Rendering boundary
//!
//! The task runner emits state transitions to a [`TaskReporter`]; how they
//! are drawn is up to the implementation.

use crate::results::{RunResult, TaskReport};

/// Receives task state transitions in the order they happen
pub trait TaskReporter {
    /// The task entered `Running`
    fn task_started(&mut self, _task: &TaskReport) {}

    /// The task's displayed title changed while it was running
    fn title_changed(&mut self, _task: &TaskReport) {}

    /// A line of output arrived from the running command
    fn output_line(&mut self, _task: &TaskReport, _line: &str) {}

    /// The task reached a terminal state
    fn task_finished(&mut self, _task: &TaskReport) {}

    /// Every task that will run has run
    fn run_finished(&mut self, _result: &RunResult) {}
}

/// Reporter that draws nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl TaskReporter for NullReporter {}
