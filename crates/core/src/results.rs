//! Result types for a task list run
//!
//! Every task ends in exactly one terminal [`TaskState`]; tasks skipped after a
//! failure stay [`TaskState::Pending`]. Failures are data here, never errors.

use std::time::Duration;

use crate::configs::tasks::Command;

/// Lifecycle of one task: `Pending -> Running -> {Succeeded, NotFound, Failed}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Running,
    Succeeded,
    NotFound,
    Failed,
}

impl TaskState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::NotFound | Self::Failed)
    }

    pub fn is_failure(self) -> bool {
        matches!(self, Self::NotFound | Self::Failed)
    }
}

/// Terminal outcome of one executed task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Succeeded { output: Option<String> },
    Failed { output: Option<String> },
    NotFound,
}

impl TaskOutcome {
    pub fn state(&self) -> TaskState {
        match self {
            Self::Succeeded { .. } => TaskState::Succeeded,
            Self::Failed { .. } => TaskState::Failed,
            Self::NotFound => TaskState::NotFound,
        }
    }

    pub fn into_output(self) -> Option<String> {
        match self {
            Self::Succeeded { output } | Self::Failed { output } => output,
            Self::NotFound => None,
        }
    }
}

/// State of one task in the list
#[derive(Debug, Clone)]
pub struct TaskReport {
    pub index: usize,
    pub command: Command,
    pub state: TaskState,
    /// Title as last displayed
    pub title: String,
    /// Output attached for display, if any
    pub output: Option<String>,
    /// Wall time spent running, `None` until the task ends
    pub duration: Option<Duration>,
}

impl TaskReport {
    pub fn pending(index: usize, command: Command) -> Self {
        Self {
            index,
            title: command.task_title.clone(),
            command,
            state: TaskState::Pending,
            output: None,
            duration: None,
        }
    }
}

/// Outcome of the whole task list
#[derive(Debug, Clone)]
pub struct RunResult {
    pub tasks: Vec<TaskReport>,
    /// True only when every task succeeded
    pub success: bool,
}

impl RunResult {
    pub fn from_tasks(tasks: Vec<TaskReport>) -> Self {
        let success = tasks.iter().all(|task| task.state == TaskState::Succeeded);
        Self { tasks, success }
    }

    pub fn states(&self) -> Vec<TaskState> {
        self.tasks.iter().map(|task| task.state).collect()
    }

    pub fn exit_code(&self) -> i32 {
        if self.success {
            0
        } else {
            1
        }
    }
}
