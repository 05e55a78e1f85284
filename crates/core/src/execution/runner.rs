//! Sequential task runner
//!
//! Runs the task list strictly in order, one command at a time. Each task
//! moves `Pending -> Running` and then into exactly one terminal state. After
//! a failure the runner either stops, leaving the rest `Pending`, or carries
//! on with the next task.

use std::io;
use std::time::Instant;

use tracing::{debug, warn};

use crate::configs::environment::EnvironmentTable;
use crate::configs::tasks::Command;
use crate::execution::command::{ShellExecutor, ShellOutput, ShellProcess, NOT_FOUND_EXIT_CODE};
use crate::execution::reporter::TaskReporter;
use crate::output::normalize_output;
use crate::results::{RunResult, TaskOutcome, TaskReport, TaskState};

/// Configuration for the task runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRunnerConfig {
    /// Skip the remaining tasks once one fails
    pub stop_on_first_failure: bool,
    /// Show how long successful tasks took
    pub show_duration_timer: bool,
    /// Keep a task's output on screen after it completes
    pub persist_completed_output: bool,
    /// Run with the terminal's stdio and render nothing (CI)
    pub silent_mode: bool,
}

impl Default for TaskRunnerConfig {
    fn default() -> Self {
        Self {
            stop_on_first_failure: true,
            show_duration_timer: true,
            persist_completed_output: true,
            silent_mode: false,
        }
    }
}

/// Runs a list of commands through a [`ShellExecutor`]
pub struct TaskRunner<'a, E> {
    executor: &'a E,
    env: &'a EnvironmentTable,
    config: TaskRunnerConfig,
}

impl<'a, E: ShellExecutor> TaskRunner<'a, E> {
    pub fn new(executor: &'a E, env: &'a EnvironmentTable, config: TaskRunnerConfig) -> Self {
        Self {
            executor,
            env,
            config,
        }
    }

    /// Run every command in order and collect the outcome
    pub async fn run<R: TaskReporter>(&self, commands: Vec<Command>, reporter: &mut R) -> RunResult {
        let mut tasks: Vec<TaskReport> = commands
            .into_iter()
            .enumerate()
            .map(|(index, command)| TaskReport::pending(index, command))
            .collect();

        for task in &mut tasks {
            let started = Instant::now();
            task.state = TaskState::Running;
            reporter.task_started(task);
            debug!(target: "listr::runner", index = task.index, command = %task.command.command, "task started");

            let outcome = if self.config.silent_mode {
                self.run_inherited(&task.command).await
            } else {
                self.run_captured(task, reporter).await
            };

            task.duration = Some(started.elapsed());
            task.state = outcome.state();
            task.title = finished_title(&task.command, task.state);
            task.output = outcome.into_output();
            debug!(target: "listr::runner", index = task.index, state = ?task.state, "task finished");
            reporter.task_finished(task);

            if task.state.is_failure() && self.config.stop_on_first_failure {
                debug!(target: "listr::runner", index = task.index, "stopping after failure");
                break;
            }
        }

        let result = RunResult::from_tasks(tasks);
        reporter.run_finished(&result);
        result
    }

    async fn run_captured<R: TaskReporter>(
        &self,
        task: &mut TaskReport,
        reporter: &mut R,
    ) -> TaskOutcome {
        task.title = running_title(&task.command);
        reporter.title_changed(task);

        let mut process = match self.executor.spawn(&task.command.command, self.env) {
            Ok(process) => process,
            Err(err) => return spawn_failure(&err),
        };

        let mut reported_not_found = false;
        while let Some(line) = process.next_line().await {
            if line_reports_not_found(&line, &task.command.command_name) {
                reported_not_found = true;
                task.title = not_found_title(&task.command);
                reporter.title_changed(task);
                break;
            }
            reporter.output_line(task, &line);
        }

        match process.finish().await {
            Ok(_) if reported_not_found => TaskOutcome::NotFound,
            Ok(output) => classify_output(output),
            Err(err) => {
                warn!(target: "listr::runner", %err, "failed waiting for command");
                TaskOutcome::Failed { output: None }
            }
        }
    }

    async fn run_inherited(&self, command: &Command) -> TaskOutcome {
        match self.executor.run_inherited(&command.command, self.env).await {
            Ok(Some(0)) => TaskOutcome::Succeeded { output: None },
            Ok(Some(NOT_FOUND_EXIT_CODE)) => TaskOutcome::NotFound,
            Ok(_) => TaskOutcome::Failed { output: None },
            Err(err) => spawn_failure(&err),
        }
    }
}

/// Whether a line reads like `<command_name> ... not found`
pub fn line_reports_not_found(line: &str, command_name: &str) -> bool {
    if command_name.is_empty() {
        return false;
    }

    line.find(command_name)
        .is_some_and(|start| line[start + command_name.len()..].contains("not found"))
}

/// Title shown while a task runs
pub fn running_title(command: &Command) -> String {
    format!("{}: running \"{}\"...", command.task_title, command.command)
}

/// Title shown for a task whose executable could not be located
pub fn not_found_title(command: &Command) -> String {
    if command.task_title == command.command {
        format!("{}: command not found.", command.task_title)
    } else {
        format!(
            "{}: command \"{}\" not found.",
            command.task_title, command.command
        )
    }
}

fn finished_title(command: &Command, state: TaskState) -> String {
    match state {
        TaskState::NotFound => not_found_title(command),
        _ => command.task_title.clone(),
    }
}

fn classify_output(output: ShellOutput) -> TaskOutcome {
    if output.exit_code == Some(NOT_FOUND_EXIT_CODE) {
        return TaskOutcome::NotFound;
    }

    let normalized = normalize_output(&output.output);
    let display = (!normalized.text.trim().is_empty()).then_some(normalized.text);

    match output.exit_code {
        Some(0) => TaskOutcome::Succeeded { output: display },
        _ => TaskOutcome::Failed { output: display },
    }
}

/// A spawn error is either a missing executable or a crash of the shell
/// itself; the latter counts as a failure with no output.
fn spawn_failure(err: &io::Error) -> TaskOutcome {
    if err.kind() == io::ErrorKind::NotFound {
        TaskOutcome::NotFound
    } else {
        warn!(target: "listr::runner", %err, "failed to spawn command");
        TaskOutcome::Failed { output: None }
    }
}
