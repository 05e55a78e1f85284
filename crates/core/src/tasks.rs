//! Task list entry point
//!
//! Ties the parsers to the runner: raw task strings and environment
//! directives in, a [`RunResult`] out.

use tracing::debug;

use crate::configs::environment::parse_environment;
use crate::configs::tasks::{parse_commands, validate_commands};
use crate::execution::command::ShellExecutor;
use crate::execution::reporter::TaskReporter;
use crate::execution::runner::{TaskRunner, TaskRunnerConfig};
use crate::results::RunResult;
use crate::types::ListrResult;

/// Parse `input` and `environment`, then run the tasks in order.
///
/// The environment table is built once, before the first task starts, and is
/// handed unchanged to every command.
pub async fn run_task_list<E, R>(
    input: &[String],
    environment: &[String],
    config: TaskRunnerConfig,
    executor: &E,
    reporter: &mut R,
) -> ListrResult<RunResult>
where
    E: ShellExecutor,
    R: TaskReporter,
{
    let commands = parse_commands(input);
    validate_commands(input, &commands)?;

    let env = parse_environment(environment);
    debug!(target: "listr::runner", tasks = commands.len(), vars = env.len(), "running task list");

    let runner = TaskRunner::new(executor, &env, config);
    Ok(runner.run(commands, reporter).await)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::execution::command::SystemShell;
    use crate::execution::reporter::NullReporter;
    use crate::results::TaskState;
    use crate::types::ListrError;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[tokio::test]
    async fn test_runs_named_tasks_with_environment() {
        let result = run_task_list(
            &strings(&["greet::echo \"$GREETING\"", "check::test \"$FLAG\" = true"]),
            &strings(&["GREETING:'hello, world',FLAG"]),
            TaskRunnerConfig::default(),
            &SystemShell,
            &mut NullReporter,
        )
        .await
        .unwrap();

        assert!(result.success);
        assert_eq!(result.tasks[0].title, "greet");
        assert_eq!(result.tasks[0].output.as_deref(), Some("hello, world"));
        assert_eq!(result.tasks[1].state, TaskState::Succeeded);
    }

    #[tokio::test]
    async fn test_rejects_empty_commands() {
        let err = run_task_list(
            &strings(&["echo hi", "''"]),
            &[],
            TaskRunnerConfig::default(),
            &SystemShell,
            &mut NullReporter,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ListrError::EmptyCommand { raw } if raw == "''"));
    }
}
