use anyhow::{Context, Result};
use listr_core::execution::{NullReporter, SystemShell, TaskReporter, TaskRunnerConfig};
use listr_core::results::RunResult;
use listr_core::tasks::run_task_list;
use tracing::debug;

use crate::render::{DefaultRenderer, RendererKind, VerboseRenderer};

pub async fn execute(
    tasks: &[String],
    environment: &[String],
    config: TaskRunnerConfig,
) -> Result<RunResult> {
    let kind = RendererKind::detect(config.silent_mode);
    debug!(target: "listr::cli", renderer = ?kind, ?config, "starting");

    match kind {
        RendererKind::Silent => run_with(tasks, environment, config, &mut NullReporter).await,
        RendererKind::Verbose => {
            run_with(tasks, environment, config, &mut VerboseRenderer::new()).await
        }
        RendererKind::Default => {
            let mut renderer = DefaultRenderer::new(&config);
            run_with(tasks, environment, config, &mut renderer).await
        }
    }
}

async fn run_with<R: TaskReporter>(
    tasks: &[String],
    environment: &[String],
    config: TaskRunnerConfig,
    reporter: &mut R,
) -> Result<RunResult> {
    run_task_list(tasks, environment, config, &SystemShell, reporter)
        .await
        .context("Failed to run task list")
}
