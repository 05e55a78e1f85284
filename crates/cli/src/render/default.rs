use std::io::{self, Stdout, Write};

use colored::*;
use listr_core::execution::{TaskReporter, TaskRunnerConfig};
use listr_core::results::{RunResult, TaskReport, TaskState};

use super::format_duration;

/// Longest output line shown next to a running task
const MAX_LIVE_LINE: usize = 80;

/// Clears the current terminal line
const CLEAR_LINE: &str = "\r\x1b[2K";

/// Interactive renderer that redraws the running task in place and prints a
/// final line per task
pub struct DefaultRenderer<W = Stdout> {
    show_duration_timer: bool,
    persist_completed_output: bool,
    out: W,
}

impl DefaultRenderer {
    pub fn new(config: &TaskRunnerConfig) -> Self {
        Self::with_writer(config, io::stdout())
    }
}

impl<W: Write> DefaultRenderer<W> {
    pub fn with_writer(config: &TaskRunnerConfig, out: W) -> Self {
        Self {
            show_duration_timer: config.show_duration_timer,
            persist_completed_output: config.persist_completed_output,
            out,
        }
    }

    // Terminal write errors are not worth failing a task run over.
    fn redraw(&mut self, text: &str) {
        let _ = write!(self.out, "{}{}", CLEAR_LINE, text);
        let _ = self.out.flush();
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}", text);
    }

    fn running_line(task: &TaskReport) -> String {
        format!("{} {}", "❯".yellow().bold(), task.title)
    }

    fn finished_line(&self, task: &TaskReport) -> String {
        match task.state {
            TaskState::Succeeded => {
                let timer = match task.duration {
                    Some(duration) if self.show_duration_timer => {
                        format!(" [{}]", format_duration(duration)).dimmed().to_string()
                    }
                    _ => String::new(),
                };
                format!("{} {}{}", "✔".green().bold(), task.title, timer)
            }
            _ => format!("{} {}", "✖".red().bold(), task.title.red()),
        }
    }

    fn should_show_output(&self, task: &TaskReport) -> bool {
        task.state.is_failure() || self.persist_completed_output
    }
}

impl<W: Write> TaskReporter for DefaultRenderer<W> {
    fn task_started(&mut self, task: &TaskReport) {
        self.redraw(&Self::running_line(task));
    }

    fn title_changed(&mut self, task: &TaskReport) {
        self.redraw(&Self::running_line(task));
    }

    fn output_line(&mut self, task: &TaskReport, line: &str) {
        let line: String = line.chars().take(MAX_LIVE_LINE).collect();
        let text = format!(
            "{} {}",
            Self::running_line(task),
            format!("› {}", line).dimmed()
        );
        self.redraw(&text);
    }

    fn task_finished(&mut self, task: &TaskReport) {
        let finished = self.finished_line(task);
        self.redraw(&finished);
        self.line("");

        if let Some(output) = task.output.as_deref().filter(|_| self.should_show_output(task)) {
            for line in output.trim_end_matches('\n').lines() {
                self.line(&format!("  {} {}", "›".bright_black(), line));
            }
        }
    }

    fn run_finished(&mut self, result: &RunResult) {
        let skipped = result
            .tasks
            .iter()
            .filter(|task| task.state == TaskState::Pending)
            .count();
        if skipped > 0 {
            let text = format!("{} task(s) not run after failure", skipped)
                .bright_black()
                .to_string();
            self.line(&text);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use listr_core::configs::tasks::parse_command;

    use super::*;

    fn finished(state: TaskState, output: Option<&str>) -> TaskReport {
        let mut task = TaskReport::pending(0, parse_command("echo hello"));
        task.state = state;
        task.output = output.map(String::from);
        task.duration = Some(Duration::from_millis(1240));
        task
    }

    fn render(config: &TaskRunnerConfig, task: &TaskReport) -> String {
        let mut renderer = DefaultRenderer::with_writer(config, Vec::new());
        renderer.task_finished(task);
        String::from_utf8(renderer.out).unwrap()
    }

    #[test]
    fn test_timer_shown_for_succeeded_tasks() {
        let rendered = render(
            &TaskRunnerConfig::default(),
            &finished(TaskState::Succeeded, None),
        );
        assert!(rendered.contains("[1.2s]"));
    }

    #[test]
    fn test_timer_hidden_when_disabled() {
        let config = TaskRunnerConfig {
            show_duration_timer: false,
            ..TaskRunnerConfig::default()
        };
        let rendered = render(&config, &finished(TaskState::Succeeded, None));
        assert!(rendered.contains("echo"));
        assert!(!rendered.contains("[1.2s]"));
    }

    #[test]
    fn test_timer_never_shown_for_failures() {
        for state in [TaskState::Failed, TaskState::NotFound] {
            let rendered = render(&TaskRunnerConfig::default(), &finished(state, None));
            assert!(!rendered.contains("[1.2s]"));
        }
    }

    #[test]
    fn test_completed_output_persisted_by_default() {
        let rendered = render(
            &TaskRunnerConfig::default(),
            &finished(TaskState::Succeeded, Some("hello")),
        );
        assert!(rendered.contains("hello\n"));
    }

    #[test]
    fn test_completed_output_dropped_without_persist() {
        let config = TaskRunnerConfig {
            persist_completed_output: false,
            ..TaskRunnerConfig::default()
        };

        let succeeded = render(&config, &finished(TaskState::Succeeded, Some("greeting")));
        assert!(!succeeded.contains("greeting"));

        let failed = render(&config, &finished(TaskState::Failed, Some("boom")));
        assert!(failed.contains("boom"));
    }

    #[test]
    fn test_reports_skipped_tasks() {
        let mut renderer = DefaultRenderer::with_writer(&TaskRunnerConfig::default(), Vec::new());
        let result = RunResult::from_tasks(vec![
            finished(TaskState::Failed, None),
            TaskReport::pending(1, parse_command("echo later")),
        ]);
        renderer.run_finished(&result);

        let rendered = String::from_utf8(renderer.out).unwrap();
        assert!(rendered.contains("1 task(s) not run after failure"));
    }
}
