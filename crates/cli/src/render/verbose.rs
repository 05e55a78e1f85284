use std::collections::HashMap;

use listr_core::execution::TaskReporter;
use listr_core::results::{TaskReport, TaskState};

/// Line-oriented renderer: `[STARTED]`, `[TITLE]`, `[OUTPUT]`, `[COMPLETED]`
/// and `[FAILED]` events on stdout
#[derive(Debug, Default)]
pub struct VerboseRenderer {
    titles: HashMap<usize, String>,
}

impl VerboseRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print a title change unless it repeats the last one shown
    fn log_title(&mut self, task: &TaskReport) {
        if self.titles.get(&task.index) != Some(&task.title) {
            println!("[TITLE] {}", task.title);
            self.titles.insert(task.index, task.title.clone());
        }
    }
}

impl TaskReporter for VerboseRenderer {
    fn task_started(&mut self, task: &TaskReport) {
        println!("[STARTED] {}", task.title);
        self.titles.insert(task.index, task.title.clone());
    }

    fn title_changed(&mut self, task: &TaskReport) {
        self.log_title(task);
    }

    fn output_line(&mut self, _task: &TaskReport, line: &str) {
        if !line.trim().is_empty() {
            println!("[OUTPUT] {}", line);
        }
    }

    fn task_finished(&mut self, task: &TaskReport) {
        self.log_title(task);
        match task.state {
            TaskState::Succeeded => println!("[COMPLETED] {}", task.title),
            _ => println!("[FAILED] {}", task.title),
        }
    }
}
