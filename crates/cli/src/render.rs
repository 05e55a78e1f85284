//! Terminal renderers for the task list
//!
//! - [`DefaultRenderer`] - interactive, redraws the running task in place
//! - [`VerboseRenderer`] - one prefixed line per event, used when stdout is
//!   not a terminal
//! - silent - nothing at all, used under CI

use std::io::{self, IsTerminal};
use std::time::Duration;

mod default;
mod verbose;

pub use default::DefaultRenderer;
pub use verbose::VerboseRenderer;

/// Which renderer draws the task list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererKind {
    Silent,
    Verbose,
    Default,
}

impl RendererKind {
    pub fn detect(silent: bool) -> Self {
        Self::select(silent, io::stdout().is_terminal())
    }

    fn select(silent: bool, is_terminal: bool) -> Self {
        match (silent, is_terminal) {
            (true, _) => Self::Silent,
            (false, false) => Self::Verbose,
            (false, true) => Self::Default,
        }
    }
}

/// Format a task duration as `1.2s` or `1m 5s`
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
