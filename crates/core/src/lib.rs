//! Listr Core Library
//!
//! Runs an ordered list of shell commands as a task list and reduces it to a
//! single pass/fail verdict.
//!
//! ## Architecture
//!
//! - [`configs`] - Parsing of task strings (`title::command`) and `--env`
//!   directives
//! - [`execution`] - The sequential task runner, the shell boundary and the
//!   rendering boundary
//! - [`output`] - Normalization of captured output for display
//! - [`results`] - Task states and the aggregate run result
//! - [`ci`] - Continuous integration detection
//! - [`tasks`] - High-level entry point tying the pieces together
//! - [`types`] - Common error types and type aliases
//!
//! ## Usage
//!
//! ```rust,no_run
//! use listr_core::execution::{NullReporter, SystemShell, TaskRunnerConfig};
//! use listr_core::tasks::run_task_list;
//!
//! # async fn example() -> listr_core::types::ListrResult<()> {
//! let input = vec!["lint::cargo clippy".to_string(), "cargo test".to_string()];
//! let environment = vec!["RUST_BACKTRACE:1".to_string()];
//!
//! let result = run_task_list(
//!     &input,
//!     &environment,
//!     TaskRunnerConfig::default(),
//!     &SystemShell,
//!     &mut NullReporter,
//! )
//! .await?;
//!
//! std::process::exit(result.exit_code());
//! # }
//! ```

pub mod ci;
pub mod configs;
pub mod execution;
pub mod output;
pub mod results;
pub mod tasks;
pub mod types;

// Re-export the main types for easier usage
pub use types::{ListrError, ListrResult};
