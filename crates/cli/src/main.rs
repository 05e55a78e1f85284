use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use colored::*;
use listr_core::ci;
use listr_core::execution::TaskRunnerConfig;

mod commands;
mod logging;
mod render;

const EXAMPLES: &str = "\
Commands should be space-separated. Commands with spaces in them must be surrounded by quotes.
Equivalent to 'command1 && command2 && …'.

Examples:
  Run named test commands in order
  $ listr lint::xo 'tests and coverage::c8 ava'

  Run commands that can fail
  $ listr xo ava tsd --all-optional

  Keep a '::' in the command by quoting the whole task
  $ listr \"'yarn run::tests'\"

  Set environment variables
  $ listr ava --env CI,NODE_OPTIONS:'--loader=tsx'
  #=> CI=\"true\"
  #=> NODE_OPTIONS=\"--loader=tsx\"";

/// Listr - Run shell commands as a task list
#[derive(Parser, Debug)]
#[command(name = "listr")]
#[command(about = "Run shell commands in order and report each as a task")]
#[command(version)]
#[command(after_help = EXAMPLES)]
struct Cli {
    /// Tasks to run, as `command`, `title::command` or a quoted command
    #[arg(value_name = "[TITLE::]COMMAND")]
    tasks: Vec<String>,

    /// Disable showing successful task durations
    #[arg(long)]
    hide_timer: bool,

    /// Disable persisting task output once a task completes
    #[arg(long)]
    no_persist: bool,

    /// Continue executing tasks if one fails
    #[arg(long, visible_alias = "opt")]
    all_optional: bool,

    /// Set environment variables for every task, e.g. `FOO,BAR:baz,LIST:"a,b"`
    #[arg(
        short = 'e',
        long = "environment",
        visible_alias = "env",
        value_name = "DIRECTIVE"
    )]
    environment: Vec<String>,
}

impl Cli {
    fn runner_config(&self) -> TaskRunnerConfig {
        TaskRunnerConfig {
            stop_on_first_failure: !self.all_optional,
            show_duration_timer: !self.hide_timer,
            persist_completed_output: !self.no_persist,
            silent_mode: ci::is_ci(),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return exit_for_parse_error(err),
    };

    logging::init();

    if cli.tasks.is_empty() {
        return match Cli::command().print_help() {
            Ok(()) => ExitCode::SUCCESS,
            Err(_) => ExitCode::FAILURE,
        };
    }

    let config = cli.runner_config();
    match commands::run::execute(&cli.tasks, &cli.environment, config).await {
        Ok(result) if result.success => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

/// Help and version requests succeed; every other usage error exits with 1
fn exit_for_parse_error(err: clap::Error) -> ExitCode {
    let _ = err.print();
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("listr").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["xo", "lint::ava --tap"]);
        let config = cli.runner_config();

        assert_eq!(cli.tasks, vec!["xo", "lint::ava --tap"]);
        assert!(config.stop_on_first_failure);
        assert!(config.show_duration_timer);
        assert!(config.persist_completed_output);
        assert!(cli.environment.is_empty());
    }

    #[test]
    fn test_flags() {
        let cli = parse(&["xo", "--opt", "--hide-timer", "--no-persist"]);
        let config = cli.runner_config();

        assert!(!config.stop_on_first_failure);
        assert!(!config.show_duration_timer);
        assert!(!config.persist_completed_output);

        assert!(parse(&["xo", "--all-optional"]).all_optional);
    }

    #[test]
    fn test_repeated_environment_flags() {
        let cli = parse(&["-e", "A", "--env", "B:1", "--environment", "C:'x,y'", "xo"]);
        assert_eq!(cli.environment, vec!["A", "B:1", "C:'x,y'"]);
    }

    #[test]
    fn test_help_is_not_a_failure() {
        let err = Cli::try_parse_from(["listr", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_unknown_flag_is_an_error() {
        let err = Cli::try_parse_from(["listr", "--bogus", "xo"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }
}
