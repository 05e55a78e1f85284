//! Continuous integration detection
//!
//! Under CI the task list is not rendered and commands inherit the terminal's
//! stdio directly.

use std::env;

/// Variables set by common CI providers
pub const CI_VARIABLES: &[&str] = &[
    "CI",
    "CONTINUOUS_INTEGRATION",
    "BUILD_ID",
    "BUILD_NUMBER",
    "RUN_ID",
    "CI_APP_ID",
    "CI_BUILD_ID",
    "CI_BUILD_NUMBER",
    "CI_NAME",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "TF_BUILD",
    "BUILDKITE",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
];

/// Detect CI from the current process environment
pub fn is_ci() -> bool {
    is_ci_with(|name| env::var(name).ok())
}

/// Detect CI using a custom variable lookup.
///
/// `CI=false` always wins so CI can be switched off explicitly.
pub fn is_ci_with<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    if lookup("CI").as_deref() == Some("false") {
        return false;
    }

    CI_VARIABLES.iter().any(|name| lookup(name).is_some())
}
