//! Environment directive parsing
//!
//! A directive is the value of one `-e/--env` flag: a comma separated list of
//! `KEY`, `KEY:VALUE` or `KEY:"quoted, value"` segments. Directives are folded
//! into a single [`EnvironmentTable`] in the order given, later keys winning.
//!
//! ```
//! use listr_core::configs::environment::parse_environment;
//!
//! let env = parse_environment(["FOO", "BAR,LIST:\"a,b,c\",FOO,BAR:'baz'", "FIZZ:buzz bazz"]);
//!
//! assert_eq!(env.get("FOO"), Some("true"));
//! assert_eq!(env.get("BAR"), Some("baz"));
//! assert_eq!(env.get("LIST"), Some("a,b,c"));
//! assert_eq!(env.get("FIZZ"), Some("buzz bazz"));
//! ```

use tracing::debug;

use crate::types::{ListrError, ListrResult};

/// Value assigned to keys given without one
pub const DEFAULT_VALUE: &str = "true";

/// One `KEY[:VALUE]` pair extracted from a directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentDirective {
    pub key: String,
    pub value: String,
}

/// Ordered key/value table handed to every spawned task.
///
/// Keys keep the position of their first assignment; reassigning a key only
/// replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentTable {
    vars: Vec<(String, String)>,
}

impl EnvironmentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.vars.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.vars.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.vars.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Parse every directive into one table. Malformed segments are skipped.
pub fn parse_environment<I, S>(directives: I) -> EnvironmentTable
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut table = EnvironmentTable::new();

    for directive in directives {
        for segment in split_segments(directive.as_ref()) {
            match parse_segment(segment) {
                Ok(EnvironmentDirective { key, value }) => {
                    debug!(target: "listr::environment", %key, %value, "set");
                    table.set(key, value);
                }
                Err(err) => debug!(target: "listr::environment", %err, "skipped"),
            }
        }
    }

    table
}

/// Split a directive on commas that are not inside a quoted value.
///
/// A quote only opens a quoted span when it starts the value, i.e. directly
/// follows the segment's first colon. Empty segments are dropped.
pub fn split_segments(directive: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut value_start = None;
    let mut quote = None;

    for (i, c) in directive.char_indices() {
        if let Some(open) = quote {
            if c == open {
                quote = None;
            }
            continue;
        }

        match c {
            ',' => {
                segments.push(&directive[start..i]);
                start = i + 1;
                value_start = None;
            }
            ':' if value_start.is_none() => value_start = Some(i + 1),
            '"' | '\'' if value_start == Some(i) => quote = Some(c),
            _ => {}
        }
    }
    segments.push(&directive[start..]);

    segments.retain(|segment| !segment.is_empty());
    segments
}

/// Classify one segment as `KEY` or `KEY:VALUE`
pub fn parse_segment(segment: &str) -> ListrResult<EnvironmentDirective> {
    let (key, value) = match segment.split_once(':') {
        Some((key, value)) => (key, strip_quotes(value)),
        None => (segment, DEFAULT_VALUE),
    };

    if key.is_empty() || key.contains('=') {
        return Err(ListrError::MalformedDirective {
            segment: segment.to_string(),
        });
    }

    Ok(EnvironmentDirective {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
