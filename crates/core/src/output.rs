//! Captured output normalization
//!
//! Multi-line output is displayed as-is because its layout carries meaning.
//! Output with a single non-empty line is trimmed so it doesn't drag blank
//! lines into the task list.

/// Output prepared for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedOutput {
    /// Whether surrounding whitespace was removed
    pub should_collapse: bool,
    pub text: String,
}

/// Trim `output` if it holds at most one line once trimmed
pub fn normalize_output(output: &str) -> NormalizedOutput {
    let trimmed = output.trim();
    let should_collapse = trimmed != output && !trimmed.contains('\n');

    NormalizedOutput {
        should_collapse,
        text: if should_collapse { trimmed } else { output }.to_string(),
    }
}
