//! Error types for the scaffolding pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Failure of an external tool or file operation driven by a step
#[derive(Debug, Error)]
pub enum ToolError {
    /// The program could not be started at all (usually not on PATH)
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully
    #[error("`{command}` exited with code {code}: {stderr}")]
    Exit {
        command: String,
        code: i32,
        stderr: String,
    },

    /// A filesystem operation failed
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// None of the candidate commands for a capability were usable
    #[error("{0}")]
    Unavailable(String),
}

impl ToolError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// The tool's own diagnostic, without the paths we added as context
    pub fn diagnostic(&self) -> String {
        match self {
            ToolError::Spawn { .. } | ToolError::Unavailable(_) => self.to_string(),
            ToolError::Exit { stderr, .. } => stderr.clone(),
            ToolError::Io { source, .. } => source.to_string(),
        }
    }
}

/// Project name constraint violations, all of them at once
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid project name:\n{}", .errors.join("\n"))]
pub struct ValidationError {
    pub errors: Vec<String>,
}

impl ValidationError {
    /// The first violated rule (for single-line prompt feedback)
    pub fn first(&self) -> &str {
        self.errors.first().map(String::as_str).unwrap_or("invalid")
    }
}

/// Top-level error taxonomy of a scaffolding run
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Directory {} already exists and is not empty", .path.display())]
    FilesystemConflict { path: PathBuf },

    #[error("Step '{step}' failed after {attempts} attempt(s): {source}")]
    StepFailed {
        step: String,
        attempts: u32,
        #[source]
        source: ToolError,
    },
}

impl ScaffoldError {
    /// Name of the pipeline step that aborted the run, if any
    pub fn failed_step(&self) -> Option<&str> {
        match self {
            ScaffoldError::StepFailed { step, .. } => Some(step),
            _ => None,
        }
    }

    /// Remediation hints for a failed step
    ///
    /// Only the tool diagnostic is inspected. Validation errors and conflicts
    /// already say what to change.
    pub fn remediation_hints(&self) -> Vec<&'static str> {
        match self {
            ScaffoldError::StepFailed { source, .. } => remediation_hints(&source.diagnostic()),
            _ => Vec::new(),
        }
    }
}

/// Keyword categories mapped to a remediation hint
const HINT_CATEGORIES: &[(&[&str], &str)] = &[
    (
        &["command not found", "enoent", "not found", "failed to run"],
        "Make sure the required command is installed and available in your PATH",
    ),
    (
        &["network", "timeout", "timed out", "fetch", "etimedout", "econnreset"],
        "Check your internet connection and try again",
    ),
    (
        &["permission", "eacces", "eperm"],
        "You might need elevated privileges, or check file permissions",
    ),
    (&["no space left", "enospc"], "Check available disk space"),
    (&["git"], "Make sure Git is installed and configured properly"),
];

/// Tips printed after every failure
pub const GENERIC_TIPS: &[&str] = &[
    "Ensure you have the required dependencies installed",
    "Check your internet connection",
    "Try running with --verbose for more details",
];

/// Pick remediation hints by matching the error message against keyword categories
///
/// Single-word keywords must match a whole word, so `git` does not fire on
/// `github` and `enospc` does not fire inside a path.
pub fn remediation_hints(message: &str) -> Vec<&'static str> {
    let message = message.to_lowercase();
    let words: Vec<&str> = message
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let matches = |keyword: &str| {
        if keyword.contains(' ') {
            message.contains(keyword)
        } else {
            words.iter().any(|w| *w == keyword)
        }
    };

    HINT_CATEGORIES
        .iter()
        .filter(|(keywords, _)| keywords.iter().any(|k| matches(*k)))
        .map(|(_, hint)| *hint)
        .collect()
}
