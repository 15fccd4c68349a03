//! Subprocess execution

use crate::error::ToolError;
use crate::host::CommandRunner;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Keep error output short enough for a terminal summary
const STDERR_TAIL_LINES: usize = 20;

/// Runs commands with captured output in an explicit working directory
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }

    /// Run `program` and return its stdout
    pub async fn output(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
    ) -> Result<String, ToolError> {
        let command_line = display_command(program, args);
        tracing::debug!(command = %command_line, cwd = %cwd.display(), "running command");

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| ToolError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if output.status.success() {
            tracing::debug!(command = %command_line, "command succeeded");
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = if stderr.trim().is_empty() {
            String::from_utf8_lossy(&output.stdout).into_owned()
        } else {
            stderr.into_owned()
        };

        Err(ToolError::Exit {
            command: command_line,
            code: output.status.code().unwrap_or(-1),
            stderr: tail(&stderr, STDERR_TAIL_LINES),
        })
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<(), ToolError> {
        self.output(program, args, cwd).await.map(|_| ())
    }
}

/// Build string arguments from literals
pub fn args<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

fn tail(text: &str, lines: usize) -> String {
    let all: Vec<&str> = text.trim_end().lines().collect();
    let start = all.len().saturating_sub(lines);
    all[start..].join("\n")
}
