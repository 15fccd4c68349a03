//! Editor launching

use super::process::ProcessRunner;
use crate::choice::Editor;
use crate::error::ToolError;
use crate::host::{CommandRunner, EditorLauncher};
use async_trait::async_trait;
use std::path::Path;

/// Command-line launchers to try for an editor, in order
pub fn launcher_commands(editor: Editor) -> &'static [&'static str] {
    match editor {
        Editor::None => &[],
        Editor::VsCode => &["code", "code-insiders"],
        Editor::Cursor => &["cursor"],
    }
}

/// Opens the project through the editor's shell command
#[derive(Debug, Clone, Copy, Default)]
pub struct EditorCli {
    runner: ProcessRunner,
}

impl EditorCli {
    pub fn new(runner: ProcessRunner) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl EditorLauncher for EditorCli {
    async fn launch(&self, project_dir: &Path, editor: Editor) -> Result<(), ToolError> {
        let target = vec![project_dir.display().to_string()];
        let mut last_error = None;

        for command in launcher_commands(editor) {
            match self.runner.run(command, &target, project_dir).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::debug!(command, error = %e, "editor launcher failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ToolError::Unavailable(format!("Unsupported editor: {}", editor))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vscode_falls_back_to_insiders() {
        assert_eq!(launcher_commands(Editor::VsCode), &["code", "code-insiders"]);
        assert_eq!(launcher_commands(Editor::Cursor), &["cursor"]);
    }

    #[tokio::test]
    async fn test_no_editor_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let err = EditorCli::default()
            .launch(dir.path(), Editor::None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Unsupported editor: None");
    }
}
