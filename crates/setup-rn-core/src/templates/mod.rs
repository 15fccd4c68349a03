//! Project file emission
//!
//! This module provides:
//! - `{{key}}` placeholder rendering for the bundled templates
//! - The source tree skeleton written after the generator runs
//! - Per-feature configuration files

pub mod configure;
pub mod structure;

use crate::choice::ChoiceRecord;
use crate::error::ToolError;
use crate::host::TemplateWriter;
use async_trait::async_trait;
use std::path::Path;
use tokio::fs;

/// Replace every `{{key}}` placeholder with its value
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |content, (key, value)| {
        content.replace(&format!("{{{{{}}}}}", key), value)
    })
}

/// Write `content` to `root/relative`, creating parent directories
pub(crate) async fn write_file(root: &Path, relative: &str, content: &str) -> Result<(), ToolError> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| ToolError::io(format!("Failed to create directory {}", parent.display()), e))?;
    }
    fs::write(&path, content)
        .await
        .map_err(|e| ToolError::io(format!("Failed to write {}", path.display()), e))?;
    tracing::debug!(file = relative, "wrote file");
    Ok(())
}

/// Writes the bundled templates into the project directory
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTemplates;

#[async_trait]
impl TemplateWriter for FileTemplates {
    async fn write_structure(
        &self,
        project_dir: &Path,
        choice: &ChoiceRecord,
    ) -> Result<(), ToolError> {
        structure::write(project_dir, choice).await
    }

    async fn configure_features(
        &self,
        project_dir: &Path,
        choice: &ChoiceRecord,
    ) -> Result<(), ToolError> {
        configure::write(project_dir, choice).await
    }
}
