//! Capabilities the pipeline drives
//!
//! Each trait wraps one external collaborator. The pipeline only sees these
//! traits, so it can be exercised with recording fakes; the real
//! implementations live in [`crate::runtime`] and [`crate::templates`].
//! Every operation takes the directory it acts on explicitly, nothing
//! changes the process working directory.

use crate::choice::{ChoiceRecord, Editor, FrameworkVariant, LanguageVariant};
use crate::error::ToolError;
use crate::package_manager::ToolProbe;
use async_trait::async_trait;
use std::path::Path;

/// Creates the base project with the framework's own generator
#[async_trait]
pub trait ProjectGenerator: Send + Sync {
    /// Generate `name` inside `parent_dir`
    async fn initialize(
        &self,
        parent_dir: &Path,
        name: &str,
        language: LanguageVariant,
        framework: FrameworkVariant,
    ) -> Result<(), ToolError>;
}

/// Emits project files
#[async_trait]
pub trait TemplateWriter: Send + Sync {
    /// Write the source tree skeleton
    async fn write_structure(&self, project_dir: &Path, choice: &ChoiceRecord)
        -> Result<(), ToolError>;

    /// Write or rewrite configuration files for the selected features
    async fn configure_features(
        &self,
        project_dir: &Path,
        choice: &ChoiceRecord,
    ) -> Result<(), ToolError>;
}

/// Runs a subprocess to completion
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<(), ToolError>;
}

/// Sets up version control for a new project
#[async_trait]
pub trait VersionControl: Send + Sync {
    async fn init(&self, project_dir: &Path) -> Result<(), ToolError>;
}

/// Opens a project in an editor
#[async_trait]
pub trait EditorLauncher: Send + Sync {
    async fn launch(&self, project_dir: &Path, editor: Editor) -> Result<(), ToolError>;
}

/// The set of collaborators a pipeline run uses
#[derive(Clone, Copy)]
pub struct Host<'a> {
    pub generator: &'a dyn ProjectGenerator,
    pub templates: &'a dyn TemplateWriter,
    pub commands: &'a dyn CommandRunner,
    pub vcs: &'a dyn VersionControl,
    pub editor: &'a dyn EditorLauncher,
    pub probe: &'a dyn ToolProbe,
}
