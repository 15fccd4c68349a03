//! Git repository setup

use super::process::{args, ProcessRunner};
use crate::error::ToolError;
use crate::host::{CommandRunner, VersionControl};
use async_trait::async_trait;
use std::path::Path;

pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit - Setup React Native project";

/// Initializes a repository and records the generated files as the first commit
#[derive(Debug, Clone, Copy, Default)]
pub struct GitVcs {
    runner: ProcessRunner,
}

impl GitVcs {
    pub fn new(runner: ProcessRunner) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl VersionControl for GitVcs {
    async fn init(&self, project_dir: &Path) -> Result<(), ToolError> {
        self.runner.run("git", &args(["init"]), project_dir).await?;
        self.runner.run("git", &args(["add", "."]), project_dir).await?;
        self.runner
            .run(
                "git",
                &args(["commit", "-m", INITIAL_COMMIT_MESSAGE]),
                project_dir,
            )
            .await
    }
}
