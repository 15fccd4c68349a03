//! Framework project generators

use super::process::{args, ProcessRunner};
use crate::choice::{FrameworkVariant, LanguageVariant};
use crate::error::ToolError;
use crate::host::{CommandRunner, ProjectGenerator};
use async_trait::async_trait;
use std::path::Path;

/// Creates projects with `create-expo-app` or `react-native init` via `npx`
#[derive(Debug, Clone, Copy, Default)]
pub struct NpxGenerator {
    runner: ProcessRunner,
}

impl NpxGenerator {
    pub fn new(runner: ProcessRunner) -> Self {
        Self { runner }
    }
}

/// `npx` arguments that generate `name` for the given variants
pub fn generator_args(
    name: &str,
    language: LanguageVariant,
    framework: FrameworkVariant,
) -> Vec<String> {
    match framework {
        FrameworkVariant::Expo => {
            let template = if language.is_typed() {
                "blank-typescript"
            } else {
                "blank"
            };
            args(["create-expo-app", name, "--template", template])
        }
        FrameworkVariant::ReactNativeCli => {
            let mut cmd = args(["react-native", "init", name]);
            if language.is_typed() {
                cmd.extend(args(["--template", "react-native-template-typescript"]));
            }
            cmd
        }
    }
}

#[async_trait]
impl ProjectGenerator for NpxGenerator {
    async fn initialize(
        &self,
        parent_dir: &Path,
        name: &str,
        language: LanguageVariant,
        framework: FrameworkVariant,
    ) -> Result<(), ToolError> {
        self.runner
            .run("npx", &generator_args(name, language, framework), parent_dir)
            .await
    }
}
