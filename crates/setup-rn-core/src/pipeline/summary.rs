//! Final report of a completed run

use crate::choice::{FeatureId, FrameworkVariant, LanguageVariant};
use crate::package_manager::PackageManager;
use std::path::PathBuf;

/// A soft failure recorded while the pipeline kept going
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepWarning {
    pub step: String,
    pub message: String,
}

/// Produced only when every fatal step succeeded
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub project_name: String,
    pub project_dir: PathBuf,
    pub package_manager: PackageManager,
    pub framework: FrameworkVariant,
    pub language: LanguageVariant,
    pub features: Vec<FeatureId>,
    pub dependencies_installed: bool,
    /// Names of the steps that ran, in order
    pub steps: Vec<String>,
    pub warnings: Vec<StepWarning>,
}

impl RunSummary {
    /// Commands the user should run next
    pub fn next_steps(&self) -> Vec<String> {
        let mut steps = vec![format!("cd {}", self.project_name)];

        if !self.dependencies_installed {
            steps.push(self.package_manager.install_hint());
        }

        match self.framework {
            FrameworkVariant::Expo => steps.push("npx expo start".to_string()),
            FrameworkVariant::ReactNativeCli => {
                steps.push("npx react-native run-android".to_string());
                steps.push("npx react-native run-ios".to_string());
            }
        }

        steps
    }

    /// Comma-separated feature ids, or None when no feature was selected
    pub fn feature_list(&self) -> Option<String> {
        if self.features.is_empty() {
            None
        } else {
            Some(
                self.features
                    .iter()
                    .map(FeatureId::id)
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        }
    }
}
