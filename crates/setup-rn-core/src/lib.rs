//! Setup RN Core - Shared library for the React Native project setup CLI
//!
//! This library builds a new React Native project from a validated set of
//! choices: it runs the framework's generator, writes the source skeleton,
//! installs feature packages, configures them and finishes with version
//! control and an editor.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Model** - Choices and name validation, the feature table,
//!   package manager resolution
//! - **Layer 2: Orchestration** - `StepExecutor` failure policies and the
//!   `Orchestrator` that drives the ordered pipeline through `Host` capabilities
//! - **Layer 3: System Collaborators** - Subprocess, generator, git, editor and
//!   template implementations of the capabilities
//! - **Layer 4: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use setup_rn_core::{ChoiceDraft, Host, Orchestrator};
//!
//! let choice = draft.validate()?;
//! let mut orchestrator = Orchestrator::new(host, std::env::current_dir()?);
//! let summary = orchestrator.run(&choice).await?;
//! ```

pub mod choice;
pub mod config;
pub mod error;
pub mod executor;
pub mod features;
pub mod host;
pub mod package_manager;
pub mod pipeline;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use choice::{
    ChoiceDraft, ChoiceRecord, Editor, FeatureId, FeatureSet, FrameworkVariant, LanguageVariant,
};
pub use config::{Defaults, DefaultsStore};
pub use error::{ScaffoldError, ToolError, ValidationError};
pub use executor::{FailurePolicy, PipelineStep, RetryPolicy, StepExecutor, StepObserver};
pub use host::Host;
pub use package_manager::PackageManager;
pub use pipeline::{Orchestrator, PipelineState, RunSummary};
pub use runtime::{check_requirements, SystemRequirements};
pub use templates::FileTemplates;

#[cfg(feature = "tui")]
pub use tui::run;
