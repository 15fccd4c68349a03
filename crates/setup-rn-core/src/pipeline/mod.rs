//! Pipeline orchestration
//!
//! Builds the fixed, ordered step list for a [`ChoiceRecord`] and drives it
//! through the [`StepExecutor`]. Steps run strictly one after another: each
//! relies on the files written by the ones before it.

pub mod summary;

use crate::choice::{ChoiceRecord, Editor};
use crate::error::ScaffoldError;
use crate::executor::{
    FailurePolicy, NoopObserver, PipelineStep, StepExecutor, StepObserver, StepOutcome,
};
use crate::features::{self, OperationKind};
use crate::host::Host;
use crate::package_manager::{self, PackageManager};
use std::fmt;
use std::path::{Path, PathBuf};

pub use summary::{RunSummary, StepWarning};

pub const STEP_INITIALIZE: &str = "initialize project skeleton";
pub const STEP_STRUCTURE: &str = "write project structure";
pub const STEP_INSTALL_DEPS: &str = "install feature dependencies";
pub const STEP_INSTALL_DEV_DEPS: &str = "install feature dev dependencies";
pub const STEP_CONFIGURE: &str = "configure features";
pub const STEP_VERSION_CONTROL: &str = "initialize version control";
pub const STEP_DEPENDENCY_INSTALL: &str = "install dependencies";
pub const STEP_EDITOR: &str = "open editor";

/// Where a run currently is; only ever moves forward
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Init,
    Structure,
    Install,
    Configure,
    VersionControl,
    DependencyInstall,
    EditorLaunch,
    Done,
    Aborted { step: String },
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Aborted { step } => write!(f, "Aborted ({})", step),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Runs the scaffolding pipeline for one project at a time
pub struct Orchestrator<'a> {
    host: Host<'a>,
    executor: StepExecutor,
    observer: &'a dyn StepObserver,
    base_dir: PathBuf,
    state: PipelineState,
}

impl<'a> Orchestrator<'a> {
    /// Projects are created as `base_dir/<project name>`
    pub fn new(host: Host<'a>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            host,
            executor: StepExecutor::default(),
            observer: &NoopObserver,
            base_dir: base_dir.into(),
            state: PipelineState::Init,
        }
    }

    pub fn with_executor(mut self, executor: StepExecutor) -> Self {
        self.executor = executor;
        self
    }

    pub fn with_observer(mut self, observer: &'a dyn StepObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// Run every step for `choice`
    ///
    /// Fails before any step runs if the target directory is not empty. A
    /// fatal step failure stops the run and leaves the state at
    /// [`PipelineState::Aborted`] with the step's name.
    pub async fn run(&mut self, choice: &ChoiceRecord) -> Result<RunSummary, ScaffoldError> {
        self.state = PipelineState::Init;

        let base_dir = self.base_dir.clone();
        let project_dir = base_dir.join(choice.project_name());
        ensure_target_available(&project_dir)?;

        let manager = package_manager::resolve(&base_dir, self.host.probe);
        let executor = self.executor;
        tracing::info!(
            package_manager = %manager,
            project = %project_dir.display(),
            retry_attempts = executor.retry_policy().attempts,
            "starting pipeline"
        );

        let observer = self.observer;
        let plan = build_plan(self.host, choice, manager, &base_dir, &project_dir);

        let mut steps = Vec::with_capacity(plan.len());
        let mut warnings = Vec::new();

        for (state, step) in &plan {
            self.state = state.clone();
            tracing::info!(step = step.name(), state = %state, policy = ?step.policy(), "running step");
            observer.step_started(step.name());

            match executor.execute(step, observer).await {
                Ok(outcome) => {
                    if let StepOutcome::SoftFailed { error } = &outcome {
                        warnings.push(StepWarning {
                            step: step.name().to_string(),
                            message: error.to_string(),
                        });
                    }
                    observer.step_finished(step.name(), &outcome);
                    steps.push(step.name().to_string());
                }
                Err(err) => {
                    tracing::error!(step = step.name(), error = %err, "pipeline aborted");
                    observer.step_failed(step.name(), &err);
                    self.state = PipelineState::Aborted {
                        step: step.name().to_string(),
                    };
                    return Err(err);
                }
            }
        }

        drop(plan);
        self.state = PipelineState::Done;
        tracing::info!(steps = steps.len(), warnings = warnings.len(), "pipeline finished");

        Ok(RunSummary {
            project_name: choice.project_name().to_string(),
            project_dir,
            package_manager: manager,
            framework: choice.framework(),
            language: choice.language(),
            features: choice.features().as_slice().to_vec(),
            dependencies_installed: choice.install_dependencies(),
            steps,
            warnings,
        })
    }
}

/// Reject a target that exists and is not an empty directory
pub fn ensure_target_available(path: &Path) -> Result<(), ScaffoldError> {
    if !path.exists() {
        return Ok(());
    }

    let empty_dir = path.is_dir()
        && std::fs::read_dir(path)
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(false);

    if empty_dir {
        Ok(())
    } else {
        Err(ScaffoldError::FilesystemConflict {
            path: path.to_path_buf(),
        })
    }
}

/// The ordered steps for `choice`, each tagged with the state it runs in
fn build_plan<'p>(
    host: Host<'p>,
    choice: &'p ChoiceRecord,
    manager: PackageManager,
    base_dir: &'p Path,
    project_dir: &'p Path,
) -> Vec<(PipelineState, PipelineStep<'p>)> {
    let mut plan = Vec::new();

    let generator = host.generator;
    let (name, language, framework) = (choice.project_name(), choice.language(), choice.framework());
    plan.push((
        PipelineState::Init,
        PipelineStep::new(STEP_INITIALIZE, FailurePolicy::RetryThenFatal, move || {
            generator.initialize(base_dir, name, language, framework)
        }),
    ));

    let templates = host.templates;
    plan.push((
        PipelineState::Structure,
        PipelineStep::new(STEP_STRUCTURE, FailurePolicy::Fatal, move || {
            templates.write_structure(project_dir, choice)
        }),
    ));

    if !choice.features().is_empty() {
        for operation in features::resolve(choice.features(), framework) {
            let (step_name, program, args, policy) = match operation.kind {
                OperationKind::InstallDeps => (
                    STEP_INSTALL_DEPS.to_string(),
                    manager.program(),
                    manager.add_command(&operation.args, false),
                    FailurePolicy::RetryThenFatal,
                ),
                OperationKind::InstallDevDeps => (
                    STEP_INSTALL_DEV_DEPS.to_string(),
                    manager.program(),
                    manager.add_command(&operation.args, true),
                    FailurePolicy::RetryThenFatal,
                ),
                OperationKind::PostInstallHook => (
                    match operation.feature {
                        Some(feature) => format!("post-install hook for {}", feature),
                        None => "post-install hook".to_string(),
                    },
                    "npx",
                    operation.args,
                    if operation.optional {
                        FailurePolicy::SoftFail
                    } else {
                        FailurePolicy::Fatal
                    },
                ),
            };
            plan.push((
                PipelineState::Install,
                command_step(host, step_name, policy, program, args, project_dir),
            ));
        }

        plan.push((
            PipelineState::Configure,
            PipelineStep::new(STEP_CONFIGURE, FailurePolicy::Fatal, move || {
                templates.configure_features(project_dir, choice)
            }),
        ));
    }

    if choice.init_git() {
        let vcs = host.vcs;
        plan.push((
            PipelineState::VersionControl,
            PipelineStep::new(STEP_VERSION_CONTROL, FailurePolicy::SoftFail, move || {
                vcs.init(project_dir)
            }),
        ));
    }

    if choice.install_dependencies() {
        plan.push((
            PipelineState::DependencyInstall,
            command_step(
                host,
                STEP_DEPENDENCY_INSTALL.to_string(),
                FailurePolicy::RetryThenFatal,
                manager.program(),
                vec!["install".to_string()],
                project_dir,
            ),
        ));
    }

    if choice.editor() != Editor::None {
        let launcher = host.editor;
        let editor = choice.editor();
        plan.push((
            PipelineState::EditorLaunch,
            PipelineStep::new(STEP_EDITOR, FailurePolicy::SoftFail, move || {
                launcher.launch(project_dir, editor)
            }),
        ));
    }

    plan
}

/// A step that runs one subprocess inside the project directory
fn command_step<'p>(
    host: Host<'p>,
    name: String,
    policy: FailurePolicy,
    program: &'static str,
    args: Vec<String>,
    cwd: &'p Path,
) -> PipelineStep<'p> {
    let commands = host.commands;
    PipelineStep::new(name, policy, move || {
        let args = args.clone();
        Box::pin(async move { commands.run(program, &args, cwd).await })
    })
}
