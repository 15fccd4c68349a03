//! Charm-style CLI prompts using cliclack

use super::observer::SpinnerObserver;
use crate::choice::{
    validate_project_name, ChoiceDraft, ChoiceRecord, Editor, FeatureId, FeatureSet,
    FrameworkVariant, LanguageVariant,
};
use crate::config::{Defaults, DefaultsStore};
use crate::error::{ScaffoldError, GENERIC_TIPS};
use crate::features;
use crate::host::Host;
use crate::package_manager::SystemProbe;
use crate::pipeline::{Orchestrator, RunSummary};
use crate::runtime::{check, EditorCli, GitVcs, NpxGenerator, ProcessRunner};
use crate::templates::FileTemplates;
use anyhow::{Context, Result};
use colored::Colorize;

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project name, prompted for when missing
    pub name: Option<String>,

    pub framework: Option<FrameworkVariant>,

    pub language: Option<LanguageVariant>,

    /// Feature packages to add
    pub features: Option<Vec<FeatureId>>,

    /// Initialize a Git repository
    pub git: Option<bool>,

    /// Install dependencies after setup
    pub install: Option<bool>,

    pub editor: Option<Editor>,

    /// Accept defaults for everything not given as a flag (non-interactive mode)
    pub yes: bool,

    /// Persist the collected choices to `.setuprc.json`
    pub save_defaults: bool,
}

/// Run the CLI with interactive prompts
pub async fn run(args: CreateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro(format!("Setup React Native v{cli_version}"))?;

    // Step 1: Check Node.js and Git
    check_system()?;

    // Step 2: Load saved defaults
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    let store = DefaultsStore::in_dir(&cwd);
    let defaults = store.load();

    // Step 3: Collect and validate choices
    let draft = if args.yes {
        cliclack::log::info("Using defaults for unspecified options (--yes mode)")?;
        draft_from_flags(&args, &defaults)?
    } else if console::Term::stderr().is_term() {
        prompt_choices(&args, &defaults)?
    } else {
        anyhow::bail!("Prompts need a terminal. Pass --yes and --name to run non-interactively.");
    };

    let choice = match draft.validate() {
        Ok(choice) => choice,
        Err(e) => {
            cliclack::log::error(e.to_string())?;
            anyhow::bail!("Setup cancelled.");
        }
    };

    if args.save_defaults {
        save_defaults(&store, &choice)?;
    }

    // Step 4: Run the pipeline
    let runner = ProcessRunner::new();
    let generator = NpxGenerator::new(runner);
    let templates = FileTemplates;
    let vcs = GitVcs::new(runner);
    let editor = EditorCli::new(runner);
    let probe = SystemProbe;
    let host = Host {
        generator: &generator,
        templates: &templates,
        commands: &runner,
        vcs: &vcs,
        editor: &editor,
        probe: &probe,
    };

    let observer = SpinnerObserver::default();
    let mut orchestrator = Orchestrator::new(host, cwd).with_observer(&observer);

    match orchestrator.run(&choice).await {
        Ok(summary) => {
            print_summary(&summary)?;
            Ok(())
        }
        Err(err) => {
            print_failure(&err)?;
            anyhow::bail!("Setup failed.");
        }
    }
}

fn check_system() -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking system requirements...");

    let requirements = check::check_requirements();

    if !requirements.node_compatible() {
        spinner.stop("Missing requirements");
        match &requirements.node.version {
            Some(version) => cliclack::log::error(format!(
                "Node.js {} is too old, version {} or higher is required",
                version,
                check::MIN_NODE_MAJOR
            ))?,
            None => cliclack::log::error("Node.js is not installed")?,
        }
        anyhow::bail!("Please install a supported Node.js version and try again.");
    }

    let runtime_info: Vec<String> = [&requirements.node, &requirements.git]
        .iter()
        .map(|r| match &r.version {
            Some(version) if r.available => format!("{} ({})", r.name, version),
            _ => format!("{} (not installed)", r.name),
        })
        .collect();
    spinner.stop(format!("Detected: {}", runtime_info.join(", ")));

    if !requirements.git.available {
        cliclack::log::warning("Git is not installed, version control will be skipped")?;
    }

    Ok(())
}

/// Build choices from flags, falling back to saved defaults
fn draft_from_flags(args: &CreateArgs, defaults: &Defaults) -> Result<ChoiceDraft> {
    let Some(name) = args.name.clone() else {
        anyhow::bail!("A project name is required with --yes (use --name)");
    };

    let features = args
        .features
        .clone()
        .unwrap_or_else(|| defaults.default_packages.clone());

    Ok(ChoiceDraft {
        framework: args.framework.unwrap_or(defaults.default_framework),
        language: args.language.unwrap_or(defaults.default_language),
        project_name: name,
        features: features.into_iter().collect(),
        init_git: args.git.unwrap_or(defaults.default_git_init),
        install_dependencies: args.install.unwrap_or(defaults.default_install_deps),
        editor: args.editor.unwrap_or(defaults.default_ide),
    })
}

fn prompt_choices(args: &CreateArgs, defaults: &Defaults) -> Result<ChoiceDraft> {
    let project_name = match &args.name {
        Some(name) => {
            cliclack::log::info(format!("Project name: {}", name))?;
            name.clone()
        }
        None => cliclack::input("Project name")
            .placeholder("my-app")
            .validate(|input: &String| {
                validate_project_name(input).map_err(|e| e.first().to_string())
            })
            .interact()?,
    };

    let framework = match args.framework {
        Some(framework) => framework,
        None => cliclack::select("Select a framework")
            .initial_value(defaults.default_framework)
            .item(
                FrameworkVariant::Expo,
                FrameworkVariant::Expo.display_name(),
                "managed workflow, create-expo-app",
            )
            .item(
                FrameworkVariant::ReactNativeCli,
                FrameworkVariant::ReactNativeCli.display_name(),
                "bare workflow, react-native init",
            )
            .interact()?,
    };

    let language = match args.language {
        Some(language) => language,
        None => cliclack::select("Select a language")
            .initial_value(defaults.default_language)
            .item(
                LanguageVariant::TypeScript,
                LanguageVariant::TypeScript.display_name(),
                "",
            )
            .item(
                LanguageVariant::JavaScript,
                LanguageVariant::JavaScript.display_name(),
                "",
            )
            .interact()?,
    };

    let features: FeatureSet = match &args.features {
        Some(features) => features.iter().copied().collect(),
        None => {
            let mut multi = cliclack::multiselect("Select additional packages (optional)")
                .initial_values(defaults.default_packages.clone())
                .required(false);
            for feature in FeatureId::ALL {
                multi = multi.item(feature, feature.label(), feature.id());
            }
            let selected: Vec<FeatureId> = multi.interact()?;
            selected.into_iter().collect()
        }
    };

    let init_git = match args.git {
        Some(git) => git,
        None => cliclack::confirm("Initialize a Git repository?")
            .initial_value(defaults.default_git_init)
            .interact()?,
    };

    let install_dependencies = match args.install {
        Some(install) => install,
        None => cliclack::confirm("Install dependencies now?")
            .initial_value(defaults.default_install_deps)
            .interact()?,
    };

    let editor = match args.editor {
        Some(editor) => editor,
        None => cliclack::select("Open the project in an editor?")
            .initial_value(defaults.default_ide)
            .item(Editor::None, Editor::None.display_name(), "")
            .item(Editor::VsCode, Editor::VsCode.display_name(), "")
            .item(Editor::Cursor, Editor::Cursor.display_name(), "")
            .interact()?,
    };

    Ok(ChoiceDraft {
        framework,
        language,
        project_name,
        features,
        init_git,
        install_dependencies,
        editor,
    })
}

fn defaults_from_choice(choice: &ChoiceRecord) -> Defaults {
    Defaults {
        default_framework: choice.framework(),
        default_language: choice.language(),
        default_packages: choice.features().as_slice().to_vec(),
        default_git_init: choice.init_git(),
        default_install_deps: choice.install_dependencies(),
        default_ide: choice.editor(),
    }
}

fn save_defaults(store: &DefaultsStore, choice: &ChoiceRecord) -> Result<()> {
    match store.save(&defaults_from_choice(choice)) {
        Ok(()) => cliclack::log::success(format!("Saved defaults to {}", store.path().display()))?,
        Err(e) => cliclack::log::warning(format!("Could not save defaults: {}", e))?,
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) -> Result<()> {
    for warning in &summary.warnings {
        cliclack::log::warning(format!("{}: {}", warning.step, warning.message))?;
    }

    cliclack::log::success(format!(
        "Created {} in {}",
        summary.project_name.bold(),
        summary.project_dir.display()
    ))?;

    println!();
    println!("  {}", "Summary".bold());
    println!("  {}  {}", "Framework:".dimmed(), summary.framework);
    println!("  {}   {}", "Language:".dimmed(), summary.language);
    println!("  {}   {}", "Packages:".dimmed(), summary.package_manager);
    if let Some(features) = summary.feature_list() {
        println!("  {}   {}", "Features:".dimmed(), features);
    }

    println!();
    println!("  {}", "Next steps".bold());
    println!();

    for (i, step) in summary.next_steps().iter().enumerate() {
        println!("  {}.  {}", i + 1, step.cyan());
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}

fn print_failure(err: &ScaffoldError) -> Result<()> {
    let message = err.to_string();
    match err.failed_step() {
        Some(step) => cliclack::log::error(format!("Setup failed at step: {}\n{}", step, message))?,
        None => cliclack::log::error(&message)?,
    }

    let hints = err.remediation_hints();
    if !hints.is_empty() {
        println!();
        println!("  {}", "Suggestions".yellow().bold());
        for hint in hints {
            println!("  - {}", hint);
        }
    }

    println!();
    println!("  {}", "General tips".dimmed());
    for tip in GENERIC_TIPS {
        println!("  - {}", tip.dimmed());
    }

    cliclack::outro_cancel("Setup did not complete")?;

    Ok(())
}

/// Print the feature table for one or both frameworks
pub fn list_features(framework: Option<FrameworkVariant>) {
    let frameworks = match framework {
        Some(framework) => vec![framework],
        None => vec![FrameworkVariant::Expo, FrameworkVariant::ReactNativeCli],
    };

    for framework in frameworks {
        println!("{}", framework.display_name().bold());
        for feature in FeatureId::ALL {
            let spec = features::lookup(feature, framework);
            println!("  {:<18} {}", feature.id().cyan(), feature.label());
            if !spec.deps.is_empty() {
                println!("  {:<18} {}", "", spec.deps.join(" ").dimmed());
            }
            if !spec.dev_deps.is_empty() {
                println!("  {:<18} {} {}", "", "dev:".dimmed(), spec.dev_deps.join(" ").dimmed());
            }
            if let Some(hook) = spec.hook {
                println!("  {:<18} {} npx {}", "", "then:".dimmed(), hook.args.join(" "));
            }
        }
        println!();
    }
}
