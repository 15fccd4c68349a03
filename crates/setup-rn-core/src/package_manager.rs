//! Package manager detection
//!
//! Lock files in the working directory take precedence; otherwise the first
//! installed manager in [`PROBE_ORDER`] is used, falling back to npm.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};

/// Supported JavaScript package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

/// Lock file markers, checked in this order
pub const LOCK_FILES: &[(&str, PackageManager)] = &[
    ("package-lock.json", PackageManager::Npm),
    ("yarn.lock", PackageManager::Yarn),
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("bun.lockb", PackageManager::Bun),
];

/// Executables probed when no lock file is present, fastest first
pub const PROBE_ORDER: &[PackageManager] = &[
    PackageManager::Bun,
    PackageManager::Pnpm,
    PackageManager::Yarn,
    PackageManager::Npm,
];

/// Used when nothing else can be determined
pub const FALLBACK: PackageManager = PackageManager::Npm;

impl PackageManager {
    /// Executable name
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
        }
    }

    /// Arguments that precede the package list when adding packages
    pub fn add_args(&self, dev: bool) -> &'static [&'static str] {
        match (self, dev) {
            (PackageManager::Npm, false) => &["install"],
            (PackageManager::Npm, true) => &["install", "--save-dev"],
            (PackageManager::Yarn, false) => &["add"],
            (PackageManager::Yarn, true) => &["add", "--dev"],
            (PackageManager::Pnpm, false) => &["add"],
            (PackageManager::Pnpm, true) => &["add", "--save-dev"],
            (PackageManager::Bun, false) => &["add"],
            (PackageManager::Bun, true) => &["add", "--dev"],
        }
    }

    /// Full argument vector for adding `packages`
    pub fn add_command(&self, packages: &[String], dev: bool) -> Vec<String> {
        self.add_args(dev)
            .iter()
            .map(|a| a.to_string())
            .chain(packages.iter().cloned())
            .collect()
    }

    /// Human-readable command that installs everything from the manifest
    pub fn install_hint(&self) -> String {
        format!("{} install", self.program())
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program())
    }
}

/// Answers whether an executable is usable on this machine
pub trait ToolProbe: Send + Sync {
    fn is_available(&self, program: &str) -> bool;
}

/// Probes by running `<program> --version`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl ToolProbe for SystemProbe {
    fn is_available(&self, program: &str) -> bool {
        Command::new(program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|status| status.success())
    }
}

/// Pick the package manager for `dir`
pub fn resolve(dir: &Path, probe: &dyn ToolProbe) -> PackageManager {
    if let Some((lock_file, manager)) = LOCK_FILES
        .iter()
        .find(|(lock_file, _)| dir.join(lock_file).is_file())
    {
        tracing::debug!(lock_file, manager = %manager, "package manager from lock file");
        return *manager;
    }

    if let Some(manager) = PROBE_ORDER
        .iter()
        .find(|manager| probe.is_available(manager.program()))
    {
        tracing::debug!(manager = %manager, "package manager from installed tools");
        return *manager;
    }

    tracing::debug!(manager = %FALLBACK, "no package manager detected, using fallback");
    FALLBACK
}
