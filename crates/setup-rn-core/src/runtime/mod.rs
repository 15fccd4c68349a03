//! System-facing collaborators
//!
//! This module provides:
//! - Subprocess execution with an explicit working directory
//! - Project generation, Git setup and editor launching on top of it
//! - Node.js / Git requirement checks

pub mod check;
pub mod editor;
pub mod generator;
pub mod git;
pub mod process;

pub use check::{check_requirements, RuntimeInfo, SystemRequirements};
pub use editor::EditorCli;
pub use generator::NpxGenerator;
pub use git::GitVcs;
pub use process::ProcessRunner;
