//! System requirement checks for Node.js and Git

use semver::Version;
use std::process::Command;

/// Oldest Node.js major version the generators support
pub const MIN_NODE_MAJOR: u64 = 14;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

/// Outcome of the pre-flight requirement check
#[derive(Debug, Clone)]
pub struct SystemRequirements {
    pub node: RuntimeInfo,
    pub git: RuntimeInfo,
}

impl SystemRequirements {
    /// Node.js is present and new enough
    pub fn node_compatible(&self) -> bool {
        self.node
            .version
            .as_deref()
            .and_then(parse_version)
            .is_some_and(|v| v.major >= MIN_NODE_MAJOR)
    }
}

fn check_tool(program: &str, name: &'static str) -> RuntimeInfo {
    let output = Command::new(program).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    check_tool("node", "Node.js")
}

/// Check if Git is available
pub fn check_git() -> RuntimeInfo {
    check_tool("git", "Git")
}

pub fn check_requirements() -> SystemRequirements {
    SystemRequirements {
        node: check_node(),
        git: check_git(),
    }
}

/// Parse tool version output such as `v18.17.1` or `git version 2.43.0`
pub fn parse_version(output: &str) -> Option<Version> {
    output
        .split_whitespace()
        .map(|word| word.strip_prefix('v').unwrap_or(word))
        .find_map(|word| Version::parse(word).ok())
}
