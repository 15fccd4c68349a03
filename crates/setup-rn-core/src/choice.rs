//! The user's choices for a project, and the rules a project name must satisfy

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Project generator family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum FrameworkVariant {
    #[serde(rename = "expo")]
    #[value(name = "expo")]
    Expo,
    #[serde(rename = "rn-cli")]
    #[value(name = "rn-cli")]
    ReactNativeCli,
}

impl FrameworkVariant {
    pub fn display_name(&self) -> &'static str {
        match self {
            FrameworkVariant::Expo => "Expo",
            FrameworkVariant::ReactNativeCli => "React Native CLI",
        }
    }
}

impl fmt::Display for FrameworkVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Source language of the generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LanguageVariant {
    #[value(name = "typescript", alias = "ts")]
    TypeScript,
    #[value(name = "javascript", alias = "js")]
    JavaScript,
}

impl LanguageVariant {
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageVariant::TypeScript => "TypeScript",
            LanguageVariant::JavaScript => "JavaScript",
        }
    }

    pub fn is_typed(&self) -> bool {
        matches!(self, LanguageVariant::TypeScript)
    }

    /// Extension for component files (`tsx`/`jsx`)
    pub fn component_ext(&self) -> &'static str {
        if self.is_typed() {
            "tsx"
        } else {
            "jsx"
        }
    }

    /// Extension for plain modules (`ts`/`js`)
    pub fn module_ext(&self) -> &'static str {
        if self.is_typed() {
            "ts"
        } else {
            "js"
        }
    }
}

impl fmt::Display for LanguageVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Editor to open the finished project in
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Editor {
    #[default]
    #[serde(rename = "none", alias = "None")]
    None,
    #[serde(rename = "vscode")]
    #[value(name = "vscode")]
    VsCode,
    #[serde(rename = "cursor")]
    Cursor,
}

impl Editor {
    pub fn display_name(&self) -> &'static str {
        match self {
            Editor::None => "None",
            Editor::VsCode => "VSCode",
            Editor::Cursor => "Cursor",
        }
    }
}

impl fmt::Display for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Optional feature packages a project can be created with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureId {
    #[value(name = "nativewind")]
    #[serde(rename = "nativewind")]
    NativeWind,
    #[value(name = "react-navigation", alias = "navigation")]
    ReactNavigation,
    #[value(alias = "http-client")]
    Axios,
    #[value(alias = "state-store")]
    Zustand,
    Firebase,
    ReactQuery,
    AsyncStorage,
    Reanimated,
    VectorIcons,
    Lottie,
}

impl FeatureId {
    /// Every feature, in the order they are offered to the user
    pub const ALL: [FeatureId; 10] = [
        FeatureId::NativeWind,
        FeatureId::ReactNavigation,
        FeatureId::Axios,
        FeatureId::Zustand,
        FeatureId::Firebase,
        FeatureId::ReactQuery,
        FeatureId::AsyncStorage,
        FeatureId::Reanimated,
        FeatureId::VectorIcons,
        FeatureId::Lottie,
    ];

    /// Stable identifier, as used in the defaults file and on the command line
    pub fn id(&self) -> &'static str {
        match self {
            FeatureId::NativeWind => "nativewind",
            FeatureId::ReactNavigation => "react-navigation",
            FeatureId::Axios => "axios",
            FeatureId::Zustand => "zustand",
            FeatureId::Firebase => "firebase",
            FeatureId::ReactQuery => "react-query",
            FeatureId::AsyncStorage => "async-storage",
            FeatureId::Reanimated => "reanimated",
            FeatureId::VectorIcons => "vector-icons",
            FeatureId::Lottie => "lottie",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FeatureId::NativeWind => "NativeWind (TailwindCSS for React Native)",
            FeatureId::ReactNavigation => "React Navigation (Stack + Bottom Tabs)",
            FeatureId::Axios => "Axios (HTTP client)",
            FeatureId::Zustand => "Zustand (State management)",
            FeatureId::Firebase => "Firebase",
            FeatureId::ReactQuery => "React Query (TanStack Query)",
            FeatureId::AsyncStorage => "AsyncStorage",
            FeatureId::Reanimated => "Reanimated",
            FeatureId::VectorIcons => "Vector Icons",
            FeatureId::Lottie => "Lottie (Animations)",
        }
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Selected features in the order the user picked them, without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSet(Vec<FeatureId>);

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a feature; returns false if it was already selected
    pub fn insert(&mut self, feature: FeatureId) -> bool {
        if self.0.contains(&feature) {
            return false;
        }
        self.0.push(feature);
        true
    }

    pub fn contains(&self, feature: FeatureId) -> bool {
        self.0.contains(&feature)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = FeatureId> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[FeatureId] {
        &self.0
    }
}

impl FromIterator<FeatureId> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = FeatureId>>(iter: I) -> Self {
        let mut set = FeatureSet::new();
        for feature in iter {
            set.insert(feature);
        }
        set
    }
}

/// Names that would clash with tooling or generated directories
pub const RESERVED_NAMES: &[&str] = &[
    "node_modules",
    "npm",
    "yarn",
    "pnpm",
    "bun",
    "react",
    "react-native",
    "expo",
    "android",
    "ios",
    "src",
    "lib",
    "dist",
    "build",
    "public",
    "assets",
];

const MIN_NAME_LEN: usize = 2;
const MAX_NAME_LEN: usize = 100;

/// Check a project name against every rule, collecting all violations
pub fn validate_project_name(name: &str) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    if name.trim().is_empty() {
        errors.push("Project name cannot be empty".to_string());
    }
    if name.contains(' ') {
        errors.push("Project name cannot contain spaces".to_string());
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        || name.is_empty()
    {
        errors.push(
            "Project name can only contain letters, numbers, hyphens, and underscores".to_string(),
        );
    }
    let len = name.chars().count();
    if len < MIN_NAME_LEN {
        errors.push(format!(
            "Project name must be at least {} characters long",
            MIN_NAME_LEN
        ));
    }
    if len > MAX_NAME_LEN {
        errors.push(format!(
            "Project name cannot be longer than {} characters",
            MAX_NAME_LEN
        ));
    }
    if RESERVED_NAMES.contains(&name.to_lowercase().as_str()) {
        errors.push(format!("\"{}\" is a reserved name and cannot be used", name));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { errors })
    }
}

/// Unvalidated choices, as collected from prompts, flags or defaults
#[derive(Debug, Clone)]
pub struct ChoiceDraft {
    pub framework: FrameworkVariant,
    pub language: LanguageVariant,
    pub project_name: String,
    pub features: FeatureSet,
    pub init_git: bool,
    pub install_dependencies: bool,
    pub editor: Editor,
}

impl ChoiceDraft {
    /// Validate the draft into an immutable [`ChoiceRecord`]
    pub fn validate(self) -> Result<ChoiceRecord, ValidationError> {
        validate_project_name(&self.project_name)?;
        Ok(ChoiceRecord {
            framework: self.framework,
            language: self.language,
            project_name: self.project_name,
            features: self.features,
            init_git: self.init_git,
            install_dependencies: self.install_dependencies,
            editor: self.editor,
        })
    }
}

/// Validated, read-only project choices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceRecord {
    framework: FrameworkVariant,
    language: LanguageVariant,
    project_name: String,
    features: FeatureSet,
    init_git: bool,
    install_dependencies: bool,
    editor: Editor,
}

impl ChoiceRecord {
    pub fn framework(&self) -> FrameworkVariant {
        self.framework
    }

    pub fn language(&self) -> LanguageVariant {
        self.language
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn init_git(&self) -> bool {
        self.init_git
    }

    pub fn install_dependencies(&self) -> bool {
        self.install_dependencies
    }

    pub fn editor(&self) -> Editor {
        self.editor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> ChoiceDraft {
        ChoiceDraft {
            framework: FrameworkVariant::Expo,
            language: LanguageVariant::TypeScript,
            project_name: name.to_string(),
            features: FeatureSet::new(),
            init_git: true,
            install_dependencies: true,
            editor: Editor::None,
        }
    }

    #[test]
    fn test_valid_names() {
        for name in ["demo1", "my-app", "My_App_2", "ab"] {
            assert!(validate_project_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_reserved_names_rejected_case_insensitively() {
        let err = validate_project_name("node_modules").unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert!(err.errors[0].contains("reserved"));

        assert!(validate_project_name("Android").is_err());
        assert!(validate_project_name("REACT-NATIVE").is_err());
    }

    #[test]
    fn test_all_violations_reported() {
        let err = validate_project_name("a b").unwrap_err();
        assert!(err.errors.iter().any(|e| e.contains("spaces")));
        assert!(err.errors.iter().any(|e| e.contains("letters, numbers")));
    }

    #[test]
    fn test_empty_and_length_limits() {
        let err = validate_project_name("").unwrap_err();
        assert!(err.errors.iter().any(|e| e.contains("empty")));
        assert!(err.errors.iter().any(|e| e.contains("at least 2")));

        assert!(validate_project_name("x").is_err());
        assert!(validate_project_name(&"a".repeat(100)).is_ok());
        assert!(validate_project_name(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_draft_validation() {
        let record = draft("demo1").validate().unwrap();
        assert_eq!(record.project_name(), "demo1");
        assert_eq!(record.framework(), FrameworkVariant::Expo);

        assert!(draft("node_modules").validate().is_err());
        assert!(draft("has/slash").validate().is_err());
    }

    #[test]
    fn test_feature_set_keeps_insertion_order_without_duplicates() {
        let mut set = FeatureSet::new();
        assert!(set.insert(FeatureId::Zustand));
        assert!(set.insert(FeatureId::Axios));
        assert!(!set.insert(FeatureId::Zustand));
        assert!(set.insert(FeatureId::NativeWind));

        assert_eq!(
            set.as_slice(),
            &[FeatureId::Zustand, FeatureId::Axios, FeatureId::NativeWind]
        );
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_feature_ids_round_trip_through_serde() {
        for feature in FeatureId::ALL {
            let json = serde_json::to_string(&feature).unwrap();
            assert_eq!(json, format!("\"{}\"", feature.id()));
            let back: FeatureId = serde_json::from_str(&json).unwrap();
            assert_eq!(back, feature);
        }
    }

    #[test]
    fn test_editor_accepts_legacy_none_spelling() {
        let editor: Editor = serde_json::from_str("\"None\"").unwrap();
        assert_eq!(editor, Editor::None);
        let editor: Editor = serde_json::from_str("\"vscode\"").unwrap();
        assert_eq!(editor, Editor::VsCode);
    }
}
