//! Feature configuration files

use super::{render, write_file};
use crate::choice::{ChoiceRecord, FeatureId, FrameworkVariant};
use crate::error::ToolError;
use std::path::Path;
use tokio::fs;

const TAILWIND_CONFIG: &str = include_str!("../../templates/tailwind.config.tmpl");
const GLOBAL_CSS: &str = include_str!("../../templates/global.css.tmpl");
const FIREBASE_EXPO: &str = include_str!("../../templates/firebase.expo.tmpl");
const FIREBASE_CLI: &str = include_str!("../../templates/firebase.cli.tmpl");
const ZUSTAND: &str = include_str!("../../templates/zustand.tmpl");
const REACT_QUERY: &str = include_str!("../../templates/react-query.tmpl");

const NATIVEWIND_BABEL_PLUGIN: &str = "nativewind/babel";

const STORE_STATE: &str = "
interface AppState {
  count: number;
  user: { id: string; name: string } | null;
  isLoading: boolean;
  increment: () => void;
  decrement: () => void;
  setUser: (user: { id: string; name: string } | null) => void;
  setLoading: (loading: boolean) => void;
  reset: () => void;
}
";

/// Write configuration for every selected feature that needs any
pub async fn write(project_dir: &Path, choice: &ChoiceRecord) -> Result<(), ToolError> {
    for feature in choice.features().iter() {
        match feature {
            FeatureId::NativeWind => configure_nativewind(project_dir).await?,
            FeatureId::Firebase => configure_firebase(project_dir, choice).await?,
            FeatureId::Zustand => configure_zustand(project_dir, choice).await?,
            FeatureId::ReactQuery => configure_react_query(project_dir, choice).await?,
            _ => {}
        }
    }
    Ok(())
}

async fn configure_nativewind(project_dir: &Path) -> Result<(), ToolError> {
    write_file(project_dir, "tailwind.config.js", TAILWIND_CONFIG).await?;
    write_file(project_dir, "global.css", GLOBAL_CSS).await?;

    let babel_path = project_dir.join("babel.config.js");
    if !babel_path.is_file() {
        return Ok(());
    }
    let babel = fs::read_to_string(&babel_path)
        .await
        .map_err(|e| ToolError::io(format!("Failed to read {}", babel_path.display()), e))?;
    if let Some(updated) = add_babel_plugin(&babel, NATIVEWIND_BABEL_PLUGIN) {
        fs::write(&babel_path, updated)
            .await
            .map_err(|e| ToolError::io(format!("Failed to write {}", babel_path.display()), e))?;
    }
    Ok(())
}

/// Append `plugin` to the first `plugins: [...]` array
///
/// Returns None when the config has no plugins array or already lists the
/// plugin in either quote style.
pub fn add_babel_plugin(config: &str, plugin: &str) -> Option<String> {
    if config.contains(&format!("\"{plugin}\"")) || config.contains(&format!("'{plugin}'")) {
        return None;
    }
    let key = config.find("plugins:")?;
    let open = key + config[key..].find('[')?;
    let close = matching_bracket(config, open)?;

    let entry = format!("\"{plugin}\"");
    let existing = config[open + 1..close].trim();
    let list = if existing.is_empty() {
        entry
    } else if existing.ends_with(',') {
        format!("{} {}", existing, entry)
    } else {
        format!("{}, {}", existing, entry)
    };

    Some(format!("{}[{}]{}", &config[..open], list, &config[close + 1..]))
}

/// Index of the `]` closing the `[` at `open`, skipping nested arrays and strings
fn matching_bracket(config: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in config[open..].char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

async fn configure_firebase(project_dir: &Path, choice: &ChoiceRecord) -> Result<(), ToolError> {
    let language = choice.language();
    let content = match choice.framework() {
        FrameworkVariant::Expo => FIREBASE_EXPO.to_string(),
        FrameworkVariant::ReactNativeCli => render(
            FIREBASE_CLI,
            &[("string_type", if language.is_typed() { ": string" } else { "" })],
        ),
    };
    write_file(
        project_dir,
        &format!("src/config/firebase.{}", language.module_ext()),
        &content,
    )
    .await
}

async fn configure_zustand(project_dir: &Path, choice: &ChoiceRecord) -> Result<(), ToolError> {
    let language = choice.language();
    let typed = language.is_typed();
    let content = render(
        ZUSTAND,
        &[
            ("state_interface", if typed { STORE_STATE } else { "" }),
            ("store_params", if typed { "<AppState>" } else { "" }),
        ],
    );
    write_file(
        project_dir,
        &format!("src/store/useStore.{}", language.module_ext()),
        &content,
    )
    .await
}

async fn configure_react_query(project_dir: &Path, choice: &ChoiceRecord) -> Result<(), ToolError> {
    let language = choice.language();
    let content = render(
        REACT_QUERY,
        &[(
            "provider_type",
            if language.is_typed() {
                ": React.FC<{ children: React.ReactNode }>"
            } else {
                ""
            },
        )],
    );
    write_file(
        project_dir,
        &format!("src/hooks/useQuery.{}", language.component_ext()),
        &content,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::{ChoiceDraft, Editor, FeatureSet, LanguageVariant};

    fn choice(
        framework: FrameworkVariant,
        language: LanguageVariant,
        features: &[FeatureId],
    ) -> ChoiceRecord {
        ChoiceDraft {
            framework,
            language,
            project_name: "demo1".to_string(),
            features: features.iter().copied().collect::<FeatureSet>(),
            init_git: false,
            install_dependencies: false,
            editor: Editor::None,
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn test_add_babel_plugin_to_existing_list() {
        let config = "module.exports = { presets: ['babel-preset-expo'], plugins: ['a'] };";
        assert_eq!(
            add_babel_plugin(config, NATIVEWIND_BABEL_PLUGIN).unwrap(),
            "module.exports = { presets: ['babel-preset-expo'], plugins: ['a', \"nativewind/babel\"] };"
        );
    }

    #[test]
    fn test_add_babel_plugin_to_empty_list_and_trailing_comma() {
        assert_eq!(
            add_babel_plugin("plugins: []", "p").unwrap(),
            "plugins: [\"p\"]"
        );
        assert_eq!(
            add_babel_plugin("plugins: ['a',\n]", "p").unwrap(),
            "plugins: ['a', \"p\"]"
        );
    }

    #[test]
    fn test_add_babel_plugin_noop_cases() {
        assert_eq!(add_babel_plugin("presets: ['x']", "p"), None);
        assert_eq!(add_babel_plugin("plugins: [\"p\"]", "p"), None);
        assert_eq!(add_babel_plugin("plugins: ['nativewind/babel']", "nativewind/babel"), None);
    }

    #[test]
    fn test_add_babel_plugin_skips_nested_arrays() {
        let config = "plugins: [['module-resolver', { root: ['./src'] }]],";
        assert_eq!(
            add_babel_plugin(config, NATIVEWIND_BABEL_PLUGIN).unwrap(),
            "plugins: [['module-resolver', { root: ['./src'] }], \"nativewind/babel\"],"
        );
    }

    #[test]
    fn test_add_babel_plugin_ignores_brackets_in_strings() {
        assert_eq!(
            add_babel_plugin("plugins: ['a]b']", "p").unwrap(),
            "plugins: ['a]b', \"p\"]"
        );
    }

    #[tokio::test]
    async fn test_nativewind_updates_babel_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("babel.config.js"),
            "module.exports = { plugins: [] };",
        )
        .unwrap();

        write(
            dir.path(),
            &choice(
                FrameworkVariant::Expo,
                LanguageVariant::TypeScript,
                &[FeatureId::NativeWind],
            ),
        )
        .await
        .unwrap();

        assert!(dir.path().join("tailwind.config.js").is_file());
        assert!(dir.path().join("global.css").is_file());
        let babel = std::fs::read_to_string(dir.path().join("babel.config.js")).unwrap();
        assert_eq!(babel, "module.exports = { plugins: [\"nativewind/babel\"] };");
    }

    #[tokio::test]
    async fn test_firebase_content_depends_on_framework() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            &choice(
                FrameworkVariant::ReactNativeCli,
                LanguageVariant::TypeScript,
                &[FeatureId::Firebase],
            ),
        )
        .await
        .unwrap();
        let cli = std::fs::read_to_string(dir.path().join("src/config/firebase.ts")).unwrap();
        assert!(cli.contains("@react-native-firebase/auth"));
        assert!(cli.contains("signIn = async (email: string, password: string)"));

        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            &choice(
                FrameworkVariant::Expo,
                LanguageVariant::JavaScript,
                &[FeatureId::Firebase],
            ),
        )
        .await
        .unwrap();
        let expo = std::fs::read_to_string(dir.path().join("src/config/firebase.js")).unwrap();
        assert!(expo.contains("initializeApp(firebaseConfig)"));
    }

    #[tokio::test]
    async fn test_store_and_query_files() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            &choice(
                FrameworkVariant::Expo,
                LanguageVariant::TypeScript,
                &[FeatureId::Zustand, FeatureId::ReactQuery, FeatureId::Axios],
            ),
        )
        .await
        .unwrap();

        let store = std::fs::read_to_string(dir.path().join("src/store/useStore.ts")).unwrap();
        assert!(store.contains("create<AppState>("));
        assert!(store.contains("interface AppState"));
        let query = std::fs::read_to_string(dir.path().join("src/hooks/useQuery.tsx")).unwrap();
        assert!(query.contains("QueryProvider: React.FC<{ children: React.ReactNode }>"));
    }
}
