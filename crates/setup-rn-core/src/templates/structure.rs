//! Source tree skeleton

use super::{render, write_file};
use crate::choice::{ChoiceRecord, FeatureId};
use crate::error::ToolError;
use std::path::Path;
use tokio::fs;

const APP_NAVIGATION: &str = include_str!("../../templates/App.navigation.tmpl");
const APP_BASIC: &str = include_str!("../../templates/App.basic.tmpl");
const HOME_SCREEN: &str = include_str!("../../templates/HomeScreen.tmpl");
const NAVIGATION: &str = include_str!("../../templates/navigation.tmpl");
const EXAMPLE_COMPONENT: &str = include_str!("../../templates/ExampleComponent.tmpl");
const TYPES: &str = include_str!("../../templates/types.tmpl");
const GITIGNORE: &str = include_str!("../../templates/gitignore.tmpl");

/// Directories created under the project root
pub const SOURCE_DIRS: &[&str] = &[
    "src",
    "src/components",
    "src/screens",
    "src/navigation",
    "src/assets",
    "src/hooks",
    "src/context",
    "src/utils",
    "src/services",
    "src/types",
    "src/store",
];

const NAV_PARAM_LISTS: &str = "
export type RootStackParamList = {
  Home: undefined;
};

export type TabParamList = {
  HomeTab: undefined;
};
";

const EXAMPLE_PROPS: &str = "
interface ExampleComponentProps {
  title?: string;
  subtitle?: string;
}
";

/// Write directories, the App entry point and starter screens
pub async fn write(project_dir: &Path, choice: &ChoiceRecord) -> Result<(), ToolError> {
    for dir in SOURCE_DIRS {
        let path = project_dir.join(dir);
        fs::create_dir_all(&path)
            .await
            .map_err(|e| ToolError::io(format!("Failed to create directory {}", path.display()), e))?;
    }

    let language = choice.language();
    let typed = language.is_typed();
    let ext = language.component_ext();
    let fc = if typed { ": React.FC" } else { "" };

    write_file(project_dir, &format!("App.{}", ext), &app_file(choice)).await?;

    let home = render(
        HOME_SCREEN,
        &[("fc", fc), ("project_name", choice.project_name())],
    );
    write_file(project_dir, &format!("src/screens/HomeScreen.{}", ext), &home).await?;

    let navigation = render(
        NAVIGATION,
        &[
            ("param_lists", if typed { NAV_PARAM_LISTS } else { "" }),
            ("stack_params", if typed { "<RootStackParamList>" } else { "" }),
            ("tab_params", if typed { "<TabParamList>" } else { "" }),
            ("fc", fc),
        ],
    );
    write_file(project_dir, &format!("src/navigation/index.{}", ext), &navigation).await?;

    write_file(project_dir, ".gitignore", GITIGNORE).await?;

    let component = render(
        EXAMPLE_COMPONENT,
        &[
            ("props_interface", if typed { EXAMPLE_PROPS } else { "" }),
            (
                "component_type",
                if typed {
                    ": React.FC<ExampleComponentProps>"
                } else {
                    ""
                },
            ),
        ],
    );
    write_file(
        project_dir,
        &format!("src/components/ExampleComponent.{}", ext),
        &component,
    )
    .await?;

    if typed {
        write_file(project_dir, "src/types/index.ts", TYPES).await?;
    }

    Ok(())
}

/// App entry point; wraps the navigator when navigation was selected
pub fn app_file(choice: &ChoiceRecord) -> String {
    let features = choice.features();
    let template = if features.contains(FeatureId::ReactNavigation) {
        APP_NAVIGATION
    } else {
        APP_BASIC
    };
    let extra_imports = if features.contains(FeatureId::NativeWind) {
        "import './global.css';\n"
    } else {
        ""
    };
    let fc = if choice.language().is_typed() {
        ": React.FC"
    } else {
        ""
    };

    render(template, &[("extra_imports", extra_imports), ("fc", fc)])
}
