//! Feature resolution table
//!
//! Maps each [`FeatureId`] and [`FrameworkVariant`] pair to the packages it
//! needs and the optional post-install hook, then expands a selection into
//! batched install operations.
//!
//! The React Native CLI variant differs from Expo where native modules are
//! involved: Expo bundles or auto-links them, while the CLI needs extra
//! packages (gesture handler for navigation, `@react-native-firebase/*`) or a
//! manual `react-native link` step.

use crate::choice::{FeatureId, FeatureSet, FrameworkVariant};

/// A command run after packages are installed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostInstallHook {
    /// Arguments passed to `npx`
    pub args: &'static [&'static str],
    /// A failing optional hook only produces a warning
    pub optional: bool,
}

/// What one feature needs for one framework variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSpec {
    pub deps: &'static [&'static str],
    pub dev_deps: &'static [&'static str],
    pub hook: Option<PostInstallHook>,
}

const NAVIGATION_EXPO: &[&str] = &[
    "@react-navigation/native",
    "@react-navigation/native-stack",
    "@react-navigation/bottom-tabs",
    "react-native-screens",
    "react-native-safe-area-context",
];

const NAVIGATION_CLI: &[&str] = &[
    "@react-navigation/native",
    "@react-navigation/native-stack",
    "@react-navigation/bottom-tabs",
    "react-native-screens",
    "react-native-safe-area-context",
    "react-native-gesture-handler",
];

const FIREBASE_EXPO: &[&str] = &["firebase", "expo-firebase-core"];

const FIREBASE_CLI: &[&str] = &[
    "@react-native-firebase/app",
    "@react-native-firebase/auth",
    "@react-native-firebase/firestore",
];

const LINK_REANIMATED: PostInstallHook = PostInstallHook {
    args: &["react-native", "link", "react-native-reanimated"],
    optional: true,
};

const LINK_VECTOR_ICONS: PostInstallHook = PostInstallHook {
    args: &["react-native", "link", "react-native-vector-icons"],
    optional: true,
};

const fn deps(deps: &'static [&'static str]) -> FeatureSpec {
    FeatureSpec {
        deps,
        dev_deps: &[],
        hook: None,
    }
}

/// Look up a single feature for a framework variant
pub fn lookup(feature: FeatureId, framework: FrameworkVariant) -> FeatureSpec {
    use FeatureId::*;
    use FrameworkVariant::*;

    match (feature, framework) {
        (NativeWind, _) => FeatureSpec {
            deps: &["nativewind"],
            dev_deps: &["tailwindcss"],
            hook: None,
        },
        (ReactNavigation, Expo) => deps(NAVIGATION_EXPO),
        (ReactNavigation, ReactNativeCli) => deps(NAVIGATION_CLI),
        (Axios, _) => deps(&["axios"]),
        (Zustand, _) => deps(&["zustand"]),
        (Firebase, Expo) => deps(FIREBASE_EXPO),
        (Firebase, ReactNativeCli) => deps(FIREBASE_CLI),
        (ReactQuery, _) => deps(&["@tanstack/react-query"]),
        (AsyncStorage, _) => deps(&["@react-native-async-storage/async-storage"]),
        (Reanimated, Expo) => deps(&["react-native-reanimated"]),
        (Reanimated, ReactNativeCli) => FeatureSpec {
            deps: &["react-native-reanimated"],
            dev_deps: &[],
            hook: Some(LINK_REANIMATED),
        },
        (VectorIcons, Expo) => deps(&["@expo/vector-icons"]),
        (VectorIcons, ReactNativeCli) => FeatureSpec {
            deps: &["react-native-vector-icons"],
            dev_deps: &[],
            hook: Some(LINK_VECTOR_ICONS),
        },
        (Lottie, _) => deps(&["lottie-react-native"]),
    }
}

/// Kind of a resolved operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    InstallDeps,
    InstallDevDeps,
    PostInstallHook,
}

/// A concrete operation produced by expanding a feature selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOperation {
    pub kind: OperationKind,
    /// Package names for installs, full `npx` arguments for hooks
    pub args: Vec<String>,
    /// Failure must not abort the pipeline
    pub optional: bool,
    /// Feature that contributed a hook (None for batched installs)
    pub feature: Option<FeatureId>,
}

/// Expand a feature selection into install batches followed by hooks
///
/// Dependencies keep the selection order. All regular dependencies become a
/// single [`OperationKind::InstallDeps`] operation and all dev dependencies a
/// single [`OperationKind::InstallDevDeps`] operation; empty batches are
/// omitted. Hooks follow, one per feature, in selection order.
pub fn resolve(features: &FeatureSet, framework: FrameworkVariant) -> Vec<ResolvedOperation> {
    let mut dependencies: Vec<String> = Vec::new();
    let mut dev_dependencies: Vec<String> = Vec::new();
    let mut hooks = Vec::new();

    for feature in features.iter() {
        let spec = lookup(feature, framework);
        dependencies.extend(spec.deps.iter().map(|d| d.to_string()));
        dev_dependencies.extend(spec.dev_deps.iter().map(|d| d.to_string()));
        if let Some(hook) = spec.hook {
            hooks.push(ResolvedOperation {
                kind: OperationKind::PostInstallHook,
                args: hook.args.iter().map(|a| a.to_string()).collect(),
                optional: hook.optional,
                feature: Some(feature),
            });
        }
    }

    let mut operations = Vec::with_capacity(hooks.len() + 2);
    if !dependencies.is_empty() {
        operations.push(ResolvedOperation {
            kind: OperationKind::InstallDeps,
            args: dependencies,
            optional: false,
            feature: None,
        });
    }
    if !dev_dependencies.is_empty() {
        operations.push(ResolvedOperation {
            kind: OperationKind::InstallDevDeps,
            args: dev_dependencies,
            optional: false,
            feature: None,
        });
    }
    operations.extend(hooks);

    tracing::debug!(
        framework = %framework,
        features = features.len(),
        operations = operations.len(),
        "resolved feature operations"
    );

    operations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(features: &[FeatureId]) -> FeatureSet {
        features.iter().copied().collect()
    }

    #[test]
    fn test_empty_selection_resolves_to_nothing() {
        for framework in [FrameworkVariant::Expo, FrameworkVariant::ReactNativeCli] {
            assert!(resolve(&FeatureSet::new(), framework).is_empty());
        }
    }

    #[test]
    fn test_navigation_and_http_client_batch_into_one_install() {
        let ops = resolve(
            &set(&[FeatureId::ReactNavigation, FeatureId::Axios]),
            FrameworkVariant::Expo,
        );

        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].kind, OperationKind::InstallDeps);
        let mut expected: Vec<String> = NAVIGATION_EXPO.iter().map(|s| s.to_string()).collect();
        expected.push("axios".to_string());
        assert_eq!(ops[0].args, expected);
    }

    #[test]
    fn test_selection_order_is_preserved() {
        let ops = resolve(
            &set(&[FeatureId::Zustand, FeatureId::NativeWind, FeatureId::Axios]),
            FrameworkVariant::Expo,
        );

        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].args, vec!["zustand", "nativewind", "axios"]);
        assert_eq!(ops[1].kind, OperationKind::InstallDevDeps);
        assert_eq!(ops[1].args, vec!["tailwindcss"]);

        let reversed = resolve(
            &set(&[FeatureId::Axios, FeatureId::NativeWind, FeatureId::Zustand]),
            FrameworkVariant::Expo,
        );
        assert_eq!(reversed[0].args, vec!["axios", "nativewind", "zustand"]);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let features = set(&[
            FeatureId::VectorIcons,
            FeatureId::Firebase,
            FeatureId::Reanimated,
        ]);
        let first = resolve(&features, FrameworkVariant::ReactNativeCli);
        let second = resolve(&features, FrameworkVariant::ReactNativeCli);
        assert_eq!(first, second);
    }

    #[test]
    fn test_cli_link_hooks_follow_installs_and_are_optional() {
        let ops = resolve(
            &set(&[FeatureId::VectorIcons, FeatureId::Lottie, FeatureId::Reanimated]),
            FrameworkVariant::ReactNativeCli,
        );

        let kinds: Vec<_> = ops.iter().map(|o| o.kind).collect();
        assert_eq!(
            kinds,
            vec![
                OperationKind::InstallDeps,
                OperationKind::PostInstallHook,
                OperationKind::PostInstallHook,
            ]
        );
        assert_eq!(
            ops[0].args,
            vec![
                "react-native-vector-icons",
                "lottie-react-native",
                "react-native-reanimated"
            ]
        );
        assert_eq!(ops[1].feature, Some(FeatureId::VectorIcons));
        assert_eq!(ops[1].args, vec!["react-native", "link", "react-native-vector-icons"]);
        assert_eq!(ops[2].feature, Some(FeatureId::Reanimated));
        assert!(ops[1..].iter().all(|o| o.optional));
    }

    #[test]
    fn test_expo_needs_no_link_hooks() {
        let ops = resolve(
            &set(&[FeatureId::Reanimated, FeatureId::VectorIcons]),
            FrameworkVariant::Expo,
        );
        assert!(ops.iter().all(|o| o.kind != OperationKind::PostInstallHook));
        assert_eq!(
            ops[0].args,
            vec!["react-native-reanimated", "@expo/vector-icons"]
        );
    }

    #[test]
    fn test_variant_specific_dependencies() {
        let cli = lookup(FeatureId::ReactNavigation, FrameworkVariant::ReactNativeCli);
        assert!(cli.deps.contains(&"react-native-gesture-handler"));
        let expo = lookup(FeatureId::ReactNavigation, FrameworkVariant::Expo);
        assert!(!expo.deps.contains(&"react-native-gesture-handler"));

        let cli = lookup(FeatureId::Firebase, FrameworkVariant::ReactNativeCli);
        assert!(cli.deps.iter().all(|d| d.starts_with("@react-native-firebase/")));
    }

    #[test]
    fn test_every_feature_has_dependencies_for_every_variant() {
        for feature in FeatureId::ALL {
            for framework in [FrameworkVariant::Expo, FrameworkVariant::ReactNativeCli] {
                assert!(
                    !lookup(feature, framework).deps.is_empty(),
                    "{feature} has no deps for {framework}"
                );
            }
        }
    }
}
