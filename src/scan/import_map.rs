//! Import map scanning (deno.json, import_map.json)

use indexmap::IndexMap;
use serde::Deserialize;

use crate::version::checker::{VersionCheckSummaryItem, check_version};
use crate::version::error::RegistryError;
use crate::version::resolver::DependencyResolver;

/// An import map; fields other than `imports` are ignored
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ImportMap {
    #[serde(default)]
    pub imports: IndexMap<String, String>,
}

impl ImportMap {
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}

/// Check every import-map entry, reporting it under its alias
///
/// Both versions come from the resolver, which is handed the locator itself.
pub async fn scan_import_map(
    import_map: &ImportMap,
    resolver: &dyn DependencyResolver,
) -> Result<Vec<VersionCheckSummaryItem>, RegistryError> {
    let mut results = Vec::new();

    for (alias, locator) in &import_map.imports {
        let pair = resolver.resolve(locator).await?;
        results.push(check_version(alias, pair.current, pair.latest));
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::checker::CheckResult;
    use crate::version::resolver::VersionPair;
    use async_trait::async_trait;

    /// Resolver that understands only `npm:foo@<version>` locators
    struct FooResolver;

    #[async_trait]
    impl DependencyResolver for FooResolver {
        async fn resolve(&self, reference: &str) -> Result<VersionPair, RegistryError> {
            match reference.strip_prefix("npm:foo@") {
                Some(version) => Ok(VersionPair::new(
                    Some(version.to_string()),
                    Some("2.0.0".to_string()),
                )),
                None => Ok(VersionPair::unresolved()),
            }
        }
    }

    #[test]
    fn parse_ignores_fields_other_than_imports() {
        let content = r#"{
            "tasks": { "dev": "deno run -A main.ts" },
            "imports": {
                "foo": "npm:foo@2.0.0",
                "oak": "https://deno.land/x/oak@v12.6.1/mod.ts"
            },
            "scopes": {}
        }"#;

        let import_map = ImportMap::parse(content).unwrap();

        assert_eq!(
            import_map.imports.into_iter().collect::<Vec<_>>(),
            vec![
                ("foo".to_string(), "npm:foo@2.0.0".to_string()),
                (
                    "oak".to_string(),
                    "https://deno.land/x/oak@v12.6.1/mod.ts".to_string()
                ),
            ]
        );
    }

    #[test]
    fn parse_defaults_to_empty_imports() {
        let import_map = ImportMap::parse(r#"{"compilerOptions": {}}"#).unwrap();
        assert!(import_map.imports.is_empty());
    }

    #[tokio::test]
    async fn scan_import_map_keys_results_by_alias() {
        let import_map = ImportMap::parse(r#"{"imports": {"foo": "npm:foo@2.0.0"}}"#).unwrap();

        let results = scan_import_map(&import_map, &FooResolver).await.unwrap();

        assert_eq!(
            results,
            vec![VersionCheckSummaryItem {
                package_name: "foo".to_string(),
                current_version: Some("2.0.0".to_string()),
                latest_version: Some("2.0.0".to_string()),
                check_result: CheckResult::Latest,
            }]
        );
    }

    #[tokio::test]
    async fn scan_import_map_reports_unresolvable_locator_as_invalid() {
        let import_map = ImportMap::parse(r#"{"imports": {"local/": "./src/"}}"#).unwrap();

        let results = scan_import_map(&import_map, &FooResolver).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].package_name, "local/");
        assert_eq!(results[0].check_result, CheckResult::InvalidVersion);
    }
}
