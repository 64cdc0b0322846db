//! Free-text URL scanning (deps.ts, mod.ts, any source file)

use std::sync::LazyLock;

use regex::Regex;

use crate::version::checker::{VersionCheckSummaryItem, check_version};
use crate::version::error::RegistryError;
use crate::version::resolver::DependencyResolver;

/// Quoted http(s) URL made of URL-safe characters only
static QUOTED_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["'`]https?://[a-zA-Z0-9/:%#$&?()~.=+\-@]+["'`]"#).unwrap()
});

/// Extract every quoted http(s) URL from `text`, quotes removed, in order of appearance
pub fn extract_urls(text: &str) -> Vec<String> {
    QUOTED_URL_RE
        .find_iter(text)
        .map(|m| {
            let quoted = m.as_str();
            quoted[1..quoted.len() - 1].to_string()
        })
        .collect()
}

/// Check every URL found in `text`, reporting each under the URL itself
///
/// Repeated URLs are reported once per occurrence.
pub async fn scan_text(
    text: &str,
    resolver: &dyn DependencyResolver,
) -> Result<Vec<VersionCheckSummaryItem>, RegistryError> {
    let mut results = Vec::new();

    for url in extract_urls(text) {
        let pair = resolver.resolve(&url).await?;
        results.push(check_version(&url, pair.current, pair.latest));
    }

    Ok(results)
}
