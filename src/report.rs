//! Aggregation and presentation of scan results

use std::collections::BTreeMap;

use comfy_table::{Table, presets::UTF8_FULL};
use indexmap::IndexMap;

use crate::version::checker::{CheckResult, VersionCheckSummaryItem};

/// Scan results per repository, in the order repositories were scanned
pub type RepositoryResults = IndexMap<String, Vec<VersionCheckSummaryItem>>;

/// Group items by outcome, keeping their relative order within each group
pub fn group_by_result<'a, I>(
    items: I,
) -> BTreeMap<CheckResult, Vec<&'a VersionCheckSummaryItem>>
where
    I: IntoIterator<Item = &'a VersionCheckSummaryItem>,
{
    let mut groups: BTreeMap<CheckResult, Vec<&VersionCheckSummaryItem>> = BTreeMap::new();
    for item in items {
        groups.entry(item.check_result).or_default().push(item);
    }
    groups
}

/// Render one table per outcome, grouping across all repositories
///
/// Outcomes without any item are omitted. Returns an empty string when there
/// is nothing to report.
pub fn render_tables(results: &RepositoryResults) -> String {
    let mut grouped: BTreeMap<CheckResult, Vec<(&str, &VersionCheckSummaryItem)>> =
        BTreeMap::new();
    for (repository, items) in results {
        for (check_result, group) in group_by_result(items) {
            grouped
                .entry(check_result)
                .or_default()
                .extend(group.into_iter().map(|item| (repository.as_str(), item)));
        }
    }

    let mut sections = Vec::new();
    for check_result in CheckResult::ALL {
        let Some(rows) = grouped.get(&check_result) else {
            continue;
        };

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec!["Repository", "Package", "Current", "Latest"]);
        for (repository, item) in rows {
            table.add_row(vec![
                repository.to_string(),
                item.package_name.clone(),
                item.current_version.clone().unwrap_or_else(|| "-".to_string()),
                item.latest_version.clone().unwrap_or_else(|| "-".to_string()),
            ]);
        }

        sections.push(format!(
            "{} {} ({})\n{}",
            check_result.symbol(),
            check_result,
            rows.len(),
            table
        ));
    }

    sections.join("\n\n")
}

/// Machine-readable `{ repository: [items] }` document
pub fn render_json(results: &RepositoryResults) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}
