//! Chart discovery and chart → repository mapping.
//!
//! Every directory under `charts/platform/services` is a deployable
//! service. [`ChartMap`] translates those chart names into the
//! repositories that own their release workflow.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ReleaseError, ReleaseResult};

/// Built-in chart → repository table.
const DEFAULT_CHART_REPOS: &[(&str, &str)] = &[
    ("occasio", "occasio-apps"),
    ("ask-occasio", "occasio-apps"),
    ("fdw", "fdw"),
    ("reports", "reports"),
    ("gpt-search", "gpt-search"),
    ("document-api", "document-api"),
    ("autodor-py", "autodor-py"),
    ("file-api", "file-api"),
    ("graphql", "graphql_api"),
];

/// Directory holding the service charts, relative to the checkout root.
pub fn services_dir(file_location: &Path) -> PathBuf {
    file_location.join("charts").join("platform").join("services")
}

/// List chart names (sub-directories of the services directory), sorted.
pub fn discover_charts(file_location: &Path) -> ReleaseResult<Vec<String>> {
    let dir = services_dir(file_location);
    let entries = std::fs::read_dir(&dir).map_err(|source| ReleaseError::ChartsDir {
        path: dir.clone(),
        source,
    })?;

    let mut charts = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.path().is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => charts.push(name),
            Err(raw) => warn!("Skipping chart directory with non UTF-8 name: {:?}", raw),
        }
    }
    charts.sort();
    debug!(count = charts.len(), dir = %dir.display(), "discovered charts");
    Ok(charts)
}

/// Chart → repository lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartMap {
    entries: BTreeMap<String, String>,
}

impl Default for ChartMap {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_CHART_REPOS.iter().copied())
    }
}

impl ChartMap {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(chart, repo)| (chart.to_string(), repo.to_string()))
                .collect(),
        }
    }

    /// Repository owning `chart`, if the chart is known.
    pub fn repo_for(&self, chart: &str) -> Option<&str> {
        self.entries.get(chart).map(String::as_str)
    }

    /// Map charts to repositories, dropping unknown charts and duplicates.
    ///
    /// Order follows the first chart that produced each repository.
    pub fn resolve_repos<S: AsRef<str>>(&self, charts: &[S]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut repos = Vec::new();
        for chart in charts {
            let chart = chart.as_ref();
            match self.repo_for(chart) {
                Some(repo) => {
                    if seen.insert(repo) {
                        repos.push(repo.to_string());
                    }
                }
                None => debug!(chart, "chart has no release workflow mapping"),
            }
        }
        repos
    }

    /// Narrow `repos` down to `target`.
    ///
    /// `target` may name a repository directly or a chart that maps to one.
    /// Without a target every repo is kept; an unknown target yields nothing.
    pub fn filter_for_target(&self, repos: &[String], target: Option<&str>) -> Vec<String> {
        let target = match target.map(str::trim).filter(|t| !t.is_empty()) {
            Some(t) => t,
            None => return repos.to_vec(),
        };

        if repos.iter().any(|r| r == target) {
            info!("🎯 Targeting specific repository: {}", target);
            return vec![target.to_string()];
        }

        if let Some(mapped) = self.repo_for(target) {
            if repos.iter().any(|r| r == mapped) {
                info!(
                    "🎯 Targeting specific repository: {} (mapped from chart: {})",
                    mapped, target
                );
                return vec![mapped.to_string()];
            }
        }

        warn!(
            "⚠️ Target repository '{}' not found in the list of available repositories",
            target
        );
        Vec::new()
    }
}
