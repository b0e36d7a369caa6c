//! Reading the list of repositories merged by the release pipeline.
//!
//! The upstream job writes one `repo,merge_time` pair per line, merge time
//! in RFC 3339. Anything unusable is reported and skipped; the monitor
//! then only waits on what it could understand.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Name of the file inside the artifacts directory.
pub const MERGED_REPOS_FILE: &str = "merged-repos.txt";

/// A repository whose release run should be awaited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedRepo {
    pub repo: String,
    /// Runs created before this instant belong to an earlier merge.
    pub merge_time: DateTime<Utc>,
}

/// `<workspace>/artifacts/merged-repos.txt`
pub fn merged_repos_path(workspace: &Path) -> PathBuf {
    workspace.join("artifacts").join(MERGED_REPOS_FILE)
}

/// Parse file content, skipping invalid lines and repeated repos.
pub fn parse_merged_repos(content: &str) -> Vec<MergedRepo> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        let mut fields = line.split(',').map(str::trim);
        let repo = fields.next().unwrap_or_default();
        let merge_time = fields.next().unwrap_or_default();
        if repo.is_empty() || merge_time.is_empty() {
            warn!("Invalid line in {}: {}", MERGED_REPOS_FILE, line);
            continue;
        }

        let merge_time = match DateTime::parse_from_rfc3339(merge_time) {
            Ok(t) => t.with_timezone(&Utc),
            Err(e) => {
                warn!("Invalid merge time in {}: {} ({})", MERGED_REPOS_FILE, line, e);
                continue;
            }
        };

        if seen.insert(repo.to_string()) {
            merged.push(MergedRepo {
                repo: repo.to_string(),
                merge_time,
            });
        }
    }

    merged
}

/// Load the merged repos file; a missing file means nothing to monitor.
pub fn load_merged_repos(path: &Path) -> Vec<MergedRepo> {
    info!("ℹ️ Resolved path to {}: {}", MERGED_REPOS_FILE, path.display());

    match std::fs::read_to_string(path) {
        Ok(content) => parse_merged_repos(&content),
        Err(e) => {
            info!("ℹ️ No merged repositories file found ({})", e);
            Vec::new()
        }
    }
}
