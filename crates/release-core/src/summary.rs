//! Pass/fail reporting for a monitoring session.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ReleaseError, ReleaseResult};
use crate::monitor::RepositoryStatus;

/// Ordered per-repo results of [`crate::ReleaseMonitor::monitor_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorSummary {
    pub results: Vec<RepositoryStatus>,
}

impl MonitorSummary {
    pub fn new(results: Vec<RepositoryStatus>) -> Self {
        Self { results }
    }

    /// Every repo that did not finish with a successful run.
    pub fn failures(&self) -> Vec<&RepositoryStatus> {
        self.results.iter().filter(|r| !r.is_success()).collect()
    }

    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(RepositoryStatus::is_success)
    }

    /// Plain-text table, one line per repo.
    pub fn render(&self) -> String {
        self.results
            .iter()
            .map(|r| {
                let icon = if r.is_success() { "✅" } else { "❌" };
                let line = format!(
                    "{} {:<20} {} {}",
                    icon,
                    r.repo,
                    r.outcome,
                    r.url.as_deref().unwrap_or("")
                );
                line.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Markdown table for the CI job summary page.
    pub fn render_markdown(&self) -> String {
        let mut out = String::from("## 📊 Release Monitoring Summary\n\n");
        out.push_str("| | Repository | Status | Run |\n|---|---|---|---|\n");
        for r in &self.results {
            let icon = if r.is_success() { "✅" } else { "❌" };
            let run = match (&r.url, r.run_id) {
                (Some(url), Some(id)) => format!("[{}]({})", id, url),
                (Some(url), None) => url.clone(),
                _ => "-".to_string(),
            };
            out.push_str(&format!("| {} | {} | {} | {} |\n", icon, r.repo, r.outcome, run));
        }
        out
    }

    /// Append [`Self::render_markdown`] to the job summary file.
    pub fn append_markdown(&self, path: &Path) -> ReleaseResult<()> {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        file.write_all(self.render_markdown().as_bytes())?;
        Ok(())
    }

    /// `Err(ReleasesFailed)` when any repo failed or timed out.
    pub fn ensure_success(&self) -> ReleaseResult<()> {
        let failed = self.failures().len();
        if failed > 0 {
            return Err(ReleaseError::ReleasesFailed { failed });
        }
        Ok(())
    }
}
