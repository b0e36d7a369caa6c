//! chart-release - release pipeline helper
//!
//! ## Commands
//!
//! - `trigger`: dispatch the release workflow to every repository whose
//!   service chart is present in the checkout
//! - `monitor`: wait for the staging release runs of merged repositories
//!   and fail if any of them does not succeed
//!
//! Every flag falls back to the environment variable the CI runner sets.

use actions_client::{ActionsClient, ActionsConfig, DEFAULT_API_URL};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use release_core::{
    discover_charts, load_merged_repos, merged_repos_path, plan_trigger, trigger_releases,
    ChartMap, MonitorSettings, OrgActions, ReleaseMonitor, TriggerSettings, MONITOR_ORG,
    MONITOR_WORKFLOW_PATH, TRIGGER_ORG, TRIGGER_WORKFLOW_FILE,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn, Level};

#[derive(Parser)]
#[command(name = "chart-release")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Dispatch and monitor service release workflows", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// Workflow API base URL
    #[arg(long, global = true, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// API token
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dispatch the release workflow for the charts in a checkout
    Trigger(TriggerArgs),

    /// Await the release runs of merged repositories
    Monitor(MonitorArgs),
}

#[derive(Args)]
struct TriggerArgs {
    /// Checkout root containing charts/platform/services
    #[arg(long, env = "FILE_LOCATION", default_value = ".")]
    file_location: PathBuf,

    /// Branch to run the workflow on (also passed as the `branch` input)
    #[arg(long, env = "BRANCH_NAME")]
    branch: String,

    /// Only trigger this repository (a repository or chart name)
    #[arg(long, env = "TARGET_REPO")]
    target_repo: Option<String>,

    /// Organization owning the downstream repositories
    #[arg(long, default_value = TRIGGER_ORG)]
    org: String,

    /// Workflow file to dispatch
    #[arg(long, default_value = TRIGGER_WORKFLOW_FILE)]
    workflow: String,

    /// Print the resolved repositories without dispatching
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
struct MonitorArgs {
    /// Workspace root; the list is read from <workspace>/artifacts/merged-repos.txt
    #[arg(long, env = "GITHUB_WORKSPACE", default_value = ".")]
    workspace: PathBuf,

    /// Explicit path to the merged repositories list
    #[arg(long)]
    merged_file: Option<PathBuf>,

    /// Organization owning the monitored repositories
    #[arg(long, default_value = MONITOR_ORG)]
    org: String,

    /// Path of the workflow whose runs are awaited
    #[arg(long, default_value = MONITOR_WORKFLOW_PATH)]
    workflow_path: String,

    /// Seconds between polls
    #[arg(long, default_value_t = 15)]
    poll_interval_secs: u64,

    /// Seconds to wait for each repository before giving up
    #[arg(long, default_value_t = 3600)]
    max_wait_secs: u64,

    /// Markdown job summary file to append results to
    #[arg(long, env = "GITHUB_STEP_SUMMARY")]
    step_summary: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    release_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Trigger(args) => cmd_trigger(&cli.api_url, cli.token, args).await,
        Commands::Monitor(args) => cmd_monitor(&cli.api_url, cli.token, args).await,
    }
}

fn actions_client(api_url: &str, token: Option<String>) -> Result<ActionsClient> {
    let mut config = ActionsConfig::new(api_url);
    if let Some(token) = token.filter(|t| !t.is_empty()) {
        config = config.with_token(&token);
    }
    ActionsClient::new(config).context("Failed to create API client (is GITHUB_TOKEN set?)")
}

/// Resolve charts to repositories and dispatch their release workflow
async fn cmd_trigger(api_url: &str, token: Option<String>, args: TriggerArgs) -> Result<()> {
    let settings = TriggerSettings {
        owner: args.org,
        workflow_file: args.workflow,
        branch: args.branch,
        target: None,
    }
    .with_target(args.target_repo.as_deref());

    let charts = discover_charts(&args.file_location).context("Failed to list service charts")?;
    let plan = plan_trigger(&ChartMap::default(), charts, settings.target.as_deref())?;

    if args.dry_run {
        info!(
            "Dry run: would dispatch {} on {} to: {}",
            settings.workflow_file,
            settings.branch,
            plan.repos.join(", ")
        );
        for repo in &plan.repos {
            println!("{}/{}", settings.owner, repo);
        }
        return Ok(());
    }

    let dispatcher = OrgActions::new(actions_client(api_url, token)?, settings.owner.clone());
    trigger_releases(&dispatcher, &settings, &plan.repos).await?;
    Ok(())
}

/// Await release runs for every merged repository and summarise
async fn cmd_monitor(api_url: &str, token: Option<String>, args: MonitorArgs) -> Result<()> {
    let path = args
        .merged_file
        .unwrap_or_else(|| merged_repos_path(&args.workspace));
    let merged = load_merged_repos(&path);

    if merged.is_empty() {
        info!("⏩ No merged repositories to monitor");
        return Ok(());
    }

    let names: Vec<&str> = merged.iter().map(|m| m.repo.as_str()).collect();
    info!(
        "👀 Monitoring release workflows for:\n- {}",
        names.join("\n- ")
    );

    let settings = MonitorSettings {
        owner: args.org,
        workflow_path: args.workflow_path,
        poll_interval: Duration::from_secs(args.poll_interval_secs),
        max_wait: Duration::from_secs(args.max_wait_secs),
        ..MonitorSettings::default()
    };
    let source = OrgActions::new(actions_client(api_url, token)?, settings.owner.clone());
    let monitor = ReleaseMonitor::new(Arc::new(source), settings);

    let summary = monitor.monitor_all(&merged).await?;
    info!("📊 Release Monitoring Summary");
    println!("{}", summary.render());

    if let Some(step_summary) = &args.step_summary {
        if let Err(e) = summary.append_markdown(step_summary) {
            warn!("Could not write job summary to {:?}: {}", step_summary, e);
        }
    }

    summary.ensure_success()?;
    info!("🎉 All release workflows completed successfully");
    Ok(())
}
