use chrono::Utc;
use clap::{ArgAction, Parser, Subcommand};
use scraper::Html;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use crate::audit::{audit_page, AuditError};
use crate::config::StatsConfig;
use crate::github::GithubClient;
use crate::stats::{RepoId, StatsError, StatsSlot, StatsSlots, StatsUpdate};

#[derive(Debug, Parser)]
#[command(name = "portfolio-interactions", version, about = "Maintenance tools for the portfolio site")]
pub struct Cli {
    /// Repeat for more log output.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the stats widget text for repositories (`owner/name`).
    Stats {
        #[arg(required = true)]
        repos: Vec<String>,
    },
    /// Check a page against the markup the scripts expect.
    Audit {
        path: PathBuf,
        /// Page name used for the active link (defaults to the file name).
        #[arg(long)]
        page: Option<String>,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Audit(#[from] AuditError),
    #[error(transparent)]
    Stats(#[from] StatsError),
}

pub fn init_tracing(verbose: u8) {
    let default_level = if verbose > 0 { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

pub async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Stats { repos } => {
            let report = stats_report(&StatsConfig::from_env(), &repos).await?;
            print!("{report}");
        }
        Command::Audit { path, page } => {
            let audit = audit_file(&path, page.as_deref()).await?;
            if !audit.problems.is_empty() {
                warn!(problems = audit.problems.len(), "page has invalid data attributes");
            }
            print!("{audit}");
        }
    }
    Ok(())
}

async fn audit_file(path: &Path, page: Option<&str>) -> Result<crate::audit::PageAudit, CliError> {
    let html = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let page = page
        .map(str::to_string)
        .or_else(|| path.file_name().map(|name| name.to_string_lossy().into_owned()))
        .unwrap_or_default();

    debug!(path = %path.display(), %page, "auditing page");
    Ok(audit_page(&html, &page)?)
}

/// Widget text for one repository, in the order the widget shows it.
#[derive(Debug, Default)]
pub struct PlainSlots {
    lines: Vec<(StatsSlot, String)>,
    badges: Option<String>,
}

impl PlainSlots {
    pub fn text(&self, slot: StatsSlot) -> Option<&str> {
        self.lines
            .iter()
            .find(|(candidate, _)| *candidate == slot)
            .map(|(_, text)| text.as_str())
    }

    /// Visible text of the badge area, if it was replaced.
    pub fn badges(&self) -> Option<&str> {
        self.badges.as_deref()
    }
}

impl StatsSlots for PlainSlots {
    fn set_text(&mut self, slot: StatsSlot, text: &str) {
        self.lines.retain(|(candidate, _)| *candidate != slot);
        self.lines.push((slot, text.to_string()));
    }

    fn replace_badges(&mut self, html: &str) {
        let fragment = Html::parse_fragment(html);
        let text: String = fragment.root_element().text().collect();
        self.badges = Some(text.trim().to_string());
    }
}

/// Fetches every repository concurrently and renders each as the widget would.
pub async fn fetch_slots(
    config: &StatsConfig,
    repos: &[String],
) -> Result<Vec<(String, PlainSlots)>, CliError> {
    let client = GithubClient::new(config)?;

    let handles: Vec<_> = repos
        .iter()
        .map(|raw| {
            let client = client.clone();
            let raw = raw.clone();
            tokio::spawn(async move {
                let result = match RepoId::parse(&raw) {
                    Ok(repo) => client.repo(&repo).await,
                    Err(err) => Err(err),
                };
                (raw, result)
            })
        })
        .collect();

    let mut rendered = Vec::with_capacity(handles.len());
    for handle in handles {
        let (raw, result) = match handle.await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(%err, "stats task failed");
                continue;
            }
        };
        match &result {
            Ok(_) => info!(repo = %raw, "stats loaded"),
            Err(err) => warn!(repo = %raw, %err, "stats unavailable"),
        }

        let mut slots = PlainSlots::default();
        StatsUpdate::from_result(&result, Utc::now()).apply(&mut slots);
        rendered.push((raw, slots));
    }

    Ok(rendered)
}

async fn stats_report(config: &StatsConfig, repos: &[String]) -> Result<String, CliError> {
    let mut report = String::new();
    for (repo, slots) in fetch_slots(config, repos).await? {
        report.push_str(&repo);
        report.push('\n');
        if let Some(badges) = slots.badges() {
            report.push_str(&format!("  {badges}\n"));
        }
        for (_, text) in &slots.lines {
            report.push_str(&format!("  {text}\n"));
        }
    }
    Ok(report)
}
