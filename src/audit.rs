//! Static check of a page against the markup contract the browser wiring
//! expects.

use scraper::{ElementRef, Html, Selector};
use std::fmt;
use thiserror::Error;

use crate::contract::{
    DATA_REPO, DATA_TARGET, DATA_WIDTH, GALLERY_MAIN_IMG_ID, GALLERY_THUMB, GITHUB_STATS,
    HAMBURGER_ID, HEADER_ID, IN_PAGE_ANCHOR, NAV_LINK, NAV_LINKS_ID, REVEAL, SKILL_FILL,
    STAT_NUMBER,
};
use crate::effects::{anchor_selector, counter_target, skill_width};
use crate::nav::{active_links, current_page};
use crate::stats::RepoId;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("invalid selector {selector:?}: {message}")]
    Selector { selector: String, message: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finding {
    pub behavior: &'static str,
    pub matches: usize,
}

impl Finding {
    pub fn enabled(&self) -> bool {
        self.matches > 0
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageAudit {
    pub page: String,
    pub findings: Vec<Finding>,
    pub active_link: Option<String>,
    pub repos: Vec<String>,
    pub problems: Vec<String>,
}

impl PageAudit {
    pub fn finding(&self, behavior: &str) -> Option<&Finding> {
        self.findings.iter().find(|finding| finding.behavior == behavior)
    }
}

impl fmt::Display for PageAudit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "page: {}", self.page)?;
        for finding in &self.findings {
            let state = if finding.enabled() { "on " } else { "off" };
            writeln!(f, "  [{state}] {:<16} {}", finding.behavior, finding.matches)?;
        }
        match &self.active_link {
            Some(href) => writeln!(f, "  active link: {href}")?,
            None => writeln!(f, "  active link: none")?,
        }
        for repo in &self.repos {
            writeln!(f, "  stats repo: {repo}")?;
        }
        for problem in &self.problems {
            writeln!(f, "  problem: {problem}")?;
        }
        Ok(())
    }
}

fn selector(raw: &str) -> Result<Selector, AuditError> {
    Selector::parse(raw).map_err(|err| AuditError::Selector {
        selector: raw.to_string(),
        message: err.to_string(),
    })
}

fn select<'a>(document: &'a Html, raw: &str) -> Result<Vec<ElementRef<'a>>, AuditError> {
    let selector = selector(raw)?;
    Ok(document.select(&selector).collect())
}

fn by_id(document: &Html, id: &str) -> Result<usize, AuditError> {
    Ok(select(document, &format!("#{id}"))?.len().min(1))
}

/// Audits `html` as if it were served at `page` (a trailing path segment).
pub fn audit_page(html: &str, page: &str) -> Result<PageAudit, AuditError> {
    let document = Html::parse_document(html);
    let page = current_page(page).to_string();
    let mut problems = Vec::new();

    let nav_links = select(&document, NAV_LINK)?;
    let mobile_nav = by_id(&document, HAMBURGER_ID)? * by_id(&document, NAV_LINKS_ID)?;
    let header = by_id(&document, HEADER_ID)?;
    let reveal = select(&document, REVEAL)?;
    let skills = select(&document, SKILL_FILL)?;
    let counters = select(&document, STAT_NUMBER)?;
    let anchors = select(&document, IN_PAGE_ANCHOR)?;
    let gallery = by_id(&document, GALLERY_MAIN_IMG_ID)?;
    let thumbs = select(&document, GALLERY_THUMB)?;
    let stats = select(&document, GITHUB_STATS)?;

    for (index, bar) in skills.iter().enumerate() {
        let raw = bar.value().attr(DATA_WIDTH);
        if skill_width(raw).is_none() {
            problems.push(format!("{SKILL_FILL} #{index}: {DATA_WIDTH} = {raw:?}"));
        }
    }
    for (index, counter) in counters.iter().enumerate() {
        let raw = counter.value().attr(DATA_TARGET);
        if counter_target(raw).is_none() {
            problems.push(format!("{STAT_NUMBER} #{index}: {DATA_TARGET} = {raw:?}"));
        }
    }

    let mut repos = Vec::new();
    for container in &stats {
        let raw = container.value().attr(DATA_REPO).unwrap_or_default();
        match RepoId::parse(raw) {
            Ok(repo) => repos.push(repo.to_string()),
            Err(err) => problems.push(err.to_string()),
        }
    }

    let smooth_anchors = anchors
        .iter()
        .filter(|anchor| anchor_selector(anchor.value().attr("href")).is_some())
        .count();

    let flags = active_links(nav_links.iter().map(|link| link.value().attr("href")), &page);
    let active_link = nav_links
        .iter()
        .zip(flags)
        .find(|(_, active)| *active)
        .and_then(|(link, _)| link.value().attr("href"))
        .map(str::to_string);

    let findings = vec![
        Finding { behavior: "mobile nav", matches: mobile_nav },
        Finding { behavior: "nav links", matches: nav_links.len() },
        Finding { behavior: "sticky header", matches: header },
        Finding { behavior: "reveal", matches: reveal.len() },
        Finding { behavior: "skill bars", matches: skills.len() },
        Finding { behavior: "counters", matches: counters.len() },
        Finding { behavior: "smooth anchors", matches: smooth_anchors },
        Finding { behavior: "gallery", matches: gallery * thumbs.len() },
        Finding { behavior: "github stats", matches: stats.len() },
    ];

    Ok(PageAudit {
        page,
        findings,
        active_link,
        repos,
        problems,
    })
}
