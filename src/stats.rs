//! GitHub repository stats widget: metadata model, failure kinds, and the
//! text each widget slot receives.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

pub const UNAVAILABLE_TEXT: &str = "Stats unavailable";
pub const UNAVAILABLE_BADGE_HTML: &str =
    r#"<span class="gh-badge" style="color:var(--text-muted);">Stats unavailable</span>"#;
const MISSING_LANGUAGE: &str = "N/A";

const TIME_UNITS: [(&str, i64); 6] = [
    ("year", 31_536_000),
    ("month", 2_592_000),
    ("week", 604_800),
    ("day", 86_400),
    ("hour", 3_600),
    ("minute", 60),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    #[error("invalid repository identifier: {0:?}")]
    InvalidRepo(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("GitHub API returned status {0}")]
    Status(u16),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

/// `owner/name` pair taken from a container's `data-repo`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoId {
    owner: String,
    name: String,
}

impl RepoId {
    pub fn parse(raw: &str) -> Result<Self, StatsError> {
        let invalid = || StatsError::InvalidRepo(raw.to_string());
        let (owner, name) = raw.trim().split_once('/').ok_or_else(invalid)?;

        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn api_url(&self, api_base: &str) -> String {
        format!(
            "{}/repos/{}/{}",
            api_base.trim_end_matches('/'),
            self.owner,
            self.name
        )
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Fields of `GET /repos/{owner}/{repo}` the widget reads.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct RepoMetadata {
    pub stargazers_count: u64,
    pub forks_count: u64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub pushed_at: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatsSlot {
    Stars,
    Forks,
    Language,
    Updated,
}

impl StatsSlot {
    pub const ALL: [StatsSlot; 4] = [Self::Stars, Self::Forks, Self::Language, Self::Updated];

    pub fn selector(self) -> &'static str {
        match self {
            Self::Stars => ".gh-stars",
            Self::Forks => ".gh-forks",
            Self::Language => ".gh-lang",
            Self::Updated => ".gh-updated",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsText {
    pub stars: String,
    pub forks: String,
    pub language: String,
    pub updated: String,
}

impl StatsText {
    pub fn from_metadata(metadata: &RepoMetadata, now: DateTime<Utc>) -> Self {
        let language = metadata
            .language
            .as_deref()
            .filter(|language| !language.is_empty())
            .unwrap_or(MISSING_LANGUAGE);
        let updated = metadata
            .pushed_at
            .as_deref()
            .and_then(parse_timestamp)
            .map(|pushed_at| time_ago(pushed_at, now))
            .unwrap_or_else(|| JUST_NOW.to_string());

        Self {
            stars: format!("{} Stars", metadata.stargazers_count),
            forks: format!("{} Forks", metadata.forks_count),
            language: language.to_string(),
            updated: format!("Updated {updated}"),
        }
    }

    pub fn get(&self, slot: StatsSlot) -> &str {
        match slot {
            StatsSlot::Stars => &self.stars,
            StatsSlot::Forks => &self.forks,
            StatsSlot::Language => &self.language,
            StatsSlot::Updated => &self.updated,
        }
    }
}

/// What a stats container shows once its fetch settles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatsUpdate {
    Filled(StatsText),
    Unavailable,
}

impl StatsUpdate {
    pub fn from_result(result: &Result<RepoMetadata, StatsError>, now: DateTime<Utc>) -> Self {
        match result {
            Ok(metadata) => Self::Filled(StatsText::from_metadata(metadata, now)),
            Err(_) => Self::Unavailable,
        }
    }

    /// Writes into `slots`. A failure only touches the badge area.
    pub fn apply(&self, slots: &mut impl StatsSlots) {
        match self {
            Self::Filled(text) => {
                for slot in StatsSlot::ALL {
                    slots.set_text(slot, text.get(slot));
                }
            }
            Self::Unavailable => slots.replace_badges(UNAVAILABLE_BADGE_HTML),
        }
    }
}

/// A stats container. Implementations skip slots the markup does not have.
pub trait StatsSlots {
    fn set_text(&mut self, slot: StatsSlot, text: &str);
    fn replace_badges(&mut self, html: &str);
}

const JUST_NOW: &str = "just now";

/// Coarse "N units ago" text for the time between `then` and `now`.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();

    for (label, unit) in TIME_UNITS {
        let count = seconds / unit;
        if count >= 1 {
            let plural = if count > 1 { "s" } else { "" };
            return format!("{count} {label}{plural} ago");
        }
    }

    JUST_NOW.to_string()
}

/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::collections::HashMap;

    fn now() -> DateTime<Utc> {
        parse_timestamp("2025-06-01T12:00:00Z").expect("valid timestamp")
    }

    fn ago(seconds: i64) -> String {
        time_ago(now() - Duration::seconds(seconds), now())
    }

    #[derive(Default)]
    struct RecordingSlots {
        text: HashMap<StatsSlot, String>,
        badges: Option<String>,
    }

    impl StatsSlots for RecordingSlots {
        fn set_text(&mut self, slot: StatsSlot, text: &str) {
            self.text.insert(slot, text.to_string());
        }

        fn replace_badges(&mut self, html: &str) {
            self.badges = Some(html.to_string());
        }
    }

    fn metadata(language: Option<&str>) -> RepoMetadata {
        RepoMetadata {
            stargazers_count: 12,
            forks_count: 1,
            language: language.map(str::to_string),
            pushed_at: Some("2025-05-31T12:00:00Z".to_string()),
        }
    }

    #[test]
    fn time_ago_picks_largest_whole_unit() {
        assert_eq!(ago(3_600), "1 hour ago");
        assert_eq!(ago(90_000), "1 day ago");
        assert_eq!(ago(30), "just now");
        assert_eq!(ago(59), "just now");
        assert_eq!(ago(60), "1 minute ago");
        assert_eq!(ago(7_200), "2 hours ago");
        assert_eq!(ago(604_800 * 3), "3 weeks ago");
        assert_eq!(ago(2_592_000), "1 month ago");
        assert_eq!(ago(31_536_000 * 2 + 5), "2 years ago");
    }

    #[test]
    fn future_timestamps_read_as_just_now() {
        assert_eq!(ago(-3_600), "just now");
    }

    #[test]
    fn parse_timestamp_accepts_dates_and_offsets() {
        assert_eq!(
            parse_timestamp("2025-06-01"),
            parse_timestamp("2025-06-01T00:00:00Z")
        );
        assert_eq!(
            parse_timestamp("2025-06-01T14:00:00+02:00"),
            Some(now())
        );
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn repo_id_requires_owner_and_name() {
        let repo = RepoId::parse("octocat/hello-world").expect("valid repo");
        assert_eq!(repo.to_string(), "octocat/hello-world");
        assert_eq!(
            repo.api_url("https://api.github.com/"),
            "https://api.github.com/repos/octocat/hello-world"
        );

        for raw in ["", "octocat", "/repo", "octocat/", "a/b/c"] {
            assert_eq!(
                RepoId::parse(raw),
                Err(StatsError::InvalidRepo(raw.to_string())),
                "raw = {raw:?}"
            );
        }
    }

    #[test]
    fn metadata_decodes_from_github_payload() {
        let payload = r#"{
            "full_name": "octocat/hello-world",
            "stargazers_count": 80,
            "forks_count": 9,
            "language": null,
            "pushed_at": "2025-05-01T00:00:00Z"
        }"#;
        let decoded: RepoMetadata = serde_json::from_str(payload).expect("decodes");
        assert_eq!(decoded.stargazers_count, 80);
        assert_eq!(decoded.language, None);
    }

    #[test]
    fn filled_update_writes_all_slots() {
        let update = StatsUpdate::from_result(&Ok(metadata(Some("Rust"))), now());
        let mut slots = RecordingSlots::default();
        update.apply(&mut slots);

        assert_eq!(slots.text[&StatsSlot::Stars], "12 Stars");
        assert_eq!(slots.text[&StatsSlot::Forks], "1 Forks");
        assert_eq!(slots.text[&StatsSlot::Language], "Rust");
        assert_eq!(slots.text[&StatsSlot::Updated], "Updated 1 day ago");
        assert_eq!(slots.badges, None);
    }

    #[test]
    fn missing_language_and_push_date_use_placeholders() {
        let mut metadata = metadata(Some(""));
        metadata.pushed_at = None;
        let text = StatsText::from_metadata(&metadata, now());

        assert_eq!(text.language, "N/A");
        assert_eq!(text.updated, "Updated just now");
    }

    #[test]
    fn failed_update_only_replaces_badges() {
        let update = StatsUpdate::from_result(&Err(StatsError::Status(404)), now());
        let mut slots = RecordingSlots::default();
        slots.text.insert(StatsSlot::Stars, "-- Stars".to_string());
        update.apply(&mut slots);

        assert_eq!(slots.badges.as_deref(), Some(UNAVAILABLE_BADGE_HTML));
        assert_eq!(slots.text.len(), 1);
        assert_eq!(slots.text[&StatsSlot::Stars], "-- Stars");
    }
}
