use std::time::Duration;

const DEFAULT_HEADER_SCROLL_THRESHOLD_PX: f64 = 60.0;
const DEFAULT_REVEAL_THRESHOLD: f64 = 0.15;
const DEFAULT_SKILL_THRESHOLD: f64 = 0.3;
const DEFAULT_COUNTER_THRESHOLD: f64 = 0.5;
const DEFAULT_COUNTER_DURATION_MS: f64 = 1_800.0;
const DEFAULT_FRAME_INTERVAL_MS: f64 = 16.0;
const DEFAULT_GALLERY_FADE_MS: i32 = 200;

pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";
const DEFAULT_USER_AGENT: &str = "portfolio-interactions/0.1";
const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;
const HTTP_TIMEOUT_MS_BOUNDS: (u64, u64) = (100, 120_000);

pub const GITHUB_API_BASE_ENV: &str = "PORTFOLIO_GITHUB_API_BASE";
pub const HTTP_TIMEOUT_MS_ENV: &str = "PORTFOLIO_HTTP_TIMEOUT_MS";

/// Tuning for the scroll and visibility driven effects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectsConfig {
    pub header_scroll_threshold_px: f64,
    pub reveal_threshold: f64,
    pub skill_threshold: f64,
    pub counter_threshold: f64,
    pub counter_duration_ms: f64,
    pub frame_interval_ms: f64,
    pub gallery_fade_ms: i32,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            header_scroll_threshold_px: DEFAULT_HEADER_SCROLL_THRESHOLD_PX,
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            skill_threshold: DEFAULT_SKILL_THRESHOLD,
            counter_threshold: DEFAULT_COUNTER_THRESHOLD,
            counter_duration_ms: DEFAULT_COUNTER_DURATION_MS,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            gallery_fade_ms: DEFAULT_GALLERY_FADE_MS,
        }
    }
}

impl EffectsConfig {
    /// Number of frames a counter animation is paced over.
    pub fn counter_frames(&self) -> f64 {
        self.counter_duration_ms / self.frame_interval_ms
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsConfig {
    pub api_base: String,
    pub user_agent: String,
    pub request_timeout: Duration,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_GITHUB_API_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS),
        }
    }
}

impl StatsConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads overrides through `lookup`; invalid values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let api_base = parse_http_base(&lookup, GITHUB_API_BASE_ENV).unwrap_or(defaults.api_base);
        let timeout_ms = parse_u64_with_bounds(
            &lookup,
            HTTP_TIMEOUT_MS_ENV,
            DEFAULT_HTTP_TIMEOUT_MS,
            HTTP_TIMEOUT_MS_BOUNDS,
        );

        Self {
            api_base,
            user_agent: defaults.user_agent,
            request_timeout: Duration::from_millis(timeout_ms),
        }
    }
}

fn parse_u64_with_bounds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: u64,
    bounds: (u64, u64),
) -> u64 {
    lookup(name)
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_non_empty(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_http_base(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    let value = parse_non_empty(lookup, name)?;
    let scheme = value.split_once("://")?.0;

    if scheme == "http" || scheme == "https" {
        Some(value.trim_end_matches('/').to_string())
    } else {
        None
    }
}
