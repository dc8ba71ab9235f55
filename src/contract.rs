//! Names the page markup is expected to carry. Both the browser wiring and
//! the native audit resolve elements through these.

pub const HAMBURGER_ID: &str = "hamburger";
pub const NAV_LINKS_ID: &str = "navLinks";
pub const HEADER_ID: &str = "header";
pub const GALLERY_MAIN_IMG_ID: &str = "galleryMainImg";

pub const NAV_LINK: &str = ".nav-link";
pub const REVEAL: &str = ".reveal";
pub const SKILL_FILL: &str = ".skill-fill";
pub const STAT_NUMBER: &str = ".stat-number";
pub const GALLERY_THUMB: &str = ".gallery-thumb";
pub const GITHUB_STATS: &str = ".github-stats[data-repo]";
pub const GITHUB_STATS_BADGES: &str = ".github-stats-badges";
pub const IN_PAGE_ANCHOR: &str = "a[href^=\"#\"]";

pub const DATA_WIDTH: &str = "data-width";
pub const DATA_TARGET: &str = "data-target";
pub const DATA_REPO: &str = "data-repo";

pub const OPEN_CLASS: &str = "open";
pub const ACTIVE_CLASS: &str = "active";
pub const SCROLLED_CLASS: &str = "scrolled";
pub const VISIBLE_CLASS: &str = "visible";

pub const GALLERY_COMMAND: &str = "changeGalleryImage";
