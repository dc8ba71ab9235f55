const HOME_PAGE: &str = "index.html";

/// Open state of the mobile menu. The DOM keeps the truth as a class on the
/// toggle and the link panel; this mirrors it for a single transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    pub fn from_open(open: bool) -> Self {
        if open {
            Self::Open
        } else {
            Self::Closed
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Trailing path segment of `pathname`, or the home page for a bare directory.
pub fn current_page(pathname: &str) -> &str {
    match pathname.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => HOME_PAGE,
    }
}

/// Whether a link with `href` should carry the active marker on `page`.
pub fn is_active_link(href: Option<&str>, page: &str) -> bool {
    href == Some(page)
}

/// Active flag for each link href, in order.
pub fn active_links<'a>(
    hrefs: impl IntoIterator<Item = Option<&'a str>>,
    page: &str,
) -> Vec<bool> {
    hrefs
        .into_iter()
        .map(|href| is_active_link(href, page))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_returns_to_closed() {
        let state = MenuState::default();
        assert!(state.toggled().is_open());
        assert_eq!(state.toggled().toggled(), MenuState::Closed);
        assert_eq!(MenuState::from_open(true), MenuState::Open);
    }

    #[test]
    fn current_page_takes_trailing_segment() {
        assert_eq!(current_page("/site/projects.html"), "projects.html");
        assert_eq!(current_page("contact.html"), "contact.html");
    }

    #[test]
    fn current_page_defaults_to_home_for_directories() {
        assert_eq!(current_page(""), "index.html");
        assert_eq!(current_page("/"), "index.html");
        assert_eq!(current_page("/portfolio/"), "index.html");
    }

    #[test]
    fn exactly_the_matching_link_is_active() {
        let hrefs = [
            Some("index.html"),
            Some("projects.html"),
            Some("contact.html"),
        ];
        let flags = active_links(hrefs, current_page("projects.html"));
        assert_eq!(flags, vec![false, true, false]);
    }

    #[test]
    fn links_without_href_or_with_paths_never_match() {
        let hrefs = [None, Some("/projects.html"), Some("Projects.html")];
        assert_eq!(active_links(hrefs, "projects.html"), vec![false; 3]);
    }
}
