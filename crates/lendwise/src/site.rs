/// Top-level pages reachable from the navbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Prediction,
    About,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::Prediction, Page::About];

    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Prediction => "/prediction",
            Page::About => "/about",
        }
    }

    /// Short key templates use to mark the active nav link.
    pub fn key(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Prediction => "prediction",
            Page::About => "about",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "LendWise · Smarter Lending",
            Page::Prediction => "LendWise · Credit Risk Prediction",
            Page::About => "LendWise · About",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|page| page.path() == normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_paths_with_optional_trailing_slash() {
        assert_eq!(Page::from_path("/"), Some(Page::Home));
        assert_eq!(Page::from_path("/prediction/"), Some(Page::Prediction));
        assert_eq!(Page::from_path("/about"), Some(Page::About));
        assert_eq!(Page::from_path("/pricing"), None);
    }
}
