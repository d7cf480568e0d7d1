//! Mobile navigation menu toggling.

use portfolio_dom::{Document, ElementId};
use portfolio_reveal::ACTIVE_CLASS;

pub const NAV_OPEN_CLASS: &str = "nav-open";

#[derive(Debug, Clone, Default)]
pub struct NavigationMenu {
    hamburger: Option<ElementId>,
    menu: Option<ElementId>,
    links: Vec<ElementId>,
}

impl NavigationMenu {
    #[must_use]
    pub fn bind(document: &Document) -> Self {
        Self {
            hamburger: document.select(".hamburger"),
            menu: document.select(".nav-menu"),
            links: document.select_all(".nav-link"),
        }
    }

    /// Whether `target` is the hamburger button or inside it.
    #[must_use]
    pub fn is_toggle(&self, document: &Document, target: ElementId) -> bool {
        self.hamburger
            .is_some_and(|x| document.is_descendant_of(target, x))
    }

    /// Whether `target` is a nav link or inside one.
    #[must_use]
    pub fn is_link(&self, document: &Document, target: ElementId) -> bool {
        self.links
            .iter()
            .any(|x| document.is_descendant_of(target, *x))
    }

    /// Flips the menu open or closed. Returns whether it is now open.
    pub fn toggle(&self, document: &mut Document) -> bool {
        if let Some(hamburger) = self.hamburger {
            document.toggle_class(hamburger, ACTIVE_CLASS);
        }
        if let Some(menu) = self.menu {
            document.toggle_class(menu, ACTIVE_CLASS);
        }
        let body = document.body();
        let open = document.toggle_class(body, NAV_OPEN_CLASS);
        log::debug!("toggle: nav_open={open}");
        open
    }

    pub fn close(&self, document: &mut Document) {
        if let Some(hamburger) = self.hamburger {
            document.remove_class(hamburger, ACTIVE_CLASS);
        }
        if let Some(menu) = self.menu {
            document.remove_class(menu, ACTIVE_CLASS);
        }
        let body = document.body();
        document.remove_class(body, NAV_OPEN_CLASS);
    }
}
