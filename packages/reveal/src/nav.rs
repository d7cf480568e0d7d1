//! Scroll-driven navigation state: the active nav link and the navbar's
//! `scrolled` class.

use portfolio_dom::{Document, ElementId};

use crate::{ACTIVE_CLASS, SCROLLED_CLASS};

/// Highlights the nav link whose `href` fragment names the section under the
/// scroll position.
#[derive(Debug, Clone)]
pub struct ActiveNavLink {
    sections: Vec<ElementId>,
    links: Vec<ElementId>,
    offset: f32,
}

impl ActiveNavLink {
    /// Resolves `section[id]` and `.nav-link` elements once.
    #[must_use]
    pub fn bind(document: &Document, offset: f32) -> Self {
        Self {
            sections: document.select_all("section[id]"),
            links: document.select_all(".nav-link"),
            offset,
        }
    }

    #[must_use]
    pub fn links(&self) -> &[ElementId] {
        &self.links
    }

    /// Recomputes the active link from the current scroll offset.
    ///
    /// Every section containing `scroll_y + offset` clears `active` from all
    /// links and sets it on the links pointing at it, so the last matching
    /// section in document order wins. When no section matches the links are
    /// left as they are.
    ///
    /// Returns the link holding `active` after the pass, if any.
    pub fn update(&self, document: &mut Document) -> Option<ElementId> {
        let scroll_position = document.viewport().scroll_y + self.offset;

        for section in &self.sections {
            let (Some(top), Some(height)) = (
                document.offset_top(*section),
                document.offset_height(*section),
            ) else {
                continue;
            };
            let Some(section_id) = document.attribute(*section, "id").map(ToString::to_string)
            else {
                continue;
            };

            if scroll_position >= top && scroll_position < top + height {
                let href = format!("#{section_id}");
                for link in &self.links {
                    document.remove_class(*link, ACTIVE_CLASS);
                    if document.attribute(*link, "href") == Some(href.as_str()) {
                        document.add_class(*link, ACTIVE_CLASS);
                    }
                }
            }
        }

        self.links
            .iter()
            .copied()
            .find(|x| document.has_class(*x, ACTIVE_CLASS))
    }
}

/// Toggles `scrolled` on the navbar once the page is scrolled past a
/// threshold.
#[derive(Debug, Clone, Copy)]
pub struct ScrolledNavbar {
    navbar: Option<ElementId>,
    threshold: f32,
}

impl ScrolledNavbar {
    #[must_use]
    pub fn bind(document: &Document, threshold: f32) -> Self {
        Self {
            navbar: document.select(".navbar"),
            threshold,
        }
    }

    /// Returns whether the navbar is marked scrolled. Always `false` when the
    /// page has no navbar.
    pub fn update(&self, document: &mut Document) -> bool {
        let Some(navbar) = self.navbar else {
            return false;
        };

        if document.viewport().scroll_y > self.threshold {
            document.add_class(navbar, SCROLLED_CLASS);
            true
        } else {
            document.remove_class(navbar, SCROLLED_CLASS);
            false
        }
    }
}
