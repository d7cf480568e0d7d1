//! In-page anchor links scroll smoothly to their target, leaving room for
//! the fixed header.

use portfolio_dom::{Document, ElementId, ScrollBehavior, Selector};

const ANCHOR_SELECTOR: &str = r##"a[href^="#"]"##;

#[derive(Debug, Clone, Default)]
pub struct SmoothScroll {
    anchors: Vec<ElementId>,
    header_offset: f32,
}

impl SmoothScroll {
    #[must_use]
    pub fn bind(document: &Document, header_offset: f32) -> Self {
        Self {
            anchors: document.select_all(ANCHOR_SELECTOR),
            header_offset,
        }
    }

    /// The anchor link that `target` is, or is inside.
    #[must_use]
    pub fn anchor_for(&self, document: &Document, target: ElementId) -> Option<ElementId> {
        let selector = Selector::parse(ANCHOR_SELECTOR).ok()?;
        document
            .closest(target, &selector)
            .filter(|x| self.anchors.contains(x))
    }

    /// Resolves the element an anchor points at. `#` alone and unknown ids
    /// resolve to nothing.
    #[must_use]
    pub fn destination(&self, document: &Document, anchor: ElementId) -> Option<ElementId> {
        let id = document.attribute(anchor, "href")?.strip_prefix('#')?;
        if id.is_empty() {
            return None;
        }
        document.find_by_str_id(id)
    }

    /// Handles a click on `target`. Returns the applied scroll offset when the
    /// click landed on an anchor with a resolvable destination.
    pub fn follow(&self, document: &mut Document, target: ElementId) -> Option<f32> {
        let anchor = self.anchor_for(document, target)?;
        let Some(destination) = self.destination(document, anchor) else {
            log::trace!("follow: anchor {anchor} has no destination");
            return None;
        };
        let top = document.offset_top(destination)? - self.header_offset;
        let applied = document.scroll_to(top, ScrollBehavior::Smooth);
        log::debug!("follow: anchor {anchor} -> element {destination} at {applied}");
        Some(applied)
    }
}
