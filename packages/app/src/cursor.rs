//! Custom cursor dot and follower.

use portfolio_dom::{Document, ElementId};

pub const HOVER_CLASS: &str = "hover";
pub const INTERACTIVE_SELECTOR: &str = "a, button, .project-card, .skill-item";

#[derive(Debug, Clone)]
pub struct Cursor {
    dot: ElementId,
    follower: ElementId,
    interactive: Vec<ElementId>,
}

impl Cursor {
    /// Binds the cursor when both `.cursor` and `.cursor-follower` exist.
    #[must_use]
    pub fn bind(document: &Document) -> Option<Self> {
        let (Some(dot), Some(follower)) = (
            document.select(".cursor"),
            document.select(".cursor-follower"),
        ) else {
            log::trace!("bind: custom cursor disabled");
            return None;
        };

        Some(Self {
            dot,
            follower,
            interactive: document.select_all(INTERACTIVE_SELECTOR),
        })
    }

    pub fn move_to(&self, document: &mut Document, x: f32, y: f32) {
        for id in [self.dot, self.follower] {
            document.set_style(id, "left", format!("{x}px"));
            document.set_style(id, "top", format!("{y}px"));
        }
    }

    #[must_use]
    pub fn is_interactive(&self, target: ElementId) -> bool {
        self.interactive.contains(&target)
    }

    /// Applies hover state for a pointer entering or leaving `target`.
    /// Returns `false` when `target` is not interactive.
    pub fn set_hover(&self, document: &mut Document, target: ElementId, hovering: bool) -> bool {
        if !self.is_interactive(target) {
            return false;
        }
        for id in [self.dot, self.follower] {
            if hovering {
                document.add_class(id, HOVER_CLASS);
            } else {
                document.remove_class(id, HOVER_CLASS);
            }
        }
        true
    }
}
