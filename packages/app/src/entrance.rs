//! Staggered hero entrance once the loading splash is gone.

use std::time::Duration;

use portfolio_dom::{Document, ElementId, SharedDocument};

pub const ENTRANCE_SELECTOR: &str = ".animate-text, .hero-buttons, .hero-visual";

#[derive(Debug, Clone, Default)]
pub struct EntranceAnimation {
    targets: Vec<ElementId>,
    stagger: Duration,
}

impl EntranceAnimation {
    #[must_use]
    pub fn bind(document: &Document, stagger: Duration) -> Self {
        Self {
            targets: document.select_all(ENTRANCE_SELECTOR),
            stagger,
        }
    }

    #[must_use]
    pub fn targets(&self) -> &[ElementId] {
        &self.targets
    }

    /// Schedules target `i` to become visible `i * stagger` from now.
    ///
    /// # Panics
    ///
    /// * If called outside of a `LocalSet` context
    pub fn schedule(&self, document: &SharedDocument) {
        for (index, id) in self.targets.iter().copied().enumerate() {
            let document = document.clone();
            let delay = self.stagger * u32::try_from(index).unwrap_or(u32::MAX);
            portfolio_task::spawn_local_after("entrance", delay, move || {
                document.with_mut(|x| {
                    x.set_style(id, "opacity", "1");
                    x.set_style(id, "transform", "translateY(0)");
                });
            });
        }
    }
}
