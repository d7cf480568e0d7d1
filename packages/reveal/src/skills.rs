//! One-shot skill-bar reveal driven by polled geometry.

use portfolio_dom::{Document, ElementId};

use crate::ANIMATED_CLASS;

#[derive(Debug, Clone, Default)]
pub struct SkillBars {
    bars: Vec<ElementId>,
}

impl SkillBars {
    #[must_use]
    pub fn bind(document: &Document) -> Self {
        Self {
            bars: document.select_all(".skill-bar"),
        }
    }

    #[must_use]
    pub fn bars(&self) -> &[ElementId] {
        &self.bars
    }

    /// Reveals every bar that is vertically inside the viewport and not yet
    /// animated: its width becomes `<data-level>%` and it gets `animated`.
    /// Bars are never reverted.
    ///
    /// Returns the bars revealed by this call.
    pub fn reveal(&self, document: &mut Document) -> Vec<ElementId> {
        let viewport_height = document.viewport().height;
        let mut revealed = vec![];

        for bar in &self.bars {
            if document.has_class(*bar, ANIMATED_CLASS) {
                continue;
            }
            let Some(rect) = document.bounding_client_rect(*bar) else {
                continue;
            };
            if !(rect.top() < viewport_height && rect.bottom() > 0.0) {
                continue;
            }
            let Some(level) = fill_level(document, *bar) else {
                log::debug!("reveal: skill bar {bar} has no numeric data-level");
                continue;
            };

            document.set_style(*bar, "width", format!("{level}%"));
            document.add_class(*bar, ANIMATED_CLASS);
            revealed.push(*bar);
        }

        if !revealed.is_empty() {
            log::trace!("reveal: revealed skill bars {revealed:?}");
        }

        revealed
    }
}

/// The bar's `data-level` attribute, trimmed, if it is a number.
fn fill_level(document: &Document, bar: ElementId) -> Option<String> {
    let level = document.data_attr(bar, "level")?.trim();
    level.parse::<f32>().ok().filter(|x| x.is_finite())?;
    Some(level.to_string())
}
