//! Viewport intersection observer and the entrance class built on it.
//!
//! [`IntersectionObserver`] mirrors the browser primitive with a single
//! threshold: a target counts as intersecting when the visible fraction of
//! its box, measured against the viewport shrunk or grown by the root
//! margin, reaches the threshold. Entries are reported the first time a
//! target is checked and afterwards only when its intersecting state flips.

use std::{collections::BTreeMap, str::FromStr};

use portfolio_dom::{Document, ElementId, Rect};
use thiserror::Error;

use crate::ENTERED_CLASS;

/// Elements that receive the entrance class.
pub const ENTRANCE_SELECTOR: &str = "section, .project-card, .skill-item, .about-card";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RootMarginError {
    #[error("Root margin must have one to four values, got {0}")]
    ValueCount(usize),
    #[error("Invalid root margin value \"{0}\"")]
    InvalidValue(String),
}

/// One side of a [`RootMargin`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarginLength {
    Px(f32),
    /// Percentage of the root box's height (top, bottom) or width (left,
    /// right).
    Percent(f32),
}

impl Default for MarginLength {
    fn default() -> Self {
        Self::Px(0.0)
    }
}

impl MarginLength {
    #[must_use]
    pub fn resolve(self, basis: f32) -> f32 {
        match self {
            Self::Px(value) => value,
            Self::Percent(value) => basis * value / 100.0,
        }
    }
}

impl FromStr for MarginLength {
    type Err = RootMarginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |_| RootMarginError::InvalidValue(s.to_string());
        match s.strip_suffix('%') {
            Some(value) => value.parse().map(Self::Percent).map_err(invalid),
            None => s
                .strip_suffix("px")
                .unwrap_or(s)
                .parse()
                .map(Self::Px)
                .map_err(invalid),
        }
    }
}

/// Offsets applied to the viewport before intersecting. Negative values
/// shrink the root box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RootMargin {
    pub top: MarginLength,
    pub right: MarginLength,
    pub bottom: MarginLength,
    pub left: MarginLength,
}

impl RootMargin {
    /// A margin in pixels on every side.
    #[must_use]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top: MarginLength::Px(top),
            right: MarginLength::Px(right),
            bottom: MarginLength::Px(bottom),
            left: MarginLength::Px(left),
        }
    }

    #[must_use]
    pub fn apply(&self, root: Rect) -> Rect {
        let top = self.top.resolve(root.height);
        let right = self.right.resolve(root.width);
        let bottom = self.bottom.resolve(root.height);
        let left = self.left.resolve(root.width);

        Rect::new(
            root.x - left,
            root.y - top,
            root.width + left + right,
            root.height + top + bottom,
        )
    }
}

impl FromStr for RootMargin {
    type Err = RootMarginError;

    /// Parses CSS margin shorthand in pixels or percentages, e.g.
    /// `"0px 0px -50px 0px"` or `"0% 0% -10% 0%"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<MarginLength>, _>>()?;

        let (top, right, bottom, left) = match values.as_slice() {
            [all] => (*all, *all, *all, *all),
            [vertical, horizontal] => (*vertical, *horizontal, *vertical, *horizontal),
            [top, horizontal, bottom] => (*top, *horizontal, *bottom, *horizontal),
            [top, right, bottom, left] => (*top, *right, *bottom, *left),
            _ => return Err(RootMarginError::ValueCount(values.len())),
        };

        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f32,
    pub root_margin: RootMargin,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: RootMargin::new(0.0, 0.0, -50.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub is_intersecting: bool,
    pub intersection_ratio: f32,
    pub bounding_client_rect: Rect,
}

#[derive(Debug, Clone, Default)]
pub struct IntersectionObserver {
    options: ObserverOptions,
    targets: Vec<ElementId>,
    last_state: BTreeMap<ElementId, bool>,
}

impl IntersectionObserver {
    #[must_use]
    pub const fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            targets: vec![],
            last_state: BTreeMap::new(),
        }
    }

    pub fn observe(&mut self, target: ElementId) {
        if !self.targets.contains(&target) {
            self.targets.push(target);
        }
    }

    pub fn unobserve(&mut self, target: ElementId) {
        self.targets.retain(|x| *x != target);
        self.last_state.remove(&target);
    }

    #[must_use]
    pub fn targets(&self) -> &[ElementId] {
        &self.targets
    }

    /// Measures every observed target and returns the entries whose
    /// intersecting state is new or changed. Targets no longer in the
    /// document are dropped.
    pub fn take_records(&mut self, document: &Document) -> Vec<IntersectionEntry> {
        let viewport = document.viewport();
        let root = self
            .options
            .root_margin
            .apply(Rect::new(0.0, 0.0, viewport.width, viewport.height));

        self.targets.retain(|x| document.contains(*x));

        let mut entries = vec![];

        for target in &self.targets {
            let Some(rect) = document.bounding_client_rect(*target) else {
                continue;
            };
            let ratio = intersection_ratio(&root, &rect);
            let is_intersecting = if self.options.threshold > 0.0 {
                ratio >= self.options.threshold
            } else {
                rect.intersection(&root).is_some()
            };

            if self.last_state.insert(*target, is_intersecting) != Some(is_intersecting) {
                entries.push(IntersectionEntry {
                    target: *target,
                    is_intersecting,
                    intersection_ratio: ratio,
                    bounding_client_rect: rect,
                });
            }
        }

        entries
    }
}

fn intersection_ratio(root: &Rect, target: &Rect) -> f32 {
    let Some(intersection) = target.intersection(root) else {
        return 0.0;
    };
    let area = target.area();
    if area <= 0.0 {
        return 1.0;
    }
    (intersection.area() / area).clamp(0.0, 1.0)
}

/// Adds the permanent `entered` class to sections and cards the first time
/// they intersect the viewport.
#[derive(Debug, Clone)]
pub struct EntranceReveal {
    observer: IntersectionObserver,
}

impl EntranceReveal {
    #[must_use]
    pub fn bind(document: &Document, options: ObserverOptions) -> Self {
        let mut observer = IntersectionObserver::new(options);
        for id in document.select_all(ENTRANCE_SELECTOR) {
            observer.observe(id);
        }
        Self { observer }
    }

    #[must_use]
    pub const fn observer(&self) -> &IntersectionObserver {
        &self.observer
    }

    /// Returns the elements that entered during this pass. Entered elements
    /// are no longer observed.
    pub fn update(&mut self, document: &mut Document) -> Vec<ElementId> {
        let entered = self
            .observer
            .take_records(document)
            .into_iter()
            .filter(|x| x.is_intersecting)
            .map(|x| x.target)
            .filter(|x| document.add_class(*x, ENTERED_CLASS))
            .collect::<Vec<_>>();

        for id in &entered {
            self.observer.unobserve(*id);
        }

        entered
    }
}
