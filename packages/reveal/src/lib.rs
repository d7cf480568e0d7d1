//! Scroll-driven reveal and activation.
//!
//! [`ScrollReveal`] derives independent, idempotent visual states from the
//! scroll position and element geometry of a [`Document`]:
//!
//! * the active nav link ([`nav::ActiveNavLink`])
//! * the navbar's `scrolled` class ([`nav::ScrolledNavbar`])
//! * one-shot skill-bar widths ([`skills::SkillBars`])
//! * one-shot entrance classes via an intersection observer
//!   ([`observer::EntranceReveal`])
//!
//! Missing targets are tolerated everywhere: an empty page simply produces
//! empty updates.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use portfolio_dom::{Document, ElementId};

pub mod nav;
pub mod observer;
pub mod parallax;
pub mod skills;

pub use observer::{IntersectionObserver, MarginLength, ObserverOptions, RootMargin};

pub const ACTIVE_CLASS: &str = "active";
pub const ANIMATED_CLASS: &str = "animated";
pub const ENTERED_CLASS: &str = "entered";
pub const SCROLLED_CLASS: &str = "scrolled";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    /// Added to the scroll offset before locating the current section.
    pub active_offset: f32,
    /// Scroll offset past which the navbar is marked `scrolled`.
    pub scrolled_threshold: f32,
    pub observer: ObserverOptions,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            active_offset: 200.0,
            scrolled_threshold: 100.0,
            observer: ObserverOptions::default(),
        }
    }
}

/// What changed during one scroll pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollUpdate {
    pub scrolled: bool,
    pub active_link: Option<ElementId>,
    pub revealed_bars: Vec<ElementId>,
    pub entered: Vec<ElementId>,
}

#[derive(Debug, Clone)]
pub struct ScrollReveal {
    active_link: nav::ActiveNavLink,
    navbar: nav::ScrolledNavbar,
    skill_bars: skills::SkillBars,
    entrance: observer::EntranceReveal,
}

impl ScrollReveal {
    /// Resolves every target once and runs the initial skill-bar and
    /// entrance pass, which covers content visible before any scrolling.
    pub fn bind(document: &mut Document, options: RevealOptions) -> (Self, ScrollUpdate) {
        let mut reveal = Self {
            active_link: nav::ActiveNavLink::bind(document, options.active_offset),
            navbar: nav::ScrolledNavbar::bind(document, options.scrolled_threshold),
            skill_bars: skills::SkillBars::bind(document),
            entrance: observer::EntranceReveal::bind(document, options.observer),
        };

        log::debug!(
            "bind: {} nav links, {} skill bars, {} entrance targets",
            reveal.active_link.links().len(),
            reveal.skill_bars.bars().len(),
            reveal.entrance.observer().targets().len(),
        );

        let initial = ScrollUpdate {
            scrolled: false,
            active_link: None,
            revealed_bars: reveal.skill_bars.reveal(document),
            entered: reveal.entrance.update(document),
        };

        (reveal, initial)
    }

    /// Runs every scroll-driven recomputation against the document's current
    /// scroll offset.
    pub fn on_scroll(&mut self, document: &mut Document) -> ScrollUpdate {
        ScrollUpdate {
            scrolled: self.navbar.update(document),
            active_link: self.active_link.update(document),
            revealed_bars: self.skill_bars.reveal(document),
            entered: self.entrance.update(document),
        }
    }

    /// Re-checks visibility without touching navigation state, e.g. after a
    /// viewport resize.
    pub fn on_resize(&mut self, document: &mut Document) -> ScrollUpdate {
        ScrollUpdate {
            revealed_bars: self.skill_bars.reveal(document),
            entered: self.entrance.update(document),
            ..ScrollUpdate::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use portfolio_dom::{PageDescription, Rect};
    use pretty_assertions::assert_eq;

    use super::*;

    fn document() -> Document {
        PageDescription::from_json5(
            r##"{
                viewport: { width: 1000, height: 800 },
                body: [
                    {
                        tag: "nav",
                        class: "navbar",
                        children: [
                            { tag: "a", class: "nav-link", attributes: { href: "#home" } },
                            { tag: "a", class: "nav-link", attributes: { href: "#skills" } },
                        ],
                    },
                    { tag: "section", id: "home", rect: { x: 0, y: 0, width: 1000, height: 900 } },
                    {
                        tag: "section",
                        id: "skills",
                        rect: { x: 0, y: 900, width: 1000, height: 900 },
                        children: [
                            {
                                tag: "div",
                                class: "skill-bar",
                                attributes: { "data-level": "80" },
                                rect: { x: 0, y: 1200, width: 500, height: 10 },
                            },
                        ],
                    },
                ],
            }"##,
        )
        .unwrap()
        .into_document()
    }

    #[test_log::test]
    fn initial_pass_reveals_only_visible_content() {
        let mut document = document();
        let home = document.find_by_str_id("home").unwrap();

        let (_, initial) = ScrollReveal::bind(&mut document, RevealOptions::default());

        assert_eq!(initial.revealed_bars, Vec::<ElementId>::new());
        assert_eq!(initial.entered, vec![home]);
    }

    #[test_log::test]
    fn scrolling_to_skills_updates_everything() {
        let mut document = document();
        let skills = document.find_by_str_id("skills").unwrap();
        let bar = document.select(".skill-bar").unwrap();
        let links = document.select_all(".nav-link");
        let (mut reveal, _) = ScrollReveal::bind(&mut document, RevealOptions::default());

        document.set_scroll_y(900.0);
        let update = reveal.on_scroll(&mut document);

        assert_eq!(
            update,
            ScrollUpdate {
                scrolled: true,
                active_link: Some(links[1]),
                revealed_bars: vec![bar],
                entered: vec![skills],
            }
        );
        assert_eq!(document.style(bar, "width"), Some("80%"));
    }

    #[test_log::test]
    fn resize_reveals_newly_visible_bars() {
        let mut document = document();
        let bar = document.select(".skill-bar").unwrap();
        document.set_rect(bar, Rect::new(0.0, 850.0, 500.0, 10.0));
        let (mut reveal, initial) = ScrollReveal::bind(&mut document, RevealOptions::default());
        assert!(initial.revealed_bars.is_empty());

        document.set_viewport_size(1000.0, 1000.0);

        assert_eq!(reveal.on_resize(&mut document).revealed_bars, vec![bar]);
    }

    #[test_log::test]
    fn empty_document_is_tolerated() {
        let mut document = Document::default();
        let (mut reveal, initial) = ScrollReveal::bind(&mut document, RevealOptions::default());

        document.set_scroll_y(300.0);

        assert_eq!(initial, ScrollUpdate::default());
        assert_eq!(
            reveal.on_scroll(&mut document),
            ScrollUpdate {
                scrolled: false,
                ..ScrollUpdate::default()
            }
        );
    }
}
