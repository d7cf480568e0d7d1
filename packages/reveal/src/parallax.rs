//! Hero parallax and the throttle that rate-limits it.

use std::time::Duration;

use portfolio_dom::{Document, ElementId};
use tokio::time::Instant;

/// What a throttled caller should do with the current invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleDecision {
    /// Run now.
    Run,
    /// Run once after the given wait, with whatever state is current then.
    Schedule(Duration),
    /// A trailing run is already scheduled.
    Skip,
}

/// Leading-edge throttle with a single trailing call.
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    delay: Duration,
    last_run: Option<Instant>,
    trailing_pending: bool,
}

impl Throttle {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_run: None,
            trailing_pending: false,
        }
    }

    pub fn call(&mut self, now: Instant) -> ThrottleDecision {
        let elapsed = self.last_run.map(|x| now.saturating_duration_since(x));

        match elapsed {
            Some(elapsed) if elapsed <= self.delay => {
                if self.trailing_pending {
                    ThrottleDecision::Skip
                } else {
                    self.trailing_pending = true;
                    ThrottleDecision::Schedule(self.delay - elapsed)
                }
            }
            _ => {
                self.last_run = Some(now);
                ThrottleDecision::Run
            }
        }
    }

    /// Records that the scheduled trailing run happened.
    pub const fn complete_trailing(&mut self, now: Instant) {
        self.trailing_pending = false;
        self.last_run = Some(now);
    }
}

/// Moves the hero section at a fraction of the scroll speed.
#[derive(Debug, Clone, Copy)]
pub struct Parallax {
    hero: Option<ElementId>,
    factor: f32,
}

impl Parallax {
    #[must_use]
    pub fn bind(document: &Document, factor: f32) -> Self {
        Self {
            hero: document.select(".hero"),
            factor,
        }
    }

    pub fn apply(&self, document: &mut Document) {
        let Some(hero) = self.hero else {
            return;
        };
        let offset = document.viewport().scroll_y * self.factor;
        document.set_style(hero, "transform", format!("translateY({offset}px)"));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test_log::test(tokio::test(start_paused = true))]
    async fn throttle_runs_leading_then_one_trailing() {
        let mut throttle = Throttle::new(Duration::from_millis(10));
        let start = Instant::now();

        assert_eq!(throttle.call(start), ThrottleDecision::Run);
        assert_eq!(
            throttle.call(start + Duration::from_millis(4)),
            ThrottleDecision::Schedule(Duration::from_millis(6))
        );
        assert_eq!(
            throttle.call(start + Duration::from_millis(7)),
            ThrottleDecision::Skip
        );

        throttle.complete_trailing(start + Duration::from_millis(10));

        assert_eq!(
            throttle.call(start + Duration::from_millis(21)),
            ThrottleDecision::Run
        );
    }

    #[test_log::test]
    fn parallax_translates_hero_by_half_the_scroll() {
        let mut document = Document::default();
        let body = document.body();
        let hero = document.create_element("section");
        document.set_attribute(hero, "class", "hero");
        document.append_child(body, hero);
        let parallax = Parallax::bind(&document, 0.5);

        document.set_scroll_y(500.0);
        parallax.apply(&mut document);
        assert_eq!(document.style(hero, "transform"), Some("translateY(250px)"));

        document.set_scroll_y(25.0);
        parallax.apply(&mut document);
        assert_eq!(document.style(hero, "transform"), Some("translateY(12.5px)"));
    }
}
