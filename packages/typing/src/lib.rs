//! Typed-text hero effect.
//!
//! [`TypingAnimator`] cycles through an ordered list of phrases, typing each
//! one character at a time, holding it, deleting it, pausing, then moving on
//! to the next phrase. The cycle never terminates.
//!
//! The animator itself is a pure state machine: every call to
//! [`TypingAnimator::tick`] returns the text to display and how long to wait
//! before the next tick. [`run`] drives it on the tokio timer.
//!
//! ```rust
//! use portfolio_typing::{TypingAnimator, TypingTimings};
//!
//! let mut animator = TypingAnimator::new(["Go", "Rust"], TypingTimings::default()).unwrap();
//!
//! assert_eq!(animator.tick().text, "G");
//! assert_eq!(animator.tick().text, "Go");
//! assert!(animator.is_deleting());
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::{future::Future, time::Duration};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Delays between animator ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingTimings {
    /// Delay after typing a character.
    pub type_delay: Duration,
    /// Delay after deleting a character.
    pub delete_delay: Duration,
    /// Hold once a phrase is fully typed, before deleting starts.
    pub hold_delay: Duration,
    /// Pause once a phrase is fully deleted, before the next one starts.
    pub pause_delay: Duration,
}

impl Default for TypingTimings {
    fn default() -> Self {
        Self {
            type_delay: Duration::from_millis(100),
            delete_delay: Duration::from_millis(50),
            hold_delay: Duration::from_millis(2000),
            pause_delay: Duration::from_millis(500),
        }
    }
}

/// The ordered, wrapping list of phrases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseCycle {
    phrases: Vec<String>,
    lengths: Vec<usize>,
}

impl PhraseCycle {
    /// # Errors
    ///
    /// * [`Error::InvalidConfiguration`] - If `phrases` is empty
    pub fn new<I, S>(phrases: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases = phrases.into_iter().map(Into::into).collect::<Vec<String>>();

        if phrases.is_empty() {
            return Err(Error::InvalidConfiguration(
                "typing effect needs at least one phrase".to_string(),
            ));
        }

        let lengths = phrases.iter().map(|x| x.chars().count()).collect();

        Ok(Self { phrases, lengths })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Always `false`: an empty cycle cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    #[must_use]
    pub fn phrase(&self, index: usize) -> &str {
        &self.phrases[index % self.phrases.len()]
    }

    /// Length of the phrase in characters.
    #[must_use]
    pub fn char_len(&self, index: usize) -> usize {
        self.lengths[index % self.lengths.len()]
    }
}

/// One display-text mutation produced by [`TypingAnimator::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingStep {
    pub text: String,
    pub delay: Duration,
}

#[derive(Debug, Clone)]
pub struct TypingAnimator {
    cycle: PhraseCycle,
    timings: TypingTimings,
    phrase_index: usize,
    char_index: usize,
    is_deleting: bool,
}

impl TypingAnimator {
    /// # Errors
    ///
    /// * [`Error::InvalidConfiguration`] - If `phrases` is empty
    pub fn new<I, S>(phrases: I, timings: TypingTimings) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::from_cycle(PhraseCycle::new(phrases)?, timings))
    }

    #[must_use]
    pub const fn from_cycle(cycle: PhraseCycle, timings: TypingTimings) -> Self {
        Self {
            cycle,
            timings,
            phrase_index: 0,
            char_index: 0,
            is_deleting: false,
        }
    }

    #[must_use]
    pub const fn phrase_index(&self) -> usize {
        self.phrase_index
    }

    #[must_use]
    pub const fn char_index(&self) -> usize {
        self.char_index
    }

    #[must_use]
    pub const fn is_deleting(&self) -> bool {
        self.is_deleting
    }

    #[must_use]
    pub fn phrase_count(&self) -> usize {
        self.cycle.len()
    }

    #[must_use]
    pub fn current_phrase(&self) -> &str {
        self.cycle.phrase(self.phrase_index)
    }

    /// The first `char_index` characters of the current phrase.
    #[must_use]
    pub fn displayed_text(&self) -> &str {
        let phrase = self.current_phrase();
        let end = phrase
            .char_indices()
            .nth(self.char_index)
            .map_or(phrase.len(), |(i, _)| i);
        &phrase[..end]
    }

    /// Advances the animation by one character and returns the new text plus
    /// the delay before the next tick.
    pub fn tick(&mut self) -> TypingStep {
        let len = self.cycle.char_len(self.phrase_index);

        let mut delay = if self.is_deleting {
            self.char_index = self.char_index.saturating_sub(1);
            self.timings.delete_delay
        } else {
            self.char_index = (self.char_index + 1).min(len);
            self.timings.type_delay
        };

        let text = self.displayed_text().to_string();

        if !self.is_deleting && self.char_index == len {
            delay = self.timings.hold_delay;
            self.is_deleting = true;
        } else if self.is_deleting && self.char_index == 0 {
            self.is_deleting = false;
            self.phrase_index = (self.phrase_index + 1) % self.cycle.len();
            delay = self.timings.pause_delay;
            log::trace!("tick: advancing to phrase {}", self.phrase_index);
        }

        TypingStep { text, delay }
    }
}

/// Where the animator writes its text.
pub trait TypingTarget {
    fn set_text(&mut self, text: &str);
}

impl<F: FnMut(&str)> TypingTarget for F {
    fn set_text(&mut self, text: &str) {
        self(text);
    }
}

/// Drives `animator` forever once `ready` resolves, writing each step into
/// `target` and sleeping for the step's delay between ticks.
pub async fn run<T, R>(mut animator: TypingAnimator, mut target: T, ready: R)
where
    T: TypingTarget,
    R: Future<Output = ()>,
{
    ready.await;

    log::debug!(
        "run: starting typing effect with {} phrases",
        animator.phrase_count()
    );

    loop {
        let step = animator.tick();
        target.set_text(&step.text);
        tokio::time::sleep(step.delay).await;
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use pretty_assertions::assert_eq;

    use super::*;

    fn animator(phrases: &[&str]) -> TypingAnimator {
        TypingAnimator::new(phrases.iter().copied(), TypingTimings::default()).unwrap()
    }

    #[test_log::test]
    fn empty_phrase_list_is_rejected() {
        assert!(matches!(
            TypingAnimator::new(Vec::<String>::new(), TypingTimings::default()),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test_log::test]
    fn full_cycle_of_first_phrase_advances_to_second() {
        let mut animator = animator(&["Go", "Rust"]);

        let steps = (0..4).map(|_| animator.tick()).collect::<Vec<_>>();

        assert_eq!(
            steps,
            vec![
                TypingStep {
                    text: "G".to_string(),
                    delay: Duration::from_millis(100),
                },
                TypingStep {
                    text: "Go".to_string(),
                    delay: Duration::from_millis(2000),
                },
                TypingStep {
                    text: "G".to_string(),
                    delay: Duration::from_millis(50),
                },
                TypingStep {
                    text: String::new(),
                    delay: Duration::from_millis(500),
                },
            ]
        );
        assert_eq!(animator.phrase_index(), 1);
        assert_eq!(animator.displayed_text(), "");
        assert!(!animator.is_deleting());
        assert_eq!(animator.tick().text, "R");
    }

    #[test_log::test]
    fn text_is_always_a_prefix_and_moves_monotonically() {
        for phrases in [
            vec!["Go", "Rust"],
            vec!["a"],
            vec!["", "x", ""],
            vec!["héllo wörld", "日本語"],
            vec!["AI & ML Enthusiast", "Full-Stack Developer", "Problem Solver"],
        ] {
            let mut animator = animator(&phrases);
            let mut previous_len = 0;

            for _ in 0..500 {
                let deleting_before = animator.is_deleting();
                let phrase_before = animator.current_phrase().to_string();
                let step = animator.tick();
                let len = step.text.chars().count();

                assert!(
                    phrase_before.starts_with(&step.text),
                    "{:?} is not a prefix of {phrase_before:?}",
                    step.text
                );
                assert!(animator.char_index() <= animator.cycle.char_len(animator.phrase_index()));
                if deleting_before {
                    assert!(len <= previous_len);
                } else {
                    assert!(len >= previous_len);
                }

                previous_len = len;
            }
        }
    }

    #[test_log::test]
    fn phrase_index_wraps_after_count_cycles() {
        let mut animator = animator(&["one", "two", "three"]);
        let mut advances = vec![];

        while advances.len() < 3 {
            let before = animator.phrase_index();
            animator.tick();
            if animator.phrase_index() != before {
                assert_eq!(animator.phrase_index(), (before + 1) % 3);
                advances.push(animator.phrase_index());
            }
        }

        assert_eq!(advances, vec![1, 2, 0]);
        assert_eq!(animator.phrase_index(), 0);
    }

    #[test_log::test]
    fn empty_phrase_holds_then_advances() {
        let mut animator = animator(&["", "b"]);

        let hold = animator.tick();
        assert_eq!(hold.text, "");
        assert_eq!(hold.delay, Duration::from_millis(2000));
        assert!(animator.is_deleting());

        let pause = animator.tick();
        assert_eq!(pause.text, "");
        assert_eq!(pause.delay, Duration::from_millis(500));
        assert_eq!(animator.phrase_index(), 1);
    }

    #[test_log::test]
    fn multibyte_phrases_are_sliced_by_char() {
        let mut animator = animator(&["日本"]);

        assert_eq!(animator.tick().text, "日");
        assert_eq!(animator.tick().text, "日本");
        assert_eq!(animator.tick().text, "日");
    }

    #[test_log::test(tokio::test(start_paused = true))]
    async fn run_writes_steps_on_the_timer() {
        let start = tokio::time::Instant::now();
        let written = Rc::new(RefCell::new(vec![]));
        let sink = written.clone();

        let result = tokio::time::timeout(
            Duration::from_millis(2200),
            run(
                animator(&["Go"]),
                move |text: &str| {
                    let elapsed = start.elapsed().as_millis();
                    sink.borrow_mut().push((elapsed, text.to_string()));
                },
                tokio::time::sleep(Duration::from_millis(0)),
            ),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(
            *written.borrow(),
            vec![
                (0, "G".to_string()),
                (100, "Go".to_string()),
                (2100, "G".to_string()),
                (2150, String::new()),
            ]
        );
    }

    #[test_log::test(tokio::test(start_paused = true))]
    async fn run_waits_for_ready() {
        let start = tokio::time::Instant::now();
        let first = Rc::new(RefCell::new(None));
        let sink = first.clone();

        let _ = tokio::time::timeout(
            Duration::from_millis(3050),
            run(
                animator(&["Rust"]),
                move |_: &str| {
                    sink.borrow_mut().get_or_insert(start.elapsed().as_millis());
                },
                tokio::time::sleep(Duration::from_millis(3000)),
            ),
        )
        .await;

        assert_eq!(*first.borrow(), Some(3000));
    }
}
