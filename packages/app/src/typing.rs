use std::time::Duration;

use portfolio_config::TypingConfig;
use portfolio_dom::{ElementId, SharedDocument};
use portfolio_typing::{TypingAnimator, TypingTarget, TypingTimings};
use tokio::task::JoinHandle;

use crate::loading::LoadingSignal;

/// The `.typing-text` element as a typing target.
#[derive(Debug, Clone)]
pub struct TypingText {
    document: SharedDocument,
    element: ElementId,
}

impl TypingTarget for TypingText {
    fn set_text(&mut self, text: &str) {
        self.document.with_mut(|x| x.set_text(self.element, text));
    }
}

#[must_use]
pub const fn timings(config: &TypingConfig) -> TypingTimings {
    TypingTimings {
        type_delay: Duration::from_millis(config.type_delay_ms),
        delete_delay: Duration::from_millis(config.delete_delay_ms),
        hold_delay: Duration::from_millis(config.hold_delay_ms),
        pause_delay: Duration::from_millis(config.pause_delay_ms),
    }
}

/// Starts the typing loop on `.typing-text` once `signal` fires and the
/// configured start delay has passed. Returns `None` when the page has no
/// typing element.
///
/// # Panics
///
/// * If called outside of a `LocalSet` context
pub fn spawn(
    document: &SharedDocument,
    animator: TypingAnimator,
    signal: LoadingSignal,
    start_delay: Duration,
) -> Option<JoinHandle<()>> {
    let Some(element) = document.with(|x| x.select(".typing-text")) else {
        log::trace!("spawn: no .typing-text element");
        return None;
    };

    let target = TypingText {
        document: document.clone(),
        element,
    };
    let ready = async move {
        signal.finished().await;
        tokio::time::sleep(start_delay).await;
    };

    Some(portfolio_task::spawn_local(
        "typing",
        portfolio_typing::run(animator, target, ready),
    ))
}
