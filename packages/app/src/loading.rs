//! Loading splash and the loading-finished signal.

use std::{cell::Cell, time::Duration};

use portfolio_config::LoadingConfig;
use portfolio_dom::{Document, ElementId, SharedDocument};
use tokio::sync::watch;

/// Resolves once the loading splash is gone.
#[derive(Debug, Clone)]
pub struct LoadingSignal(watch::Receiver<bool>);

impl LoadingSignal {
    #[must_use]
    pub fn is_finished(&self) -> bool {
        *self.0.borrow()
    }

    /// Waits for the splash to finish. Returns immediately if it already has.
    /// Never resolves if the loading screen is dropped without finishing.
    pub async fn finished(mut self) {
        if self.0.wait_for(|x| *x).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[derive(Debug)]
pub struct LoadingScreen {
    element: Option<ElementId>,
    fade_delay: Duration,
    hide_delay: Duration,
    started: Cell<bool>,
    finished: watch::Sender<bool>,
}

impl LoadingScreen {
    #[must_use]
    pub fn bind(document: &Document, config: &LoadingConfig) -> Self {
        let element = document.find_by_str_id("loading");
        if element.is_none() {
            log::trace!("bind: no #loading element");
        }
        let (finished, _) = watch::channel(false);

        Self {
            element,
            fade_delay: config.fade_delay(),
            hide_delay: config.hide_delay(),
            started: Cell::new(false),
            finished,
        }
    }

    #[must_use]
    pub fn signal(&self) -> LoadingSignal {
        LoadingSignal(self.finished.subscribe())
    }

    /// Marks the page load as handled. Returns `false` when it already was.
    pub fn begin(&self) -> bool {
        !self.started.replace(true)
    }

    /// Fades the splash out, hides it and restores body scrolling.
    pub async fn dismiss(&self, document: &SharedDocument) {
        tokio::time::sleep(self.fade_delay).await;
        if let Some(element) = self.element {
            document.with_mut(|x| x.set_style(element, "opacity", "0"));
        }

        tokio::time::sleep(self.hide_delay).await;
        document.with_mut(|x| {
            if let Some(element) = self.element {
                x.set_style(element, "display", "none");
            }
            let body = x.body();
            x.set_style(body, "overflow", "visible");
        });
        log::debug!("dismiss: loading screen hidden");
    }

    /// Publishes the loading-finished signal.
    pub fn finish(&self) {
        self.finished.send_replace(true);
    }
}
