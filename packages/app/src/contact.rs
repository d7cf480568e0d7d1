//! Contact form submission.
//!
//! Submitting `#contact-form` reads the named fields into a
//! [`ContactMessage`], puts the submit button into its sending state, hands
//! the message to a [`ContactTransport`] and reports the outcome with a
//! notification. The button is restored whatever the outcome.

use std::{cell::Cell, time::Duration};

use async_trait::async_trait;
use portfolio_config::ContactConfig;
use portfolio_dom::{Document, ElementId, SharedDocument};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::notification::{NotificationKind, Notifier};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendError {
    #[error("Transport unavailable: {0}")]
    Unavailable(String),
    #[error("Message rejected: {0}")]
    Rejected(String),
}

#[async_trait(?Send)]
pub trait ContactTransport {
    /// # Errors
    ///
    /// * If the message could not be delivered
    async fn send(&self, message: &ContactMessage) -> Result<(), SendError>;
}

/// Accepts every message after a fixed latency.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedTransport {
    latency: Duration,
}

impl SimulatedTransport {
    #[must_use]
    pub const fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000))
    }
}

#[async_trait(?Send)]
impl ContactTransport for SimulatedTransport {
    async fn send(&self, message: &ContactMessage) -> Result<(), SendError> {
        log::debug!("send: simulating delivery from {}", message.email);
        tokio::time::sleep(self.latency).await;
        Ok(())
    }
}

/// Submit button content set aside while a submission is pending.
#[derive(Debug)]
struct SavedButton {
    text: String,
    children: Vec<ElementId>,
    spinner: ElementId,
}

#[derive(Debug)]
struct Submission {
    message: ContactMessage,
    button: Option<SavedButton>,
}

#[derive(Debug)]
pub struct ContactForm {
    form: ElementId,
    button: Option<ElementId>,
    pending: Cell<bool>,
}

impl ContactForm {
    #[must_use]
    pub fn bind(document: &Document) -> Option<Self> {
        let form = document.find_by_str_id("contact-form")?;
        let button = document.descendants(form).into_iter().find(|id| {
            document
                .get(*id)
                .is_some_and(|x| x.tag == "button" && x.attribute("type") == Some("submit"))
        });

        Some(Self {
            form,
            button,
            pending: Cell::new(false),
        })
    }

    #[must_use]
    pub const fn form(&self) -> ElementId {
        self.form
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Whether a submit event on `target` belongs to this form.
    #[must_use]
    pub fn is_target(&self, document: &Document, target: ElementId) -> bool {
        document.is_descendant_of(target, self.form)
    }

    #[must_use]
    pub fn read_message(&self, document: &Document) -> ContactMessage {
        let field = |name: &str| {
            document
                .form_field(self.form, name)
                .and_then(|x| document.value(x))
                .unwrap_or_default()
                .to_string()
        };

        ContactMessage {
            name: field("name"),
            email: field("email"),
            subject: field("subject"),
            message: field("message"),
        }
    }

    fn begin(&self, document: &mut Document, config: &ContactConfig) -> Option<Submission> {
        if self.pending.replace(true) {
            log::debug!("begin: submission already pending");
            return None;
        }

        let message = self.read_message(document);
        let button = self.button.map(|button| {
            let text = document.text(button).unwrap_or_default().to_string();
            let children = document.take_children(button);

            let spinner = document.create_element("i");
            document.set_attribute(spinner, "class", config.sending_icon.as_str());
            document.append_child(button, spinner);
            document.set_text(button, config.sending_label.as_str());
            document.set_disabled(button, true);

            SavedButton {
                text,
                children,
                spinner,
            }
        });

        Some(Submission { message, button })
    }

    fn restore(&self, document: &mut Document, saved: Option<SavedButton>) {
        if let (Some(button), Some(saved)) = (self.button, saved) {
            document.remove(saved.spinner);
            for child in saved.children {
                document.append_child(button, child);
            }
            document.set_text(button, saved.text);
            document.set_disabled(button, false);
        }
        self.pending.set(false);
    }

    /// Runs one submission to completion. Returns `None` without side effects
    /// when a submission is already pending.
    pub async fn submit(
        &self,
        document: &SharedDocument,
        transport: &dyn ContactTransport,
        notifier: &Notifier,
        config: &ContactConfig,
    ) -> Option<Result<(), SendError>> {
        let submission = document.with_mut(|x| self.begin(x, config))?;

        let result = transport.send(&submission.message).await;

        match &result {
            Ok(()) => {
                log::info!("submit: message from {} sent", submission.message.email);
                notifier.show(NotificationKind::Success, &config.success_message);
                document.with_mut(|x| x.reset_form(self.form));
            }
            Err(e) => {
                log::warn!("submit: failed to send message: {e}");
                notifier.show(NotificationKind::Error, &config.error_message);
            }
        }

        document.with_mut(|x| self.restore(x, submission.button));

        Some(result)
    }
}
