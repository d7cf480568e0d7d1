//! Toast notifications appended to the page body.

use std::time::Duration;

use portfolio_config::NotificationConfig;
use portfolio_dom::{ElementId, SharedDocument};
use serde::{Deserialize, Serialize};

pub const SHOW_CLASS: &str = "show";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    Success,
    Error,
    #[default]
    Info,
}

impl NotificationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "check-circle",
            Self::Error | Self::Info => "exclamation-circle",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Notifier {
    document: SharedDocument,
    show_delay: Duration,
    display: Duration,
    remove_delay: Duration,
}

impl Notifier {
    #[must_use]
    pub const fn new(document: SharedDocument, config: &NotificationConfig) -> Self {
        Self {
            document,
            show_delay: Duration::from_millis(config.show_delay_ms),
            display: Duration::from_millis(config.display_ms),
            remove_delay: Duration::from_millis(config.remove_delay_ms),
        }
    }

    /// Appends `div.notification.notification-<kind>` to the body and
    /// schedules its show, hide and removal.
    ///
    /// # Panics
    ///
    /// * If called outside of a `LocalSet` context
    pub fn show(&self, kind: NotificationKind, message: &str) -> ElementId {
        let id = self.document.with_mut(|document| {
            let notification = document.create_element("div");
            document.set_attribute(
                notification,
                "class",
                format!("notification notification-{kind}"),
            );

            let content = document.create_element("div");
            document.set_attribute(content, "class", "notification-content");
            let icon = document.create_element("i");
            document.set_attribute(icon, "class", format!("fas fa-{}", kind.icon()));
            let text = document.create_element("span");
            document.set_text(text, message);

            document.append_child(content, icon);
            document.append_child(content, text);
            document.append_child(notification, content);
            let body = document.body();
            document.append_child(body, notification);

            notification
        });

        log::debug!("show: {kind} notification {id}: {message}");

        let document = self.document.clone();
        portfolio_task::spawn_local_after("notification: show", self.show_delay, move || {
            document.with_mut(|x| x.add_class(id, SHOW_CLASS));
        });

        let document = self.document.clone();
        let display = self.display;
        let remove_delay = self.remove_delay;
        portfolio_task::spawn_local("notification: dismiss", async move {
            tokio::time::sleep(display).await;
            document.with_mut(|x| x.remove_class(id, SHOW_CLASS));
            tokio::time::sleep(remove_delay).await;
            document.with_mut(|x| x.remove(id));
            log::trace!("show: removed notification {id}");
        });

        id
    }
}
