//! Portfolio page controller.
//!
//! [`Portfolio`] binds every page component to a [`SharedDocument`] once, at
//! the DOM-ready moment, and then reacts to [`PageEvent`]s fed in by a host.
//! Deferred work (timers, the typing loop, the contact transport) runs as
//! named local tasks, so the controller must be created and driven inside a
//! tokio `LocalSet`.
//!
//! ```rust,no_run
//! use portfolio_app::{PageEvent, Portfolio};
//! use portfolio_config::PortfolioConfig;
//! use portfolio_dom::{Document, SharedDocument};
//!
//! # async fn example() -> Result<(), portfolio_app::Error> {
//! let local = tokio::task::LocalSet::new();
//! local
//!     .run_until(async {
//!         let document = SharedDocument::new(Document::default());
//!         let portfolio = Portfolio::new(document, PortfolioConfig::default())?;
//!         portfolio.dispatch(PageEvent::Load);
//!         portfolio.dispatch(PageEvent::Scroll { y: 400.0 });
//!         Ok(())
//!     })
//!     .await
//! # }
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::{cell::RefCell, rc::Rc, time::Duration};

use portfolio_config::{ConfigError, PortfolioConfig};
use portfolio_dom::{ElementId, SharedDocument};
use portfolio_reveal::{
    ObserverOptions, RevealOptions, ScrollReveal, ScrollUpdate,
    observer::RootMarginError,
    parallax::{Parallax, Throttle, ThrottleDecision},
};
use portfolio_typing::TypingAnimator;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::{task::JoinHandle, time::Instant};

pub mod contact;
pub mod cursor;
pub mod entrance;
pub mod floating;
pub mod loading;
pub mod navigation;
pub mod notification;
pub mod smooth_scroll;
pub mod stylesheet;
pub mod typing;

use contact::{ContactForm, ContactTransport, SimulatedTransport};
use cursor::Cursor;
use entrance::EntranceAnimation;
use loading::{LoadingScreen, LoadingSignal};
use navigation::NavigationMenu;
use notification::Notifier;
use smooth_scroll::SmoothScroll;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Typing(#[from] portfolio_typing::Error),
    #[error(transparent)]
    RootMargin(#[from] RootMarginError),
}

/// Page-wide UI flags owned by the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub is_loading: bool,
    pub nav_open: bool,
    pub cursor: Option<(f32, f32)>,
    pub hovering: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            is_loading: true,
            nav_open: false,
            cursor: None,
            hovering: false,
        }
    }
}

/// Input delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PageEvent {
    /// Every resource finished loading (`window.onload`).
    Load,
    Scroll { y: f32 },
    Resize { width: f32, height: f32 },
    Click { target: ElementId },
    Submit { target: ElementId },
    MouseMove { x: f32, y: f32 },
    MouseEnter { target: ElementId },
    MouseLeave { target: ElementId },
}

struct Inner {
    document: SharedDocument,
    config: PortfolioConfig,
    state: RefCell<UiState>,
    reveal: RefCell<ScrollReveal>,
    throttle: RefCell<Throttle>,
    parallax: Parallax,
    menu: NavigationMenu,
    smooth_scroll: SmoothScroll,
    contact: Option<ContactForm>,
    cursor: Option<Cursor>,
    loading: LoadingScreen,
    entrance: EntranceAnimation,
    notifier: Notifier,
    transport: Rc<dyn ContactTransport>,
    typing: Option<JoinHandle<()>>,
}

/// Cheaply cloneable handle to the page controller.
#[derive(Clone)]
pub struct Portfolio {
    inner: Rc<Inner>,
}

impl std::fmt::Debug for Portfolio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Portfolio")
            .field("state", &self.inner.state.borrow())
            .field("contact", &self.inner.contact.is_some())
            .field("cursor", &self.inner.cursor.is_some())
            .field("typing", &self.inner.typing.is_some())
            .finish_non_exhaustive()
    }
}

impl Portfolio {
    /// Binds the page with the simulated contact transport.
    ///
    /// # Errors
    ///
    /// * If the config is invalid
    ///
    /// # Panics
    ///
    /// * If called outside of a `LocalSet` context
    pub fn new(document: SharedDocument, config: PortfolioConfig) -> Result<Self, Error> {
        let transport = Rc::new(SimulatedTransport::new(config.contact.simulated_latency()));
        Self::with_transport(document, config, transport)
    }

    /// Binds the page: resolves every component's targets, injects the
    /// stylesheet, runs the first reveal pass and schedules the floating
    /// animations and the typing loop.
    ///
    /// # Errors
    ///
    /// * If the config is invalid
    /// * If the reveal root margin cannot be parsed
    ///
    /// # Panics
    ///
    /// * If called outside of a `LocalSet` context
    pub fn with_transport(
        document: SharedDocument,
        config: PortfolioConfig,
        transport: Rc<dyn ContactTransport>,
    ) -> Result<Self, Error> {
        config.validate()?;

        let animator = TypingAnimator::new(
            config.typing.phrases.iter().cloned(),
            typing::timings(&config.typing),
        )?;
        let options = RevealOptions {
            active_offset: config.navigation.active_offset,
            scrolled_threshold: config.navigation.scrolled_threshold,
            observer: ObserverOptions {
                threshold: config.reveal.threshold,
                root_margin: config.reveal.root_margin.parse()?,
            },
        };

        let mut doc = document.borrow_mut();
        stylesheet::inject(&mut doc);
        let (reveal, initial) = ScrollReveal::bind(&mut doc, options);
        let parallax = Parallax::bind(&doc, config.parallax.factor);
        let menu = NavigationMenu::bind(&doc);
        let smooth_scroll = SmoothScroll::bind(&doc, config.navigation.header_offset);
        let contact = ContactForm::bind(&doc);
        let cursor = Cursor::bind(&doc);
        let loading = LoadingScreen::bind(&doc, &config.loading);
        let entrance = EntranceAnimation::bind(
            &doc,
            Duration::from_millis(config.entrance.stagger_ms),
        );
        drop(doc);

        log::debug!(
            "with_transport: initial pass revealed {} skill bars, {} entrance targets",
            initial.revealed_bars.len(),
            initial.entered.len(),
        );

        floating::schedule(&document, &config.floating);
        let typing = typing::spawn(
            &document,
            animator,
            loading.signal(),
            config.typing.start_delay(),
        );
        let notifier = Notifier::new(document.clone(), &config.notifications);

        log::info!("Portfolio initialized");

        Ok(Self {
            inner: Rc::new(Inner {
                document,
                throttle: RefCell::new(Throttle::new(Duration::from_millis(
                    config.parallax.throttle_ms,
                ))),
                config,
                state: RefCell::new(UiState::default()),
                reveal: RefCell::new(reveal),
                parallax,
                menu,
                smooth_scroll,
                contact,
                cursor,
                loading,
                entrance,
                notifier,
                transport,
                typing,
            }),
        })
    }

    #[must_use]
    pub fn document(&self) -> &SharedDocument {
        &self.inner.document
    }

    #[must_use]
    pub fn config(&self) -> &PortfolioConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn state(&self) -> UiState {
        self.inner.state.borrow().clone()
    }

    #[must_use]
    pub fn loading_signal(&self) -> LoadingSignal {
        self.inner.loading.signal()
    }

    #[must_use]
    pub fn has_typing(&self) -> bool {
        self.inner.typing.is_some()
    }

    /// Reacts to a host event. Deferred effects are spawned on the current
    /// `LocalSet`.
    ///
    /// # Panics
    ///
    /// * If called outside of a `LocalSet` context
    pub fn dispatch(&self, event: PageEvent) {
        log::trace!("dispatch: {event:?}");

        match event {
            PageEvent::Load => self.on_load(),
            PageEvent::Scroll { y } => {
                self.inner.document.with_mut(|x| {
                    let y = y.clamp(0.0, x.max_scroll_y());
                    x.set_scroll_y(y);
                });
                self.on_scroll();
            }
            PageEvent::Resize { width, height } => self.on_resize(width, height),
            PageEvent::Click { target } => self.on_click(target),
            PageEvent::Submit { target } => self.on_submit(target),
            PageEvent::MouseMove { x, y } => self.on_mouse_move(x, y),
            PageEvent::MouseEnter { target } => self.on_hover(target, true),
            PageEvent::MouseLeave { target } => self.on_hover(target, false),
        }
    }

    fn on_load(&self) {
        if !self.inner.loading.begin() {
            log::debug!("on_load: already loaded");
            return;
        }

        let this = self.clone();
        portfolio_task::spawn_local("loading", async move {
            let inner = &this.inner;
            inner.loading.dismiss(&inner.document).await;
            inner.state.borrow_mut().is_loading = false;
            inner.entrance.schedule(&inner.document);
            inner.loading.finish();
        });
    }

    fn on_scroll(&self) -> ScrollUpdate {
        let inner = &self.inner;
        let update = inner
            .document
            .with_mut(|x| inner.reveal.borrow_mut().on_scroll(x));

        if !update.revealed_bars.is_empty() || !update.entered.is_empty() {
            log::debug!(
                "on_scroll: revealed bars {:?}, entered {:?}",
                update.revealed_bars,
                update.entered
            );
        }

        self.on_parallax();

        update
    }

    fn on_parallax(&self) {
        let inner = &self.inner;
        let decision = inner.throttle.borrow_mut().call(Instant::now());

        match decision {
            ThrottleDecision::Run => {
                inner.document.with_mut(|x| inner.parallax.apply(x));
            }
            ThrottleDecision::Schedule(delay) => {
                let this = self.clone();
                portfolio_task::spawn_local_after("parallax", delay, move || {
                    let inner = &this.inner;
                    inner.throttle.borrow_mut().complete_trailing(Instant::now());
                    inner.document.with_mut(|x| inner.parallax.apply(x));
                });
            }
            ThrottleDecision::Skip => {}
        }
    }

    fn on_resize(&self, width: f32, height: f32) {
        let inner = &self.inner;
        inner.document.with_mut(|x| {
            x.set_viewport_size(width, height);
            inner.reveal.borrow_mut().on_resize(x)
        });
    }

    fn on_click(&self, target: ElementId) {
        let inner = &self.inner;

        let nav_open = inner.document.with_mut(|x| {
            if inner.menu.is_toggle(x, target) {
                Some(inner.menu.toggle(x))
            } else if inner.menu.is_link(x, target) {
                inner.menu.close(x);
                Some(false)
            } else {
                None
            }
        });
        if let Some(nav_open) = nav_open {
            inner.state.borrow_mut().nav_open = nav_open;
        }

        let scrolled = inner
            .document
            .with_mut(|x| inner.smooth_scroll.follow(x, target));
        if scrolled.is_some() {
            self.on_scroll();
        }
    }

    fn on_submit(&self, target: ElementId) {
        let Some(form) = &self.inner.contact else {
            return;
        };
        if !self.inner.document.with(|x| form.is_target(x, target)) {
            return;
        }
        if form.is_pending() {
            log::debug!("on_submit: submission already pending");
            return;
        }

        let this = self.clone();
        portfolio_task::spawn_local("contact: submit", async move {
            let inner = &this.inner;
            if let Some(form) = &inner.contact {
                form.submit(
                    &inner.document,
                    inner.transport.as_ref(),
                    &inner.notifier,
                    &inner.config.contact,
                )
                .await;
            }
        });
    }

    fn on_mouse_move(&self, x: f32, y: f32) {
        let Some(cursor) = &self.inner.cursor else {
            return;
        };
        self.inner.document.with_mut(|d| cursor.move_to(d, x, y));
        self.inner.state.borrow_mut().cursor = Some((x, y));
    }

    fn on_hover(&self, target: ElementId, hovering: bool) {
        let Some(cursor) = &self.inner.cursor else {
            return;
        };
        if self
            .inner
            .document
            .with_mut(|x| cursor.set_hover(x, target, hovering))
        {
            self.inner.state.borrow_mut().hovering = hovering;
        }
    }
}

#[cfg(test)]
mod tests {
    use portfolio_dom::{Document, PageDescription};
    use portfolio_reveal::{ACTIVE_CLASS, ANIMATED_CLASS, ENTERED_CLASS, SCROLLED_CLASS};
    use pretty_assertions::assert_eq;
    use tokio::task::LocalSet;

    use super::*;

    const PAGE: &str = r##"{
        viewport: { width: 1000, height: 800 },
        body: [
            { tag: "div", id: "loading" },
            { tag: "div", class: "cursor" },
            { tag: "div", class: "cursor-follower" },
            {
                tag: "nav",
                class: "navbar",
                children: [
                    { tag: "div", class: "hamburger" },
                    {
                        tag: "ul",
                        class: "nav-menu",
                        children: [
                            { tag: "a", class: "nav-link", attributes: { href: "#home" } },
                            { tag: "a", class: "nav-link", attributes: { href: "#about" } },
                            { tag: "a", class: "nav-link", attributes: { href: "#skills" } },
                        ],
                    },
                ],
            },
            {
                tag: "section",
                id: "home",
                class: "hero",
                rect: { x: 0, y: 0, width: 1000, height: 800 },
                children: [
                    { tag: "h1", class: "animate-text" },
                    { tag: "span", class: "typing-text" },
                    { tag: "div", class: "hero-buttons" },
                ],
            },
            {
                tag: "section",
                id: "about",
                rect: { x: 0, y: 800, width: 1000, height: 800 },
                children: [
                    { tag: "div", class: "about-card", rect: { x: 0, y: 900, width: 400, height: 300 } },
                ],
            },
            {
                tag: "section",
                id: "skills",
                rect: { x: 0, y: 1600, width: 1000, height: 800 },
                children: [
                    {
                        tag: "div",
                        class: "skill-item",
                        rect: { x: 0, y: 1700, width: 400, height: 100 },
                        children: [
                            {
                                tag: "div",
                                class: "skill-bar",
                                attributes: { "data-level": "90" },
                                rect: { x: 0, y: 1750, width: 300, height: 10 },
                            },
                        ],
                    },
                ],
            },
            {
                tag: "section",
                id: "contact",
                rect: { x: 0, y: 2400, width: 1000, height: 800 },
                children: [
                    {
                        tag: "form",
                        id: "contact-form",
                        children: [
                            { tag: "input", attributes: { name: "name" }, value: "Ada" },
                            { tag: "input", attributes: { name: "email" }, value: "ada@example.com" },
                            { tag: "button", attributes: { type: "submit" }, text: "Send Message" },
                        ],
                    },
                ],
            },
        ],
    }"##;

    fn document() -> SharedDocument {
        SharedDocument::new(PageDescription::from_json5(PAGE).unwrap().into_document())
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn select(portfolio: &Portfolio, selector: &str) -> ElementId {
        portfolio.document().with(|x| x.select(selector)).unwrap()
    }

    fn text(portfolio: &Portfolio, selector: &str) -> String {
        let id = select(portfolio, selector);
        portfolio
            .document()
            .with(|x| x.text(id).unwrap_or_default().to_string())
    }

    fn style(portfolio: &Portfolio, id: ElementId, property: &str) -> Option<String> {
        portfolio
            .document()
            .with(|x| x.style(id, property).map(ToString::to_string))
    }

    fn has_class(portfolio: &Portfolio, id: ElementId, class: &str) -> bool {
        portfolio.document().with(|x| x.has_class(id, class))
    }

    #[test_log::test]
    fn invalid_config_is_rejected() {
        let mut config = PortfolioConfig::default();
        config.typing.phrases.clear();

        assert!(matches!(
            Portfolio::new(document(), config),
            Err(Error::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test_log::test]
    fn invalid_root_margin_is_rejected() {
        let mut config = PortfolioConfig::default();
        config.reveal.root_margin = "1em".to_string();

        assert!(matches!(
            Portfolio::new(document(), config),
            Err(Error::RootMargin(_))
        ));
    }

    #[test_log::test(tokio::test(start_paused = true))]
    async fn empty_page_tolerates_every_event() {
        LocalSet::new()
            .run_until(async {
                let portfolio = Portfolio::new(
                    SharedDocument::new(Document::default()),
                    PortfolioConfig::default(),
                )
                .unwrap();
                let body = portfolio.document().with(Document::body);
                let signal = portfolio.loading_signal();

                assert!(!portfolio.has_typing());

                for event in [
                    PageEvent::Load,
                    PageEvent::Scroll { y: 500.0 },
                    PageEvent::Resize {
                        width: 600.0,
                        height: 400.0,
                    },
                    PageEvent::Click { target: body },
                    PageEvent::Submit { target: body },
                    PageEvent::MouseMove { x: 10.0, y: 20.0 },
                    PageEvent::MouseEnter { target: body },
                    PageEvent::MouseLeave { target: body },
                ] {
                    portfolio.dispatch(event);
                }

                tokio::time::sleep(ms(3100)).await;

                assert!(signal.is_finished());
                assert_eq!(
                    portfolio.state(),
                    UiState {
                        is_loading: false,
                        ..UiState::default()
                    }
                );
                portfolio.document().with(|x| {
                    assert!(x.viewport().scroll_y.abs() < f32::EPSILON);
                    assert!((x.viewport().width - 600.0).abs() < f32::EPSILON);
                    assert_eq!(x.style(body, "overflow"), Some("visible"));
                    assert!(x.get(body).unwrap().classes.is_empty());
                    assert!(x.select_all(".notification").is_empty());
                });
            })
            .await;
    }

    #[test_log::test(tokio::test(start_paused = true))]
    async fn construction_injects_styles_and_runs_first_pass() {
        LocalSet::new()
            .run_until(async {
                let portfolio = Portfolio::new(document(), PortfolioConfig::default()).unwrap();
                let home = select(&portfolio, "#home");
                let about = select(&portfolio, "#about");

                assert!(portfolio.has_typing());
                assert_eq!(portfolio.state(), UiState::default());
                assert_eq!(
                    portfolio.document().with(|x| x.select_all("style").len()),
                    1
                );
                assert!(has_class(&portfolio, home, ENTERED_CLASS));
                assert!(!has_class(&portfolio, about, ENTERED_CLASS));
            })
            .await;
    }

    #[test_log::test(tokio::test(start_paused = true))]
    async fn load_hides_splash_then_typing_starts() {
        LocalSet::new()
            .run_until(async {
                let portfolio = Portfolio::new(document(), PortfolioConfig::default()).unwrap();
                let loading = select(&portfolio, "#loading");
                let heading = select(&portfolio, ".animate-text");
                let signal = portfolio.loading_signal();

                portfolio.dispatch(PageEvent::Load);
                portfolio.dispatch(PageEvent::Load);

                tokio::time::sleep(ms(2001)).await;
                assert_eq!(style(&portfolio, loading, "opacity").as_deref(), Some("0"));
                assert_eq!(style(&portfolio, loading, "display"), None);
                assert!(portfolio.state().is_loading);

                tokio::time::sleep(ms(500)).await;
                assert_eq!(
                    style(&portfolio, loading, "display").as_deref(),
                    Some("none")
                );
                assert!(!portfolio.state().is_loading);
                assert!(signal.is_finished());
                assert_eq!(style(&portfolio, heading, "opacity").as_deref(), Some("1"));
                assert_eq!(text(&portfolio, ".typing-text"), "");

                tokio::time::sleep(ms(498)).await;
                assert_eq!(text(&portfolio, ".typing-text"), "");

                tokio::time::sleep(ms(2)).await;
                assert_eq!(text(&portfolio, ".typing-text"), "A");

                tokio::time::sleep(ms(100)).await;
                assert_eq!(text(&portfolio, ".typing-text"), "AI");
            })
            .await;
    }

    #[test_log::test(tokio::test(start_paused = true))]
    async fn typing_waits_for_load() {
        LocalSet::new()
            .run_until(async {
                let portfolio = Portfolio::new(document(), PortfolioConfig::default()).unwrap();

                tokio::time::sleep(ms(10_000)).await;

                assert_eq!(text(&portfolio, ".typing-text"), "");
                assert!(portfolio.state().is_loading);
            })
            .await;
    }

    #[test_log::test(tokio::test(start_paused = true))]
    async fn scroll_updates_navbar_links_bars_and_entrance() {
        LocalSet::new()
            .run_until(async {
                let portfolio = Portfolio::new(document(), PortfolioConfig::default()).unwrap();
                let navbar = select(&portfolio, ".navbar");
                let bar = select(&portfolio, ".skill-bar");
                let about_link = select(&portfolio, r##"a[href="#about"]"##);
                let card = select(&portfolio, ".about-card");
                let item = select(&portfolio, ".skill-item");

                portfolio.dispatch(PageEvent::Scroll { y: 1000.0 });

                assert!(has_class(&portfolio, navbar, SCROLLED_CLASS));
                assert!(has_class(&portfolio, about_link, ACTIVE_CLASS));
                assert!(has_class(&portfolio, bar, ANIMATED_CLASS));
                assert_eq!(style(&portfolio, bar, "width").as_deref(), Some("90%"));
                assert!(has_class(&portfolio, card, ENTERED_CLASS));
                assert!(has_class(&portfolio, item, ENTERED_CLASS));

                portfolio.dispatch(PageEvent::Scroll { y: 0.0 });

                assert!(!has_class(&portfolio, navbar, SCROLLED_CLASS));
                assert!(has_class(&portfolio, bar, ANIMATED_CLASS));
                assert!(has_class(&portfolio, card, ENTERED_CLASS));
                let active = portfolio.document().with(|x| {
                    x.select_all(".nav-link")
                        .into_iter()
                        .filter(|id| x.has_class(*id, ACTIVE_CLASS))
                        .count()
                });
                assert_eq!(active, 1);
            })
            .await;
    }

    #[test_log::test(tokio::test(start_paused = true))]
    async fn scroll_offset_is_clamped_to_page() {
        LocalSet::new()
            .run_until(async {
                let portfolio = Portfolio::new(document(), PortfolioConfig::default()).unwrap();

                portfolio.dispatch(PageEvent::Scroll { y: 99_999.0 });

                let scroll_y = portfolio.document().with(|x| x.viewport().scroll_y);
                assert!((scroll_y - 2400.0).abs() < f32::EPSILON);
            })
            .await;
    }

    #[test_log::test(tokio::test(start_paused = true))]
    async fn hamburger_and_nav_link_clicks() {
        LocalSet::new()
            .run_until(async {
                let portfolio = Portfolio::new(document(), PortfolioConfig::default()).unwrap();
                let hamburger = select(&portfolio, ".hamburger");
                let skills_link = select(&portfolio, r##"a[href="#skills"]"##);
                let body = portfolio.document().with(Document::body);

                portfolio.dispatch(PageEvent::Click { target: hamburger });
                assert!(portfolio.state().nav_open);
                assert!(has_class(&portfolio, body, navigation::NAV_OPEN_CLASS));

                portfolio.dispatch(PageEvent::Click {
                    target: skills_link,
                });
                assert!(!portfolio.state().nav_open);
                assert!(!has_class(&portfolio, hamburger, ACTIVE_CLASS));

                let scroll_y = portfolio.document().with(|x| x.viewport().scroll_y);
                assert!((scroll_y - 1520.0).abs() < f32::EPSILON);
                assert!(has_class(&portfolio, skills_link, ACTIVE_CLASS));
            })
            .await;
    }

    #[test_log::test(tokio::test(start_paused = true))]
    async fn parallax_is_throttled_with_trailing_update() {
        LocalSet::new()
            .run_until(async {
                let portfolio = Portfolio::new(document(), PortfolioConfig::default()).unwrap();
                let hero = select(&portfolio, ".hero");

                portfolio.dispatch(PageEvent::Scroll { y: 1000.0 });
                assert_eq!(
                    style(&portfolio, hero, "transform").as_deref(),
                    Some("translateY(500px)")
                );

                tokio::time::sleep(ms(4)).await;
                portfolio.dispatch(PageEvent::Scroll { y: 1100.0 });
                tokio::time::sleep(ms(2)).await;
                portfolio.dispatch(PageEvent::Scroll { y: 1200.0 });
                assert_eq!(
                    style(&portfolio, hero, "transform").as_deref(),
                    Some("translateY(500px)")
                );

                tokio::time::sleep(ms(5)).await;
                assert_eq!(
                    style(&portfolio, hero, "transform").as_deref(),
                    Some("translateY(600px)")
                );
            })
            .await;
    }

    #[test_log::test(tokio::test(start_paused = true))]
    async fn submit_runs_contact_flow() {
        LocalSet::new()
            .run_until(async {
                let portfolio = Portfolio::new(document(), PortfolioConfig::default()).unwrap();
                let form = select(&portfolio, "#contact-form");
                let button = select(&portfolio, "button");

                portfolio.dispatch(PageEvent::Submit { target: form });
                tokio::time::sleep(ms(1)).await;
                assert!(portfolio.document().with(|x| x.is_disabled(button)));

                portfolio.dispatch(PageEvent::Submit { target: form });

                tokio::time::sleep(ms(2000)).await;
                portfolio.document().with(|x| {
                    assert!(!x.is_disabled(button));
                    assert_eq!(x.text(button), Some("Send Message"));
                    assert_eq!(x.select_all(".notification-success").len(), 1);
                });
            })
            .await;
    }

    #[test_log::test(tokio::test(start_paused = true))]
    async fn cursor_tracks_pointer_and_hover() {
        LocalSet::new()
            .run_until(async {
                let portfolio = Portfolio::new(document(), PortfolioConfig::default()).unwrap();
                let dot = select(&portfolio, ".cursor");
                let link = select(&portfolio, ".nav-link");
                let heading = select(&portfolio, "h1");

                portfolio.dispatch(PageEvent::MouseMove { x: 10.0, y: 20.0 });
                portfolio.dispatch(PageEvent::MouseEnter { target: heading });
                assert!(!portfolio.state().hovering);

                portfolio.dispatch(PageEvent::MouseEnter { target: link });
                assert_eq!(portfolio.state().cursor, Some((10.0, 20.0)));
                assert!(portfolio.state().hovering);
                assert_eq!(style(&portfolio, dot, "left").as_deref(), Some("10px"));
                assert!(has_class(&portfolio, dot, cursor::HOVER_CLASS));

                portfolio.dispatch(PageEvent::MouseLeave { target: link });
                assert!(!portfolio.state().hovering);
            })
            .await;
    }

    #[test_log::test]
    fn page_events_deserialize_from_tagged_json() {
        let events: Vec<PageEvent> = serde_json::from_str(
            r#"[
                {"type": "load"},
                {"type": "scroll", "y": 120.5},
                {"type": "mouseMove", "x": 1, "y": 2},
                {"type": "click", "target": 7}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            events,
            vec![
                PageEvent::Load,
                PageEvent::Scroll { y: 120.5 },
                PageEvent::MouseMove { x: 1.0, y: 2.0 },
                PageEvent::Click { target: 7 },
            ]
        );
    }
}
