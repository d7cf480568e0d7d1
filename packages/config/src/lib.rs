//! Runtime configuration for the portfolio page behaviors.
//!
//! Every value defaults to the constant the page has always used, so an
//! empty or missing config file yields the stock behavior. Files are JSON5
//! (see [`file`]).

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod file;

pub use file::{CONFIG_ENV_VAR, load_config, load_config_file, load_from_env};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] json5::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioConfig {
    pub loading: LoadingConfig,
    pub typing: TypingConfig,
    pub navigation: NavigationConfig,
    pub reveal: RevealConfig,
    pub contact: ContactConfig,
    pub notifications: NotificationConfig,
    pub parallax: ParallaxConfig,
    pub entrance: EntranceConfig,
    pub floating: FloatingConfig,
}

impl PortfolioConfig {
    /// # Errors
    ///
    /// * [`ConfigError::Invalid`] - If the typing effect has no phrases
    /// * [`ConfigError::Invalid`] - If the reveal threshold is outside `[0, 1]`
    /// * [`ConfigError::Invalid`] - If the parallax factor is not finite
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.typing.phrases.is_empty() {
            return Err(ConfigError::Invalid(
                "typing.phrases must contain at least one phrase".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(ConfigError::Invalid(format!(
                "reveal.threshold must be within [0, 1], got {}",
                self.reveal.threshold
            )));
        }
        if !self.parallax.factor.is_finite() {
            return Err(ConfigError::Invalid(
                "parallax.factor must be a finite number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Loading splash timings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoadingConfig {
    /// Wait after the `load` event before fading the splash out.
    pub fade_delay_ms: u64,
    /// Wait after the fade starts before hiding the splash.
    pub hide_delay_ms: u64,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            fade_delay_ms: 2000,
            hide_delay_ms: 500,
        }
    }
}

impl LoadingConfig {
    #[must_use]
    pub const fn fade_delay(&self) -> Duration {
        Duration::from_millis(self.fade_delay_ms)
    }

    #[must_use]
    pub const fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypingConfig {
    pub phrases: Vec<String>,
    pub type_delay_ms: u64,
    pub delete_delay_ms: u64,
    pub hold_delay_ms: u64,
    pub pause_delay_ms: u64,
    /// Wait after the loading splash is gone before the first keystroke.
    pub start_delay_ms: u64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            phrases: [
                "AI & ML Enthusiast",
                "Full-Stack Developer",
                "Problem Solver",
                "Tech Innovator",
                "Open Source Contributor",
            ]
            .into_iter()
            .map(ToString::to_string)
            .collect(),
            type_delay_ms: 100,
            delete_delay_ms: 50,
            hold_delay_ms: 2000,
            pause_delay_ms: 500,
            start_delay_ms: 500,
        }
    }
}

impl TypingConfig {
    #[must_use]
    pub const fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigationConfig {
    pub scrolled_threshold: f32,
    pub active_offset: f32,
    /// Space left above an anchor target when smooth scrolling to it.
    pub header_offset: f32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            scrolled_threshold: 100.0,
            active_offset: 200.0,
            header_offset: 80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RevealConfig {
    pub threshold: f32,
    /// CSS margin shorthand in pixels or percentages of the viewport.
    pub root_margin: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactConfig {
    pub simulated_latency_ms: u64,
    pub sending_label: String,
    /// Classes of the `<i>` shown in the submit button while sending.
    pub sending_icon: String,
    pub success_message: String,
    pub error_message: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            simulated_latency_ms: 2000,
            sending_label: "Sending...".to_string(),
            sending_icon: "fas fa-spinner fa-spin".to_string(),
            success_message: "Message sent successfully! I'll get back to you soon.".to_string(),
            error_message: "Failed to send message. Please try again later.".to_string(),
        }
    }
}

impl ContactConfig {
    #[must_use]
    pub const fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationConfig {
    pub show_delay_ms: u64,
    pub display_ms: u64,
    pub remove_delay_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            show_delay_ms: 100,
            display_ms: 5000,
            remove_delay_ms: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParallaxConfig {
    pub throttle_ms: u64,
    pub factor: f32,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            throttle_ms: 10,
            factor: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntranceConfig {
    pub stagger_ms: u64,
}

impl Default for EntranceConfig {
    fn default() -> Self {
        Self { stagger_ms: 200 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FloatingConfig {
    pub element_stagger_ms: u64,
    pub icon_stagger_ms: u64,
}

impl Default for FloatingConfig {
    fn default() -> Self {
        Self {
            element_stagger_ms: 500,
            icon_stagger_ms: 200,
        }
    }
}
