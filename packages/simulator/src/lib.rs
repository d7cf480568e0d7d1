//! Replays a scripted sequence of page events against a page description and
//! reports the resulting render tree.
//!
//! Scripts are JSON5:
//!
//! ```json5
//! {
//!     durationMs: 6000,
//!     steps: [
//!         { atMs: 0, event: { type: "load" } },
//!         { atMs: 3500, event: { type: "scroll", y: 900 } },
//!         { atMs: 4000, event: { type: "click", selector: ".hamburger" } },
//!     ],
//! }
//! ```
//!
//! Events that target an element name it by selector; the first match is
//! used.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use portfolio_app::{PageEvent, Portfolio, UiState};
use portfolio_config::PortfolioConfig;
use portfolio_dom::{Document, Element, ElementId, SharedDocument, Viewport};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::Instant;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Page(#[from] portfolio_dom::PageError),
    #[error(transparent)]
    Config(#[from] portfolio_config::ConfigError),
    #[error(transparent)]
    App(#[from] portfolio_app::Error),
    #[error("Failed to read script: {0}")]
    ReadScript(#[from] std::io::Error),
    #[error("Failed to parse script: {0}")]
    ParseScript(#[from] json5::Error),
    #[error("No element matches \"{0}\"")]
    UnknownTarget(String),
    #[error("Failed to start runtime: {0}")]
    Runtime(std::io::Error),
    #[error(transparent)]
    Task(#[from] tokio::task::JoinError),
}

/// A page event as written in a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ScriptEvent {
    Load,
    Scroll { y: f32 },
    Resize { width: f32, height: f32 },
    Click { selector: String },
    Submit { selector: String },
    MouseMove { x: f32, y: f32 },
    MouseEnter { selector: String },
    MouseLeave { selector: String },
    /// Types into a form control; not a page event, applied to the tree
    /// directly.
    Input { selector: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptStep {
    pub at_ms: u64,
    pub event: ScriptEvent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    /// How long to run in total. Defaults to the last step's time.
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

impl Script {
    /// # Errors
    ///
    /// * If the script is not valid JSON5 or does not match the schema
    pub fn from_json5(content: &str) -> Result<Self, SimulationError> {
        Ok(json5::from_str(content)?)
    }

    /// # Errors
    ///
    /// * If the file cannot be read
    /// * If the script is not valid JSON5 or does not match the schema
    pub fn load(path: &Path) -> Result<Self, SimulationError> {
        Self::from_json5(&fs::read_to_string(path)?)
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        let last = self.steps.iter().map(|x| x.at_ms).max().unwrap_or_default();
        Duration::from_millis(self.duration_ms.unwrap_or(last).max(last))
    }
}

/// Final state of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub elapsed_ms: u128,
    pub state: UiState,
    pub viewport: Viewport,
    pub elements: Vec<Element>,
}

fn resolve(document: &Document, selector: &str) -> Result<ElementId, SimulationError> {
    document
        .select(selector)
        .ok_or_else(|| SimulationError::UnknownTarget(selector.to_string()))
}

enum Action {
    Dispatch(PageEvent),
    Input(ElementId, String),
}

fn action(document: &Document, event: &ScriptEvent) -> Result<Action, SimulationError> {
    Ok(Action::Dispatch(match event {
        ScriptEvent::Load => PageEvent::Load,
        ScriptEvent::Scroll { y } => PageEvent::Scroll { y: *y },
        ScriptEvent::Resize { width, height } => PageEvent::Resize {
            width: *width,
            height: *height,
        },
        ScriptEvent::MouseMove { x, y } => PageEvent::MouseMove { x: *x, y: *y },
        ScriptEvent::Click { selector } => PageEvent::Click {
            target: resolve(document, selector)?,
        },
        ScriptEvent::Submit { selector } => PageEvent::Submit {
            target: resolve(document, selector)?,
        },
        ScriptEvent::MouseEnter { selector } => PageEvent::MouseEnter {
            target: resolve(document, selector)?,
        },
        ScriptEvent::MouseLeave { selector } => PageEvent::MouseLeave {
            target: resolve(document, selector)?,
        },
        ScriptEvent::Input { selector, value } => {
            return Ok(Action::Input(resolve(document, selector)?, value.clone()));
        }
    }))
}

/// Binds `document` and replays `script` on the tokio timer, then returns
/// the final snapshot.
///
/// # Errors
///
/// * If the page cannot be bound with `config`
/// * If a step targets a selector with no match
///
/// # Panics
///
/// * If called outside of a `LocalSet` context
pub async fn simulate(
    document: Document,
    config: PortfolioConfig,
    script: &Script,
) -> Result<Snapshot, SimulationError> {
    let start = Instant::now();
    let document = SharedDocument::new(document);
    let portfolio = Portfolio::new(document.clone(), config)?;

    let mut steps = script.steps.iter().collect::<Vec<_>>();
    steps.sort_by_key(|x| x.at_ms);

    for step in steps {
        tokio::time::sleep_until(start + Duration::from_millis(step.at_ms)).await;

        portfolio_logging::debug_or_trace!(
            ("simulate: step at {}ms", step.at_ms),
            ("simulate: step at {}ms: {:?}", step.at_ms, step.event)
        );

        match document.with(|x| action(x, &step.event))? {
            Action::Dispatch(event) => portfolio.dispatch(event),
            Action::Input(target, value) => document.with_mut(|x| x.set_value(target, value)),
        }
    }

    tokio::time::sleep_until(start + script.duration()).await;

    let snapshot = document.with(|x| Snapshot {
        elapsed_ms: start.elapsed().as_millis(),
        state: portfolio.state(),
        viewport: *x.viewport(),
        elements: x.elements().into_iter().cloned().collect(),
    });

    log::info!(
        "simulate: finished after {}ms with {} elements",
        snapshot.elapsed_ms,
        snapshot.elements.len()
    );

    Ok(snapshot)
}

/// Loads the page description and script from disk and runs them.
///
/// # Errors
///
/// * If the page or script cannot be read or parsed
/// * If the simulation fails
pub async fn simulate_files(
    page: &Path,
    script: Option<&Path>,
    config: PortfolioConfig,
) -> Result<Snapshot, SimulationError> {
    let document = portfolio_dom::PageDescription::load(page)?.into_document();
    let script = script.map(Script::load).transpose()?.unwrap_or_default();

    simulate(document, config, &script).await
}

/// Runs [`simulate_files`] to completion on a fresh current-thread runtime.
/// With `virtual_time` the clock starts paused and skips ahead whenever
/// every task is waiting on a timer.
///
/// # Errors
///
/// * If the runtime cannot be built
/// * If [`simulate_files`] fails
/// * If the simulation task panics
pub fn run_blocking(
    page: PathBuf,
    script: Option<PathBuf>,
    config: PortfolioConfig,
    virtual_time: bool,
) -> Result<Snapshot, SimulationError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(virtual_time)
        .build()
        .map_err(SimulationError::Runtime)?;
    let local = tokio::task::LocalSet::new();

    let handle = portfolio_task::spawn_local_on("simulation", &local, async move {
        simulate_files(&page, script.as_deref(), config).await
    });

    local.block_on(&runtime, handle)?
}
