//! Named local task spawning for the single-threaded page runtime.
//!
//! Every page timer runs as a `!Send` task on the current `LocalSet`. Names
//! only show up in trace logs (and in tokio-console builds with
//! `tokio_unstable`).

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::{future::Future, time::Duration};

use tokio::task::{JoinHandle, LocalSet};

fn traced<Fut>(name: &str, future: Fut) -> impl Future<Output = Fut::Output> + 'static
where
    Fut: Future + 'static,
    Fut::Output: 'static,
{
    log::trace!("spawn_local start: {name}");
    let name = name.to_owned();
    async move {
        let response = future.await;
        log::trace!("spawn_local finished: {name}");

        response
    }
}

#[cfg(tokio_unstable)]
fn spawn_named<Fut>(name: &str, future: Fut) -> JoinHandle<Fut::Output>
where
    Fut: Future + 'static,
    Fut::Output: 'static,
{
    match tokio::task::Builder::new().name(name).spawn_local(future) {
        Ok(handle) => handle,
        Err(e) => panic!("failed to spawn local task {name}: {e}"),
    }
}

#[cfg(not(tokio_unstable))]
fn spawn_named<Fut>(_name: &str, future: Fut) -> JoinHandle<Fut::Output>
where
    Fut: Future + 'static,
    Fut::Output: 'static,
{
    tokio::task::spawn_local(future)
}

/// Spawns a `!Send` future on the current `LocalSet`.
///
/// # Panics
///
/// * If called outside of a `LocalSet` context
pub fn spawn_local<Fut>(name: &str, future: Fut) -> JoinHandle<Fut::Output>
where
    Fut: Future + 'static,
    Fut::Output: 'static,
{
    spawn_named(name, traced(name, future))
}

/// Spawns a `!Send` future on an explicit `LocalSet`, e.g. before the set is
/// driven.
pub fn spawn_local_on<Fut>(name: &str, local_set: &LocalSet, future: Fut) -> JoinHandle<Fut::Output>
where
    Fut: Future + 'static,
    Fut::Output: 'static,
{
    local_set.spawn_local(traced(name, future))
}

/// Runs `f` once after `delay` on the current `LocalSet`.
///
/// # Panics
///
/// * If called outside of a `LocalSet` context
pub fn spawn_local_after<F, T>(name: &str, delay: Duration, f: F) -> JoinHandle<T>
where
    F: FnOnce() -> T + 'static,
    T: 'static,
{
    spawn_local(name, async move {
        tokio::time::sleep(delay).await;
        f()
    })
}
