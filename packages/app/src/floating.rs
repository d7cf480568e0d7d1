//! Decorative float animations on hero elements and icons.

use std::time::Duration;

use portfolio_config::FloatingConfig;
use portfolio_dom::{Document, ElementId, SharedDocument};

#[derive(Debug, Clone, PartialEq)]
struct Keyframes {
    id: ElementId,
    delay: Duration,
    animation: String,
    animation_delay: String,
}

fn index_u32(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}

#[allow(clippy::cast_precision_loss)]
fn index_f32(index: usize) -> f32 {
    index as f32
}

/// `data-speed` as a number, defaulting to 1 when absent or unparsable.
fn speed(document: &Document, id: ElementId) -> f32 {
    document
        .data_attr(id, "speed")
        .and_then(|x| x.trim().parse::<f32>().ok())
        .filter(|x| x.is_finite())
        .unwrap_or(1.0)
}

fn plan(document: &Document, config: &FloatingConfig) -> Vec<Keyframes> {
    let element_stagger = Duration::from_millis(config.element_stagger_ms);
    let icon_stagger = Duration::from_millis(config.icon_stagger_ms);

    let elements = document
        .select_all(".floating-element")
        .into_iter()
        .enumerate()
        .map(|(index, id)| Keyframes {
            id,
            delay: element_stagger * index_u32(index),
            animation: format!("float {}s ease-in-out infinite", 3.0 + speed(document, id)),
            animation_delay: format!("{}s", index_f32(index) * 0.5),
        });

    let icons = document
        .select_all(".floating-icon")
        .into_iter()
        .enumerate()
        .map(|(index, id)| Keyframes {
            id,
            delay: icon_stagger * index_u32(index),
            animation: format!("floatIcon {}s ease-in-out infinite", 4 + index),
            animation_delay: format!("{}s", index_f32(index) * 0.3),
        });

    elements.chain(icons).collect()
}

/// Schedules the float animations for every `.floating-element` and
/// `.floating-icon`. Returns how many were scheduled.
///
/// # Panics
///
/// * If called outside of a `LocalSet` context
pub fn schedule(document: &SharedDocument, config: &FloatingConfig) -> usize {
    let planned = document.with(|x| plan(x, config));
    let count = planned.len();

    for keyframes in planned {
        let document = document.clone();
        portfolio_task::spawn_local_after("floating", keyframes.delay, move || {
            document.with_mut(|x| {
                x.set_style(keyframes.id, "animation", keyframes.animation);
                x.set_style(keyframes.id, "animation-delay", keyframes.animation_delay);
            });
        });
    }

    log::trace!("schedule: {count} floating animations");

    count
}
