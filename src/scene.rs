use log::{debug, warn};
use yew::prelude::*;

use crate::error::{MotionError, MotionResult};
use crate::motion::registry::{active_triggers, active_tweens};
use crate::motion::{register_scene, Ease, Position, Prop, SceneGuard, SceneTrigger, Timeline, Tween};
use crate::viewport::{use_viewport, ViewportClass};

/// Fails with the target's name when `node` is not mounted.
pub fn require(node: &NodeRef, name: &'static str) -> MotionResult<NodeRef> {
    if node.get().is_some() {
        Ok(node.clone())
    } else {
        Err(MotionError::MissingTarget(name))
    }
}

pub fn require_all(nodes: &[NodeRef], name: &'static str) -> MotionResult<Vec<NodeRef>> {
    nodes.iter().map(|node| require(node, name)).collect()
}

/// Slots rise and fade in one after another.
pub fn fade_up(slots: &[usize], rise: f64, each: f64) -> Timeline {
    Timeline::new().stagger(
        slots,
        Tween::on(0)
            .from(Prop::Y, rise)
            .from(Prop::Opacity, 0.0)
            .duration(0.9)
            .ease(Ease::QuartOut),
        each,
        Position::Sequence,
    )
}

/// Slots are unmasked bottom-up one after another.
pub fn mask_up(slots: &[usize], each: f64) -> Timeline {
    Timeline::new().stagger(
        slots,
        Tween::on(0)
            .from(Prop::YPercent, 100.0)
            .from(Prop::ClipBottom, 100.0)
            .duration(1.0)
            .ease(Ease::QuartOut),
        each,
        Position::Sequence,
    )
}

pub fn slots(range: std::ops::Range<usize>) -> Vec<usize> {
    range.collect()
}

/// Registers a section's triggers for the current viewport class. Setup runs
/// again, after tearing the previous registration down, whenever the class
/// changes; unmounting tears it down for good. When `build` fails the section
/// simply stays static.
#[hook]
pub fn use_scene<F>(owner: &'static str, build: F)
where
    F: FnOnce(ViewportClass) -> MotionResult<Vec<SceneTrigger>> + 'static,
{
    let viewport = use_viewport();
    use_effect_with_deps(
        move |viewport| {
            let guard = match build(*viewport) {
                Ok(triggers) => register_scene(owner, triggers),
                Err(e) => {
                    warn!("{}: animations disabled ({})", owner, e);
                    SceneGuard::empty(owner)
                }
            };
            debug!(
                "{}: {} trigger(s) for {:?}; {} live trigger(s), {} tween(s) overall",
                owner,
                guard.len(),
                viewport,
                active_triggers(),
                active_tweens()
            );
            move || drop(guard)
        },
        viewport,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmounted_target_is_reported_by_name() {
        let node = NodeRef::default();
        assert_eq!(require(&node, "about title").err(), Some(MotionError::MissingTarget("about title")));
        assert!(require_all(&[NodeRef::default()], "cards").is_err());
        assert!(require_all(&[], "cards").map(|v| v.is_empty()).unwrap_or(false));
    }

    #[test]
    fn fade_up_rests_at_origin() {
        let end = fade_up(&[0, 1], 40.0, 0.1).sample_progress(1.0);
        assert_eq!(end[&1].get(Prop::Y), Some(0.0));
        assert_eq!(end[&1].get(Prop::Opacity), Some(1.0));
        let start = mask_up(&[0], 0.1).sample(0.0);
        assert_eq!(start[&0].get(Prop::ClipBottom), Some(100.0));
    }
}
