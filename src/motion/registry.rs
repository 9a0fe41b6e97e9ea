use std::cell::RefCell;
use std::collections::BTreeMap;

use log::debug;
use yew::NodeRef;

use super::paint;
use super::ticker;
use super::timeline::{Playhead, Timeline};
use super::trigger::{pin_owner, Geometry, PinRange, TriggerEvent, TriggerMode, TriggerSpec, TriggerState};
use super::tween::StyleFrame;

/// A trigger a section wants registered: where it listens, what it plays,
/// and the nodes the timeline's target slots refer to.
#[derive(Clone)]
pub struct SceneTrigger {
    pub spec: TriggerSpec,
    pub anchor: NodeRef,
    pub timeline: Timeline,
    pub targets: Vec<NodeRef>,
}

struct ActiveTrigger {
    owner: &'static str,
    trigger: SceneTrigger,
    state: TriggerState,
    playhead: Playhead,
    needs_paint: bool,
    pinned: bool,
}

struct ActiveTween {
    owner: &'static str,
    timeline: Timeline,
    targets: Vec<NodeRef>,
    playhead: Playhead,
    on_complete: Option<Box<dyn FnOnce()>>,
}

pub(crate) struct Paint {
    pub node: NodeRef,
    pub frame: StyleFrame,
}

/// Work produced by one frame, applied once the registry borrow is released.
#[derive(Default)]
pub(crate) struct FrameWork {
    pub paints: Vec<Paint>,
    pub pins: Vec<(NodeRef, f64)>,
    pub completions: Vec<Box<dyn FnOnce()>>,
}

fn paints_for(timeline: &Timeline, targets: &[NodeRef], time: f64, out: &mut Vec<Paint>) {
    for (slot, frame) in timeline.sample(time) {
        if let Some(node) = targets.get(slot) {
            out.push(Paint {
                node: node.clone(),
                frame,
            });
        }
    }
}

/// Every live trigger and tween on the page.
#[derive(Default)]
pub struct Registry {
    next_id: u64,
    triggers: BTreeMap<u64, ActiveTrigger>,
    tweens: BTreeMap<u64, ActiveTween>,
}

impl Registry {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn insert_scene(&mut self, owner: &'static str, triggers: Vec<SceneTrigger>) -> Vec<u64> {
        let mut ids = Vec::with_capacity(triggers.len());
        for trigger in triggers {
            let id = self.next_id();
            let duration = trigger.timeline.duration();
            self.triggers.insert(
                id,
                ActiveTrigger {
                    owner,
                    state: TriggerState::default(),
                    playhead: Playhead::new(duration),
                    needs_paint: true,
                    pinned: false,
                    trigger,
                },
            );
            ids.push(id);
        }
        ids
    }

    fn remove_owner(&mut self, owner: &'static str) -> Vec<SceneTrigger> {
        let ids: Vec<u64> = self
            .triggers
            .iter()
            .filter(|(_, t)| t.owner == owner)
            .map(|(id, _)| *id)
            .collect();
        self.remove_triggers(&ids)
    }

    fn remove_triggers(&mut self, ids: &[u64]) -> Vec<SceneTrigger> {
        ids.iter()
            .filter_map(|id| self.triggers.remove(id))
            .map(|t| t.trigger)
            .collect()
    }

    fn insert_tween(
        &mut self,
        owner: &'static str,
        timeline: Timeline,
        targets: Vec<NodeRef>,
        on_complete: Option<Box<dyn FnOnce()>>,
    ) -> u64 {
        let id = self.next_id();
        let mut playhead = Playhead::new(timeline.duration());
        playhead.play();
        self.tweens.insert(
            id,
            ActiveTween {
                owner,
                timeline,
                targets,
                playhead,
                on_complete,
            },
        );
        id
    }

    fn remove_tween(&mut self, id: u64) -> bool {
        self.tweens.remove(&id).is_some()
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    pub fn tween_count(&self) -> usize {
        self.tweens.len()
    }

    pub fn owned_by(&self, owner: &str) -> usize {
        self.triggers.values().filter(|t| t.owner == owner).count()
            + self.tweens.values().filter(|t| t.owner == owner).count()
    }

    pub fn is_idle(&self) -> bool {
        self.triggers.is_empty() && self.tweens.is_empty()
    }

    /// Advances every registration by `dt` seconds at `scroll`. `measure`
    /// resolves an anchor's layout; anchors it cannot measure are skipped.
    pub(crate) fn tick<M>(&mut self, dt: f64, scroll: f64, measure: M) -> FrameWork
    where
        M: Fn(&NodeRef) -> Option<Geometry>,
    {
        let mut work = FrameWork::default();

        let geometries: BTreeMap<u64, Geometry> = self
            .triggers
            .iter()
            .filter_map(|(id, t)| measure(&t.trigger.anchor).map(|g| (*id, g)))
            .collect();

        let pins: Vec<PinRange> = self
            .triggers
            .iter()
            .filter(|(_, t)| t.trigger.spec.is_pinned())
            .filter_map(|(id, t)| {
                geometries.get(id).map(|g| PinRange {
                    id: *id,
                    start: t.trigger.spec.start_offset(g),
                    end: t.trigger.spec.end_offset(g),
                })
            })
            .collect();
        let owner = pin_owner(&pins, scroll);

        for (id, active) in self.triggers.iter_mut() {
            let Some(geometry) = geometries.get(id) else {
                continue;
            };
            let spec = active.trigger.spec;
            if let TriggerMode::Pin { distance } = spec.mode {
                if !active.pinned {
                    work.pins.push((active.trigger.anchor.clone(), distance));
                    active.pinned = true;
                }
                let eligible = pins.iter().any(|r| r.id == *id && scroll >= r.start && scroll <= r.end);
                if eligible && owner != Some(*id) {
                    continue;
                }
            }
            match active.state.update(&spec, scroll, geometry) {
                Some(TriggerEvent::Play) => active.playhead.play(),
                Some(TriggerEvent::Reverse) => active.playhead.reverse(),
                Some(TriggerEvent::Scrub(progress)) => {
                    active.playhead.seek_progress(progress);
                    active.needs_paint = true;
                }
                None => {}
            }
            if active.playhead.is_playing() {
                active.playhead.advance(dt);
                active.needs_paint = true;
            }
            if active.needs_paint {
                active.needs_paint = false;
                paints_for(
                    &active.trigger.timeline,
                    &active.trigger.targets,
                    active.playhead.time(),
                    &mut work.paints,
                );
            }
        }

        let mut finished = Vec::new();
        for (id, tween) in self.tweens.iter_mut() {
            let done = tween.playhead.advance(dt);
            paints_for(&tween.timeline, &tween.targets, tween.playhead.time(), &mut work.paints);
            if done || !tween.playhead.is_playing() {
                finished.push(*id);
            }
        }
        for id in finished {
            if let Some(mut tween) = self.tweens.remove(&id) {
                if let Some(done) = tween.on_complete.take() {
                    work.completions.push(done);
                }
            }
        }

        work
    }
}

thread_local! {
    static REGISTRY: RefCell<Registry> = RefCell::new(Registry::default());
    static DEFERRED: RefCell<Vec<Deferred>> = RefCell::new(Vec::new());
}

enum Deferred {
    Triggers(Vec<u64>),
    Tween(u64),
}

fn revert_scene(triggers: Vec<SceneTrigger>) {
    for trigger in triggers {
        for node in &trigger.targets {
            paint::revert(node);
        }
        if trigger.spec.is_pinned() {
            paint::unpin(&trigger.anchor);
        }
    }
}

/// Releases everything a scene registered when dropped.
#[must_use = "dropping the guard tears the scene down"]
pub struct SceneGuard {
    owner: &'static str,
    ids: Vec<u64>,
}

impl SceneGuard {
    pub fn empty(owner: &'static str) -> Self {
        Self {
            owner,
            ids: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

impl Drop for SceneGuard {
    fn drop(&mut self) {
        if self.ids.is_empty() {
            return;
        }
        let ids = std::mem::take(&mut self.ids);
        let removed = REGISTRY.with(|registry| match registry.try_borrow_mut() {
            Ok(mut registry) => Some(registry.remove_triggers(&ids)),
            Err(_) => None,
        });
        match removed {
            Some(triggers) => {
                debug!("{}: released {} trigger(s)", self.owner, triggers.len());
                revert_scene(triggers);
            }
            None => DEFERRED.with(|d| d.borrow_mut().push(Deferred::Triggers(ids))),
        }
    }
}

/// Owns a time-based tween; dropping it kills the tween where it stands.
#[must_use = "dropping the handle kills the tween"]
pub struct TweenHandle {
    id: Option<u64>,
}


impl Drop for TweenHandle {
    fn drop(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        let removed = REGISTRY.with(|registry| registry.try_borrow_mut().map(|mut r| r.remove_tween(id)).ok());
        if removed.is_none() {
            DEFERRED.with(|d| d.borrow_mut().push(Deferred::Tween(id)));
        }
    }
}

pub(crate) fn attach_scene(owner: &'static str, triggers: Vec<SceneTrigger>) -> SceneGuard {
    let (replaced, ids) = REGISTRY.with(|registry| {
        let mut registry = registry.borrow_mut();
        let replaced = registry.remove_owner(owner);
        let ids = registry.insert_scene(owner, triggers);
        (replaced, ids)
    });
    if !replaced.is_empty() {
        debug!("{}: replaced {} stale trigger(s)", owner, replaced.len());
        revert_scene(replaced);
    }
    debug!("{}: registered {} trigger(s)", owner, ids.len());
    SceneGuard { owner, ids }
}

pub(crate) fn attach_tween(
    owner: &'static str,
    timeline: Timeline,
    targets: Vec<NodeRef>,
    on_complete: Option<Box<dyn FnOnce()>>,
) -> TweenHandle {
    let id = REGISTRY.with(|r| r.borrow_mut().insert_tween(owner, timeline, targets, on_complete));
    TweenHandle { id: Some(id) }
}

/// Registers a section's triggers, replacing any it registered before.
pub fn register_scene(owner: &'static str, triggers: Vec<SceneTrigger>) -> SceneGuard {
    let guard = attach_scene(owner, triggers);
    ticker::ensure_running();
    guard
}

/// Plays `timeline` once over `targets`; `on_complete` runs after the last
/// frame is painted.
pub fn play<F>(owner: &'static str, timeline: Timeline, targets: Vec<NodeRef>, on_complete: F) -> TweenHandle
where
    F: FnOnce() + 'static,
{
    let handle = attach_tween(owner, timeline, targets, Some(Box::new(on_complete)));
    ticker::ensure_running();
    handle
}

pub fn active_triggers() -> usize {
    REGISTRY.with(|r| r.borrow().trigger_count())
}

pub fn active_tweens() -> usize {
    REGISTRY.with(|r| r.borrow().tween_count())
}

pub fn owned_by(owner: &str) -> usize {
    REGISTRY.with(|r| r.borrow().owned_by(owner))
}

/// Runs one frame against the global registry.
pub(crate) fn tick_global<M>(dt: f64, scroll: f64, measure: M) -> (FrameWork, bool)
where
    M: Fn(&NodeRef) -> Option<Geometry>,
{
    let deferred: Vec<Deferred> = DEFERRED.with(|d| std::mem::take(&mut *d.borrow_mut()));
    let (work, reverted, idle) = REGISTRY.with(|registry| {
        let mut registry = registry.borrow_mut();
        let mut reverted = Vec::new();
        for item in deferred {
            match item {
                Deferred::Triggers(ids) => reverted.extend(registry.remove_triggers(&ids)),
                Deferred::Tween(id) => {
                    registry.remove_tween(id);
                }
            }
        }
        let work = registry.tick(dt, scroll, measure);
        (work, reverted, registry.is_idle())
    });
    revert_scene(reverted);
    (work, idle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::ease::Ease;
    use crate::motion::timeline::Position;
    use crate::motion::trigger::{Band, Edge};
    use crate::motion::tween::{Prop, Tween};

    fn fade_scene(count: usize) -> Vec<SceneTrigger> {
        (0..count)
            .map(|_| SceneTrigger {
                spec: TriggerSpec::once(Band::new(Edge::Top, 0.8)),
                anchor: NodeRef::default(),
                timeline: Timeline::new().add(
                    Tween::on(0).from(Prop::Opacity, 0.0).duration(1.0).ease(Ease::Linear),
                    Position::Sequence,
                ),
                targets: vec![NodeRef::default()],
            })
            .collect()
    }

    const GEO: Geometry = Geometry {
        element_top: 1000.0,
        element_height: 500.0,
        viewport_height: 1000.0,
    };

    #[test]
    fn dropping_guard_releases_every_trigger() {
        let before = active_triggers();
        let guard = attach_scene("test-drop", fade_scene(3));
        assert_eq!(guard.len(), 3);
        assert_eq!(owned_by("test-drop"), 3);
        assert_eq!(active_triggers(), before + 3);
        drop(guard);
        assert_eq!(owned_by("test-drop"), 0);
        assert_eq!(active_triggers(), before);
    }

    #[test]
    fn re_registration_replaces_previous_set() {
        let first = attach_scene("test-replace", fade_scene(2));
        let second = attach_scene("test-replace", fade_scene(1));
        assert_eq!(owned_by("test-replace"), 1);
        drop(first);
        assert_eq!(owned_by("test-replace"), 1);
        drop(second);
        assert_eq!(owned_by("test-replace"), 0);
    }

    #[test]
    fn dropped_tween_is_killed() {
        let timeline = Timeline::new().add(Tween::on(0).from(Prop::Y, 10.0), Position::Sequence);
        let handle = attach_tween("test-tween", timeline, vec![NodeRef::default()], None);
        assert_eq!(owned_by("test-tween"), 1);
        drop(handle);
        assert_eq!(owned_by("test-tween"), 0);
    }

    #[test]
    fn once_trigger_plays_to_rest_state() {
        let mut registry = Registry::default();
        registry.insert_scene("local", fade_scene(1));
        let work = registry.tick(0.016, 0.0, |_| Some(GEO));
        assert_eq!(work.paints[0].frame.get(Prop::Opacity), Some(0.0));
        let work = registry.tick(0.5, 300.0, |_| Some(GEO));
        let opacity = work.paints[0].frame.get(Prop::Opacity).unwrap_or_default();
        assert!((opacity - 0.5).abs() < 1e-9);
        let work = registry.tick(1.0, 300.0, |_| Some(GEO));
        assert_eq!(work.paints[0].frame.get(Prop::Opacity), Some(1.0));
        assert!(registry.tick(1.0, 300.0, |_| Some(GEO)).paints.is_empty());
    }

    #[test]
    fn unmeasured_anchor_is_skipped() {
        let mut registry = Registry::default();
        registry.insert_scene("local", fade_scene(1));
        let work = registry.tick(0.016, 5000.0, |_| None);
        assert!(work.paints.is_empty());
        assert_eq!(registry.trigger_count(), 1);
    }

    #[test]
    fn tween_completion_is_reported_once() {
        let mut registry = Registry::default();
        let timeline = Timeline::new().add(Tween::on(0).from(Prop::Y, 10.0).duration(0.2), Position::Sequence);
        registry.insert_tween("local", timeline, vec![NodeRef::default()], Some(Box::new(|| ())));
        assert!(registry.tick(0.1, 0.0, |_| None).completions.is_empty());
        assert_eq!(registry.tick(0.2, 0.0, |_| None).completions.len(), 1);
        assert!(registry.is_idle());
    }

    #[test]
    fn non_owning_pin_holds_progress() {
        let mut registry = Registry::default();
        let scrub = |slot: usize| {
            Timeline::new().add(
                Tween::on(slot).from_to(Prop::Scale, 0.0, 1.0).ease(Ease::Linear).duration(1.0),
                Position::Sequence,
            )
        };
        let outer_anchor = NodeRef::default();
        let inner_anchor = NodeRef::default();
        registry.insert_scene(
            "outer",
            vec![SceneTrigger {
                spec: TriggerSpec::pin(4.0),
                anchor: outer_anchor,
                timeline: scrub(0),
                targets: vec![NodeRef::default()],
            }],
        );
        registry.insert_scene(
            "inner",
            vec![SceneTrigger {
                spec: TriggerSpec::pin(1.0),
                anchor: inner_anchor,
                timeline: scrub(0),
                targets: vec![NodeRef::default()],
            }],
        );
        let measure = |_: &NodeRef| {
            Some(Geometry {
                element_top: 0.0,
                element_height: 100.0,
                viewport_height: 1000.0,
            })
        };
        // Equal starts: the later registration (inner) owns the frame and
        // the outer pin is left untouched.
        let work = registry.tick(0.016, 500.0, measure);
        assert_eq!(work.pins.len(), 2);
        assert_eq!(work.paints.len(), 1);
        assert_eq!(work.paints[0].frame.get(Prop::Scale), Some(0.5));
        // Past the inner range the outer pin takes over; the inner one
        // settles at its end state.
        let work = registry.tick(0.016, 2000.0, measure);
        let mut scales: Vec<f64> = work
            .paints
            .iter()
            .filter_map(|p| p.frame.get(Prop::Scale))
            .collect();
        scales.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(scales, vec![0.5, 1.0]);
    }
}
