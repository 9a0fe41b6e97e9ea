use std::collections::BTreeMap;

use super::tween::{Prop, StyleFrame, Tween};

/// Where a step starts relative to what the timeline already holds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// Right after the previous step ends.
    Sequence,
    /// Relative to the previous step's end. Negative values overlap, but a
    /// step never starts before the previous one began.
    Offset(f64),
    /// Absolute time in seconds.
    At(f64),
    /// Relative to the previous step's start.
    WithPrevious(f64),
}

#[derive(Clone, Debug, PartialEq)]
struct Step {
    tween: Tween,
    start: f64,
}

impl Step {
    fn end(&self) -> f64 {
        self.start + self.tween.duration
    }
}

/// Ordered collection of tweens laid out in seconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    steps: Vec<Step>,
    prev_start: f64,
    prev_end: f64,
    duration: f64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    fn resolve(&self, position: Position) -> f64 {
        let start = match position {
            Position::Sequence => self.prev_end,
            Position::Offset(offset) => (self.prev_end + offset).max(self.prev_start),
            Position::At(time) => time,
            Position::WithPrevious(offset) => self.prev_start + offset,
        };
        start.max(0.0)
    }

    pub fn add(mut self, tween: Tween, position: Position) -> Self {
        let start = self.resolve(position);
        let step = Step { tween, start };
        self.prev_start = start;
        self.prev_end = step.end();
        self.duration = self.duration.max(step.end());
        self.steps.push(step);
        self
    }

    /// Adds `template` once per target, each `each` seconds after the last.
    /// The whole group counts as one step for the next position.
    pub fn stagger(mut self, targets: &[usize], template: Tween, each: f64, position: Position) -> Self {
        if targets.is_empty() {
            return self;
        }
        let group_start = self.resolve(position);
        let mut group_end = group_start;
        for (i, target) in targets.iter().enumerate() {
            let step = Step {
                tween: template.retarget(*target),
                start: group_start + each * i as f64,
            };
            group_end = group_end.max(step.end());
            self.steps.push(step);
        }
        self.prev_start = group_start;
        self.prev_end = group_end;
        self.duration = self.duration.max(group_end);
        self
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn start_of(&self, index: usize) -> Option<f64> {
        self.steps.get(index).map(|s| s.start)
    }

    /// Every target slot the timeline touches.
    pub fn targets(&self) -> Vec<usize> {
        let mut targets: Vec<usize> = self.steps.iter().map(|s| s.tween.target).collect();
        targets.sort_unstable();
        targets.dedup();
        targets
    }

    /// Channel values at `time` seconds. Channels not yet started hold their
    /// first step's starting value, finished ones hold their last end value.
    pub fn sample(&self, time: f64) -> BTreeMap<usize, StyleFrame> {
        let mut order: Vec<&Step> = self.steps.iter().collect();
        order.sort_by(|a, b| a.start.total_cmp(&b.start));

        let mut frames: BTreeMap<usize, StyleFrame> = BTreeMap::new();
        let mut touched: BTreeMap<(usize, Prop), bool> = BTreeMap::new();
        for step in order {
            let frame = frames.entry(step.tween.target).or_default();
            for range in &step.tween.props {
                let key = (step.tween.target, range.prop);
                let started = time >= step.start;
                let seen = touched.get(&key).copied().unwrap_or(false);
                if !started {
                    if !seen {
                        frame.set(range.prop, range.from);
                        touched.insert(key, true);
                    }
                    continue;
                }
                let local = if step.tween.duration <= 0.0 {
                    1.0
                } else {
                    (time - step.start) / step.tween.duration
                };
                frame.set(range.prop, range.at(step.tween.ease.apply(local)));
                touched.insert(key, true);
            }
        }
        frames
    }

    /// Channel values at normalised progress in [0, 1].
    pub fn sample_progress(&self, progress: f64) -> BTreeMap<usize, StyleFrame> {
        self.sample(progress.clamp(0.0, 1.0) * self.duration)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

/// Time-based playback position over a timeline of `duration` seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playhead {
    time: f64,
    duration: f64,
    direction: Direction,
    playing: bool,
}

impl Playhead {
    pub fn new(duration: f64) -> Self {
        Self {
            time: 0.0,
            duration,
            direction: Direction::Forward,
            playing: false,
        }
    }

    pub fn play(&mut self) {
        self.direction = Direction::Forward;
        self.playing = true;
    }

    pub fn reverse(&mut self) {
        self.direction = Direction::Reverse;
        self.playing = true;
    }

    pub fn seek_progress(&mut self, progress: f64) {
        self.time = progress.clamp(0.0, 1.0) * self.duration;
        self.playing = false;
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Moves the head by `dt` seconds. Returns true on the frame playback
    /// reaches its end in the current direction.
    pub fn advance(&mut self, dt: f64) -> bool {
        if !self.playing {
            return false;
        }
        match self.direction {
            Direction::Forward => {
                self.time = (self.time + dt).min(self.duration);
                if self.time >= self.duration {
                    self.playing = false;
                    return true;
                }
            }
            Direction::Reverse => {
                self.time = (self.time - dt).max(0.0);
                if self.time <= 0.0 {
                    self.playing = false;
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::ease::Ease;

    fn fade(target: usize, duration: f64) -> Tween {
        Tween::on(target)
            .from(Prop::Opacity, 0.0)
            .duration(duration)
            .ease(Ease::Linear)
    }

    #[test]
    fn sequence_chains_steps() {
        let tl = Timeline::new()
            .add(fade(0, 1.0), Position::Sequence)
            .add(fade(1, 0.5), Position::Sequence);
        assert_eq!(tl.start_of(1), Some(1.0));
        assert_eq!(tl.duration(), 1.5);
    }

    #[test]
    fn negative_offset_never_precedes_prior_start() {
        let tl = Timeline::new()
            .add(fade(0, 1.0), Position::Sequence)
            .add(fade(1, 0.4), Position::Offset(-0.3))
            .add(fade(2, 0.2), Position::Offset(-5.0));
        assert_eq!(tl.start_of(1), Some(0.7));
        assert_eq!(tl.start_of(2), Some(0.7));
    }

    #[test]
    fn stagger_spreads_targets() {
        let tl = Timeline::new().stagger(&[3, 4, 5], fade(0, 0.5), 0.1, Position::At(1.0));
        assert_eq!(tl.start_of(0), Some(1.0));
        assert_eq!(tl.start_of(2), Some(1.2));
        assert!((tl.duration() - 1.7).abs() < 1e-9);
        assert_eq!(tl.targets(), vec![3, 4, 5]);
    }

    #[test]
    fn stagger_group_is_one_step_for_offsets() {
        let tl = Timeline::new()
            .stagger(&[0, 1], fade(0, 1.0), 0.5, Position::Sequence)
            .add(fade(2, 1.0), Position::Offset(-0.2));
        assert!((tl.start_of(2).unwrap_or_default() - 1.3).abs() < 1e-9);
    }

    #[test]
    fn sample_holds_initial_state_before_start() {
        let tl = Timeline::new().add(fade(0, 1.0), Position::At(1.0));
        let frames = tl.sample(0.2);
        assert_eq!(frames[&0].get(Prop::Opacity), Some(0.0));
        let frames = tl.sample(1.5);
        assert_eq!(frames[&0].get(Prop::Opacity), Some(0.5));
        let frames = tl.sample(9.0);
        assert_eq!(frames[&0].get(Prop::Opacity), Some(1.0));
    }

    #[test]
    fn later_steps_take_over_a_channel() {
        let tl = Timeline::new()
            .add(fade(0, 1.0), Position::Sequence)
            .add(
                Tween::on(0)
                    .from_to(Prop::Opacity, 1.0, 0.2)
                    .duration(1.0)
                    .ease(Ease::Linear),
                Position::Offset(1.0),
            );
        assert_eq!(tl.sample(1.5).get(&0).and_then(|f| f.get(Prop::Opacity)), Some(1.0));
        let mid = tl.sample(2.5)[&0].get(Prop::Opacity).unwrap_or_default();
        assert!((mid - 0.6).abs() < 1e-9);
    }

    #[test]
    fn playhead_reports_completion_once() {
        let mut head = Playhead::new(1.0);
        head.play();
        assert!(!head.advance(0.6));
        assert!(head.advance(0.6));
        assert!(!head.advance(0.6));
        head.reverse();
        assert!(head.advance(2.0));
        assert_eq!(head.time(), 0.0);
    }
}
