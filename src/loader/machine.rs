use crate::config::{LOADER_DESKTOP_MS, LOADER_MOBILE_MS};
use crate::motion::Ease;
use crate::session::LoaderFlag;
use crate::viewport::ViewportClass;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoaderPhase {
    Idle,
    Counting,
    Complete,
    Exiting,
    Removed,
}

/// Intro loader progression. Progress is wall-clock driven and only ever
/// moves forward.
#[derive(Clone, Debug, PartialEq)]
pub struct LoaderMachine {
    phase: LoaderPhase,
    progress: f64,
    duration_ms: f64,
    started_at: Option<f64>,
}

impl LoaderMachine {
    pub fn duration_for(class: ViewportClass) -> f64 {
        match class {
            ViewportClass::Mobile => LOADER_MOBILE_MS,
            ViewportClass::Tablet | ViewportClass::Desktop => LOADER_DESKTOP_MS,
        }
    }

    /// The duration is fixed here; later viewport changes do not affect it.
    pub fn new(class: ViewportClass, time_scale: f64) -> Self {
        Self {
            phase: LoaderPhase::Idle,
            progress: 0.0,
            duration_ms: Self::duration_for(class) * time_scale.max(0.0),
            started_at: None,
        }
    }

    pub fn mount<F: LoaderFlag>(mut self, flag: &F) -> Self {
        if self.phase == LoaderPhase::Idle {
            self.phase = if flag.is_set() {
                LoaderPhase::Removed
            } else {
                LoaderPhase::Counting
            };
        }
        self
    }

    pub fn phase(&self) -> LoaderPhase {
        self.phase
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Whole percent shown in the counter.
    pub fn percent(&self) -> u32 {
        self.progress.floor() as u32
    }

    /// Advances the counter to `now_ms`. The first tick anchors the clock.
    /// Reaching 100 moves to `Complete` and marks the session flag.
    pub fn advance<F: LoaderFlag>(&mut self, now_ms: f64, flag: &F) -> f64 {
        if self.phase != LoaderPhase::Counting {
            return self.progress;
        }
        let started = *self.started_at.get_or_insert(now_ms);
        let linear = if self.duration_ms <= 0.0 {
            1.0
        } else {
            (now_ms - started) / self.duration_ms
        };
        let next = (Ease::CubicOut.apply(linear) * 100.0).clamp(0.0, 100.0);
        self.progress = self.progress.max(next);
        if self.progress >= 100.0 {
            self.progress = 100.0;
            self.phase = LoaderPhase::Complete;
            flag.mark();
        }
        self.progress
    }

    pub fn begin_exit(&mut self) -> bool {
        if self.phase == LoaderPhase::Complete {
            self.phase = LoaderPhase::Exiting;
            true
        } else {
            false
        }
    }

    pub fn finish(&mut self) -> bool {
        if self.phase == LoaderPhase::Exiting {
            self.phase = LoaderPhase::Removed;
            true
        } else {
            false
        }
    }
}

/// Scale the focal disc needs to cover the whole viewport.
pub fn cover_scale(width: f64, height: f64, disc_px: f64) -> f64 {
    if disc_px <= 0.0 {
        return 1.0;
    }
    ((width * width + height * height).sqrt() / disc_px * 1.05).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryFlag;

    fn run(machine: &mut LoaderMachine, flag: &MemoryFlag, step_ms: f64) -> Vec<f64> {
        let mut seen = Vec::new();
        let mut now = 1000.0;
        while machine.phase() == LoaderPhase::Counting {
            seen.push(machine.advance(now, flag));
            now += step_ms;
            assert!(seen.len() < 10_000);
        }
        seen
    }

    #[test]
    fn counts_from_zero_to_hundred() {
        let flag = MemoryFlag::default();
        let mut machine = LoaderMachine::new(ViewportClass::Desktop, 1.0).mount(&flag);
        assert_eq!(machine.phase(), LoaderPhase::Counting);
        let seen = run(&mut machine, &flag, 16.0);
        assert_eq!(seen.first().copied(), Some(0.0));
        assert_eq!(seen.last().copied(), Some(100.0));
        for pair in seen.windows(2) {
            assert!(pair[1] > pair[0], "progress stalled: {:?}", pair);
        }
        assert!(seen.iter().all(|p| (0.0..=100.0).contains(p)));
        assert_eq!(machine.phase(), LoaderPhase::Complete);
        assert!(flag.is_set());
    }

    #[test]
    fn set_flag_skips_the_loader() {
        let flag = MemoryFlag::preset(true);
        let mut machine = LoaderMachine::new(ViewportClass::Desktop, 1.0).mount(&flag);
        assert_eq!(machine.phase(), LoaderPhase::Removed);
        assert_eq!(machine.advance(5000.0, &flag), 0.0);
        assert_eq!(machine.phase(), LoaderPhase::Removed);
    }

    #[test]
    fn mobile_counts_faster() {
        let mobile = LoaderMachine::new(ViewportClass::Mobile, 1.0);
        let desktop = LoaderMachine::new(ViewportClass::Desktop, 1.0);
        assert!(mobile.duration_ms() < desktop.duration_ms());

        let flag = MemoryFlag::default();
        let mut mobile = mobile.mount(&flag);
        let flag_d = MemoryFlag::default();
        let mut desktop = desktop.mount(&flag_d);
        assert!(run(&mut mobile, &flag, 16.0).len() < run(&mut desktop, &flag_d, 16.0).len());
    }

    #[test]
    fn dropped_frames_do_not_go_backwards() {
        let flag = MemoryFlag::default();
        let mut machine = LoaderMachine::new(ViewportClass::Desktop, 1.0).mount(&flag);
        machine.advance(0.0, &flag);
        let a = machine.advance(1500.0, &flag);
        // A stale timestamp must not pull progress back.
        let b = machine.advance(900.0, &flag);
        assert_eq!(a, b);
        let c = machine.advance(1_000_000.0, &flag);
        assert_eq!(c, 100.0);
    }

    #[test]
    fn exit_sequence_order() {
        let flag = MemoryFlag::default();
        let mut machine = LoaderMachine::new(ViewportClass::Tablet, 1.0).mount(&flag);
        assert!(!machine.begin_exit());
        machine.advance(0.0, &flag);
        machine.advance(LOADER_DESKTOP_MS, &flag);
        assert_eq!(machine.phase(), LoaderPhase::Complete);
        assert!(!machine.finish());
        assert!(machine.begin_exit());
        assert_eq!(machine.phase(), LoaderPhase::Exiting);
        assert!(machine.finish());
        assert_eq!(machine.phase(), LoaderPhase::Removed);
    }

    #[test]
    fn late_exit_delay_is_ignored() {
        let flag = MemoryFlag::default();
        let mut machine = LoaderMachine::new(ViewportClass::Desktop, 1.0).mount(&flag);
        machine.advance(0.0, &flag);
        machine.advance(LOADER_DESKTOP_MS, &flag);
        assert!(machine.begin_exit());
        // A second firing of the delay must not restart the exit.
        assert!(!machine.begin_exit());
        assert!(machine.finish());
        assert!(!machine.begin_exit());
        assert_eq!(machine.phase(), LoaderPhase::Removed);
    }

    #[test]
    fn resize_does_not_restart_counting() {
        let flag = MemoryFlag::default();
        let mut machine = LoaderMachine::new(ViewportClass::Desktop, 1.0).mount(&flag);
        machine.advance(1000.0, &flag);
        let partway = machine.advance(1000.0 + LOADER_DESKTOP_MS / 3.0, &flag);
        assert!(partway > 0.0 && partway < 100.0);
        let duration = machine.duration_ms();
        let started = machine.started_at;

        // The viewport turning mobile leaves the running count alone.
        let later = machine.advance(1000.0 + LOADER_DESKTOP_MS / 2.0, &flag);
        assert_eq!(machine.duration_ms(), duration);
        assert_eq!(machine.duration_ms(), LOADER_DESKTOP_MS);
        assert_eq!(machine.started_at, started);
        assert_eq!(started, Some(1000.0));
        assert!(later > partway);
        assert_eq!(machine.phase(), LoaderPhase::Counting);
    }

    #[test]
    fn cover_scale_follows_new_dimensions() {
        let wide = cover_scale(1920.0, 1080.0, 120.0);
        let narrow = cover_scale(390.0, 844.0, 120.0);
        assert!(narrow < wide);
        assert!(narrow * 120.0 >= (390f64.powi(2) + 844f64.powi(2)).sqrt());
        assert_eq!(cover_scale(390.0, 844.0, 120.0), narrow);
    }

    #[test]
    fn cover_scale_reaches_corners() {
        let scale = cover_scale(1920.0, 1080.0, 100.0);
        assert!(scale * 100.0 >= (1920f64.powi(2) + 1080f64.powi(2)).sqrt());
        assert_eq!(cover_scale(10.0, 10.0, 500.0), 1.0);
    }
}
