/// Point on the tracked element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
}

impl Edge {
    fn offset(self, height: f64) -> f64 {
        match self {
            Edge::Top => 0.0,
            Edge::Center => height / 2.0,
            Edge::Bottom => height,
        }
    }
}

/// "`edge` of the element reaches `viewport` (0..1) down the viewport".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    pub edge: Edge,
    pub viewport: f64,
}

impl Band {
    pub const fn new(edge: Edge, viewport: f64) -> Self {
        Self { edge, viewport }
    }

    /// Document scroll offset at which the band is crossed.
    pub fn scroll_offset(&self, geometry: &Geometry) -> f64 {
        geometry.element_top + self.edge.offset(geometry.element_height)
            - geometry.viewport_height * self.viewport
    }
}

/// Layout snapshot used to evaluate a trigger. `element_top` is relative to
/// the document, not the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    pub element_top: f64,
    pub element_height: f64,
    pub viewport_height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerMode {
    /// Plays once when the band is crossed, never reverses.
    Once,
    /// Plays on crossing, reverses when scrolled back above the band.
    Toggle,
    /// Progress follows scroll between `start` and `end`.
    Scrub { end: Band },
    /// Progress follows scroll for `distance` viewport heights while the
    /// element is held in the viewport.
    Pin { distance: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerSpec {
    pub start: Band,
    pub mode: TriggerMode,
}

impl TriggerSpec {
    pub const fn once(start: Band) -> Self {
        Self { start, mode: TriggerMode::Once }
    }

    pub const fn toggle(start: Band) -> Self {
        Self { start, mode: TriggerMode::Toggle }
    }

    pub const fn scrub(start: Band, end: Band) -> Self {
        Self { start, mode: TriggerMode::Scrub { end } }
    }

    /// Pins start when the element's top meets the viewport top.
    pub const fn pin(distance: f64) -> Self {
        Self {
            start: Band::new(Edge::Top, 0.0),
            mode: TriggerMode::Pin { distance },
        }
    }

    pub fn is_pinned(&self) -> bool {
        matches!(self.mode, TriggerMode::Pin { .. })
    }

    pub fn start_offset(&self, geometry: &Geometry) -> f64 {
        self.start.scroll_offset(geometry)
    }

    pub fn end_offset(&self, geometry: &Geometry) -> f64 {
        let start = self.start_offset(geometry);
        match self.mode {
            TriggerMode::Scrub { end } => end.scroll_offset(geometry).max(start),
            TriggerMode::Pin { distance } => start + distance.max(0.0) * geometry.viewport_height,
            TriggerMode::Once | TriggerMode::Toggle => start,
        }
    }

    pub fn progress(&self, scroll: f64, geometry: &Geometry) -> f64 {
        let start = self.start_offset(geometry);
        let end = self.end_offset(geometry);
        if end <= start {
            return if scroll >= start { 1.0 } else { 0.0 };
        }
        ((scroll - start) / (end - start)).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerEvent {
    Play,
    Reverse,
    Scrub(f64),
}

/// Per-registration crossing state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TriggerState {
    entered: bool,
    fired: bool,
    last_progress: Option<f64>,
}

impl TriggerState {
    pub fn update(&mut self, spec: &TriggerSpec, scroll: f64, geometry: &Geometry) -> Option<TriggerEvent> {
        let past_start = scroll >= spec.start_offset(geometry);
        match spec.mode {
            TriggerMode::Once => {
                if past_start && !self.fired {
                    self.fired = true;
                    self.entered = true;
                    return Some(TriggerEvent::Play);
                }
                None
            }
            TriggerMode::Toggle => {
                if past_start && !self.entered {
                    self.entered = true;
                    self.fired = true;
                    Some(TriggerEvent::Play)
                } else if !past_start && self.entered {
                    self.entered = false;
                    Some(TriggerEvent::Reverse)
                } else {
                    None
                }
            }
            TriggerMode::Scrub { .. } | TriggerMode::Pin { .. } => {
                let progress = spec.progress(scroll, geometry);
                if self.last_progress == Some(progress) {
                    return None;
                }
                self.last_progress = Some(progress);
                self.entered = progress > 0.0;
                Some(TriggerEvent::Scrub(progress))
            }
        }
    }
}

/// Pinned range competing for the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinRange {
    pub id: u64,
    pub start: f64,
    pub end: f64,
}

/// Picks the pin that owns the viewport at `scroll`: among the ranges that
/// contain it, the one that started last; ties go to the later registration.
pub fn pin_owner(ranges: &[PinRange], scroll: f64) -> Option<u64> {
    ranges
        .iter()
        .filter(|r| scroll >= r.start && scroll <= r.end)
        .max_by(|a, b| a.start.total_cmp(&b.start).then(a.id.cmp(&b.id)))
        .map(|r| r.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEO: Geometry = Geometry {
        element_top: 2000.0,
        element_height: 600.0,
        viewport_height: 1000.0,
    };

    #[test]
    fn band_offset_matches_top_80() {
        let spec = TriggerSpec::once(Band::new(Edge::Top, 0.8));
        assert_eq!(spec.start_offset(&GEO), 1200.0);
        let center = Band::new(Edge::Center, 0.5);
        assert_eq!(center.scroll_offset(&GEO), 1800.0);
    }

    #[test]
    fn once_fires_a_single_time() {
        let spec = TriggerSpec::once(Band::new(Edge::Top, 0.8));
        let mut state = TriggerState::default();
        assert_eq!(state.update(&spec, 1000.0, &GEO), None);
        assert_eq!(state.update(&spec, 1300.0, &GEO), Some(TriggerEvent::Play));
        assert_eq!(state.update(&spec, 900.0, &GEO), None);
        assert_eq!(state.update(&spec, 1400.0, &GEO), None);
    }

    #[test]
    fn toggle_reverses_on_scroll_back() {
        let spec = TriggerSpec::toggle(Band::new(Edge::Top, 0.8));
        let mut state = TriggerState::default();
        assert_eq!(state.update(&spec, 1300.0, &GEO), Some(TriggerEvent::Play));
        assert_eq!(state.update(&spec, 1350.0, &GEO), None);
        assert_eq!(state.update(&spec, 1100.0, &GEO), Some(TriggerEvent::Reverse));
        assert_eq!(state.update(&spec, 1250.0, &GEO), Some(TriggerEvent::Play));
    }

    #[test]
    fn pin_progress_spans_viewport_multiples() {
        let spec = TriggerSpec::pin(2.0);
        assert_eq!(spec.start_offset(&GEO), 2000.0);
        assert_eq!(spec.end_offset(&GEO), 4000.0);
        assert_eq!(spec.progress(1500.0, &GEO), 0.0);
        assert_eq!(spec.progress(3000.0, &GEO), 0.5);
        assert_eq!(spec.progress(9000.0, &GEO), 1.0);
    }

    #[test]
    fn scrub_emits_only_on_change() {
        let spec = TriggerSpec::scrub(Band::new(Edge::Top, 1.0), Band::new(Edge::Bottom, 0.0));
        let mut state = TriggerState::default();
        assert_eq!(state.update(&spec, 0.0, &GEO), Some(TriggerEvent::Scrub(0.0)));
        assert_eq!(state.update(&spec, 10.0, &GEO), None);
        assert!(matches!(state.update(&spec, 1800.0, &GEO), Some(TriggerEvent::Scrub(p)) if (p - 0.5).abs() < 1e-9));
    }

    #[test]
    fn innermost_pin_owns_the_viewport() {
        let outer = PinRange { id: 1, start: 1000.0, end: 5000.0 };
        let inner = PinRange { id: 2, start: 2000.0, end: 3000.0 };
        let ranges = [outer, inner];
        assert_eq!(pin_owner(&ranges, 1500.0), Some(1));
        assert_eq!(pin_owner(&ranges, 2500.0), Some(2));
        assert_eq!(pin_owner(&ranges, 3500.0), Some(1));
        assert_eq!(pin_owner(&ranges, 6000.0), None);
    }

    #[test]
    fn equal_starts_go_to_later_registration() {
        let ranges = [
            PinRange { id: 4, start: 100.0, end: 900.0 },
            PinRange { id: 9, start: 100.0, end: 400.0 },
        ];
        assert_eq!(pin_owner(&ranges, 200.0), Some(9));
    }
}
