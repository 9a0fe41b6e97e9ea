use std::cell::RefCell;

use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, WheelEvent};
use yew::prelude::*;

use crate::motion::frame::FrameLoop;
use crate::viewport::use_viewport;

use super::lock;
use super::watch::use_frame_scroll;

/// Per-frame lerp factor at 60fps.
const LERP: f64 = 0.1;
const LINE_HEIGHT: f64 = 16.0;
const SETTLE_PX: f64 = 0.5;

/// Lerp-smoothed wheel scrolling. `target` follows input immediately and
/// `current` chases it frame by frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SmoothScroll {
    current: f64,
    target: f64,
    limit: f64,
    lerp: f64,
    animating: bool,
    stopped: bool,
}

impl SmoothScroll {
    pub fn new(lerp: f64) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            limit: f64::MAX,
            lerp: lerp.clamp(0.01, 1.0),
            animating: false,
            stopped: false,
        }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn set_limit(&mut self, limit: f64) {
        self.limit = limit.max(0.0);
        self.target = self.target.min(self.limit);
    }

    pub fn stop(&mut self) {
        self.stopped = true;
        self.animating = false;
        self.target = self.current;
    }

    pub fn start(&mut self) {
        self.stopped = false;
    }

    /// Adopts an externally applied position.
    pub fn sync(&mut self, position: f64) {
        self.current = position;
        self.target = position;
        self.animating = false;
    }

    pub fn push_delta(&mut self, delta: f64) {
        if self.stopped {
            return;
        }
        self.target = (self.target + delta).clamp(0.0, self.limit);
        self.animating = true;
    }

    pub fn scroll_to(&mut self, position: f64) {
        if self.stopped {
            return;
        }
        self.target = position.clamp(0.0, self.limit);
        self.animating = true;
    }

    /// Advances by `dt` seconds and returns the position to apply, if any.
    pub fn step(&mut self, dt: f64) -> Option<f64> {
        if !self.animating {
            return None;
        }
        let k = 1.0 - (1.0 - self.lerp).powf(dt.max(0.0) * 60.0);
        self.current += (self.target - self.current) * k;
        if (self.target - self.current).abs() < SETTLE_PX {
            self.current = self.target;
            self.animating = false;
        }
        Some(self.current)
    }
}

thread_local! {
    static SMOOTH: RefCell<SmoothScroll> = RefCell::new(SmoothScroll::new(LERP));
    static FRAME: RefCell<Option<FrameLoop>> = RefCell::new(None);
}

fn page_limit() -> Option<f64> {
    let window = web_sys::window()?;
    let height = window.document()?.document_element()?.scroll_height() as f64;
    let viewport = window.inner_height().ok()?.as_f64()?;
    Some((height - viewport).max(0.0))
}

fn ensure_frame() {
    FRAME.with(|frame| {
        let Ok(mut frame) = frame.try_borrow_mut() else {
            return;
        };
        if frame.as_ref().map(FrameLoop::is_running).unwrap_or(false) {
            return;
        }
        let mut last: Option<f64> = None;
        let started = FrameLoop::start(move |timestamp| {
            let dt = last.map(|prev| (timestamp - prev) / 1000.0).unwrap_or(1.0 / 60.0);
            last = Some(timestamp);
            let (next, animating) = SMOOTH.with(|s| {
                let mut s = s.borrow_mut();
                (s.step(dt), s.is_animating())
            });
            if let (Some(y), Some(window)) = (next, web_sys::window()) {
                window.scroll_to_with_x_and_y(0.0, y);
            }
            animating
        });
        match started {
            Ok(frame_loop) => *frame = Some(frame_loop),
            Err(e) => warn!("smooth scroll frame loop not started: {}", e),
        }
    });
}

/// Animates the page to `y`.
pub fn scroll_to(y: f64) {
    if let Some(limit) = page_limit() {
        SMOOTH.with(|s| s.borrow_mut().set_limit(limit));
    }
    SMOOTH.with(|s| s.borrow_mut().scroll_to(y));
    ensure_frame();
}

/// Moves the page to `y` without easing.
pub fn jump(y: f64) {
    SMOOTH.with(|s| s.borrow_mut().sync(y));
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, y);
    }
}

/// Document offset of the element with `id`, if it is mounted.
pub fn anchor_offset(id: &str) -> Option<f64> {
    let window = web_sys::window()?;
    let element = window.document()?.get_element_by_id(id)?;
    let scroll_y = window.scroll_y().ok()?;
    Some(element.get_bounding_client_rect().top() + scroll_y)
}

pub fn scroll_to_anchor(id: &str, immediate: bool) {
    match anchor_offset(id) {
        Some(y) if immediate => jump(y),
        Some(y) => scroll_to(y),
        None => warn!("No anchor #{} to scroll to", id),
    }
}

#[derive(Properties, PartialEq)]
pub struct ScrollShellProps {
    pub children: Children,
}

/// Page container that smooths wheel scrolling on pointer devices and keeps
/// native scrolling on touch devices.
#[function_component(ScrollShell)]
pub fn scroll_shell(props: &ScrollShellProps) -> Html {
    let viewport = use_viewport();

    use_frame_scroll(|y| {
        SMOOTH.with(|s| {
            let mut s = s.borrow_mut();
            if !s.is_animating() {
                s.sync(y);
            }
        });
    });

    use_effect_with_deps(
        move |viewport| {
            let mut cleanup: Option<Box<dyn FnOnce()>> = None;
            if !viewport.is_mobile() {
                if let Some(window) = web_sys::window() {
                    let wheel = Closure::<dyn Fn(WheelEvent)>::new(move |e: WheelEvent| {
                        if lock::is_locked() {
                            SMOOTH.with(|s| s.borrow_mut().stop());
                            return;
                        }
                        e.prevent_default();
                        let scale = match e.delta_mode() {
                            WheelEvent::DOM_DELTA_LINE => LINE_HEIGHT,
                            WheelEvent::DOM_DELTA_PAGE => page_limit().unwrap_or(800.0).min(800.0),
                            _ => 1.0,
                        };
                        if let Some(limit) = page_limit() {
                            SMOOTH.with(|s| s.borrow_mut().set_limit(limit));
                        }
                        SMOOTH.with(|s| {
                            let mut s = s.borrow_mut();
                            s.start();
                            s.push_delta(e.delta_y() * scale);
                        });
                        ensure_frame();
                    });
                    let options = AddEventListenerOptions::new();
                    options.set_passive(false);
                    let added = window.add_event_listener_with_callback_and_add_event_listener_options(
                        "wheel",
                        wheel.as_ref().unchecked_ref(),
                        &options,
                    );
                    if added.is_ok() {
                        debug!("Smooth wheel scrolling on ({})", viewport);
                        cleanup = Some(Box::new(move || {
                            let _ = window.remove_event_listener_with_callback(
                                "wheel",
                                wheel.as_ref().unchecked_ref(),
                            );
                        }));
                    }
                }
            }
            move || {
                if let Some(cleanup) = cleanup {
                    cleanup();
                }
            }
        },
        viewport,
    );

    html! {
        <div class="scroll-shell">
            { props.children.clone() }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_on_target() {
        let mut smooth = SmoothScroll::new(0.1);
        smooth.set_limit(5000.0);
        smooth.push_delta(1000.0);
        let mut last = 0.0;
        let mut frames = 0;
        while let Some(y) = smooth.step(1.0 / 60.0) {
            assert!(y >= last);
            last = y;
            frames += 1;
            assert!(frames < 1000);
        }
        assert_eq!(smooth.current(), 1000.0);
        assert!(!smooth.is_animating());
    }

    #[test]
    fn target_is_clamped_to_page() {
        let mut smooth = SmoothScroll::new(0.1);
        smooth.set_limit(300.0);
        smooth.push_delta(1000.0);
        assert_eq!(smooth.target(), 300.0);
        smooth.push_delta(-5000.0);
        assert_eq!(smooth.target(), 0.0);
    }

    #[test]
    fn stopped_scroll_ignores_input() {
        let mut smooth = SmoothScroll::new(0.1);
        smooth.sync(200.0);
        smooth.stop();
        smooth.push_delta(500.0);
        assert_eq!(smooth.target(), 200.0);
        assert_eq!(smooth.step(0.016), None);
        smooth.start();
        smooth.push_delta(100.0);
        assert_eq!(smooth.target(), 300.0);
    }
}
