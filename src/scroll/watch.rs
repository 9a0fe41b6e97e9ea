use std::rc::Rc;

use log::warn;
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::motion::frame::FrameLoop;

/// Coalesces a burst of scroll events into one read per animation frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    /// Returns true when the caller should schedule the frame.
    pub fn request(&mut self) -> bool {
        !std::mem::replace(&mut self.pending, true)
    }

    pub fn release(&mut self) {
        self.pending = false;
    }
}

/// Calls `on_scroll` with the window's scroll offset at most once per frame
/// while the page scrolls.
#[hook]
pub fn use_frame_scroll<F>(on_scroll: F)
where
    F: Fn(f64) + 'static,
{
    let gate = use_mut_ref(FrameGate::default);
    let frame = use_mut_ref(|| None::<FrameLoop>);
    let on_scroll = Rc::new(on_scroll);

    {
        let gate = gate.clone();
        let frame = frame.clone();
        use_event_with_window("scroll", move |_: Event| {
            if !gate.borrow_mut().request() {
                return;
            }
            let tick_gate = gate.clone();
            let on_scroll = on_scroll.clone();
            let started = FrameLoop::start(move |_| {
                tick_gate.borrow_mut().release();
                if let Some(y) = web_sys::window().and_then(|w| w.scroll_y().ok()) {
                    on_scroll(y);
                }
                false
            });
            match started {
                Ok(frame_loop) => *frame.borrow_mut() = Some(frame_loop),
                Err(e) => {
                    gate.borrow_mut().release();
                    warn!("scroll frame not scheduled: {}", e);
                }
            }
        });
    }

    use_effect_with_deps(
        move |_| {
            move || {
                frame.borrow_mut().take();
            }
        },
        (),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_frame_per_burst() {
        let mut gate = FrameGate::default();
        assert!(gate.request());
        for _ in 0..20 {
            assert!(!gate.request());
        }
        gate.release();
        assert!(gate.request());
    }
}
