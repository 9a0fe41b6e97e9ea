use std::cell::RefCell;

use log::warn;
use web_sys::Element;
use yew::NodeRef;

use super::frame::FrameLoop;
use super::paint;
use super::registry;
use super::trigger::Geometry;

/// Frames longer than this are treated as a stall, not elapsed time.
const MAX_FRAME_SECONDS: f64 = 0.1;

thread_local! {
    static TICKER: RefCell<Option<FrameLoop>> = RefCell::new(None);
}

fn measure(anchor: &NodeRef) -> Option<Geometry> {
    let window = web_sys::window()?;
    let element = anchor.cast::<Element>()?;
    let rect = element.get_bounding_client_rect();
    let scroll_y = window.scroll_y().ok()?;
    let viewport_height = window.inner_height().ok()?.as_f64()?;
    Some(Geometry {
        element_top: rect.top() + scroll_y,
        element_height: rect.height(),
        viewport_height,
    })
}

/// Starts the shared frame loop if it is not already running. The loop stops
/// by itself once the registry is empty.
pub fn ensure_running() {
    TICKER.with(|ticker| {
        let Ok(mut ticker) = ticker.try_borrow_mut() else {
            return;
        };
        if ticker.as_ref().map(FrameLoop::is_running).unwrap_or(false) {
            return;
        }
        let mut last: Option<f64> = None;
        let started = FrameLoop::start(move |timestamp| {
            let dt = last
                .map(|prev| ((timestamp - prev) / 1000.0).clamp(0.0, MAX_FRAME_SECONDS))
                .unwrap_or(0.0);
            last = Some(timestamp);
            let scroll = web_sys::window()
                .and_then(|w| w.scroll_y().ok())
                .unwrap_or_default();

            let (work, idle) = registry::tick_global(dt, scroll, measure);
            for (anchor, distance) in &work.pins {
                paint::pin(anchor, *distance);
            }
            for item in &work.paints {
                paint::apply(&item.node, &item.frame);
            }
            for done in work.completions {
                done();
            }
            // Completions may have queued new work.
            !idle || registry::active_triggers() + registry::active_tweens() > 0
        });
        match started {
            Ok(frame_loop) => *ticker = Some(frame_loop),
            Err(e) => warn!("motion ticker not started: {}", e),
        }
    });
}
