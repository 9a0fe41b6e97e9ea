use std::fmt;

use gloo_timers::callback::Timeout;
use log::info;
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::config::{MOBILE_MAX_WIDTH, RESIZE_DEBOUNCE_MS, TABLET_MAX_WIDTH};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportClass {
    Mobile,
    Tablet,
    Desktop,
}

impl ViewportClass {
    pub fn is_mobile(self) -> bool {
        self == ViewportClass::Mobile
    }
}

impl fmt::Display for ViewportClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewportClass::Mobile => "mobile",
            ViewportClass::Tablet => "tablet",
            ViewportClass::Desktop => "desktop",
        };
        f.write_str(name)
    }
}

pub fn is_mobile_agent(user_agent: &str) -> bool {
    ["Mobi", "Android", "iPhone", "iPad", "iPod"]
        .iter()
        .any(|needle| user_agent.contains(needle))
}

pub fn classify(width: f64, mobile_agent: bool) -> ViewportClass {
    if width < MOBILE_MAX_WIDTH || (mobile_agent && width < TABLET_MAX_WIDTH) {
        ViewportClass::Mobile
    } else if width < TABLET_MAX_WIDTH {
        ViewportClass::Tablet
    } else {
        ViewportClass::Desktop
    }
}

/// Current class straight from the window; Desktop when there is none.
pub fn current_class() -> ViewportClass {
    let Some(window) = web_sys::window() else {
        return ViewportClass::Desktop;
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(TABLET_MAX_WIDTH);
    let mobile_agent = window
        .navigator()
        .user_agent()
        .map(|ua| is_mobile_agent(&ua))
        .unwrap_or(false);
    classify(width, mobile_agent)
}

/// Debounced reclassification. Each resize replaces the pending class; the
/// debounce timer settles it once the resizing has gone quiet, and only a
/// class change is published.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportTracker {
    current: ViewportClass,
    pending: Option<ViewportClass>,
}

impl ViewportTracker {
    pub fn new(current: ViewportClass) -> Self {
        Self {
            current,
            pending: None,
        }
    }

    pub fn current(&self) -> ViewportClass {
        self.current
    }

    pub fn on_resize(&mut self, width: f64, mobile_agent: bool) {
        self.pending = Some(classify(width, mobile_agent));
    }

    /// Applies the pending class. Called when the debounce timer fires; the
    /// timer is re-armed on every resize so this only runs after the last one.
    pub fn settle(&mut self) -> Option<ViewportClass> {
        let next = self.pending.take()?;
        if next == self.current {
            return None;
        }
        self.current = next;
        Some(next)
    }
}

#[derive(Properties, PartialEq)]
pub struct ViewportProviderProps {
    pub children: Children,
}

/// Publishes the viewport class to every section through context.
#[function_component(ViewportProvider)]
pub fn viewport_provider(props: &ViewportProviderProps) -> Html {
    let class = use_state(current_class);
    let tracker = use_mut_ref(|| ViewportTracker::new(*class));
    let timer = use_mut_ref(|| None::<Timeout>);

    {
        let class = class.clone();
        use_event_with_window("resize", move |_: Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let width = window
                .inner_width()
                .ok()
                .and_then(|w| w.as_f64())
                .unwrap_or(TABLET_MAX_WIDTH);
            let mobile_agent = window
                .navigator()
                .user_agent()
                .map(|ua| is_mobile_agent(&ua))
                .unwrap_or(false);
            tracker.borrow_mut().on_resize(width, mobile_agent);

            let tracker = tracker.clone();
            let class = class.clone();
            // Replacing the timeout cancels the previous one.
            *timer.borrow_mut() = Some(Timeout::new(RESIZE_DEBOUNCE_MS, move || {
                if let Some(next) = tracker.borrow_mut().settle() {
                    info!("Viewport class changed to {}", next);
                    class.set(next);
                }
            }));
        });
    }

    html! {
        <ContextProvider<ViewportClass> context={*class}>
            { props.children.clone() }
        </ContextProvider<ViewportClass>>
    }
}

#[hook]
pub fn use_viewport() -> ViewportClass {
    use_context::<ViewportClass>().unwrap_or_else(current_class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds() {
        assert_eq!(classify(375.0, false), ViewportClass::Mobile);
        assert_eq!(classify(767.9, false), ViewportClass::Mobile);
        assert_eq!(classify(768.0, false), ViewportClass::Tablet);
        assert_eq!(classify(1023.0, false), ViewportClass::Tablet);
        assert_eq!(classify(1024.0, false), ViewportClass::Desktop);
        assert_eq!(classify(900.0, true), ViewportClass::Mobile);
        assert_eq!(classify(1280.0, true), ViewportClass::Desktop);
    }

    #[test]
    fn mobile_agents() {
        assert!(is_mobile_agent("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)"));
        assert!(is_mobile_agent("Mozilla/5.0 (Linux; Android 14) Mobile Safari"));
        assert!(!is_mobile_agent("Mozilla/5.0 (X11; Linux x86_64) Firefox/128.0"));
    }

    #[test]
    fn rapid_resizes_publish_once() {
        let mut tracker = ViewportTracker::new(ViewportClass::Desktop);
        // Ten events sweeping down across both breakpoints; the timer is
        // re-armed by each one, so it fires once after the last.
        for i in 0..10 {
            tracker.on_resize(1400.0 - i as f64 * 100.0, false);
        }
        assert_eq!(tracker.settle(), Some(ViewportClass::Mobile));
        assert_eq!(tracker.settle(), None);
        assert_eq!(tracker.current(), ViewportClass::Mobile);
    }

    #[test]
    fn settling_never_drops_a_pending_change() {
        let mut tracker = ViewportTracker::new(ViewportClass::Desktop);
        tracker.on_resize(900.0, false);
        // The timer firing is enough; no clock comparison can discard it.
        assert_eq!(tracker.settle(), Some(ViewportClass::Tablet));
        tracker.on_resize(1300.0, false);
        assert_eq!(tracker.settle(), Some(ViewportClass::Desktop));
    }

    #[test]
    fn unchanged_class_is_not_republished() {
        let mut tracker = ViewportTracker::new(ViewportClass::Desktop);
        tracker.on_resize(1300.0, false);
        assert_eq!(tracker.settle(), None);
        assert_eq!(tracker.current(), ViewportClass::Desktop);
    }
}
