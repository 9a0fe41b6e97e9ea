use std::cell::RefCell;

use log::debug;
use web_sys::HtmlElement;

use crate::error::{MotionError, MotionResult};

/// The body declarations a scroll lock touches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BodyStyle {
    pub overflow: String,
    pub position: String,
    pub top: String,
    pub padding_right: String,
    pub width: String,
}

impl BodyStyle {
    fn locked(scroll_y: f64, scrollbar_width: f64) -> Self {
        Self {
            overflow: "hidden".into(),
            position: "fixed".into(),
            top: format!("-{}px", scroll_y.max(0.0)),
            padding_right: if scrollbar_width > 0.0 {
                format!("{}px", scrollbar_width)
            } else {
                String::new()
            },
            width: "100%".into(),
        }
    }

    fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("overflow", self.overflow.as_str()),
            ("position", self.position.as_str()),
            ("top", self.top.as_str()),
            ("padding-right", self.padding_right.as_str()),
            ("width", self.width.as_str()),
        ]
    }
}

pub trait BodySurface {
    fn read(&self) -> BodyStyle;
    fn write(&self, style: &BodyStyle);
}

impl BodySurface for HtmlElement {
    fn read(&self) -> BodyStyle {
        let style = self.style();
        let get = |name: &str| style.get_property_value(name).unwrap_or_default();
        BodyStyle {
            overflow: get("overflow"),
            position: get("position"),
            top: get("top"),
            padding_right: get("padding-right"),
            width: get("width"),
        }
    }

    fn write(&self, body: &BodyStyle) {
        let style = self.style();
        for (name, value) in body.entries() {
            if value.is_empty() {
                let _ = style.remove_property(name);
            } else {
                let _ = style.set_property(name, value);
            }
        }
    }
}

/// Counts nested locks from independent owners. The first lock snapshots the
/// body; the last unlock writes the snapshot back and hands out the scroll
/// offset to restore.
#[derive(Debug, Default)]
pub struct LockLedger {
    depth: usize,
    saved: Option<(BodyStyle, f64)>,
}

impl LockLedger {
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn lock<S: BodySurface>(&mut self, surface: &S, scroll_y: f64, scrollbar_width: f64) {
        if self.depth == 0 {
            self.saved = Some((surface.read(), scroll_y));
            surface.write(&BodyStyle::locked(scroll_y, scrollbar_width));
        }
        self.depth += 1;
    }

    pub fn unlock<S: BodySurface>(&mut self, surface: &S) -> Option<f64> {
        if self.depth == 0 {
            return None;
        }
        self.depth -= 1;
        if self.depth > 0 {
            return None;
        }
        let (style, scroll_y) = self.saved.take()?;
        surface.write(&style);
        Some(scroll_y)
    }
}

thread_local! {
    static LEDGER: RefCell<LockLedger> = RefCell::new(LockLedger::default());
}

pub fn is_locked() -> bool {
    LEDGER.with(|l| l.borrow().depth() > 0)
}

fn body() -> MotionResult<(web_sys::Window, HtmlElement)> {
    let window = web_sys::window().ok_or(MotionError::NoWindow)?;
    let document = window.document().ok_or(MotionError::NoDocument)?;
    let body = document.body().ok_or(MotionError::NoBody)?;
    Ok((window, body))
}

/// Holds the page scroll locked until dropped.
#[must_use = "the lock is released when dropped"]
pub struct BodyLock {
    owner: &'static str,
}

impl BodyLock {
    pub fn acquire(owner: &'static str) -> MotionResult<Self> {
        let (window, body) = body()?;
        let scroll_y = window.scroll_y().unwrap_or_default();
        let inner_width = window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or_default();
        let client_width = window
            .document()
            .and_then(|d| d.document_element())
            .map(|e| e.client_width() as f64)
            .unwrap_or(inner_width);
        LEDGER.with(|l| l.borrow_mut().lock(&body, scroll_y, (inner_width - client_width).max(0.0)));
        debug!("{} locked page scroll", owner);
        Ok(Self { owner })
    }
}

impl Drop for BodyLock {
    fn drop(&mut self) {
        let Ok((window, body)) = body() else {
            return;
        };
        let restore = LEDGER.with(|l| l.borrow_mut().unlock(&body));
        if let Some(scroll_y) = restore {
            window.scroll_to_with_x_and_y(0.0, scroll_y);
            super::smooth::jump(scroll_y);
        }
        debug!("{} released page scroll", self.owner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeBody(RefCell<BodyStyle>);

    impl BodySurface for FakeBody {
        fn read(&self) -> BodyStyle {
            self.0.borrow().clone()
        }

        fn write(&self, style: &BodyStyle) {
            *self.0.borrow_mut() = style.clone();
        }
    }

    fn original() -> BodyStyle {
        BodyStyle {
            overflow: "auto".into(),
            position: "relative".into(),
            top: String::new(),
            padding_right: "2px".into(),
            width: String::new(),
        }
    }

    #[test]
    fn open_close_cycle_restores_body() {
        let body = FakeBody(RefCell::new(original()));
        let mut ledger = LockLedger::default();
        ledger.lock(&body, 840.0, 15.0);
        let locked = body.read();
        assert_eq!(locked.position, "fixed");
        assert_eq!(locked.top, "-840px");
        assert_eq!(locked.padding_right, "15px");
        assert_eq!(ledger.unlock(&body), Some(840.0));
        assert_eq!(body.read(), original());
    }

    #[test]
    fn nested_locks_restore_on_last_release() {
        let body = FakeBody(RefCell::new(original()));
        let mut ledger = LockLedger::default();
        ledger.lock(&body, 100.0, 0.0);
        ledger.lock(&body, 999.0, 0.0);
        assert_eq!(ledger.unlock(&body), None);
        assert_eq!(body.read().position, "fixed");
        assert_eq!(ledger.unlock(&body), Some(100.0));
        assert_eq!(body.read(), original());
    }

    #[test]
    fn unbalanced_unlock_is_ignored() {
        let body = FakeBody(RefCell::new(original()));
        let mut ledger = LockLedger::default();
        assert_eq!(ledger.unlock(&body), None);
        assert_eq!(ledger.depth(), 0);
        assert_eq!(body.read(), original());
    }
}
