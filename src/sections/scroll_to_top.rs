use yew::prelude::*;

use crate::config::SCROLL_TOP_THRESHOLD;
use crate::motion::{Band, Ease, Edge, Position, Prop, SceneTrigger, Timeline, TriggerSpec, Tween};
use crate::scene::{require, use_scene};
use crate::scroll::{self, use_frame_scroll};

pub fn show_timeline() -> Timeline {
    Timeline::new().add(
        Tween::on(0)
            .from(Prop::Opacity, 0.0)
            .from(Prop::Y, 24.0)
            .from(Prop::Scale, 0.8)
            .duration(0.35)
            .ease(Ease::CubicOut),
        Position::Sequence,
    )
}

/// Whether the button is past the sentinel and can be interacted with.
pub fn scroll_top_visible(scroll_y: f64, viewport_height: f64) -> bool {
    viewport_height > 0.0 && scroll_y >= SCROLL_TOP_THRESHOLD * viewport_height
}

/// Floating button that appears once the page has scrolled past the first
/// screen. The page container must be positioned for the sentinel to sit at
/// the right offset.
#[function_component(ScrollToTopButton)]
pub fn scroll_to_top_button() -> Html {
    let sentinel = use_node_ref();
    let button = use_node_ref();
    let visible = use_state_eq(|| false);

    {
        let sentinel = sentinel.clone();
        let button = button.clone();
        use_scene("scroll-to-top", move |_| {
            Ok(vec![SceneTrigger {
                spec: TriggerSpec::toggle(Band::new(Edge::Top, 0.0)),
                anchor: require(&sentinel, "scroll-to-top sentinel")?,
                timeline: show_timeline(),
                targets: vec![require(&button, "scroll-to-top button")?],
            }])
        });
    }

    {
        let visible = visible.clone();
        use_frame_scroll(move |y| {
            let height = web_sys::window()
                .and_then(|w| w.inner_height().ok())
                .and_then(|h| h.as_f64())
                .unwrap_or_default();
            visible.set(scroll_top_visible(y, height));
        });
    }

    let onclick = Callback::from(|_: MouseEvent| scroll::scroll_to(0.0));

    html! {
        <>
            <div
                class="scroll-top-sentinel"
                ref={sentinel}
                style={format!("top: {}vh", SCROLL_TOP_THRESHOLD * 100.0)}
                aria-hidden="true"
            ></div>
            <button
                class={classes!("scroll-top", (*visible).then_some("scroll-top--visible"))}
                ref={button}
                {onclick}
                aria-label="Back to top"
                aria-hidden={(!*visible).to_string()}
                tabindex={if *visible { "0" } else { "-1" }}
            >{"↑"}</button>
            <style>
                {r#"
                    .scroll-top-sentinel {
                        position: absolute;
                        left: 0;
                        width: 1px;
                        height: 1px;
                        pointer-events: none;
                    }

                    .scroll-top {
                        position: fixed;
                        right: 2rem;
                        bottom: 2rem;
                        z-index: 50;
                        width: 3.25rem;
                        height: 3.25rem;
                        border: none;
                        border-radius: 50%;
                        background: #d9ff3f;
                        color: #0f0f0f;
                        font-size: 1.25rem;
                        cursor: pointer;
                        opacity: 0;
                        visibility: hidden;
                        pointer-events: none;
                        transition: visibility 0s linear 0.35s;
                    }

                    .scroll-top--visible {
                        visibility: visible;
                        pointer-events: auto;
                        transition-delay: 0s;
                    }
                "#}
            </style>
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_button_is_not_interactive_above_threshold() {
        assert!(!scroll_top_visible(0.0, 800.0));
        assert!(!scroll_top_visible(700.0, 800.0));
        assert!(scroll_top_visible(SCROLL_TOP_THRESHOLD * 800.0, 800.0));
        assert!(scroll_top_visible(5000.0, 800.0));
        assert!(!scroll_top_visible(5000.0, 0.0));
    }

    #[test]
    fn button_starts_hidden_and_ends_visible() {
        let timeline = show_timeline();
        assert_eq!(timeline.sample(0.0)[&0].get(Prop::Opacity), Some(0.0));
        let end = timeline.sample_progress(1.0);
        assert_eq!(end[&0].get(Prop::Opacity), Some(1.0));
        assert_eq!(end[&0].get(Prop::Scale), Some(1.0));
    }
}
