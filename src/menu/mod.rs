pub mod machine;

use log::{debug, warn};
use wasm_bindgen::JsValue;
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::config;
use crate::motion::{self, paint, Ease, Position, Prop, Timeline, Tween, TweenHandle};
use crate::scroll::{lock, scroll_to_anchor, use_frame_scroll, BodyLock};

pub use machine::{MenuAction, MenuMachine, MenuPhase, NavStage};

/// Menu entries as (label, section id).
pub const SECTION_LINKS: [(&str, &str); 6] = [
    ("About", "about"),
    ("Work", "projects"),
    ("Process", "process"),
    ("Services", "services"),
    ("Voices", "testimonials"),
    ("Contact", "contact"),
];

/// Scroll offset past which the nav bar gets its `scrolled` style.
pub const SCROLLED_PX: f64 = 80.0;

const PANELS: usize = 3;
const ITEMS: usize = SECTION_LINKS.len();
const SLOT_SOCIALS: usize = PANELS + ITEMS;
const MENU_SLOTS: usize = SLOT_SOCIALS + 1;

fn panel_slots() -> Vec<usize> {
    (0..PANELS).collect()
}

fn item_slots() -> Vec<usize> {
    (PANELS..PANELS + ITEMS).collect()
}

pub fn open_timeline() -> Timeline {
    Timeline::new()
        .stagger(
            &panel_slots(),
            Tween::on(0).from_to(Prop::ScaleY, 0.0, 1.0).duration(0.5).ease(Ease::QuartInOut),
            0.1,
            Position::Sequence,
        )
        .stagger(
            &item_slots(),
            Tween::on(0)
                .from(Prop::YPercent, 110.0)
                .from(Prop::Opacity, 0.0)
                .duration(0.6)
                .ease(Ease::QuartOut),
            0.06,
            Position::Offset(-0.2),
        )
        .add(
            Tween::on(SLOT_SOCIALS)
                .from(Prop::Y, 20.0)
                .from(Prop::Opacity, 0.0)
                .duration(0.5),
            Position::Offset(-0.3),
        )
}

/// Menu content fading out; the first half of closing.
pub fn content_fade_timeline() -> Timeline {
    let mut content = item_slots();
    content.push(SLOT_SOCIALS);
    Timeline::new().stagger(
        &content,
        Tween::on(0).from_to(Prop::Opacity, 1.0, 0.0).duration(0.3).ease(Ease::QuadOut),
        0.02,
        Position::Sequence,
    )
}

pub fn close_timeline() -> Timeline {
    let mut panels = panel_slots();
    panels.reverse();
    let fade = content_fade_timeline();
    let fade_end = fade.duration();
    panels.iter().enumerate().fold(fade, |timeline, (i, slot)| {
        timeline.add(
            Tween::on(*slot)
                .from_to(Prop::ScaleY, 1.0, 0.0)
                .duration(0.45)
                .ease(Ease::QuartInOut),
            Position::At(fade_end - 0.05 + i as f64 * 0.08),
        )
    })
}

pub fn cover_in_timeline() -> Timeline {
    Timeline::new().stagger(
        &[0, 1, 2],
        Tween::on(0).from_to(Prop::YPercent, 100.0, 0.0).duration(0.6).ease(Ease::QuartInOut),
        0.12,
        Position::Sequence,
    )
}

pub fn cover_out_timeline() -> Timeline {
    Timeline::new().stagger(
        &[0, 1, 2],
        Tween::on(0).from_to(Prop::YPercent, 0.0, -100.0).duration(0.6).ease(Ease::QuartInOut),
        0.12,
        Position::Sequence,
    )
}

/// The `scrolled` flag for a scroll offset. A locked body reads as offset 0,
/// so no update is made while a lock is held.
pub fn nav_scrolled(scroll_y: f64, locked: bool) -> Option<bool> {
    if locked {
        None
    } else {
        Some(scroll_y > SCROLLED_PX)
    }
}

fn set_location_hash(anchor: &str) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(&format!("#{}", anchor))) {
        warn!("Could not update location: {:?}", e);
    }
}

#[function_component(SiteNav)]
pub fn site_nav() -> Html {
    let machine = use_reducer(MenuMachine::default);
    let is_scrolled = use_state_eq(|| false);

    let menu_refs = use_state(|| (0..MENU_SLOTS).map(|_| NodeRef::default()).collect::<Vec<_>>());
    let cover_refs = use_state(|| (0..PANELS).map(|_| NodeRef::default()).collect::<Vec<_>>());
    let menu_tween = use_mut_ref(|| None::<TweenHandle>);
    let nav_tween = use_mut_ref(|| None::<TweenHandle>);

    {
        let is_scrolled = is_scrolled.clone();
        use_frame_scroll(move |y| {
            if let Some(scrolled) = nav_scrolled(y, lock::is_locked()) {
                is_scrolled.set(scrolled);
            }
        });
    }

    {
        let dispatcher = machine.dispatcher();
        use_event_with_window("keydown", move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                dispatcher.dispatch(MenuAction::Close);
            }
        });
    }

    // Scroll is locked exactly while the menu is on screen; the guard is
    // released by the effect cleanup, including on unmount.
    use_effect_with_deps(
        move |locks| {
            let guard = if *locks {
                match BodyLock::acquire("menu") {
                    Ok(guard) => Some(guard),
                    Err(e) => {
                        warn!("Menu could not lock scroll: {}", e);
                        None
                    }
                }
            } else {
                None
            };
            move || drop(guard)
        },
        machine.locks_scroll(),
    );

    {
        let dispatcher = machine.dispatcher();
        let targets = (*menu_refs).clone();
        let menu_tween = menu_tween.clone();
        use_effect_with_deps(
            move |phase| {
                debug!("Menu phase {:?}", phase);
                let timeline = match phase {
                    MenuPhase::Opening => Some(open_timeline()),
                    MenuPhase::Closing => Some(close_timeline()),
                    MenuPhase::Open | MenuPhase::Closed => None,
                };
                if let Some(timeline) = timeline {
                    let handle = motion::play("menu", timeline, targets, move || {
                        dispatcher.dispatch(MenuAction::TransitionDone);
                    });
                    *menu_tween.borrow_mut() = Some(handle);
                }
                || ()
            },
            machine.phase,
        );
    }

    {
        let dispatcher = machine.dispatcher();
        let menu_targets = (*menu_refs).clone();
        let cover_targets = (*cover_refs).clone();
        let nav_tween = nav_tween.clone();
        use_effect_with_deps(
            move |navigation| {
                if let Some(navigation) = navigation {
                    debug!("Navigating to #{}: {:?}", navigation.anchor, navigation.stage);
                    let done = move || dispatcher.dispatch(MenuAction::NavStageDone);
                    let handle = match navigation.stage {
                        NavStage::FadingMenu => {
                            motion::play("menu", content_fade_timeline(), menu_targets, done)
                        }
                        NavStage::Covering => {
                            motion::play("page-cover", cover_in_timeline(), cover_targets, done)
                        }
                        NavStage::Revealing => {
                            for node in &menu_targets {
                                paint::revert(node);
                            }
                            scroll_to_anchor(&navigation.anchor, true);
                            set_location_hash(&navigation.anchor);
                            let reset = cover_targets.clone();
                            motion::play("page-cover", cover_out_timeline(), cover_targets, move || {
                                for node in &reset {
                                    paint::revert(node);
                                }
                                done();
                            })
                        }
                    };
                    *nav_tween.borrow_mut() = Some(handle);
                }
                || ()
            },
            machine.navigation.clone(),
        );
    }

    let toggle_menu = {
        let dispatcher = machine.dispatcher();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            dispatcher.dispatch(MenuAction::Toggle);
        })
    };

    let navigate = |anchor: &'static str| {
        let dispatcher = machine.dispatcher();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            dispatcher.dispatch(MenuAction::Navigate(anchor.to_string()));
        })
    };

    let menu_class = classes!(
        "menu",
        (machine.phase != MenuPhase::Closed).then(|| "is-active"),
    );

    html! {
        <>
            <nav class={classes!("top-nav", (*is_scrolled).then(|| "scrolled"))}>
                <div class="nav-content">
                    <a href="#top" class="nav-logo" onclick={navigate("top")}>
                        {"North Studio"}
                    </a>
                    <button
                        class={classes!("burger-menu", machine.is_open().then(|| "is-open"))}
                        aria-expanded={machine.is_open().to_string()}
                        aria-label="Menu"
                        onclick={toggle_menu}
                    >
                        <span></span>
                        <span></span>
                    </button>
                </div>
            </nav>

            <div class={menu_class}>
                <div class="menu__panels">
                    { for menu_refs[..PANELS].iter().map(|panel| html! {
                        <div class="menu__panel" ref={panel.clone()}></div>
                    }) }
                </div>
                <ul class="menu__items">
                    { for SECTION_LINKS.iter().zip(menu_refs[PANELS..PANELS + ITEMS].iter()).map(|((label, anchor), item)| html! {
                        <li class="menu__item" ref={item.clone()}>
                            <a href={format!("#{}", anchor)} onclick={navigate(*anchor)}>{*label}</a>
                        </li>
                    }) }
                </ul>
                <div class="menu__socials" ref={menu_refs[SLOT_SOCIALS].clone()}>
                    <a href={config::whatsapp_link()} target="_blank" rel="noopener noreferrer">{"WhatsApp"}</a>
                    <a href={config::booking_url()} target="_blank" rel="noopener noreferrer">{"Book a call"}</a>
                    <a href="mailto:hello@northstudio.design">{"hello@northstudio.design"}</a>
                </div>
            </div>

            <div class="page-cover" aria-hidden="true">
                { for cover_refs.iter().map(|panel| html! {
                    <div class="page-cover__panel" ref={panel.clone()}></div>
                }) }
            </div>

            <style>
                {r#"
                    .top-nav {
                        position: fixed;
                        top: 0;
                        left: 0;
                        right: 0;
                        z-index: 900;
                        padding: 1.5rem 2rem;
                        transition: background 0.3s ease, padding 0.3s ease;
                    }

                    .top-nav.scrolled {
                        background: rgba(15, 15, 15, 0.85);
                        backdrop-filter: blur(10px);
                        padding: 1rem 2rem;
                    }

                    .nav-content {
                        display: flex;
                        justify-content: space-between;
                        align-items: center;
                        max-width: 1400px;
                        margin: 0 auto;
                    }

                    .nav-logo {
                        color: #f2efe9;
                        text-decoration: none;
                        font-weight: 600;
                        letter-spacing: 0.08em;
                        text-transform: uppercase;
                        position: relative;
                        z-index: 950;
                    }

                    .burger-menu {
                        position: relative;
                        z-index: 950;
                        width: 44px;
                        height: 44px;
                        background: none;
                        border: none;
                        cursor: pointer;
                        display: flex;
                        flex-direction: column;
                        justify-content: center;
                        gap: 8px;
                    }

                    .burger-menu span {
                        display: block;
                        height: 2px;
                        width: 100%;
                        background: #f2efe9;
                        transition: transform 0.3s ease;
                    }

                    .burger-menu.is-open span:first-child {
                        transform: translateY(5px) rotate(45deg);
                    }

                    .burger-menu.is-open span:last-child {
                        transform: translateY(-5px) rotate(-45deg);
                    }

                    .menu {
                        position: fixed;
                        inset: 0;
                        z-index: 920;
                        pointer-events: none;
                        display: flex;
                        flex-direction: column;
                        justify-content: center;
                        padding: 6rem 2rem 3rem;
                    }

                    .menu.is-active {
                        pointer-events: auto;
                    }

                    .menu__panels {
                        position: absolute;
                        inset: 0;
                        display: grid;
                        grid-template-rows: repeat(3, 1fr);
                    }

                    .menu__panel {
                        background: #d9ff3f;
                        transform: scaleY(0);
                        transform-origin: top center;
                    }

                    .menu__items {
                        position: relative;
                        list-style: none;
                        margin: 0;
                        padding: 0;
                    }

                    .menu__item {
                        overflow: hidden;
                        opacity: 0;
                    }

                    .menu__item a {
                        color: #0f0f0f;
                        text-decoration: none;
                        font-size: clamp(2.5rem, 7vw, 6rem);
                        line-height: 1.1;
                        font-weight: 600;
                    }

                    .menu__socials {
                        position: relative;
                        display: flex;
                        flex-wrap: wrap;
                        gap: 1.5rem;
                        margin-top: 3rem;
                        opacity: 0;
                    }

                    .menu__socials a {
                        color: #0f0f0f;
                    }

                    .page-cover {
                        position: fixed;
                        inset: 0;
                        z-index: 980;
                        pointer-events: none;
                        overflow: hidden;
                    }

                    .page-cover__panel {
                        position: absolute;
                        inset: 0;
                        transform: translateY(100%);
                    }

                    .page-cover__panel:nth-child(1) { background: #2a2a2a; }
                    .page-cover__panel:nth-child(2) { background: #d9ff3f; }
                    .page-cover__panel:nth-child(3) { background: #0f0f0f; }

                    @media (max-width: 768px) {
                        .top-nav {
                            padding: 1rem;
                        }

                        .menu {
                            padding: 5rem 1.25rem 2rem;
                        }
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
    fn locked_body_keeps_scrolled_style() {
        assert_eq!(nav_scrolled(400.0, false), Some(true));
        assert_eq!(nav_scrolled(SCROLLED_PX, false), Some(false));
        // The fixed body reports 0 while the menu is open.
        assert_eq!(nav_scrolled(0.0, true), None);
        assert_eq!(nav_scrolled(0.0, false), Some(false));
    }

    #[test]
    fn opening_phases_are_ordered() {
        let timeline = open_timeline();
        let first_item = timeline.start_of(PANELS).unwrap_or_default();
        let last_panel = timeline.start_of(PANELS - 1).unwrap_or_default();
        let socials = timeline.start_of(PANELS + ITEMS).unwrap_or_default();
        // Items overlap the panels but never start before them.
        assert!(first_item >= last_panel);
        assert!(first_item < 0.2 * 2.0 + 0.5);
        assert!(socials > first_item);
    }

    #[test]
    fn closing_fades_content_before_panels() {
        let timeline = close_timeline();
        let halfway = timeline.sample(0.1);
        assert_eq!(halfway[&0].get(Prop::ScaleY), Some(1.0));
        let end = timeline.sample_progress(1.0);
        for slot in panel_slots() {
            assert_eq!(end[&slot].get(Prop::ScaleY), Some(0.0));
        }
        for slot in item_slots() {
            assert_eq!(end[&slot].get(Prop::Opacity), Some(0.0));
        }
    }

    #[test]
    fn cover_slides_in_then_out() {
        let cover = cover_in_timeline().sample_progress(1.0);
        assert!((0..3).all(|slot| cover[&slot].get(Prop::YPercent) == Some(0.0)));
        let away = cover_out_timeline().sample_progress(1.0);
        assert!((0..3).all(|slot| away[&slot].get(Prop::YPercent) == Some(-100.0)));
    }
}
