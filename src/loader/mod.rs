pub mod machine;

use gloo_timers::callback::Timeout;
use log::{info, warn};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::config::{loader_time_scale, LOADER_EXIT_DELAY_MS};
use crate::motion::frame::FrameLoop;
use crate::motion::{self, Ease, Position, Prop, Timeline, Tween, TweenHandle};
use crate::scroll::BodyLock;
use crate::session::SessionFlag;
use crate::viewport::use_viewport;

pub use machine::{cover_scale, LoaderMachine, LoaderPhase};

const DISC_PX: f64 = 120.0;
const STRIPS: usize = 4;

// Target slots in the exit timeline.
const SLOT_DISC: usize = STRIPS;
const SLOT_CONTENT: usize = STRIPS + 1;
const SLOT_ROOT: usize = STRIPS + 2;

fn viewport_cover() -> f64 {
    web_sys::window()
        .and_then(|w| {
            let width = w.inner_width().ok()?.as_f64()?;
            let height = w.inner_height().ok()?.as_f64()?;
            Some(cover_scale(width, height, DISC_PX))
        })
        .unwrap_or(20.0)
}

pub fn exit_timeline(cover: f64) -> Timeline {
    let strips: Vec<usize> = (0..STRIPS).collect();
    Timeline::new()
        .stagger(
            &strips,
            Tween::on(0).from_to(Prop::ScaleY, 1.0, 0.0).duration(0.5).ease(Ease::QuartInOut),
            0.08,
            Position::Sequence,
        )
        .add(
            Tween::on(SLOT_CONTENT).to(Prop::Opacity, 0.0).duration(0.4),
            Position::WithPrevious(0.0),
        )
        .add(
            Tween::on(SLOT_DISC)
                .from_to(Prop::Scale, 1.0, cover)
                .duration(1.0)
                .ease(Ease::CubicInOut),
            Position::Offset(-0.2),
        )
        .add(
            Tween::on(SLOT_ROOT).to(Prop::Opacity, 0.0).duration(0.35).ease(Ease::QuadOut),
            Position::Sequence,
        )
}

#[derive(Properties, PartialEq)]
pub struct LoaderProps {
    /// Fired once the loader is gone, or straight away when it was skipped.
    pub on_done: Callback<()>,
}

#[function_component(Loader)]
pub fn loader(props: &LoaderProps) -> Html {
    let viewport = use_viewport();
    let machine = use_mut_ref(|| LoaderMachine::new(viewport, loader_time_scale()).mount(&SessionFlag));
    let phase = use_state({
        let machine = machine.clone();
        move || {
            let phase = machine.borrow().phase();
            phase
        }
    });
    let percent = use_state(|| 0u32);
    let cover = use_mut_ref(viewport_cover);

    let root = use_node_ref();
    let disc = use_node_ref();
    let content = use_node_ref();
    let strips = use_state(|| (0..STRIPS).map(|_| NodeRef::default()).collect::<Vec<_>>());

    let frame = use_mut_ref(|| None::<FrameLoop>);
    let exit = use_mut_ref(|| None::<TweenHandle>);
    let exit_delay = use_mut_ref(|| None::<Timeout>);
    let lock = use_mut_ref(|| None::<BodyLock>);

    {
        let cover = cover.clone();
        use_event_with_window("resize", move |_: Event| {
            *cover.borrow_mut() = viewport_cover();
        });
    }

    // Counting starts on mount, unless this session already saw the loader.
    {
        let machine = machine.clone();
        let phase = phase.clone();
        let percent = percent.clone();
        let on_done = props.on_done.clone();
        let frame = frame.clone();
        let exit = exit.clone();
        let exit_delay = exit_delay.clone();
        let lock = lock.clone();
        use_effect_with_deps(
            move |_| {
                if machine.borrow().phase() == LoaderPhase::Removed {
                    info!("Loader already shown this session");
                    on_done.emit(());
                } else {
                    info!("Loader counting for {}ms", machine.borrow().duration_ms());
                    match BodyLock::acquire("loader") {
                        Ok(acquired) => *lock.borrow_mut() = Some(acquired),
                        Err(e) => warn!("Loader could not lock scroll: {}", e),
                    }
                    let tick_machine = machine.clone();
                    let started = FrameLoop::start(move |timestamp| {
                        let mut machine = tick_machine.borrow_mut();
                        machine.advance(timestamp, &SessionFlag);
                        percent.set(machine.percent());
                        if machine.phase() == LoaderPhase::Complete {
                            phase.set(LoaderPhase::Complete);
                            return false;
                        }
                        true
                    });
                    match started {
                        Ok(frame_loop) => *frame.borrow_mut() = Some(frame_loop),
                        Err(e) => {
                            warn!("Loader skipped: {}", e);
                            on_done.emit(());
                        }
                    }
                }
                // Unmounting cancels whatever stage is still pending.
                move || {
                    frame.borrow_mut().take();
                    exit_delay.borrow_mut().take();
                    exit.borrow_mut().take();
                    lock.borrow_mut().take();
                }
            },
            (),
        );
    }

    {
        let machine = machine.clone();
        let phase_handle = phase.clone();
        let on_done = props.on_done.clone();
        let targets: Vec<NodeRef> = strips
            .iter()
            .cloned()
            .chain([disc.clone(), content.clone(), root.clone()])
            .collect();
        let cover = cover.clone();
        let exit = exit.clone();
        let exit_delay = exit_delay.clone();
        let lock = lock.clone();
        use_effect_with_deps(
            move |phase| {
                match **phase {
                    LoaderPhase::Complete => {
                        let delay = Timeout::new(LOADER_EXIT_DELAY_MS, move || {
                            if machine.borrow_mut().begin_exit() {
                                phase_handle.set(LoaderPhase::Exiting);
                            }
                        });
                        *exit_delay.borrow_mut() = Some(delay);
                    }
                    LoaderPhase::Exiting => {
                        let timeline = exit_timeline(*cover.borrow());
                        let handle = motion::play("loader", timeline, targets, move || {
                            if machine.borrow_mut().finish() {
                                info!("Loader removed");
                                lock.borrow_mut().take();
                                phase_handle.set(LoaderPhase::Removed);
                                on_done.emit(());
                            }
                        });
                        *exit.borrow_mut() = Some(handle);
                    }
                    _ => {}
                }
                || ()
            },
            phase.clone(),
        );
    }

    if *phase == LoaderPhase::Removed {
        return html! {};
    }

    let complete = matches!(*phase, LoaderPhase::Complete | LoaderPhase::Exiting);

    html! {
        <div class="loader" ref={root}>
            <div class="loader__strips">
                { for strips.iter().map(|strip| html! { <span class="loader__strip" ref={strip.clone()}></span> }) }
            </div>
            <div class="loader__disc" ref={disc}></div>
            <div class="loader__content" ref={content}>
                <p class="loader__brand">{"North Studio"}</p>
                <p class={classes!("loader__counter", complete.then(|| "is-complete"))}>
                    { format!("{}%", *percent) }
                </p>
            </div>
            <style>
                {r#"
                    .loader {
                        position: fixed;
                        inset: 0;
                        z-index: 1000;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        background: #0f0f0f;
                        overflow: hidden;
                    }

                    .loader__strips {
                        position: absolute;
                        inset: 0;
                        display: grid;
                        grid-template-columns: repeat(4, 1fr);
                    }

                    .loader__strip {
                        display: block;
                        background: #171717;
                        border-right: 1px solid rgba(242, 239, 233, 0.04);
                        transform-origin: top center;
                    }

                    .loader__disc {
                        position: absolute;
                        width: 120px;
                        height: 120px;
                        border-radius: 50%;
                        background: #d9ff3f;
                        will-change: transform;
                    }

                    .loader__content {
                        position: relative;
                        text-align: center;
                        mix-blend-mode: difference;
                    }

                    .loader__brand {
                        margin: 0 0 0.5rem;
                        font-size: 0.9rem;
                        letter-spacing: 0.3em;
                        text-transform: uppercase;
                    }

                    .loader__counter {
                        margin: 0;
                        font-size: clamp(3rem, 10vw, 8rem);
                        font-variant-numeric: tabular-nums;
                        transition: color 0.3s ease;
                    }

                    .loader__counter.is-complete {
                        color: #d9ff3f;
                    }
                "#}
            </style>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_covers_viewport_after_strips_begin() {
        let timeline = exit_timeline(18.0);
        let end = timeline.sample_progress(1.0);
        assert_eq!(end[&SLOT_DISC].get(Prop::Scale), Some(18.0));
        assert_eq!(end[&SLOT_ROOT].get(Prop::Opacity), Some(0.0));
        for strip in 0..STRIPS {
            assert_eq!(end[&strip].get(Prop::ScaleY), Some(0.0));
        }
        let start = timeline.sample(0.0);
        assert_eq!(start[&SLOT_DISC].get(Prop::Scale), Some(1.0));
        assert_eq!(start[&SLOT_CONTENT].get(Prop::Opacity), Some(1.0));
    }
}
