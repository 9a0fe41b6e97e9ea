use yew::prelude::*;

use crate::motion::{Band, Ease, Edge, Position, Prop, SceneTrigger, Timeline, TriggerSpec, Tween};
use crate::scene::{fade_up, require, use_scene};

pub const PIN_DISTANCE: f64 = 1.5;

const SLOT_FRAME: usize = 0;
const SLOT_TITLE: usize = 1;
const SLOT_CAPTION: usize = 2;

/// Reel grows to full bleed while the title clears, then the caption rises.
pub fn pinned_timeline() -> Timeline {
    Timeline::new()
        .add(
            Tween::on(SLOT_FRAME)
                .from_to(Prop::Scale, 0.6, 1.0)
                .duration(1.0)
                .ease(Ease::Linear),
            Position::At(0.0),
        )
        .add(
            Tween::on(SLOT_TITLE)
                .from_to(Prop::Opacity, 1.0, 0.0)
                .from_to(Prop::Y, 0.0, -80.0)
                .duration(0.5)
                .ease(Ease::Linear),
            Position::At(0.0),
        )
        .add(
            Tween::on(SLOT_CAPTION)
                .from(Prop::Y, 60.0)
                .from(Prop::Opacity, 0.0)
                .duration(0.5)
                .ease(Ease::Linear),
            Position::At(0.5),
        )
}

#[function_component(Showcase)]
pub fn showcase() -> Html {
    let section = use_node_ref();
    let frame = use_node_ref();
    let title = use_node_ref();
    let caption = use_node_ref();

    {
        let section = section.clone();
        let frame = frame.clone();
        let title = title.clone();
        let caption = caption.clone();
        use_scene("showcase", move |class| {
            let anchor = require(&section, "showcase")?;
            let targets = vec![
                require(&frame, "showcase reel")?,
                require(&title, "showcase title")?,
                require(&caption, "showcase caption")?,
            ];
            let trigger = if class.is_mobile() {
                SceneTrigger {
                    spec: TriggerSpec::once(Band::new(Edge::Top, 0.8)),
                    anchor,
                    timeline: fade_up(&[SLOT_FRAME, SLOT_CAPTION], 30.0, 0.15),
                    targets,
                }
            } else {
                SceneTrigger {
                    spec: TriggerSpec::pin(PIN_DISTANCE),
                    anchor,
                    timeline: pinned_timeline(),
                    targets,
                }
            };
            Ok(vec![trigger])
        });
    }

    html! {
        <section class="showcase pin" ref={section}>
            <div class="pin-frame showcase__frame">
                <h2 class="showcase__title" ref={title}>{"Studio reel 2024"}</h2>
                <div class="showcase__reel" ref={frame}>
                    <video class="showcase__video" src="/assets/reel.mp4" autoplay=true muted=true loop=true playsinline=true />
                </div>
                <p class="showcase__caption" ref={caption}>
                    {"Ninety seconds of identities, interfaces and films from the past year."}
                </p>
            </div>
            <style>
                {r#"
                    .showcase__frame {
                        position: relative;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        min-height: 100vh;
                        overflow: hidden;
                    }

                    .showcase__title {
                        position: absolute;
                        top: 12vh;
                        z-index: 1;
                        font-size: clamp(2.5rem, 7vw, 7rem);
                        margin: 0;
                    }

                    .showcase__reel {
                        width: 100vw;
                        height: 100vh;
                        overflow: hidden;
                    }

                    .showcase__video {
                        width: 100%;
                        height: 100%;
                        object-fit: cover;
                    }

                    .showcase__caption {
                        position: absolute;
                        bottom: 8vh;
                        left: 6vw;
                        max-width: 36ch;
                    }

                    @media (max-width: 768px) {
                        .showcase__frame {
                            flex-direction: column;
                            min-height: auto;
                            padding: 10vh 0;
                        }

                        .showcase__title,
                        .showcase__caption {
                            position: static;
                            padding: 0 6vw;
                        }

                        .showcase__reel {
                            height: 56vw;
                        }
                    }
                "#}
            </style>
        </section>
    }
}
