use yew::prelude::*;

use crate::motion::{Band, Ease, Edge, Position, Prop, SceneTrigger, Timeline, TriggerSpec, Tween};
use crate::scene::{mask_up, require, require_all, use_scene};
use crate::viewport::ViewportClass;

const LINES: [&str; 3] = ["We shape", "brands that", "move people"];

// Intro slots: title lines, then these.
const SLOT_LEAD: usize = LINES.len();
const SLOT_MEDIA: usize = LINES.len() + 1;

pub fn intro_timeline() -> Timeline {
    let lines: Vec<usize> = (0..LINES.len()).collect();
    mask_up(&lines, 0.12)
        .add(
            Tween::on(SLOT_LEAD).from(Prop::Opacity, 0.0).from(Prop::Y, 24.0).duration(0.8),
            Position::Offset(-0.6),
        )
        .add(
            Tween::on(SLOT_MEDIA)
                .from(Prop::ClipBottom, 100.0)
                .duration(1.2)
                .ease(Ease::ExpoOut),
            Position::WithPrevious(0.1),
        )
}

/// Image drifts and grows while the hero scrolls out.
pub fn parallax_timeline() -> Timeline {
    Timeline::new().add(
        Tween::on(0)
            .from_to(Prop::Y, 0.0, 140.0)
            .from_to(Prop::Scale, 1.0, 1.12)
            .ease(Ease::Linear),
        Position::Sequence,
    )
}

#[function_component(Hero)]
pub fn hero() -> Html {
    let section = use_node_ref();
    let lines = use_state(|| LINES.iter().map(|_| NodeRef::default()).collect::<Vec<_>>());
    let lead = use_node_ref();
    let media = use_node_ref();
    let image = use_node_ref();

    {
        let section = section.clone();
        let lines = (*lines).clone();
        let lead = lead.clone();
        let media = media.clone();
        let image = image.clone();
        use_scene("hero", move |class| {
            let anchor = require(&section, "hero")?;
            let mut targets = require_all(&lines, "hero title")?;
            targets.push(require(&lead, "hero lead")?);
            targets.push(require(&media, "hero media")?);
            let mut triggers = vec![SceneTrigger {
                spec: TriggerSpec::once(Band::new(Edge::Top, 1.0)),
                anchor: anchor.clone(),
                timeline: intro_timeline(),
                targets,
            }];
            if class != ViewportClass::Mobile {
                triggers.push(SceneTrigger {
                    spec: TriggerSpec::scrub(Band::new(Edge::Top, 0.0), Band::new(Edge::Bottom, 0.0)),
                    anchor,
                    timeline: parallax_timeline(),
                    targets: vec![require(&image, "hero image")?],
                });
            }
            Ok(triggers)
        });
    }

    html! {
        <section id="top" class="hero" ref={section}>
            <h1 class="hero__title">
                { for LINES.iter().zip(lines.iter()).map(|(text, line)| html! {
                    <span class="hero__line"><span class="hero__line-inner" ref={line.clone()}>{ *text }</span></span>
                }) }
            </h1>
            <p class="hero__lead" ref={lead}>
                {"An independent design and motion studio. Identity, product and campaign work for teams who care how things feel."}
            </p>
            <div class="hero__media" ref={media}>
                <img class="hero__image" ref={image} src="/assets/hero.jpg" alt="Studio work in progress" />
            </div>
            <style>
                {r#"
                    .hero {
                        position: relative;
                        min-height: 100vh;
                        padding: 18vh 6vw 8vh;
                        display: grid;
                        grid-template-columns: 1.2fr 1fr;
                        gap: 4vw;
                        align-items: end;
                    }

                    .hero__title {
                        margin: 0;
                        font-size: clamp(3rem, 8vw, 9rem);
                        line-height: 0.95;
                        letter-spacing: -0.03em;
                    }

                    .hero__line {
                        display: block;
                        overflow: hidden;
                    }

                    .hero__line-inner {
                        display: block;
                    }

                    .hero__lead {
                        max-width: 32ch;
                        font-size: 1.1rem;
                        color: rgba(242, 239, 233, 0.7);
                    }

                    .hero__media {
                        grid-column: 1 / -1;
                        height: 60vh;
                        overflow: hidden;
                        border-radius: 4px;
                    }

                    .hero__image {
                        width: 100%;
                        height: 120%;
                        object-fit: cover;
                    }

                    @media (max-width: 768px) {
                        .hero {
                            grid-template-columns: 1fr;
                            padding-top: 14vh;
                        }

                        .hero__media {
                            height: 40vh;
                        }
                    }
                "#}
            </style>
        </section>
    }
}
