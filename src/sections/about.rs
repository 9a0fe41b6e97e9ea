use yew::prelude::*;

use crate::motion::{Band, Ease, Edge, Position, Prop, SceneTrigger, Timeline, TriggerSpec, Tween};
use crate::scene::{fade_up, require, require_all, slots, use_scene};

const PARAGRAPHS: [&str; 3] = [
    "North Studio is a team of eleven designers, engineers and animators working out of a converted print shop.",
    "We start every project by listening. Then we sketch, prototype and test until the idea holds up in the real world.",
    "Most of our clients stay for years. We think that says more than any award shelf.",
];

pub const PIN_DISTANCE: f64 = 1.0;

/// Image unmasks and settles while the section is held.
pub fn reveal_timeline() -> Timeline {
    Timeline::new()
        .add(
            Tween::on(0).from(Prop::ClipBottom, 100.0).duration(1.0).ease(Ease::Linear),
            Position::Sequence,
        )
        .add(
            Tween::on(1).from(Prop::Scale, 1.3).duration(1.0).ease(Ease::Linear),
            Position::WithPrevious(0.0),
        )
        .add(
            Tween::on(2).from(Prop::Opacity, 0.0).from(Prop::X, -40.0).duration(0.4),
            Position::Offset(-0.4),
        )
}

#[function_component(About)]
pub fn about() -> Html {
    let section = use_node_ref();
    let eyebrow = use_node_ref();
    let paragraphs = use_state(|| PARAGRAPHS.iter().map(|_| NodeRef::default()).collect::<Vec<_>>());
    let frame = use_node_ref();
    let image = use_node_ref();
    let caption = use_node_ref();

    {
        let section = section.clone();
        let eyebrow = eyebrow.clone();
        let paragraphs = (*paragraphs).clone();
        let frame = frame.clone();
        let image = image.clone();
        let caption = caption.clone();
        use_scene("about", move |class| {
            let anchor = require(&section, "about")?;
            let mut text = vec![require(&eyebrow, "about eyebrow")?];
            text.extend(require_all(&paragraphs, "about paragraphs")?);
            let media = vec![
                require(&frame, "about frame")?,
                require(&image, "about image")?,
                require(&caption, "about caption")?,
            ];

            if class.is_mobile() {
                let count = text.len();
                return Ok(vec![
                    SceneTrigger {
                        spec: TriggerSpec::once(Band::new(Edge::Top, 0.8)),
                        anchor: anchor.clone(),
                        timeline: fade_up(&slots(0..count), 30.0, 0.1),
                        targets: text,
                    },
                    SceneTrigger {
                        spec: TriggerSpec::once(Band::new(Edge::Top, 0.8)),
                        anchor: media[0].clone(),
                        timeline: fade_up(&[0], 30.0, 0.0),
                        targets: media,
                    },
                ]);
            }

            let count = text.len();
            Ok(vec![
                SceneTrigger {
                    spec: TriggerSpec::toggle(Band::new(Edge::Top, 0.7)),
                    anchor: anchor.clone(),
                    timeline: fade_up(&slots(0..count), 40.0, 0.12),
                    targets: text,
                },
                SceneTrigger {
                    spec: TriggerSpec::pin(PIN_DISTANCE),
                    anchor,
                    timeline: reveal_timeline(),
                    targets: media,
                },
            ])
        });
    }

    html! {
        <section id="about" class="about pin" ref={section}>
            <div class="pin-frame about__frame">
                <div class="about__text">
                    <p class="eyebrow" ref={eyebrow}>{"About the studio"}</p>
                    { for PARAGRAPHS.iter().zip(paragraphs.iter()).map(|(text, node)| html! {
                        <p class="about__paragraph" ref={node.clone()}>{ *text }</p>
                    }) }
                </div>
                <figure class="about__media" ref={frame}>
                    <img class="about__image" ref={image} src="/assets/studio.jpg" alt="The studio floor" loading="lazy" />
                    <figcaption class="about__caption" ref={caption}>{"Rue des Ateliers, since 2014"}</figcaption>
                </figure>
            </div>
            <style>
                {r#"
                    .about__frame {
                        display: grid;
                        grid-template-columns: 1fr 1fr;
                        gap: 6vw;
                        align-items: center;
                        padding: 12vh 6vw;
                        box-sizing: border-box;
                    }

                    .about__paragraph {
                        font-size: clamp(1.2rem, 2vw, 1.8rem);
                        line-height: 1.35;
                        margin: 0 0 1.5rem;
                    }

                    .about__media {
                        margin: 0;
                        height: 70vh;
                        overflow: hidden;
                        position: relative;
                    }

                    .about__image {
                        width: 100%;
                        height: 100%;
                        object-fit: cover;
                    }

                    .about__caption {
                        position: absolute;
                        left: 1rem;
                        bottom: 1rem;
                        font-size: 0.8rem;
                        letter-spacing: 0.1em;
                        text-transform: uppercase;
                    }

                    @media (max-width: 768px) {
                        .about__frame {
                            grid-template-columns: 1fr;
                            padding: 10vh 6vw;
                        }

                        .about__media {
                            height: 50vh;
                        }
                    }
                "#}
            </style>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_caption_arrives_last() {
        let timeline = reveal_timeline();
        assert!((timeline.duration() - 1.0).abs() < 1e-9);
        let early = timeline.sample_progress(0.5);
        assert_eq!(early[&2].get(Prop::Opacity), Some(0.0));
        assert!((early[&0].get(Prop::ClipBottom).unwrap_or_default() - 50.0).abs() < 1e-9);
        let end = timeline.sample_progress(1.0);
        assert_eq!(end[&1].get(Prop::Scale), Some(1.0));
        assert_eq!(end[&2].get(Prop::Opacity), Some(1.0));
    }
}
