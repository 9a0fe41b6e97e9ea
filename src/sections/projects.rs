use yew::prelude::*;

use crate::motion::{Band, Ease, Edge, Position, Prop, SceneTrigger, Timeline, TriggerSpec, Tween};
use crate::scene::{fade_up, mask_up, require, require_all, slots, use_scene};
use crate::viewport::ViewportClass;

#[derive(Clone, Copy, PartialEq)]
struct Project {
    title: &'static str,
    client: &'static str,
    year: u16,
    image: &'static str,
}

const PROJECTS: [Project; 4] = [
    Project { title: "Tidal", client: "Harbour Energy", year: 2024, image: "/assets/work-tidal.jpg" },
    Project { title: "Common Ground", client: "City Library", year: 2023, image: "/assets/work-library.jpg" },
    Project { title: "Slow Roast", client: "Marlo Coffee", year: 2023, image: "/assets/work-marlo.jpg" },
    Project { title: "Fieldnotes", client: "Outward Press", year: 2022, image: "/assets/work-fieldnotes.jpg" },
];

/// The track slides left by one card per viewport height of pin.
pub fn pin_distance(cards: usize) -> f64 {
    cards.saturating_sub(1) as f64
}

/// Slot 0 is the track, cards follow.
pub fn track_timeline(cards: usize) -> Timeline {
    let shift = if cards == 0 {
        0.0
    } else {
        -100.0 * (cards - 1) as f64 / cards as f64
    };
    let mut timeline = Timeline::new().add(
        Tween::on(0).from_to(Prop::XPercent, 0.0, shift).duration(1.0).ease(Ease::Linear),
        Position::Sequence,
    );
    for card in 1..cards {
        let at = (card - 1) as f64 / (cards - 1) as f64;
        timeline = timeline.add(
            Tween::on(card + 1)
                .from(Prop::Scale, 0.88)
                .from(Prop::Opacity, 0.4)
                .duration(1.0 / (cards - 1) as f64)
                .ease(Ease::Linear),
            Position::At(at),
        );
    }
    timeline
}

#[function_component(Projects)]
pub fn projects() -> Html {
    let section = use_node_ref();
    let heading = use_node_ref();
    let track = use_node_ref();
    let cards = use_state(|| PROJECTS.iter().map(|_| NodeRef::default()).collect::<Vec<_>>());

    {
        let section = section.clone();
        let heading = heading.clone();
        let track = track.clone();
        let cards = (*cards).clone();
        use_scene("projects", move |class| {
            let anchor = require(&section, "projects")?;
            let heading = require(&heading, "projects heading")?;
            let cards = require_all(&cards, "project cards")?;
            let mut triggers = vec![SceneTrigger {
                spec: TriggerSpec::once(Band::new(Edge::Top, 0.8)),
                anchor: anchor.clone(),
                timeline: mask_up(&[0], 0.0),
                targets: vec![heading],
            }];
            match class {
                ViewportClass::Mobile => {
                    for card in cards {
                        triggers.push(SceneTrigger {
                            spec: TriggerSpec::once(Band::new(Edge::Top, 0.85)),
                            anchor: card.clone(),
                            timeline: fade_up(&[0], 40.0, 0.0),
                            targets: vec![card],
                        });
                    }
                }
                ViewportClass::Tablet => {
                    let count = cards.len();
                    triggers.push(SceneTrigger {
                        spec: TriggerSpec::toggle(Band::new(Edge::Top, 0.6)),
                        anchor,
                        timeline: fade_up(&slots(0..count), 60.0, 0.15),
                        targets: cards,
                    });
                }
                ViewportClass::Desktop => {
                    let count = cards.len();
                    let mut targets = vec![require(&track, "projects track")?];
                    targets.extend(cards);
                    triggers.push(SceneTrigger {
                        spec: TriggerSpec::pin(pin_distance(count)),
                        anchor,
                        timeline: track_timeline(count),
                        targets,
                    });
                }
            }
            Ok(triggers)
        });
    }

    html! {
        <section id="projects" class="projects pin" ref={section}>
            <div class="pin-frame projects__frame">
                <h2 class="projects__heading">
                    <span class="mask"><span class="mask__inner" ref={heading}>{"Selected work"}</span></span>
                </h2>
                <div class="projects__track" ref={track}>
                    { for PROJECTS.iter().zip(cards.iter()).map(|(project, card)| html! {
                        <article class="project-card" ref={card.clone()}>
                            <img class="project-card__image" src={project.image} alt={project.title} loading="lazy" />
                            <div class="project-card__meta">
                                <h3>{ project.title }</h3>
                                <p>{ format!("{} · {}", project.client, project.year) }</p>
                            </div>
                        </article>
                    }) }
                </div>
            </div>
            <style>
                {r#"
                    .projects__frame {
                        padding: 10vh 0 6vh;
                        box-sizing: border-box;
                    }

                    .projects__heading {
                        padding: 0 6vw;
                        margin: 0 0 6vh;
                        font-size: clamp(2.5rem, 6vw, 6rem);
                    }

                    .projects__track {
                        display: flex;
                        width: 400%;
                        will-change: transform;
                    }

                    .project-card {
                        flex: 0 0 25%;
                        padding: 0 6vw;
                        box-sizing: border-box;
                    }

                    .project-card__image {
                        width: 100%;
                        height: 55vh;
                        object-fit: cover;
                    }

                    .project-card__meta {
                        display: flex;
                        justify-content: space-between;
                        align-items: baseline;
                    }

                    @media (max-width: 1024px) {
                        .projects__track {
                            width: auto;
                            display: grid;
                            grid-template-columns: 1fr 1fr;
                            gap: 4vw;
                            padding: 0 6vw;
                        }

                        .project-card {
                            padding: 0;
                        }

                        .project-card__image {
                            height: 40vh;
                        }
                    }

                    @media (max-width: 768px) {
                        .projects__track {
                            grid-template-columns: 1fr;
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
    fn track_ends_on_last_card() {
        let timeline = track_timeline(4);
        assert!((timeline.duration() - 1.0).abs() < 1e-9);
        let end = timeline.sample_progress(1.0);
        assert!((end[&0].get(Prop::XPercent).unwrap_or_default() + 75.0).abs() < 1e-9);
        for slot in 2..=4 {
            assert_eq!(end[&slot].get(Prop::Scale), Some(1.0));
        }
        // First card is never dimmed.
        assert!(!end.contains_key(&1));
        assert_eq!(pin_distance(4), 3.0);
    }

    #[test]
    fn cards_grow_in_turn() {
        let mid = track_timeline(4).sample_progress(0.5);
        assert_eq!(mid[&2].get(Prop::Scale), Some(1.0));
        assert_eq!(mid[&4].get(Prop::Scale), Some(0.88));
    }

    #[test]
    fn empty_track_is_static() {
        assert_eq!(pin_distance(0), 0.0);
        let end = track_timeline(0).sample_progress(1.0);
        assert_eq!(end[&0].get(Prop::XPercent), Some(0.0));
    }
}
