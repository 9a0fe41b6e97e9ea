use yew::prelude::*;

use crate::motion::{Band, Ease, Edge, Position, Prop, SceneTrigger, Timeline, TriggerSpec, Tween};
use crate::scene::{fade_up, require, require_all, use_scene};

const STATEMENTS: [&str; 3] = [
    "Small team. Senior hands on every project.",
    "Design and engineering in one room.",
    "We measure what we make after it ships.",
];

/// Statements stacked in one spot take turns: each fades in, holds, then
/// hands over to the next. The last one stays.
pub fn crossfade_timeline(count: usize) -> Timeline {
    let mut timeline = Timeline::new();
    for i in 0..count {
        let at = i as f64;
        timeline = timeline.add(
            Tween::on(i)
                .from(Prop::Opacity, 0.0)
                .from(Prop::YPercent, 40.0)
                .duration(0.4)
                .ease(Ease::CubicOut),
            Position::At(at),
        );
        if i + 1 < count {
            timeline = timeline.add(
                Tween::on(i)
                    .from_to(Prop::Opacity, 1.0, 0.0)
                    .from_to(Prop::YPercent, 0.0, -40.0)
                    .duration(0.4)
                    .ease(Ease::CubicInOut),
                Position::At(at + 0.8),
            );
        }
    }
    timeline
}

pub fn pin_distance(count: usize) -> f64 {
    count.max(1) as f64
}

#[function_component(Why)]
pub fn why() -> Html {
    let section = use_node_ref();
    let statements = use_state(|| STATEMENTS.iter().map(|_| NodeRef::default()).collect::<Vec<_>>());

    {
        let section = section.clone();
        let statements = (*statements).clone();
        use_scene("why", move |class| {
            let anchor = require(&section, "why")?;
            let statements = require_all(&statements, "why statements")?;
            if class.is_mobile() {
                return Ok(statements
                    .into_iter()
                    .map(|node| SceneTrigger {
                        spec: TriggerSpec::once(Band::new(Edge::Top, 0.85)),
                        anchor: node.clone(),
                        timeline: fade_up(&[0], 24.0, 0.0),
                        targets: vec![node],
                    })
                    .collect());
            }
            let count = statements.len();
            Ok(vec![SceneTrigger {
                spec: TriggerSpec::pin(pin_distance(count)),
                anchor,
                timeline: crossfade_timeline(count),
                targets: statements,
            }])
        });
    }

    html! {
        <section class="why pin" ref={section}>
            <div class="pin-frame why__frame">
                <p class="eyebrow">{"Why North"}</p>
                <div class="why__stack">
                    { for STATEMENTS.iter().zip(statements.iter()).map(|(text, node)| html! {
                        <p class="why__statement" ref={node.clone()}>{ *text }</p>
                    }) }
                </div>
            </div>
            <style>
                {r#"
                    .why__frame {
                        display: flex;
                        flex-direction: column;
                        justify-content: center;
                        padding: 0 6vw;
                        box-sizing: border-box;
                        min-height: 100vh;
                    }

                    .why__stack {
                        display: grid;
                    }

                    .why__statement {
                        grid-area: 1 / 1;
                        margin: 0;
                        font-size: clamp(2rem, 5vw, 5rem);
                        line-height: 1.05;
                        max-width: 18ch;
                    }

                    @media (max-width: 768px) {
                        .why__frame {
                            min-height: auto;
                            padding: 12vh 6vw;
                        }

                        .why__stack {
                            display: block;
                        }

                        .why__statement {
                            margin-bottom: 2rem;
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
    fn one_statement_visible_at_a_time() {
        let timeline = crossfade_timeline(3);
        let early = timeline.sample(0.5);
        assert_eq!(early[&0].get(Prop::Opacity), Some(1.0));
        assert_eq!(early[&1].get(Prop::Opacity), Some(0.0));

        let handover = timeline.sample(1.5);
        assert_eq!(handover[&0].get(Prop::Opacity), Some(0.0));
        assert_eq!(handover[&1].get(Prop::Opacity), Some(1.0));
        assert_eq!(handover[&2].get(Prop::Opacity), Some(0.0));

        let end = timeline.sample_progress(1.0);
        assert_eq!(end[&2].get(Prop::Opacity), Some(1.0));
        assert_eq!(end[&1].get(Prop::Opacity), Some(0.0));
    }
}
