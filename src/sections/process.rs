use yew::prelude::*;

use crate::motion::{Band, Ease, Edge, Position, Prop, SceneTrigger, Timeline, TriggerSpec, Tween};
use crate::scene::{fade_up, require, require_all, slots, use_scene};
use crate::viewport::ViewportClass;

const STEPS: [(&str, &str); 4] = [
    ("Listen", "Workshops with the people who will live with the work, not just the people who sign it off."),
    ("Sketch", "Fast, rough and many. We throw most of it away on purpose."),
    ("Build", "Design and code in the same room, tested on real devices every week."),
    ("Launch", "We ship together, then stay close while the work meets its audience."),
];

pub const PIN_DISTANCE: f64 = 2.0;

/// Slot 0 is the progress rail, steps follow. Each step brightens in its own
/// quarter of the pin while the rail fills.
pub fn staged_timeline(steps: usize) -> Timeline {
    let mut timeline = Timeline::new().add(
        Tween::on(0).from_to(Prop::ScaleX, 0.0, 1.0).duration(1.0).ease(Ease::Linear),
        Position::At(0.0),
    );
    if steps == 0 {
        return timeline;
    }
    let share = 1.0 / steps as f64;
    for step in 0..steps {
        timeline = timeline.add(
            Tween::on(step + 1)
                .from(Prop::Opacity, 0.15)
                .from(Prop::Y, 30.0)
                .duration(share * 0.6)
                .ease(Ease::QuadOut),
            Position::At(share * step as f64),
        );
    }
    timeline
}

#[function_component(Process)]
pub fn process() -> Html {
    let section = use_node_ref();
    let rail = use_node_ref();
    let steps = use_state(|| STEPS.iter().map(|_| NodeRef::default()).collect::<Vec<_>>());

    {
        let section = section.clone();
        let rail = rail.clone();
        let steps = (*steps).clone();
        use_scene("process", move |class| {
            let anchor = require(&section, "process")?;
            let steps = require_all(&steps, "process steps")?;
            let count = steps.len();
            let trigger = match class {
                ViewportClass::Mobile => {
                    return Ok(steps
                        .into_iter()
                        .map(|step| SceneTrigger {
                            spec: TriggerSpec::once(Band::new(Edge::Top, 0.85)),
                            anchor: step.clone(),
                            timeline: fade_up(&[0], 30.0, 0.0),
                            targets: vec![step],
                        })
                        .collect());
                }
                ViewportClass::Tablet => SceneTrigger {
                    spec: TriggerSpec::toggle(Band::new(Edge::Top, 0.6)),
                    anchor,
                    timeline: fade_up(&slots(0..count), 40.0, 0.12),
                    targets: steps,
                },
                ViewportClass::Desktop => {
                    let mut targets = vec![require(&rail, "process rail")?];
                    targets.extend(steps);
                    SceneTrigger {
                        spec: TriggerSpec::pin(PIN_DISTANCE),
                        anchor,
                        timeline: staged_timeline(count),
                        targets,
                    }
                }
            };
            Ok(vec![trigger])
        });
    }

    html! {
        <section id="process" class="process pin" ref={section}>
            <div class="pin-frame process__frame">
                <p class="eyebrow">{"How we work"}</p>
                <div class="process__rail"><span class="process__rail-fill" ref={rail}></span></div>
                <ol class="process__steps">
                    { for STEPS.iter().zip(steps.iter()).enumerate().map(|(i, ((title, body), node))| html! {
                        <li class="process__step" ref={node.clone()}>
                            <span class="process__index">{ format!("0{}", i + 1) }</span>
                            <h3>{ *title }</h3>
                            <p>{ *body }</p>
                        </li>
                    }) }
                </ol>
            </div>
            <style>
                {r#"
                    .process__frame {
                        padding: 14vh 6vw;
                        box-sizing: border-box;
                    }

                    .process__rail {
                        height: 2px;
                        margin: 4vh 0;
                        background: rgba(242, 239, 233, 0.12);
                    }

                    .process__rail-fill {
                        display: block;
                        height: 100%;
                        background: #d9ff3f;
                        transform-origin: left center;
                    }

                    .process__steps {
                        list-style: none;
                        padding: 0;
                        margin: 0;
                        display: grid;
                        grid-template-columns: repeat(4, 1fr);
                        gap: 3vw;
                    }

                    .process__index {
                        font-variant-numeric: tabular-nums;
                        color: #d9ff3f;
                    }

                    @media (max-width: 1024px) {
                        .process__steps {
                            grid-template-columns: 1fr 1fr;
                        }
                    }

                    @media (max-width: 768px) {
                        .process__steps {
                            grid-template-columns: 1fr;
                        }

                        .process__rail {
                            display: none;
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
    fn steps_light_up_in_order() {
        let timeline = staged_timeline(4);
        let at = timeline.sample_progress(0.4);
        assert!((at[&0].get(Prop::ScaleX).unwrap_or_default() - 0.4).abs() < 1e-9);
        assert_eq!(at[&1].get(Prop::Opacity), Some(1.0));
        assert!(at[&2].get(Prop::Opacity).unwrap_or_default() > 0.15);
        assert_eq!(at[&3].get(Prop::Opacity), Some(0.15));
        assert_eq!(timeline.sample_progress(1.0)[&4].get(Prop::Y), Some(0.0));
    }
}
