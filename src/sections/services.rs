use yew::prelude::*;

use crate::motion::{Band, Edge, Position, Prop, SceneTrigger, Timeline, TriggerSpec, Tween};
use crate::scene::{fade_up, mask_up, require, require_all, slots, use_scene};

const SERVICES: [(&str, &str); 5] = [
    ("Brand identity", "Naming, marks, type systems and the guidelines that keep them honest."),
    ("Digital product", "Interfaces for web and mobile, from first flow to production components."),
    ("Motion", "Logo animation, product films and the small movements that make an interface feel alive."),
    ("Campaigns", "Launch work across print, outdoor and social."),
    ("Creative direction", "An outside eye for in-house teams."),
];

/// Headline (slot 0) unmasks, then items (slots 1..) rise in turn.
pub fn entrance_timeline(items: usize, each: f64) -> Timeline {
    let items: Vec<usize> = (1..=items).collect();
    mask_up(&[0], 0.0).stagger(
        &items,
        Tween::on(0).from(Prop::Y, 30.0).from(Prop::Opacity, 0.0).duration(0.7),
        each,
        Position::Offset(-0.5),
    )
}

#[function_component(Services)]
pub fn services() -> Html {
    let section = use_node_ref();
    let headline = use_node_ref();
    let items = use_state(|| SERVICES.iter().map(|_| NodeRef::default()).collect::<Vec<_>>());

    {
        let section = section.clone();
        let headline = headline.clone();
        let items = (*items).clone();
        use_scene("services", move |class| {
            let anchor = require(&section, "services")?;
            let mut targets = vec![require(&headline, "services headline")?];
            targets.extend(require_all(&items, "services items")?);
            let count = targets.len();
            let trigger = if class.is_mobile() {
                SceneTrigger {
                    spec: TriggerSpec::once(Band::new(Edge::Top, 0.85)),
                    anchor,
                    timeline: fade_up(&slots(0..count), 20.0, 0.06),
                    targets,
                }
            } else {
                SceneTrigger {
                    spec: TriggerSpec::toggle(Band::new(Edge::Top, 0.7)),
                    anchor,
                    timeline: entrance_timeline(count - 1, 0.1),
                    targets,
                }
            };
            Ok(vec![trigger])
        });
    }

    html! {
        <section id="services" class="services" ref={section}>
            <h2 class="services__headline">
                <span class="mask"><span class="mask__inner" ref={headline}>{"What we do"}</span></span>
            </h2>
            <ul class="services__list">
                { for SERVICES.iter().zip(items.iter()).map(|((name, blurb), node)| html! {
                    <li class="services__item" ref={node.clone()}>
                        <h3>{ *name }</h3>
                        <p>{ *blurb }</p>
                    </li>
                }) }
            </ul>
            <style>
                {r#"
                    .services {
                        padding: 16vh 6vw;
                    }

                    .services__headline {
                        font-size: clamp(2.5rem, 6vw, 6rem);
                        margin: 0 0 8vh;
                    }

                    .services__list {
                        list-style: none;
                        margin: 0;
                        padding: 0;
                    }

                    .services__item {
                        display: grid;
                        grid-template-columns: 1fr 1fr;
                        gap: 4vw;
                        padding: 3vh 0;
                        border-top: 1px solid rgba(242, 239, 233, 0.15);
                    }

                    .services__item h3 {
                        margin: 0;
                        font-size: clamp(1.5rem, 3vw, 2.6rem);
                    }

                    @media (max-width: 768px) {
                        .services__item {
                            grid-template-columns: 1fr;
                        }
                    }
                "#}
            </style>
        </section>
    }
}
