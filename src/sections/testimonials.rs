use yew::prelude::*;

use crate::motion::{Band, Ease, Edge, Position, Prop, SceneTrigger, Timeline, TriggerSpec, Tween};
use crate::scene::{fade_up, require, require_all, slots, use_scene};

const QUOTES: [(&str, &str); 3] = [
    ("They found the idea we had been circling for a year, then made it look obvious.", "Aino Laine, Harbour Energy"),
    ("The launch film did more for our waiting list than six months of ads.", "Tomas Berg, Marlo Coffee"),
    ("Rare to work with a studio that cares about the build as much as the pitch.", "Priya Nair, Outward Press"),
];

/// The quote row drifts sideways against the scroll.
pub fn drift_timeline() -> Timeline {
    Timeline::new().add(
        Tween::on(0).from_to(Prop::XPercent, 8.0, -8.0).duration(1.0).ease(Ease::Linear),
        Position::Sequence,
    )
}

#[function_component(Testimonials)]
pub fn testimonials() -> Html {
    let section = use_node_ref();
    let row = use_node_ref();
    let cards = use_state(|| QUOTES.iter().map(|_| NodeRef::default()).collect::<Vec<_>>());

    {
        let section = section.clone();
        let row = row.clone();
        let cards = (*cards).clone();
        use_scene("testimonials", move |class| {
            let anchor = require(&section, "testimonials")?;
            let cards = require_all(&cards, "testimonial cards")?;
            let count = cards.len();
            let mut triggers = vec![SceneTrigger {
                spec: TriggerSpec::once(Band::new(Edge::Top, 0.75)),
                anchor: anchor.clone(),
                timeline: fade_up(&slots(0..count), 50.0, 0.15),
                targets: cards,
            }];
            if !class.is_mobile() {
                triggers.push(SceneTrigger {
                    spec: TriggerSpec::scrub(Band::new(Edge::Top, 1.0), Band::new(Edge::Bottom, 0.0)),
                    anchor,
                    timeline: drift_timeline(),
                    targets: vec![require(&row, "testimonials row")?],
                });
            }
            Ok(triggers)
        });
    }

    html! {
        <section id="testimonials" class="testimonials" ref={section}>
            <p class="eyebrow">{"Kind words"}</p>
            <div class="testimonials__row" ref={row}>
                { for QUOTES.iter().zip(cards.iter()).map(|((quote, author), node)| html! {
                    <blockquote class="testimonial" ref={node.clone()}>
                        <p class="testimonial__quote">{ format!("“{}”", quote) }</p>
                        <cite class="testimonial__author">{ *author }</cite>
                    </blockquote>
                }) }
            </div>
            <style>
                {r#"
                    .testimonials {
                        padding: 16vh 6vw;
                        overflow: hidden;
                    }

                    .testimonials__row {
                        display: grid;
                        grid-template-columns: repeat(3, minmax(280px, 1fr));
                        gap: 3vw;
                    }

                    .testimonial {
                        margin: 0;
                        padding: 2.5rem;
                        border: 1px solid rgba(242, 239, 233, 0.15);
                        border-radius: 4px;
                    }

                    .testimonial__quote {
                        font-size: 1.3rem;
                        line-height: 1.4;
                        margin: 0 0 2rem;
                    }

                    .testimonial__author {
                        font-style: normal;
                        font-size: 0.85rem;
                        color: rgba(242, 239, 233, 0.6);
                    }

                    @media (max-width: 768px) {
                        .testimonials__row {
                            grid-template-columns: 1fr;
                        }
                    }
                "#}
            </style>
        </section>
    }
}
