use chrono::{Datelike, Utc};
use yew::prelude::*;

use crate::config::{booking_url, whatsapp_link};
use crate::motion::{Band, Edge, SceneTrigger, TriggerSpec};
use crate::scene::{fade_up, mask_up, require, require_all, slots, use_scene};

const TITLE_LINES: [&str; 2] = ["Let's make", "something good"];

pub fn copyright(year: i32) -> String {
    format!("© {} North Studio. All rights reserved.", year)
}

#[function_component(Footer)]
pub fn footer() -> Html {
    let section = use_node_ref();
    let lines = use_state(|| TITLE_LINES.iter().map(|_| NodeRef::default()).collect::<Vec<_>>());
    let whatsapp = use_node_ref();
    let booking = use_node_ref();
    let email = use_node_ref();
    let year = Utc::now().year();

    {
        let section = section.clone();
        let lines = (*lines).clone();
        let links = vec![whatsapp.clone(), booking.clone(), email.clone()];
        use_scene("footer", move |class| {
            let anchor = require(&section, "footer")?;
            let lines = require_all(&lines, "footer title")?;
            let links = require_all(&links, "footer links")?;
            let line_slots = slots(0..lines.len());
            let link_slots = slots(0..links.len());
            // Replays on the way back down, except on phones.
            let title_spec = if class.is_mobile() {
                TriggerSpec::once(Band::new(Edge::Top, 0.85))
            } else {
                TriggerSpec::toggle(Band::new(Edge::Top, 0.7))
            };
            Ok(vec![
                SceneTrigger {
                    spec: title_spec,
                    anchor: anchor.clone(),
                    timeline: mask_up(&line_slots, 0.12),
                    targets: lines,
                },
                SceneTrigger {
                    spec: TriggerSpec::once(Band::new(Edge::Top, 0.6)),
                    anchor,
                    timeline: fade_up(&link_slots, 20.0, 0.08),
                    targets: links,
                },
            ])
        });
    }

    html! {
        <footer id="contact" class="footer" ref={section}>
            <h2 class="footer__title">
                { for TITLE_LINES.iter().zip(lines.iter()).map(|(text, line)| html! {
                    <span class="mask"><span class="mask__inner" ref={line.clone()}>{ *text }</span></span>
                }) }
            </h2>
            <div class="footer__links">
                <a class="footer__cta" ref={whatsapp} href={whatsapp_link()} target="_blank" rel="noopener noreferrer">
                    {"Message us on WhatsApp"}
                </a>
                <a class="footer__cta footer__cta--accent" ref={booking} href={booking_url()} target="_blank" rel="noopener noreferrer">
                    {"Book an intro call"}
                </a>
                <a class="footer__mail" ref={email} href="mailto:hello@northstudio.design">{"hello@northstudio.design"}</a>
            </div>
            <div class="footer__bottom">
                <p>{ copyright(year) }</p>
                <p>{"Rue des Ateliers 12, Helsinki"}</p>
            </div>
            <style>
                {r#"
                    .footer {
                        padding: 20vh 6vw 6vh;
                        background: #d9ff3f;
                        color: #0f0f0f;
                    }

                    .footer__title {
                        margin: 0 0 8vh;
                        font-size: clamp(3rem, 9vw, 10rem);
                        line-height: 0.95;
                    }

                    .footer__links {
                        display: flex;
                        flex-wrap: wrap;
                        gap: 1.5rem;
                        align-items: center;
                    }

                    .footer__cta {
                        padding: 1rem 2rem;
                        border: 1px solid #0f0f0f;
                        border-radius: 999px;
                        color: inherit;
                        text-decoration: none;
                        transition: background 0.3s ease, color 0.3s ease;
                    }

                    .footer__cta:hover,
                    .footer__cta--accent {
                        background: #0f0f0f;
                        color: #d9ff3f;
                    }

                    .footer__mail {
                        color: inherit;
                    }

                    .footer__bottom {
                        display: flex;
                        justify-content: space-between;
                        margin-top: 16vh;
                        font-size: 0.85rem;
                    }

                    @media (max-width: 768px) {
                        .footer__bottom {
                            flex-direction: column;
                        }
                    }
                "#}
            </style>
        </footer>
    }
}
