use log::debug;
use yew::prelude::*;

use crate::sections::{
    about::About, footer::Footer, hero::Hero, process::Process, projects::Projects,
    scroll_to_top::ScrollToTopButton, services::Services, showcase::Showcase,
    testimonials::Testimonials, why::Why,
};
use crate::viewport::use_viewport;

#[function_component(Home)]
pub fn home() -> Html {
    let viewport = use_viewport();

    use_effect_with_deps(
        |viewport| {
            debug!("Home rendered for {} layout", viewport);
            || ()
        },
        viewport,
    );

    html! {
        <main class={classes!("page", format!("page--{}", viewport))}>
            <Hero />
            <About />
            <Projects />
            <Process />
            <Services />
            <Why />
            <Showcase />
            <Testimonials />
            <Footer />
            <ScrollToTopButton />
            <style>
                {r#"
                    .page {
                        position: relative;
                    }

                    .pin {
                        position: relative;
                    }

                    [data-pinned] > .pin-frame {
                        position: sticky;
                        top: 0;
                        height: 100vh;
                        overflow: hidden;
                    }

                    .mask {
                        display: block;
                        overflow: hidden;
                    }

                    .mask__inner {
                        display: block;
                        will-change: transform;
                    }

                    .eyebrow {
                        margin: 0 0 1.5rem;
                        font-size: 0.8rem;
                        letter-spacing: 0.2em;
                        text-transform: uppercase;
                        color: rgba(242, 239, 233, 0.6);
                    }
                "#}
            </style>
        </main>
    }
}
