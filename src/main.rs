use yew::prelude::*;
use yew_router::prelude::*;
use log::{info, Level};

mod config;
mod error;
mod scene;
mod session;
mod viewport;
mod loader;
mod menu;
mod motion;
mod scroll;
mod pages {
    pub mod home;
}
mod sections {
    pub mod hero;
    pub mod about;
    pub mod projects;
    pub mod process;
    pub mod services;
    pub mod why;
    pub mod showcase;
    pub mod testimonials;
    pub mod footer;
    pub mod scroll_to_top;
}

use loader::Loader;
use menu::SiteNav;
use pages::home::Home;
use scroll::ScrollShell;
use session::{LoaderFlag, SessionFlag};
use viewport::ViewportProvider;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        },
        Route::NotFound => {
            info!("Unknown route, redirecting home");
            html! { <Redirect<Route> to={Route::Home} /> }
        },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    // Returning visitors in the same session go straight to the page.
    let content_ready = use_state(|| SessionFlag.is_set());

    let on_loader_done = {
        let content_ready = content_ready.clone();
        Callback::from(move |_| {
            content_ready.set(true);
        })
    };

    html! {
        <BrowserRouter>
            <ViewportProvider>
                <Loader on_done={on_loader_done} />
                if *content_ready {
                    <>
                        <SiteNav />
                        <ScrollShell>
                            <Switch<Route> render={switch} />
                        </ScrollShell>
                    </>
                }
            </ViewportProvider>
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    let level = if cfg!(debug_assertions) { Level::Debug } else { Level::Info };
    console_log::init_with_level(level).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
