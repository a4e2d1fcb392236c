use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

mod api;
mod components;
pub mod config;
mod pages;
mod state;
#[cfg(test)]
mod test_support;
pub mod utils;

use pages::portal::PortalPage;

fn init_logging() {
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    // Fails only when a logger is already installed.
    let _ = console_log::init_with_level(level);
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    view! {
        <Title text="Portail RH"/>
        <Router>
            <Routes>
                <Route path="/" view=PortalPage/>
                <Route path="/*any" view=PortalPage/>
            </Routes>
        </Router>
    }
}

/// Browser entry point, called from the binary's `main`.
pub fn start() {
    console_error_panic_hook::set_once();
    init_logging();
    log::info!("starting HR portal frontend (wasm)");

    // Runtime config (env.js, window globals or ./config.json) must be known
    // before the health probe decides whether to run.
    leptos::spawn_local(async move {
        config::init().await;
        log::info!("runtime config initialized");
        mount_to_body(App);
    });
}
