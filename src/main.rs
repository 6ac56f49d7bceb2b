mod components;
mod config;
mod hands;
mod model;
mod render;
mod state;
mod util;

use components::app::App;

fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("pinch-recall: starting");
    yew::Renderer::<App>::new().render();
}
