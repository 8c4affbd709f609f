mod app;
mod auth_screen;
mod recipes_screen;

use app::App;
use leptos::*;
use log::info;

fn main() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
    info!("Starting recipe book");
    mount_to_body(|| {
        view! {
            <App />
        }
    })
}
