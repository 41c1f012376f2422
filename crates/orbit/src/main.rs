use orbit::config;
use orbit::gui::app::AppModel;
use orbit::gui::menu::Menu;
use orbit::sys::runtime;
use relm4::prelude::*;

fn main() {
    env_logger::init();

    let config = config::load_or_default();
    let mut menu = Menu::new(&config);
    menu.load_icons();

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.orbit.launcher");

    app.run::<AppModel>((menu, config.opener, rx));
}
