use relm4::prelude::*;
use spinwheel::config;
use spinwheel::gui::app::AppModel;
use spinwheel::gui::wheel::WheelState;
use spinwheel::sys::runtime;

fn main() {
    env_logger::init();

    let config = config::load_or_setup();
    let state = WheelState::from_config(&config);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.spinwheel.demo");

    app.run::<AppModel>((state, rx));
}
