use activity_board::app::{App, AppProps};
use activity_board::config::BoardConfig;
use activity_board::logging;
use log::LevelFilter;

fn main() {
    if logging::init(LevelFilter::Info).is_err() {
        gloo::console::warn!("console logger already installed");
    }

    // Read after the logger is up so a bad config block gets reported.
    let config = BoardConfig::from_page();
    log::set_max_level(config.level_filter());

    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
