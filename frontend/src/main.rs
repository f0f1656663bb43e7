use crate::app::App;

mod app;
mod components;
mod config;
mod helpers;
mod logging;
mod qr;
mod raster;
mod storage;
mod tops_sheet;

fn main() {
    logging::init(config::LOG_LEVEL);
    yew::Renderer::<App>::new().render();
}
