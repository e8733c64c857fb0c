use std::io::stdout;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use skyglow_config::Config;
use tracing::{info, warn};

mod app;
mod logging;
mod render;

use app::App;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let log_path = logging::init()?;

    let config = Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "falling back to default configuration");
        Config::default()
    });
    info!(
        log = ?log_path,
        scene = config.scene.label(),
        speed = config.speed.label(),
        fps = config.fps,
        "starting skyglow"
    );

    let mouse = config.mouse;
    let terminal = ratatui::init();
    if mouse && let Err(e) = execute!(stdout(), EnableMouseCapture) {
        warn!(error = %e, "mouse capture unavailable");
    }
    let result = App::new(config).run(terminal);
    if mouse && let Err(e) = execute!(stdout(), DisableMouseCapture) {
        warn!(error = %e, "failed to release mouse capture");
    }
    ratatui::restore();
    result
}
