use anyhow::Result;

use keyval_detector::{app::App, cmd::Command, config::Config, logging::Logger};

fn main() -> Result<()> {
    let cmd = Command::init();

    let config = Config::load(cmd.config_load_option()?)?;

    if cmd.logging || config.logging.enabled {
        Logger::init()?;
    }

    App::run(cmd, config)
}
