use std::{
    io::{self, IsTerminal as _},
    time::Duration,
};

use anyhow::{Context as _, Result};
use tokio::runtime::Runtime;

use crate::{
    cmd::{Command, OutputFormat},
    config::Config,
    detector::Detector,
    logger,
    presenter::Presenter,
    progress::Spinner,
};

const SPINNER_MESSAGE: &str = "Scanning cluster for unused ConfigMaps and Secrets";
const SPINNER_RATE: Duration = Duration::from_millis(100);

pub struct App;

impl App {
    pub fn run(cmd: Command, config: Config) -> Result<()> {
        let rt = Runtime::new()?;

        let allow_list = config.system_allow_list();
        let connection = cmd.cluster_connection(config.request_timeout_secs);
        let scope = cmd.namespace_scope();

        let color = io::stdout().is_terminal();
        let show_spinner = cmd.output == OutputFormat::Table && io::stderr().is_terminal();

        logger!(info, "app start");

        let result = rt.block_on(async {
            let (client, context) = connection.connect().await?;

            Presenter::new(io::stdout().lock(), cmd.output)
                .color(color)
                .banner(env!("CARGO_PKG_VERSION"), &context)?;

            let spinner = show_spinner
                .then(|| Spinner::new(io::stderr(), SPINNER_MESSAGE, SPINNER_RATE).start());

            let ret = Detector::new(&client, &allow_list)
                .scope(scope)
                .run()
                .await;

            match (spinner, &ret) {
                (Some(spinner), Ok(_)) => spinner.finish("...Complete!")?,
                (Some(spinner), Err(_)) => spinner.clear()?,
                (None, _) => {}
            }

            anyhow::Ok(ret?)
        });

        let result = match result {
            Ok(result) => result,
            Err(e) => {
                logger!(error, "{:?}", e);
                return Err(e);
            }
        };

        if result.is_empty() {
            logger!(info, "no unused ConfigMaps or Secrets found");
        }

        if let Err(e) = Presenter::new(io::stdout().lock(), cmd.output)
            .color(color)
            .render(&result)
            .context("Failed to render the result")
        {
            logger!(error, "{:?}", e);
            return Err(e);
        }

        logger!(info, "app end");

        Ok(())
    }
}
