use anyhow::Result;
use clap::{builder::NonEmptyStringValueParser, Parser};
use std::{path::PathBuf, time::Duration};

use crate::{config::ConfigLoadOption, detector::NamespaceScope, kube::ClusterConnection};

use super::args::OutputFormat;

/// Scan your k8s cluster for unused ConfigMaps and Secrets
///
/// Reports ConfigMaps and Secrets that are not used by any Pod.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Command {
    /// kubeconfig path
    #[arg(short = 'C', long, display_order = 1000)]
    pub kubeconfig: Option<PathBuf>,

    /// Context
    #[arg(short, long, display_order = 1000)]
    pub context: Option<String>,

    /// Namespaces to scan instead of all namespaces (e.g. -n val1,val2 | -n val1 -n val2)
    #[arg(
        short,
        long,
        value_delimiter = ',',
        value_parser = NonEmptyStringValueParser::new(),
        display_order = 1000
    )]
    pub namespaces: Option<Vec<String>>,

    /// Output format
    #[arg(
        short,
        long,
        value_name = "table|json",
        default_value = "table",
        value_enum,
        display_order = 1000
    )]
    pub output: OutputFormat,

    /// Timeout in seconds for each request to the API server
    #[arg(long, value_name = "SECONDS", display_order = 1000)]
    pub request_timeout: Option<u64>,

    /// Logging
    #[arg(short = 'l', long, display_order = 1000)]
    pub logging: bool,

    /// Config file path
    #[arg(long, display_order = 1000)]
    pub config_file: Option<PathBuf>,
}

impl Command {
    pub fn init() -> Self {
        Self::parse()
    }

    pub fn namespace_scope(&self) -> NamespaceScope {
        self.namespaces.clone().into()
    }

    /// The command line timeout takes precedence over the config file.
    pub fn cluster_connection(&self, config_timeout_secs: Option<u64>) -> ClusterConnection {
        let Self {
            kubeconfig,
            context,
            request_timeout,
            ..
        } = self.clone();

        ClusterConnection {
            kubeconfig,
            context,
            request_timeout: request_timeout
                .or(config_timeout_secs)
                .map(Duration::from_secs),
        }
    }

    pub fn config_load_option(&self) -> Result<ConfigLoadOption> {
        let option = if let Some(path) = &self.config_file {
            match path.try_exists() {
                Ok(true) => ConfigLoadOption::Path(path.clone()),
                Ok(false) => {
                    eprintln!("Config file not found: {:?}", path);

                    ConfigLoadOption::Default
                }
                Err(err) => {
                    eprintln!("Failed to check config file exists: {}", err);

                    ConfigLoadOption::Default
                }
            }
        } else {
            let Some(path) = xdg_config_home().map(|dir| dir.join("config.yaml")) else {
                return Ok(ConfigLoadOption::Default);
            };

            match path.try_exists() {
                Ok(true) => ConfigLoadOption::Path(path),
                Ok(false) => ConfigLoadOption::Default,
                Err(err) => {
                    eprintln!("Failed to check config file exists: {}", err);

                    ConfigLoadOption::Default
                }
            }
        };

        Ok(option)
    }
}

fn xdg_config_home() -> Option<PathBuf> {
    match std::env::var_os("XDG_CONFIG_HOME").map(|s| PathBuf::from(s).join("keyval-detector")) {
        Some(path) => Some(path),
        None => dirs::home_dir().map(|home| home.join(".config").join("keyval-detector")),
    }
}
