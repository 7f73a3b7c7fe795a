use std::path::PathBuf;

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::detector::SystemAllowList;

pub const ENV_PREFIX: &str = "KEYVAL_DETECTOR_";

#[derive(Debug, Default)]
pub enum ConfigLoadOption {
    #[default]
    Default,

    Path(PathBuf),
}

/// 未使用として報告しないConfigMap/Secretの名前
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExclusionConfig {
    pub configmaps: Vec<String>,
    pub secrets: Vec<String>,
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        Self {
            configmaps: [
                "kube-root-ca.crt",
                "cluster-info",
                "kubelet-config",
                "kubeadm-config",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            secrets: vec!["foobar".to_string()],
        }
    }
}

impl From<ExclusionConfig> for SystemAllowList {
    fn from(value: ExclusionConfig) -> Self {
        SystemAllowList::new(value.configmaps, value.secrets)
    }
}

#[derive(Default, Debug, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub enabled: bool,
}

#[derive(Default, Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub exclusions: ExclusionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Per request read timeout in seconds. No deadline when unset.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    pub fn load(option: ConfigLoadOption) -> Result<Self> {
        let figment = Figment::new();

        let config = match option {
            ConfigLoadOption::Default => figment.merge(Serialized::defaults(Self::default())),
            ConfigLoadOption::Path(path) => figment
                .merge(Serialized::defaults(Self::default()))
                .merge(Yaml::file(path)),
        }
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract_lossy()?;

        Ok(config)
    }

    pub fn system_allow_list(&self) -> SystemAllowList {
        self.exclusions.clone().into()
    }
}
