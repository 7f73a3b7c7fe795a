use log::LevelFilter;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Logger as TargetLogger, Root},
    encode::json::JsonEncoder,
};
use std::env;
use std::str::FromStr;

use once_cell::sync::OnceCell;

const DEFAULT_LOG_PATH: &str = "keyval-detector.log";

/// Target of every record written through `logger!`.
pub const LOG_TARGET: &str = "keyval_detector";

pub struct Logger;

pub static LOGGER_ENABLED: OnceCell<bool> = OnceCell::new();

#[macro_export]
macro_rules! logger {
    ($level:ident, $($arg:tt)+) => {
        if let Some(true) = $crate::logging::LOGGER_ENABLED.get() {
            ::log::$level!(target: $crate::logging::LOG_TARGET, $($arg)+);
        }
    };
}

impl Logger {
    /// ファイルへJSON形式でログを出力する。
    /// 出力レベルは `RUST_LOG`、出力先は `LOG_PATH` で変更できる。
    pub fn init() -> Result<(), anyhow::Error> {
        let level_filter =
            LevelFilter::from_str(&env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))?;

        let log_path = env::var("LOG_PATH").unwrap_or_else(|_| DEFAULT_LOG_PATH.to_string());

        let logfile = FileAppender::builder()
            .append(false)
            .encoder(Box::new(JsonEncoder::new()))
            .build(log_path)?;

        // kube and hyper records only pass at warn and above.
        let config = Config::builder()
            .appender(Appender::builder().build("logfile", Box::new(logfile)))
            .logger(
                TargetLogger::builder()
                    .appender("logfile")
                    .additive(false)
                    .build(LOG_TARGET, level_filter),
            )
            .build(Root::builder().appender("logfile").build(LevelFilter::Warn))?;

        log4rs::init_config(config)?;

        LOGGER_ENABLED
            .set(true)
            .map_err(|_| anyhow::anyhow!("logger is already initialized"))?;

        Ok(())
    }
}
