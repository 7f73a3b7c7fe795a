pub mod app;
pub mod cmd;
pub mod config;
pub mod detector;
pub mod error;
pub mod kube;
pub mod logging;
pub mod presenter;
pub mod progress;
