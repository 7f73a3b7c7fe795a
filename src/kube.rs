mod client;
mod context;

pub use client::*;
pub use context::*;
