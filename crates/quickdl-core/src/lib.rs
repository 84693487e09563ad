pub mod config;
pub mod logging;

pub mod fetch;
pub mod iter;
pub mod output;
pub mod progress;
pub mod units;
