pub mod app;
pub mod commands_build;
pub mod commands_config;
pub mod commands_list;
pub mod commands_time_sync;
pub mod config;
pub mod console;
pub mod output;

pub use app::{Cli, Command};
