pub mod app;
pub mod commands;
pub mod source;

pub use app::{Cli, Commands};
