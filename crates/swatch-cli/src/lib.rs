#![forbid(unsafe_code)]

pub mod cli;
pub mod error;
pub mod output;
pub mod profile;

pub use cli::run_from_env;
pub use error::{CliError, Result};
