//! Entry points behind each `xtask` subcommand.

pub mod build;
pub mod clean;
pub mod doctor;
pub mod run;
