//! # EAE firmware tasks
//!
//! Prepares, builds, tests and launches the EAE firmware simulator.
//!
//! - `build`: vcpkg discovery, then CMake configure/build and CTest, gated
//!   stage by stage ([`pipeline`]).
//! - `run`: argument validation and launch of the built executable with
//!   exit-code and Ctrl-C forwarding ([`simulator`]).
//!
//! Both share [`artifact::ProjectLayout`] so they agree on where the
//! executable lives.

pub mod artifact;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod platform;
pub mod runner;
pub mod simulator;
pub mod tasks;
pub mod toolchain;

pub use error::TaskError;
