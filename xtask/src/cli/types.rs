use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "EAE firmware simulator tasks (vcpkg + CMake build, then run)")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Configure, build and test the simulator, then print the executable path.
    ///
    /// Requires vcpkg: VCPKG_ROOT, ~/.vcpkg, ./vcpkg or ../vcpkg.
    Build,

    /// Launch the simulator built by `xtask build`.
    ///
    /// Examples:
    ///   cargo xtask run                     # defaults (55°C, 90°C)
    ///   cargo xtask run --set 60 --crit 95  # custom temperatures
    ///   cargo xtask run --quiet             # reduced output
    #[command(verbatim_doc_comment)]
    Run {
        /// Temperature setpoint in °C [default: 55.0, or [run] setpoint in xtask.toml]
        #[arg(long = "set", value_name = "CELSIUS", allow_negative_numbers = true)]
        setpoint: Option<f64>,

        /// Critical temperature in °C [default: 90.0, or [run] critical in xtask.toml]
        #[arg(long = "crit", value_name = "CELSIUS", allow_negative_numbers = true)]
        critical: Option<f64>,

        /// Reduce simulator output verbosity.
        #[arg(long)]
        quiet: bool,
    },

    /// Check that cmake, ctest and vcpkg are where `xtask build` expects them.
    Doctor,

    /// Remove the build directory.
    Clean,
}
