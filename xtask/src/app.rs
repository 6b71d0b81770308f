use anyhow::{Context, Result};
use eae_xtask::config::XtaskConfig;
use eae_xtask::logging;
use eae_xtask::simulator::SimulatorArguments;
use eae_xtask::tasks;

/// Dispatches a subcommand and returns the process exit status.
pub fn run(cli: crate::cli::Cli) -> Result<i32> {
    logging::init(logging::resolve_level(
        std::env::var(logging::LOG_ENV).ok().as_deref(),
        "info",
    ));

    let root = std::env::current_dir().context("Failed to determine the project root")?;
    let config = XtaskConfig::load(&root)?;
    logging::init(logging::resolve_level(
        std::env::var(logging::LOG_ENV).ok().as_deref(),
        &config.log.level,
    ));

    match cli.cmd {
        crate::cli::Cmd::Build => {
            tasks::build::run(&root, &config)?;
            Ok(0)
        }
        crate::cli::Cmd::Run {
            setpoint,
            critical,
            quiet,
        } => {
            let arguments = SimulatorArguments {
                setpoint: setpoint.unwrap_or(config.run.setpoint),
                critical: critical.unwrap_or(config.run.critical),
                quiet,
            };
            tasks::run::run(&root, &config, arguments).map(|outcome| outcome.exit_code())
        }
        crate::cli::Cmd::Doctor => {
            tasks::doctor::run(&root, &config)?;
            Ok(0)
        }
        crate::cli::Cmd::Clean => {
            tasks::clean::run(&root, &config)?;
            Ok(0)
        }
    }
}
