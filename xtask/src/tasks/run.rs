use crate::artifact::ProjectLayout;
use crate::config::XtaskConfig;
use crate::platform::Platform;
use crate::simulator::{self, InterruptFlag, RunOutcome, RunRequest, SimulatorArguments};
use anyhow::Result;
use std::path::Path;

/// `xtask run`: launch the executable produced by `xtask build`.
pub fn run(root: &Path, config: &XtaskConfig, arguments: SimulatorArguments) -> Result<RunOutcome> {
    let layout = ProjectLayout::new(root, &config.build);
    let interrupt = InterruptFlag::install()?;

    simulator::run_simulator(
        &RunRequest {
            layout: &layout,
            platform: Platform::host(),
            arguments,
        },
        &interrupt,
    )
}
