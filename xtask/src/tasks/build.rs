use crate::artifact::ProjectLayout;
use crate::config::XtaskConfig;
use crate::pipeline::{self, BuildContext};
use crate::platform::Platform;
use crate::runner::SystemRunner;
use crate::toolchain::ToolchainSearch;
use anyhow::Result;
use std::path::Path;

/// `xtask build`: locate vcpkg, configure, build, test, report the executable.
///
/// Ctrl-C is left to the default handler, so an interrupted build aborts with
/// a non-zero status like any other failed stage.
pub fn run(root: &Path, config: &XtaskConfig) -> Result<()> {
    println!("=== EAE Firmware Build Script ===");

    let layout = ProjectLayout::new(root, &config.build);
    let search = ToolchainSearch::from_env(root)?;
    let platform = Platform::host();
    log::debug!("host platform {platform:?}, build dir {}", layout.build_dir().display());

    let mut ctx = BuildContext::new(layout, search, platform, &config.build);
    pipeline::run_stages(pipeline::STAGES, &mut ctx, &SystemRunner)
}
