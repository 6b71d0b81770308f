use crate::artifact::ProjectLayout;
use crate::config::XtaskConfig;
use crate::platform::Platform;
use crate::toolchain::{self, ToolchainSearch};
use anyhow::{bail, Result};
use std::path::Path;

/// `xtask doctor`: check that the host can run `xtask build`.
pub fn run(root: &Path, config: &XtaskConfig) -> Result<()> {
    let mut ok = true;

    for tool in [&config.build.generator, &config.build.test_runner] {
        match which::which(tool) {
            Ok(path) => eprintln!("[OK] {tool} ({})", path.display()),
            Err(_) => {
                eprintln!("[FAIL] missing `{tool}` in PATH");
                ok = false;
            }
        }
    }

    let search = ToolchainSearch::from_env(root)?;
    match toolchain::locate(&search) {
        Ok(location) => match location.verify() {
            Ok(marker) => eprintln!("[OK] vcpkg toolchain {}", marker.display()),
            Err(e) => {
                eprintln!("[FAIL] {e}");
                ok = false;
            }
        },
        Err(e) => {
            eprintln!("[FAIL] {e}");
            ok = false;
        }
    }

    let platform = Platform::host();
    eprintln!("[OK] triplet {}", platform.triplet());

    let exe = ProjectLayout::new(root, &config.build).artifact(platform);
    if exe.is_file() {
        eprintln!("[OK] {}", exe.display());
    } else {
        eprintln!("[--] {} not built yet", exe.display());
    }

    if !ok {
        bail!("doctor checks failed");
    }
    Ok(())
}
