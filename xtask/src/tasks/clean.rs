use crate::artifact::ProjectLayout;
use crate::config::XtaskConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Remove the CMake build tree.
pub fn run(root: &Path, config: &XtaskConfig) -> Result<()> {
    let layout = ProjectLayout::new(root, &config.build);
    let dir = layout.build_dir();

    if !dir.exists() {
        println!("Nothing to clean ({} does not exist)", dir.display());
        return Ok(());
    }

    fs::remove_dir_all(dir).with_context(|| format!("Failed to remove {}", dir.display()))?;
    println!("Removed {}", dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn removes_build_tree_and_is_repeatable() {
        let tmp = TempDir::new().unwrap();
        let build = tmp.path().join("build");
        fs::create_dir_all(build.join("CMakeFiles")).unwrap();
        fs::write(build.join("eae_firmware"), "").unwrap();

        let config = XtaskConfig::default();
        run(tmp.path(), &config).unwrap();
        assert!(!build.exists());

        run(tmp.path(), &config).unwrap();
    }
}
