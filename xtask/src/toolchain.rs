//! vcpkg discovery.
//!
//! Process state (environment, home, working directory) is captured once in
//! [`ToolchainSearch`] so discovery can run against fixture directories.

use crate::error::TaskError;
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

pub const VCPKG_ROOT_ENV: &str = "VCPKG_ROOT";

/// CMake toolchain script every usable vcpkg checkout ships.
pub const TOOLCHAIN_MARKER: &str = "scripts/buildsystems/vcpkg.cmake";

#[derive(Clone, Debug, Default)]
pub struct ToolchainSearch {
    pub env_root: Option<PathBuf>,
    pub home: Option<PathBuf>,
    pub cwd: PathBuf,
}

impl ToolchainSearch {
    /// Captures `VCPKG_ROOT` and the home directory; `cwd` is the project root.
    pub fn from_env(cwd: &Path) -> Result<Self> {
        let cwd = if cwd.is_absolute() {
            cwd.to_path_buf()
        } else {
            env::current_dir()
                .context("Failed to determine the current directory")?
                .join(cwd)
        };

        Ok(Self {
            env_root: env::var_os(VCPKG_ROOT_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            home: dirs::home_dir(),
            cwd,
        })
    }

    /// Candidate roots in priority order.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let mut out = Vec::with_capacity(4);
        if let Some(root) = &self.env_root {
            // Relative overrides resolve against cwd; absolute ones replace it.
            out.push(self.cwd.join(root));
        }
        if let Some(home) = &self.home {
            out.push(home.join(".vcpkg"));
        }
        out.push(self.cwd.join("vcpkg"));
        if let Some(parent) = self.cwd.parent() {
            out.push(parent.join("vcpkg"));
        }
        out
    }
}

/// A directory believed to hold vcpkg. Not yet verified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolchainLocation {
    root: PathBuf,
}

impl ToolchainLocation {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn toolchain_file(&self) -> PathBuf {
        self.root.join(TOOLCHAIN_MARKER)
    }

    /// Returns the toolchain file if it exists.
    pub fn verify(&self) -> Result<PathBuf, TaskError> {
        let marker = self.toolchain_file();
        if marker.is_file() {
            Ok(marker)
        } else {
            Err(TaskError::ToolchainInvalid { marker })
        }
    }
}

/// First existing candidate wins; nothing is retried.
///
/// Any existing path counts. A `VCPKG_ROOT` that names a file is still chosen
/// and then fails marker verification.
pub fn locate(search: &ToolchainSearch) -> Result<ToolchainLocation, TaskError> {
    for candidate in search.candidates() {
        if candidate.exists() {
            log::debug!("vcpkg candidate {} found", candidate.display());
            return Ok(ToolchainLocation::new(candidate));
        }
        log::debug!("vcpkg candidate {} missing", candidate.display());
    }
    Err(TaskError::ToolchainNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn search_in(tmp: &TempDir) -> ToolchainSearch {
        let cwd = tmp.path().join("project");
        fs::create_dir_all(&cwd).unwrap();
        ToolchainSearch {
            env_root: None,
            home: Some(tmp.path().join("home")),
            cwd,
        }
    }

    fn install_vcpkg(root: &Path) {
        let marker = root.join(TOOLCHAIN_MARKER);
        fs::create_dir_all(marker.parent().unwrap()).unwrap();
        fs::write(marker, "# vcpkg toolchain\n").unwrap();
    }

    #[test]
    fn env_override_wins_over_fallbacks() {
        let tmp = TempDir::new().unwrap();
        let mut search = search_in(&tmp);
        let custom = tmp.path().join("custom-vcpkg");
        fs::create_dir_all(&custom).unwrap();
        fs::create_dir_all(tmp.path().join("home/.vcpkg")).unwrap();
        fs::create_dir_all(search.cwd.join("vcpkg")).unwrap();
        search.env_root = Some(custom.clone());

        assert_eq!(locate(&search).unwrap().root(), custom);
    }

    #[test]
    fn missing_env_override_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let mut search = search_in(&tmp);
        search.env_root = Some(tmp.path().join("does-not-exist"));
        let local = search.cwd.join("vcpkg");
        fs::create_dir_all(&local).unwrap();

        assert_eq!(locate(&search).unwrap().root(), local);
    }

    #[test]
    fn home_checkout_beats_project_local() {
        let tmp = TempDir::new().unwrap();
        let search = search_in(&tmp);
        let home = tmp.path().join("home/.vcpkg");
        fs::create_dir_all(&home).unwrap();
        fs::create_dir_all(search.cwd.join("vcpkg")).unwrap();

        assert_eq!(locate(&search).unwrap().root(), home);
    }

    #[test]
    fn parent_directory_is_last_resort() {
        let tmp = TempDir::new().unwrap();
        let search = search_in(&tmp);
        let sibling = tmp.path().join("vcpkg");
        fs::create_dir_all(&sibling).unwrap();

        assert_eq!(locate(&search).unwrap().root(), sibling);
    }

    #[test]
    fn relative_override_resolves_against_cwd() {
        let tmp = TempDir::new().unwrap();
        let mut search = search_in(&tmp);
        search.env_root = Some(PathBuf::from("third_party/vcpkg"));
        let expected = search.cwd.join("third_party/vcpkg");
        fs::create_dir_all(&expected).unwrap();

        assert_eq!(locate(&search).unwrap().root(), expected);
    }

    #[test]
    fn override_naming_a_file_is_chosen_then_rejected() {
        let tmp = TempDir::new().unwrap();
        let mut search = search_in(&tmp);
        let file = tmp.path().join("vcpkg.txt");
        fs::write(&file, "not a checkout").unwrap();
        fs::create_dir_all(tmp.path().join("home/.vcpkg")).unwrap();
        search.env_root = Some(file.clone());

        let location = locate(&search).unwrap();
        assert_eq!(location.root(), file);
        assert!(matches!(
            location.verify(),
            Err(TaskError::ToolchainInvalid { .. })
        ));
    }

    #[test]
    fn nothing_found_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let search = search_in(&tmp);
        assert!(matches!(locate(&search), Err(TaskError::ToolchainNotFound)));
    }

    #[test]
    fn verify_requires_marker() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("vcpkg");
        fs::create_dir_all(&root).unwrap();
        let location = ToolchainLocation::new(&root);

        assert!(matches!(
            location.verify(),
            Err(TaskError::ToolchainInvalid { ref marker }) if marker.ends_with("vcpkg.cmake")
        ));

        install_vcpkg(&root);
        assert_eq!(location.verify().unwrap(), root.join(TOOLCHAIN_MARKER));
    }
}
