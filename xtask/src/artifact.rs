//! Where the simulator executable lands after a build.

use crate::config::BuildSettings;
use crate::platform::Platform;
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_ARTIFACT: &str = "eae_firmware";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BuildType {
    #[default]
    Release,
}

impl BuildType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Release => "Release",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Executable path for a CMake build tree.
///
/// Multi-config generators (Visual Studio) nest output under the build type
/// and append `.exe`; single-config generators write straight to the build
/// directory.
pub fn artifact_path(
    platform: Platform,
    build_dir: &Path,
    build_type: BuildType,
    name: &str,
) -> PathBuf {
    if platform.is_windows() {
        build_dir
            .join(build_type.as_str())
            .join(format!("{name}.exe"))
    } else {
        build_dir.join(name)
    }
}

/// Project root and build tree shared by the build and run tasks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
    build_dir: PathBuf,
    artifact_name: String,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>, settings: &BuildSettings) -> Self {
        let root = root.into();
        Self {
            build_dir: root.join(&settings.dir),
            root,
            artifact_name: settings.artifact.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    pub fn artifact(&self, platform: Platform) -> PathBuf {
        artifact_path(
            platform,
            &self.build_dir,
            BuildType::Release,
            &self.artifact_name,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_nests_under_build_type() {
        let path = artifact_path(
            Platform::Windows,
            Path::new("build"),
            BuildType::Release,
            "eae_firmware",
        );
        assert_eq!(path, Path::new("build").join("Release").join("eae_firmware.exe"));
    }

    #[test]
    fn unix_like_hosts_use_flat_layout() {
        for platform in [Platform::Linux, Platform::MacOs] {
            let path = artifact_path(platform, Path::new("build"), BuildType::Release, "eae_firmware");
            assert_eq!(path, Path::new("build").join("eae_firmware"));
        }
    }

    #[test]
    fn layout_joins_configured_dir() {
        let settings = BuildSettings {
            dir: PathBuf::from("out/cmake"),
            artifact: "sim".to_string(),
            ..BuildSettings::default()
        };
        let layout = ProjectLayout::new("/work/fw", &settings);
        assert_eq!(layout.build_dir(), Path::new("/work/fw/out/cmake"));
        assert_eq!(layout.artifact(Platform::Linux), Path::new("/work/fw/out/cmake/sim"));
    }
}
