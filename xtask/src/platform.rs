//! Host platform detection and vcpkg triplet selection.

use std::fmt;

/// Operating system family, as far as the build layout cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    MacOs,
}

impl Platform {
    /// Maps an OS name (`std::env::consts::OS`, `uname -s`, ...) to a family.
    ///
    /// Unrecognized names fall back to `MacOs`, matching the static osx
    /// triplet vcpkg is given for every non-Windows, non-Linux host.
    pub fn from_os_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "windows" => Self::Windows,
            "linux" => Self::Linux,
            _ => Self::MacOs,
        }
    }

    pub fn host() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    pub fn triplet(self) -> PlatformTriplet {
        match self {
            Self::Windows => PlatformTriplet::WindowsStatic,
            Self::Linux => PlatformTriplet::LinuxStatic,
            Self::MacOs => PlatformTriplet::OsxStatic,
        }
    }

    pub fn is_windows(self) -> bool {
        self == Self::Windows
    }
}

/// vcpkg target triplet passed verbatim as `-DVCPKG_TARGET_TRIPLET`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlatformTriplet {
    WindowsStatic,
    LinuxStatic,
    OsxStatic,
}

impl PlatformTriplet {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WindowsStatic => "x64-windows-static",
            Self::LinuxStatic => "x64-linux-static",
            Self::OsxStatic => "x64-osx-static",
        }
    }
}

impl fmt::Display for PlatformTriplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn derive_triplet(os_name: &str) -> PlatformTriplet {
    Platform::from_os_name(os_name).triplet()
}
