//! Failure taxonomy shared by the build and run paths.
//!
//! Tasks return `anyhow::Result`; the variants below are the failures the
//! binary maps to a specific exit status or operator hint. Everything else
//! (I/O, config parsing) exits with status 1.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("vcpkg not found (checked VCPKG_ROOT, ~/.vcpkg, ./vcpkg and ../vcpkg)")]
    ToolchainNotFound,

    #[error("vcpkg.cmake not found at {}", .marker.display())]
    ToolchainInvalid { marker: PathBuf },

    #[error("{summary} ({})", describe_exit(*.exit_code))]
    CommandFailed {
        stage: &'static str,
        summary: &'static str,
        exit_code: Option<i32>,
    },

    #[error("executable not found at {}", .path.display())]
    ArtifactMissing { path: PathBuf },

    #[error("{0}")]
    InvalidArgument(String),

    #[error("simulator exited with error code: {code}")]
    ChildProcessFailed { code: i32 },
}

impl TaskError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ChildProcessFailed { code } => *code,
            _ => 1,
        }
    }

    /// Follow-up instructions printed after the error line.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ToolchainNotFound => Some(
                "Install vcpkg:\n  \
                 git clone https://github.com/Microsoft/vcpkg.git ~/.vcpkg\n  \
                 cd ~/.vcpkg && ./bootstrap-vcpkg.sh\n\
                 or point VCPKG_ROOT at an existing installation.",
            ),
            Self::ToolchainInvalid { .. } => {
                Some("Please ensure vcpkg is properly installed (run its bootstrap script).")
            }
            Self::ArtifactMissing { .. } => Some("Please run `cargo xtask build` first."),
            _ => None,
        }
    }
}

/// Exit status for any error surfaced by a task.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<TaskError>().map_or(1, TaskError::exit_code)
}

pub(crate) fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "no exit status".to_string(),
    }
}
