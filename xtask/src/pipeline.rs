//! Fixed build pipeline: vcpkg discovery, CMake configure/build, CTest.
//!
//! Stages are registered in [`STAGES`] and executed by [`run_stages`], which
//! stops at the first failing stage. Nothing is retried.

use crate::artifact::{BuildType, ProjectLayout};
use crate::config::BuildSettings;
use crate::error::TaskError;
use crate::platform::{Platform, PlatformTriplet};
use crate::runner::CommandRunner;
use crate::toolchain::{self, ToolchainLocation, ToolchainSearch};
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Inputs for the configure stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildConfiguration {
    pub toolchain_file: PathBuf,
    pub triplet: PlatformTriplet,
    pub build_type: BuildType,
    pub working_dir: PathBuf,
}

impl BuildConfiguration {
    /// `cmake .. -DCMAKE_TOOLCHAIN_FILE=... -DVCPKG_TARGET_TRIPLET=... -DCMAKE_BUILD_TYPE=...`
    pub fn configure_command(&self, generator: &str) -> Vec<String> {
        vec![
            generator.to_string(),
            "..".to_string(),
            format!("-DCMAKE_TOOLCHAIN_FILE={}", self.toolchain_file.display()),
            format!("-DVCPKG_TARGET_TRIPLET={}", self.triplet),
            format!("-DCMAKE_BUILD_TYPE={}", self.build_type),
        ]
    }
}

pub fn build_command(generator: &str, build_type: BuildType) -> Vec<String> {
    vec![
        generator.to_string(),
        "--build".to_string(),
        ".".to_string(),
        "--config".to_string(),
        build_type.to_string(),
    ]
}

pub fn test_command(test_runner: &str, build_type: BuildType) -> Vec<String> {
    vec![
        test_runner.to_string(),
        "--output-on-failure".to_string(),
        "--build-config".to_string(),
        build_type.to_string(),
    ]
}

/// State threaded through the stages of one `xtask build`.
#[derive(Clone, Debug)]
pub struct BuildContext {
    pub layout: ProjectLayout,
    pub search: ToolchainSearch,
    pub platform: Platform,
    pub generator: String,
    pub test_runner: String,
    pub build_type: BuildType,
    pub toolchain: Option<ToolchainLocation>,
    pub artifact: Option<PathBuf>,
}

impl BuildContext {
    pub fn new(
        layout: ProjectLayout,
        search: ToolchainSearch,
        platform: Platform,
        settings: &BuildSettings,
    ) -> Self {
        Self {
            layout,
            search,
            platform,
            generator: settings.generator.clone(),
            test_runner: settings.test_runner.clone(),
            build_type: BuildType::Release,
            toolchain: None,
            artifact: None,
        }
    }

    fn toolchain(&self) -> Result<&ToolchainLocation> {
        self.toolchain
            .as_ref()
            .ok_or_else(|| anyhow!("vcpkg has not been located yet"))
    }
}

/// One gated step of the build pipeline.
pub trait Stage: Sync {
    fn name(&self) -> &'static str;

    fn run(&self, ctx: &mut BuildContext, runner: &dyn CommandRunner) -> Result<()>;
}

pub struct LocateToolchain;
pub struct VerifyMarker;
pub struct CreateBuildDir;
pub struct Configure;
pub struct Compile;
pub struct RunTests;
pub struct ReportArtifact;

/// Pipeline order. Each stage only runs if every earlier one succeeded.
pub static STAGES: &[&dyn Stage] = &[
    &LocateToolchain,
    &VerifyMarker,
    &CreateBuildDir,
    &Configure,
    &Compile,
    &RunTests,
    &ReportArtifact,
];

/// Runs `stages` in order, halting on the first failure.
pub fn run_stages(
    stages: &[&dyn Stage],
    ctx: &mut BuildContext,
    runner: &dyn CommandRunner,
) -> Result<()> {
    let total = stages.len();
    for (i, stage) in stages.iter().enumerate() {
        log::debug!("[{}/{}] {}", i + 1, total, stage.name());
        if let Err(e) = stage.run(ctx, runner) {
            log::debug!("stage {} failed, skipping {} remaining", stage.name(), total - i - 1);
            return Err(e);
        }
    }
    Ok(())
}

fn run_gated(
    runner: &dyn CommandRunner,
    stage: &'static str,
    summary: &'static str,
    argv: &[String],
    cwd: &Path,
) -> Result<()> {
    let outcome = runner.run(argv, cwd);
    if outcome.succeeded {
        Ok(())
    } else {
        Err(TaskError::CommandFailed {
            stage,
            summary,
            exit_code: outcome.exit_code,
        }
        .into())
    }
}

impl Stage for LocateToolchain {
    fn name(&self) -> &'static str {
        "locate-toolchain"
    }

    fn run(&self, ctx: &mut BuildContext, _runner: &dyn CommandRunner) -> Result<()> {
        let location = toolchain::locate(&ctx.search)?;
        println!("Using vcpkg at: {}", location.root().display());
        ctx.toolchain = Some(location);
        Ok(())
    }
}

impl Stage for VerifyMarker {
    fn name(&self) -> &'static str {
        "verify-marker"
    }

    fn run(&self, ctx: &mut BuildContext, _runner: &dyn CommandRunner) -> Result<()> {
        let marker = ctx.toolchain()?.verify()?;
        log::debug!("toolchain file {}", marker.display());
        Ok(())
    }
}

impl Stage for CreateBuildDir {
    fn name(&self) -> &'static str {
        "create-build-dir"
    }

    fn run(&self, ctx: &mut BuildContext, _runner: &dyn CommandRunner) -> Result<()> {
        println!("Creating build directory...");
        let dir = ctx.layout.build_dir();
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create build directory {}", dir.display()))
    }
}

impl Stage for Configure {
    fn name(&self) -> &'static str {
        "configure"
    }

    fn run(&self, ctx: &mut BuildContext, runner: &dyn CommandRunner) -> Result<()> {
        let triplet = ctx.platform.triplet();
        println!("Using triplet: {triplet}");

        let configuration = BuildConfiguration {
            toolchain_file: ctx.toolchain()?.toolchain_file(),
            triplet,
            build_type: ctx.build_type,
            working_dir: ctx.layout.build_dir().to_path_buf(),
        };

        println!("Configuring with CMake + vcpkg...");
        run_gated(
            runner,
            self.name(),
            "CMake configuration failed",
            &configuration.configure_command(&ctx.generator),
            &configuration.working_dir,
        )
    }
}

impl Stage for Compile {
    fn name(&self) -> &'static str {
        "build"
    }

    fn run(&self, ctx: &mut BuildContext, runner: &dyn CommandRunner) -> Result<()> {
        println!("Building project...");
        run_gated(
            runner,
            self.name(),
            "Build failed",
            &build_command(&ctx.generator, ctx.build_type),
            ctx.layout.build_dir(),
        )
    }
}

impl Stage for RunTests {
    fn name(&self) -> &'static str {
        "test"
    }

    fn run(&self, ctx: &mut BuildContext, runner: &dyn CommandRunner) -> Result<()> {
        println!("Running unit tests...");
        run_gated(
            runner,
            self.name(),
            "Tests failed",
            &test_command(&ctx.test_runner, ctx.build_type),
            ctx.layout.build_dir(),
        )
    }
}

impl Stage for ReportArtifact {
    fn name(&self) -> &'static str {
        "report-artifact"
    }

    fn run(&self, ctx: &mut BuildContext, _runner: &dyn CommandRunner) -> Result<()> {
        let exe = ctx.layout.artifact(ctx.platform);
        println!("=== Build Complete ===");
        if !exe.is_file() {
            log::warn!(
                "{} was not produced; check the CMake target name or [build] artifact in xtask.toml",
                exe.display()
            );
        }
        println!("Executable: {}", exe.display());
        println!("Run with: cargo xtask run [--set <C>] [--crit <C>] [--quiet]");
        ctx.artifact = Some(exe);
        Ok(())
    }
}
