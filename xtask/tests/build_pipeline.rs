//! Build path with a scripted command runner.

#![allow(clippy::unwrap_used)]

use eae_xtask::artifact::ProjectLayout;
use eae_xtask::config::BuildSettings;
use eae_xtask::pipeline::{run_stages, BuildContext, STAGES};
use eae_xtask::platform::Platform;
use eae_xtask::runner::{CommandOutcome, CommandRunner};
use eae_xtask::toolchain::{ToolchainSearch, TOOLCHAIN_MARKER};
use eae_xtask::TaskError;
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Succeeds unless the program's second argument is `fail_on`.
struct ScriptedRunner {
    fail_on: Option<&'static str>,
    programs: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    fn new(fail_on: Option<&'static str>) -> Self {
        Self {
            fail_on,
            programs: RefCell::new(Vec::new()),
        }
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, argv: &[String], _cwd: &Path) -> CommandOutcome {
        self.programs.borrow_mut().push(argv.join(" "));
        let failed = self
            .fail_on
            .is_some_and(|arg| argv.get(1).map(String::as_str) == Some(arg));
        CommandOutcome {
            succeeded: !failed,
            stdout: String::new(),
            stderr: if failed { "error".to_string() } else { String::new() },
            exit_code: Some(i32::from(failed)),
        }
    }
}

fn context(tmp: &TempDir, platform: Platform) -> BuildContext {
    let root = tmp.path().join("firmware");
    let vcpkg = tmp.path().join("vcpkg-install");
    let marker = vcpkg.join(TOOLCHAIN_MARKER);
    fs::create_dir_all(marker.parent().unwrap()).unwrap();
    fs::write(&marker, "").unwrap();
    fs::create_dir_all(&root).unwrap();

    let settings = BuildSettings::default();
    BuildContext::new(
        ProjectLayout::new(&root, &settings),
        ToolchainSearch {
            env_root: Some(vcpkg),
            home: None,
            cwd: root,
        },
        platform,
        &settings,
    )
}

#[test]
fn build_and_run_agree_on_the_executable() {
    for platform in [Platform::Windows, Platform::Linux, Platform::MacOs] {
        let tmp = TempDir::new().unwrap();
        let mut ctx = context(&tmp, platform);

        run_stages(STAGES, &mut ctx, &ScriptedRunner::new(None)).unwrap();

        // The run task builds its own layout from the same root and settings.
        let run_layout = ProjectLayout::new(ctx.layout.root(), &BuildSettings::default());
        assert_eq!(ctx.artifact, Some(run_layout.artifact(platform)));
    }
}

#[test]
fn configure_failure_never_reaches_build() {
    let tmp = TempDir::new().unwrap();
    let mut ctx = context(&tmp, Platform::Linux);
    let runner = ScriptedRunner::new(Some(".."));

    let err = run_stages(STAGES, &mut ctx, &runner).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<TaskError>(),
        Some(TaskError::CommandFailed { stage: "configure", .. })
    ));
    let programs = runner.programs.borrow();
    assert_eq!(programs.len(), 1);
    assert!(programs[0].starts_with("cmake .. -DCMAKE_TOOLCHAIN_FILE="));
    assert!(programs[0]
        .ends_with("-DVCPKG_TARGET_TRIPLET=x64-linux-static -DCMAKE_BUILD_TYPE=Release"));
}

#[test]
fn windows_configure_uses_windows_triplet() {
    let tmp = TempDir::new().unwrap();
    let mut ctx = context(&tmp, Platform::Windows);
    let runner = ScriptedRunner::new(None);

    run_stages(STAGES, &mut ctx, &runner).unwrap();

    let programs = runner.programs.borrow();
    assert!(programs[0].contains("-DVCPKG_TARGET_TRIPLET=x64-windows-static"));
    assert_eq!(programs[1], "cmake --build . --config Release");
    assert_eq!(programs[2], "ctest --output-on-failure --build-config Release");
}
