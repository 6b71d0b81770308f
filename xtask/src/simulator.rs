//! Launching the built simulator and forwarding how it ended.

use crate::artifact::ProjectLayout;
use crate::error::TaskError;
use crate::platform::Platform;
use anyhow::{Context, Result};
use std::fmt;
use std::process::{Child, Command, ExitStatus};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[cfg(unix)]
const SIGINT: i32 = 2;

/// Temperatures (°C) and verbosity handed to the simulator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulatorArguments {
    pub setpoint: f64,
    pub critical: f64,
    pub quiet: bool,
}

/// Non-fatal findings from [`SimulatorArguments::validate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advisory {
    SetpointNotBelowCritical,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetpointNotBelowCritical => {
                f.write_str("Setpoint should be less than critical temperature")
            }
        }
    }
}

impl SimulatorArguments {
    /// Both temperatures must be finite and strictly positive.
    pub fn validate(&self) -> Result<Vec<Advisory>, TaskError> {
        if !is_positive(self.setpoint) {
            return Err(TaskError::InvalidArgument(format!(
                "Setpoint must be positive (got {})",
                self.setpoint
            )));
        }
        if !is_positive(self.critical) {
            return Err(TaskError::InvalidArgument(format!(
                "Critical temperature must be positive (got {})",
                self.critical
            )));
        }

        let mut advisories = Vec::new();
        if self.setpoint >= self.critical {
            advisories.push(Advisory::SetpointNotBelowCritical);
        }
        Ok(advisories)
    }

    /// Flags understood by the simulator binary.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            format!("--set={}", self.setpoint),
            format!("--crit={}", self.critical),
        ];
        if self.quiet {
            args.push("--quiet".to_string());
        }
        args
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Set once the operator asks to stop (Ctrl-C).
#[derive(Clone, Debug, Default)]
pub struct InterruptFlag(Arc<AtomicBool>);

impl InterruptFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes Ctrl-C to a new flag. Can only be called once per process.
    pub fn install() -> Result<Self> {
        let flag = Self::new();
        let handle = flag.clone();
        ctrlc::set_handler(move || handle.trigger()).context("Failed to set Ctrl-C handler")?;
        Ok(flag)
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    /// Operator stopped the run; treated as success.
    Interrupted,
}

impl RunOutcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Completed | Self::Interrupted => 0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RunRequest<'a> {
    pub layout: &'a ProjectLayout,
    pub platform: Platform,
    pub arguments: SimulatorArguments,
}

/// Launches the built simulator and waits for it.
///
/// Never builds: a missing executable is an error. A non-zero exit surfaces as
/// [`TaskError::ChildProcessFailed`] carrying the child's own code.
pub fn run_simulator(request: &RunRequest<'_>, interrupt: &InterruptFlag) -> Result<RunOutcome> {
    let exe = request.layout.artifact(request.platform);
    if !exe.is_file() {
        return Err(TaskError::ArtifactMissing { path: exe }.into());
    }

    let arguments = request.arguments;
    for advisory in arguments.validate()? {
        println!("Warning: {advisory}");
    }

    println!("=== EAE Firmware Run Script ===");
    println!("Starting EAE Firmware Simulator...");
    println!("Setpoint: {}°C", arguments.setpoint);
    println!("Critical: {}°C", arguments.critical);
    println!();

    let args = arguments.to_args();
    log::debug!("launching {} {}", exe.display(), args.join(" "));
    let mut child = Command::new(&exe)
        .args(&args)
        .spawn()
        .with_context(|| format!("Failed to launch {}", exe.display()))?;

    let Some(status) = wait_or_interrupt(&mut child, interrupt)? else {
        return Ok(interrupted());
    };
    settle(status, interrupt)
}

/// Outcome for a child that exited on its own.
///
/// Ctrl-C reaches the child too and may end it, with any status, before the
/// handler thread has set the flag. An interrupt always wins over the status.
fn settle(status: ExitStatus, interrupt: &InterruptFlag) -> Result<RunOutcome> {
    if killed_by_sigint(status) || flag_set_after_grace(interrupt) {
        return Ok(interrupted());
    }
    if status.success() {
        return Ok(RunOutcome::Completed);
    }
    Err(TaskError::ChildProcessFailed {
        code: exit_code_of(status),
    }
    .into())
}

/// `None` when the interrupt flag fired first; the child is killed and reaped.
fn wait_or_interrupt(child: &mut Child, interrupt: &InterruptFlag) -> Result<Option<ExitStatus>> {
    loop {
        if interrupt.is_set() {
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }
        if let Some(status) = child.try_wait().context("Failed to wait for simulator")? {
            return Ok(Some(status));
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn interrupted() -> RunOutcome {
    println!("\nSimulation interrupted by user.");
    RunOutcome::Interrupted
}

fn flag_set_after_grace(interrupt: &InterruptFlag) -> bool {
    interrupt.is_set() || {
        thread::sleep(POLL_INTERVAL);
        interrupt.is_set()
    }
}

#[cfg(unix)]
fn killed_by_sigint(status: ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    status.signal() == Some(SIGINT)
}

#[cfg(not(unix))]
fn killed_by_sigint(_status: ExitStatus) -> bool {
    false
}

/// Exit code to forward; signal deaths follow the shell's `128 + n`.
fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
