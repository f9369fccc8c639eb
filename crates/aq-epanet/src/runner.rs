//! External engine invocation, one provider per supported platform.

use crate::error::{BridgeError, BridgeResult};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

/// Exit code the engine uses to report an invalid network.
const INVALID_NETWORK_EXIT: i32 = 100;

/// The same code as seen through a POSIX wait status (shifted 8 bits).
const INVALID_NETWORK_WAIT_STATUS: i32 = INVALID_NETWORK_EXIT << 8;

/// How to launch the engine.
#[derive(Debug, Clone)]
pub struct EngineCommand {
    /// Path to the engine executable (or launch script).
    pub engine_path: PathBuf,
    /// Upper bound on one invocation; caps worst-case runtime on
    /// non-convergent inputs.
    pub timeout: Duration,
}

impl EngineCommand {
    pub fn new(engine_path: impl Into<PathBuf>) -> Self {
        Self {
            engine_path: engine_path.into(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Normalized meaning of an engine exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitClass {
    Success,
    /// The engine rejected the topology or failed to converge.
    InvalidNetwork,
    /// Any other nonzero exit; unclassified engine failure.
    Failure(i32),
}

/// Normalize a raw engine exit code.
///
/// Code 100 is the engine's invalid-network report; 100 << 8 is the same
/// report seen through a raw POSIX wait status. Both map to the same
/// condition, distinct from every other nonzero code.
pub fn classify_exit(code: i32) -> ExitClass {
    match code {
        0 => ExitClass::Success,
        INVALID_NETWORK_EXIT | INVALID_NETWORK_WAIT_STATUS => ExitClass::InvalidNetwork,
        other => ExitClass::Failure(other),
    }
}

/// Platform-specific launch mechanism for the engine process.
///
/// `invoke` runs the engine with (input, report, output) path arguments
/// and returns its raw exit code.
pub trait EngineRunner: Send + Sync {
    fn invoke(&self, inp: &Path, rpt: &Path, out: &Path) -> BridgeResult<i32>;
}

/// Runs `runepanet.exe` from its installation directory (the engine DLLs
/// live next to the executable).
#[derive(Debug, Clone)]
pub struct WindowsRunner {
    command: EngineCommand,
}

impl WindowsRunner {
    pub fn new(command: EngineCommand) -> Self {
        Self { command }
    }
}

impl EngineRunner for WindowsRunner {
    fn invoke(&self, inp: &Path, rpt: &Path, out: &Path) -> BridgeResult<i32> {
        let mut cmd = Command::new(&self.command.engine_path);
        if let Some(dir) = self.command.engine_path.parent() {
            cmd.current_dir(dir);
        }
        cmd.arg(inp).arg(rpt).arg(out);
        run_with_timeout(cmd, self.command.timeout)
    }
}

/// Runs the engine binary or launch script directly.
#[derive(Debug, Clone)]
pub struct UnixRunner {
    command: EngineCommand,
}

impl UnixRunner {
    pub fn new(command: EngineCommand) -> Self {
        Self { command }
    }
}

impl EngineRunner for UnixRunner {
    fn invoke(&self, inp: &Path, rpt: &Path, out: &Path) -> BridgeResult<i32> {
        let mut cmd = Command::new(&self.command.engine_path);
        cmd.arg(inp).arg(rpt).arg(out);
        run_with_timeout(cmd, self.command.timeout)
    }
}

/// Pick the runner for the current platform; a startup-time fault on any
/// other OS.
pub fn default_runner(command: EngineCommand) -> BridgeResult<Box<dyn EngineRunner>> {
    if cfg!(target_os = "windows") {
        Ok(Box::new(WindowsRunner::new(command)))
    } else if cfg!(unix) {
        Ok(Box::new(UnixRunner::new(command)))
    } else {
        Err(BridgeError::UnsupportedPlatform)
    }
}

fn run_with_timeout(mut cmd: Command, timeout: Duration) -> BridgeResult<i32> {
    cmd.stdout(Stdio::null()).stderr(Stdio::null());
    let mut child = cmd.spawn()?;
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait()? {
            Some(status) => {
                return status.code().ok_or(BridgeError::EngineKilled);
            }
            None if Instant::now() >= deadline => {
                kill_quietly(&mut child);
                return Err(BridgeError::Timeout {
                    seconds: timeout.as_secs(),
                });
            }
            None => std::thread::sleep(Duration::from_millis(10)),
        }
    }
}

fn kill_quietly(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_normalization() {
        assert_eq!(classify_exit(0), ExitClass::Success);
        assert_eq!(classify_exit(100), ExitClass::InvalidNetwork);
        // POSIX-shifted equivalent maps to the same fault.
        assert_eq!(classify_exit(100 << 8), ExitClass::InvalidNetwork);
        assert_eq!(classify_exit(1), ExitClass::Failure(1));
        assert_eq!(classify_exit(101), ExitClass::Failure(101));
        assert_eq!(classify_exit(-1), ExitClass::Failure(-1));
    }

    #[test]
    fn default_runner_exists_on_supported_platforms() {
        let cmd = EngineCommand::new("/usr/bin/true");
        // Windows and unix are the two supported platforms; everywhere the
        // test suite runs, a runner must come back.
        assert!(default_runner(cmd).is_ok());
    }
}
