use crate::command::{ExecutionFacility, Handle};
use crate::error::{SpawnError, WaitError};
use nix::errno::Errno;
use nix::sys::wait::{self, WaitStatus};
use std::io::ErrorKind;
use std::process::{Command, Stdio};

/// Execution facility backed by operating system processes.
///
/// Each command becomes a child process sharing the shell's terminal; its pid is
/// the handle. Children are reaped with `wait(2)`, i.e. any child of this process,
/// including children started by other code in the same process.
#[derive(Debug, Default)]
pub struct ProcessFacility {
    _private: (),
}

impl ProcessFacility {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExecutionFacility for ProcessFacility {
    #[allow(clippy::zombie_processes)]
    fn spawn(&mut self, argv: &[String]) -> Result<Handle, SpawnError> {
        let (name, args) = argv.split_first().ok_or(SpawnError::EmptyCommand)?;

        // the std handle is dropped right away; reaping goes through wait(2)
        let child = Command::new(name)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => SpawnError::NotFound,
                _ => SpawnError::Io(e),
            })?;

        Handle::new(child.id()).ok_or_else(|| SpawnError::Other("child reported pid 0".into()))
    }

    fn wait_any(&mut self) -> Result<Handle, WaitError> {
        loop {
            match wait::wait() {
                Ok(WaitStatus::Exited(pid, _)) | Ok(WaitStatus::Signaled(pid, _, _)) => {
                    let raw = u32::try_from(pid.as_raw())
                        .map_err(|_| WaitError::Os(format!("unexpected pid {}", pid)))?;
                    return Handle::new(raw).ok_or_else(|| WaitError::Os("reaped pid 0".into()));
                }
                // stop/continue notifications are not terminations
                Ok(_) | Err(Errno::EINTR) => continue,
                Err(Errno::ECHILD) => return Err(WaitError::NoChildren),
                Err(e) => return Err(WaitError::Os(e.to_string())),
            }
        }
    }
}
