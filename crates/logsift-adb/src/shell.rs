use std::process::Stdio;

use anyhow::{Context, Result};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::process::{Child, ChildStdout, Command};
use tracing::debug;

use logsift_session::{DevicePropertyLookup, LogLineSource, ProcessListingSource};

/// Errors talking to adb.
///
/// All of these are fatal to the run; the session never reconnects.
#[derive(Debug, Error)]
pub enum AdbError {
    #[error("failed to run adb: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("adb exited with {status}: {stderr}")]
    Command {
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("adb stdout was not captured")]
    NoStdout,
}

/// Which connected device adb should talk to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeviceSelector {
    /// Whatever adb picks when only one device is attached
    #[default]
    Any,
    /// First device on USB (`adb -d`)
    Usb,
    /// First running emulator (`adb -e`)
    Emulator,
}

impl DeviceSelector {
    fn flag(&self) -> Option<&'static str> {
        match self {
            Self::Any => None,
            Self::Usb => Some("-d"),
            Self::Emulator => Some("-e"),
        }
    }
}

/// Runs commands in a shell on the selected device
#[derive(Clone, Debug)]
pub struct AdbShell {
    device: DeviceSelector,
}

impl AdbShell {
    pub fn new(device: DeviceSelector) -> Self {
        Self { device }
    }

    fn shell_command(&self, cmd: &str) -> Command {
        let mut command = Command::new("adb");
        if let Some(flag) = self.device.flag() {
            command.arg(flag);
        }
        command.arg("shell").arg(cmd);
        command.stdin(Stdio::null());
        command
    }

    /// Spawn a long-running shell command and stream its stdout lines.
    ///
    /// The child is killed when the stream is dropped.
    pub fn stream_lines(&self, cmd: &str) -> Result<ShellLines, AdbError> {
        debug!(%cmd, "spawning adb shell stream");
        let mut command = self.shell_command(cmd);
        command.stdout(Stdio::piped()).kill_on_drop(true);

        let mut child = command.spawn()?;
        let stdout = child.stdout.take().ok_or(AdbError::NoStdout)?;

        Ok(ShellLines {
            _child: child,
            lines: BufReader::new(stdout).lines(),
        })
    }

    /// Run a shell command to completion and capture its output lines
    pub async fn capture_lines(&self, cmd: &str) -> Result<Vec<String>, AdbError> {
        debug!(%cmd, "running adb shell");
        let output = self.shell_command(cmd).output().await?;

        if !output.status.success() {
            return Err(AdbError::Command {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .collect())
    }

    /// Read one device property via `getprop`
    pub async fn get_prop(&self, key: &str) -> Result<String, AdbError> {
        let lines = self.capture_lines(&format!("getprop {key}")).await?;
        Ok(parse_prop_value(&lines))
    }

    /// Package name of the currently focused window, if any
    pub async fn focused_package(&self) -> Result<Option<String>, AdbError> {
        let lines = self
            .capture_lines("dumpsys activity activities | grep mFocusedWindow")
            .await?;
        Ok(parse_focused_package(&lines))
    }

    /// Start following the device's logcat feed
    pub fn logcat(&self) -> Result<AdbLogcat, AdbError> {
        Ok(AdbLogcat {
            stream: self.stream_lines("logcat")?,
        })
    }

    /// Process-table snapshots for pid resolution
    pub fn process_listing(&self) -> AdbProcessListing {
        AdbProcessListing {
            shell: self.clone(),
        }
    }
}

/// Live line stream from a spawned shell command
pub struct ShellLines {
    // Held so the child outlives the stream and dies with it.
    _child: Child,
    lines: Lines<BufReader<ChildStdout>>,
}

/// The device's logcat feed as a [`LogLineSource`]
pub struct AdbLogcat {
    stream: ShellLines,
}

impl LogLineSource for AdbLogcat {
    async fn next_line(&mut self) -> Result<Option<String>> {
        self.stream
            .lines
            .next_line()
            .await
            .context("reading logcat stream")
    }
}

/// One `ps` run per snapshot, as a [`ProcessListingSource`]
pub struct AdbProcessListing {
    shell: AdbShell,
}

impl ProcessListingSource for AdbProcessListing {
    async fn snapshot(&mut self) -> Result<Vec<String>> {
        self.shell
            .capture_lines("ps")
            .await
            .context("listing device processes")
    }
}

impl DevicePropertyLookup for AdbShell {
    async fn get(&self, key: &str) -> Result<String> {
        self.get_prop(key)
            .await
            .with_context(|| format!("reading device property {key}"))
    }
}

/// Extract a property value from `getprop` output.
///
/// Handles both the bare-value form of `getprop <key>` and the
/// `[key]: [value]` form, trimming brackets and whitespace.
fn parse_prop_value(lines: &[String]) -> String {
    lines
        .iter()
        .rev()
        .find(|line| !line.trim().is_empty())
        .map(|line| {
            line.rsplit(':')
                .next()
                .unwrap_or(line)
                .trim()
                .trim_matches(['[', ']'])
                .trim()
                .to_string()
        })
        .unwrap_or_default()
}

/// Extract the focused package from `dumpsys activity` output.
///
/// The focused window line ends in `<package>/<activity>`; the package is
/// the last space-separated token before the slash.
fn parse_focused_package(lines: &[String]) -> Option<String> {
    for line in lines {
        let before_slash = line.split('/').next().unwrap_or("");
        if let Some(package) = before_slash.split_whitespace().last() {
            if line.contains('/') && !package.is_empty() {
                return Some(package.to_string());
            }
        }
    }
    None
}
