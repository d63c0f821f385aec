//! Windowing queries via xdotool, with bounded timeouts.

use super::error::{CaptureError, CaptureResult};
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

/// Upper bound for window queries.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(5);
/// Upper bound for raster dumps and conversions.
pub const CAPTURE_TIMEOUT: Duration = Duration::from_secs(10);

/// Run a prepared command, enforcing a timeout and a zero exit status.
pub(crate) async fn run_checked(
    mut cmd: Command,
    command: &str,
    timeout: Duration,
) -> CaptureResult<Output> {
    let output = tokio::time::timeout(timeout, cmd.output())
        .await
        .map_err(|_| CaptureError::Timeout {
            command: command.to_string(),
            duration: timeout,
        })?
        .map_err(|source| CaptureError::Spawn {
            command: command.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(CaptureError::CommandFailed {
            command: command.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    Ok(output)
}

/// Id of the currently focused window.
pub async fn focused_window() -> CaptureResult<String> {
    let mut cmd = Command::new("xdotool");
    cmd.arg("getwindowfocus");
    let output = run_checked(cmd, "xdotool getwindowfocus", QUERY_TIMEOUT).await?;
    let id = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if id.is_empty() {
        return Err(CaptureError::WindowNotFound);
    }
    Ok(id)
}

/// Title of a window by id.
pub async fn window_name(id: &str) -> CaptureResult<String> {
    let mut cmd = Command::new("xdotool");
    cmd.arg("getwindowname").arg(id);
    let output = run_checked(cmd, "xdotool getwindowname", QUERY_TIMEOUT).await?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Ids of all windows whose title matches `title`.
pub async fn search_windows(title: &str) -> CaptureResult<Vec<String>> {
    let mut cmd = Command::new("xdotool");
    cmd.arg("search").arg("--name").arg(title);
    let output = run_checked(cmd, "xdotool search", QUERY_TIMEOUT).await?;
    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect())
}

/// On-screen top-left corner of a window by id.
pub async fn window_origin(id: &str) -> CaptureResult<(i32, i32)> {
    let mut cmd = Command::new("xdotool");
    cmd.arg("getwindowgeometry").arg("--shell").arg(id);
    let output = run_checked(cmd, "xdotool getwindowgeometry", QUERY_TIMEOUT).await?;
    Ok(parse_origin(&String::from_utf8_lossy(&output.stdout)))
}

/// On-screen top-left corner of the active window.
pub async fn active_window_origin() -> CaptureResult<(i32, i32)> {
    let mut cmd = Command::new("xdotool");
    cmd.arg("getactivewindow").arg("getwindowgeometry").arg("--shell");
    let output = run_checked(cmd, "xdotool getactivewindow getwindowgeometry", QUERY_TIMEOUT).await?;
    Ok(parse_origin(&String::from_utf8_lossy(&output.stdout)))
}

/// Parse `X=`/`Y=` lines from `xdotool getwindowgeometry --shell` output.
/// Missing or malformed lines fall back to 0.
pub(crate) fn parse_origin(stdout: &str) -> (i32, i32) {
    let mut x = 0;
    let mut y = 0;
    for line in stdout.lines() {
        if let Some(value) = line.strip_prefix("X=") {
            x = value.trim().parse().unwrap_or(0);
        } else if let Some(value) = line.strip_prefix("Y=") {
            y = value.trim().parse().unwrap_or(0);
        }
    }
    (x, y)
}
