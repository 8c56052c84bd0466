use std::process::Command;

use compact_str::CompactString;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Could not open `{path}`")]
pub struct LaunchError {
    pub path: CompactString,
    #[source]
    pub source: std::io::Error,
}

/// The platform's "open with the default handler" command for `path`.
pub fn opener(path: &str) -> Command {
    if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        // The empty string is the window title `start` expects before a quoted path.
        command.args(["/C", "start", "", path]);
        command
    } else if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(path);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        command
    }
}

/// Starts the opener and returns without waiting for it.
pub fn open_path(path: &str) -> Result<(), LaunchError> {
    opener(path)
        .spawn()
        .map(|_| ())
        .map_err(|source| LaunchError {
            path: CompactString::from(path),
            source,
        })
}
