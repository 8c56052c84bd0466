pub mod input;
pub mod launch;

use std::path::Path;

use chrono::{Local, Timelike};
use log::{debug, error, info, warn};

use crate::interpreter::{ActionSink, EnvironmentQuery};
use input::InputError;

/// Performs actions on the real machine. Failures are logged, never returned.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemActions;

impl ActionSink for SystemActions {
    fn set_input_blocked(&mut self, blocked: bool) {
        match input::set_input_blocked(blocked) {
            Ok(()) => debug!("input blocked: {blocked}"),
            Err(InputError::Unsupported) => warn!("{}", InputError::Unsupported),
            Err(err) => error!("{err}"),
        }
    }

    fn open_path(&mut self, path: &str) {
        match launch::open_path(path) {
            Ok(()) => debug!("opened {path}"),
            Err(err) => error!("{err}: {}", err.source),
        }
    }
}

/// Logs every action instead of performing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunActions;

impl ActionSink for DryRunActions {
    fn set_input_blocked(&mut self, blocked: bool) {
        info!("[dry run] set input blocked: {blocked}");
    }

    fn open_path(&mut self, path: &str) {
        info!("[dry run] open {path}");
    }
}

/// Answers queries from the file system and the local clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEnvironment;

impl EnvironmentQuery for SystemEnvironment {
    fn count_directory_entries(&mut self, path: &str) -> f64 {
        count_entries(Path::new(path)).map_or_else(
            |err| {
                debug!("cannot read directory {path}: {err}");
                0.0
            },
            |count| count as f64,
        )
    }

    fn current_time(&mut self) -> f64 {
        hhmm(&Local::now())
    }
}

/// Counts every entry of `path`, files and subdirectories alike.
pub fn count_entries(path: &Path) -> std::io::Result<usize> {
    Ok(std::fs::read_dir(path)?.count())
}

/// `14:05` becomes `1405.0`.
pub fn hhmm<T: Timelike>(time: &T) -> f64 {
    f64::from(time.hour() * 100 + time.minute())
}
