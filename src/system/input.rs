use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("BlockInput failed (it needs an elevated process)")]
    Rejected,
    #[error("Blocking input is not supported on this platform")]
    Unsupported,
}

#[cfg(windows)]
mod ffi {
    #[link(name = "user32")]
    extern "system" {
        pub fn BlockInput(block_it: i32) -> i32;
    }
}

/// Blocks or releases mouse and keyboard input for the whole desktop.
#[cfg(windows)]
pub fn set_input_blocked(blocked: bool) -> Result<(), InputError> {
    // SAFETY: BlockInput takes a plain BOOL and touches no caller memory.
    let succeeded = unsafe { ffi::BlockInput(i32::from(blocked)) };
    if succeeded != 0 {
        Ok(())
    } else {
        Err(InputError::Rejected)
    }
}

#[cfg(not(windows))]
pub fn set_input_blocked(_blocked: bool) -> Result<(), InputError> {
    Err(InputError::Unsupported)
}
