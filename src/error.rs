//! Application error type.
//!
//! One error type flows through the whole pipeline. The exit code doubles
//! as a coarse taxonomy:
//!
//! - `2` — input/schema problems (unreadable sheet, missing required columns)
//! - `3` — no valid rows remained after normalization
//! - `4` — terminal/runtime failures

/// Exit code for input and schema errors (includes column resolution).
pub const EXIT_INPUT: u8 = 2;
/// Exit code for an upload that produced zero valid records.
pub const EXIT_EMPTY_DATASET: u8 = 3;
/// Exit code for terminal/runtime failures.
pub const EXIT_RUNTIME: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
