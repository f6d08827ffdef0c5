//! Process-level error type.
//!
//! `AppError` carries the exit code the binary terminates with:
//!
//! - `2`: usage, configuration, or file I/O problems
//! - `3`: data-shape problems (the metadata key does not split into 5 fields,
//!   a required column is missing from a filtered file)
//! - `4`: internal invariant violations
//!
//! Row- and region-level problems are *not* `AppError`s: coercion degrades
//! bad cells to `Missing`, and per-region conditions become `SkipReason`s
//! reported alongside normal output.

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
