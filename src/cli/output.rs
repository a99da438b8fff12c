//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, ErrorKind};

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    format!("Error: {}", e)
}

/// Process exit code for a failed command. Usage and validation problems
/// exit 2, everything else 1.
pub fn exit_code(e: &ApiError) -> i32 {
    match e {
        ApiError::Context(ctx) => match ctx.kind() {
            ErrorKind::InvalidName | ErrorKind::InvalidOption | ErrorKind::ConflictingOptions => 2,
            _ => 1,
        },
        ApiError::ConfigError(_) => 2,
    }
}
