//! Exit code constants for the CLI application.

/// Success exit code (standard Unix convention).
pub const SUCCESS: i32 = 0;

/// Usage, validation and runtime errors.
pub const ERROR: i32 = 2;
