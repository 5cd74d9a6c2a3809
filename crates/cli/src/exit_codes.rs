//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! | Code | Description                                        |
//! |------|----------------------------------------------------|
//! | 0    | Success                                            |
//! | 1    | Schemas differ (`compare`, diff(1) semantics)      |
//! | 2    | Usage error (bad args, unknown column)             |
//! | 3    | IO error (file read/write)                         |
//! | 4    | Decode error (malformed or empty spreadsheet)      |
//! | 5    | Encode error (output serialization failed)         |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// `compare` found schema differences.
/// Like `diff(1)`, exit 1 means "schemas differ."
pub const EXIT_SCHEMA_DIFFS: u8 = 1;

/// Usage error - bad arguments, unknown column, wrong workflow step.
pub const EXIT_USAGE: u8 = 2;

/// IO error - file could not be read or written.
pub const EXIT_IO: u8 = 3;

/// Decode error - input bytes are not a valid spreadsheet, or the sheet
/// has no columns.
pub const EXIT_DECODE: u8 = 4;

/// Encode error - output could not be serialized.
pub const EXIT_ENCODE: u8 = 5;
