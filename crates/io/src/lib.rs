// Spreadsheet byte-stream decode/encode

pub mod csv;
pub mod error;
pub mod xlsx;

pub use error::DecodeError;
