//! `shears-table` — core table model.
//!
//! Pure data crate: ordered headers plus positionally aligned rows,
//! column-letter naming, and projection. No IO dependencies.

pub mod header;
pub mod selection;
pub mod table;

pub use selection::ColumnSelection;
pub use table::{Table, TableError};
