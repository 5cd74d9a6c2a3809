//! `shears-recon` — header reconciliation engine.
//!
//! Pure engine crate: receives header lists and tables, returns
//! reconciliation sets and column remaps. No CLI or IO dependencies.

pub mod error;
pub mod model;
pub mod reconcile;
pub mod workflow;

pub use error::ReconError;
pub use model::{Reconciliation, Remap};
pub use reconcile::{reconcile, remap_indices};
pub use workflow::{Session, Step};
