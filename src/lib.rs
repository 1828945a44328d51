//! GTM container diff library
//!
//! Compares two snapshots of a Google Tag Manager container configuration
//! (a workspace candidate and the live published version) and reports
//! structural differences plus semantic findings. The crate consumes
//! already-fetched raw records; authentication, API transport, and
//! presentation belong to the caller.
//!
//! Typical flow:
//! raw records -> [`snapshot::ContainerSnapshot::from_raw`] (per version)
//! -> [`diff::diff_snapshots`] -> [`diff::Report`] -> [`output`]

pub mod checks;
pub mod diff;
pub mod index;
pub mod normalizer;
pub mod output;
pub mod report;
pub mod snapshot;
pub mod utils;

// Re-export the main types at the crate root
pub use checks::{Finding, Severity};
pub use diff::{diff_snapshots, Report};
pub use normalizer::{Category, Entity};
pub use snapshot::ContainerSnapshot;
