//! Access to compiled contract artifacts.
pub mod artifacts;

pub use artifacts::{Artifact, Artifacts};
