//! # sitrep-core
//!
//! Core types shared across all sitrep crates:
//! - Entity structs for the five record kinds (sprints, initiatives, epics,
//!   risks, bugs)
//! - The priority enum and sync-state enum
//! - Run diagnostics (non-fatal warnings, enrichment counters)
//! - The assembled [`SituationReport`] and its derived [`Summary`]
//! - Raw issue-tracker rows shared by the parser and the tracker client

pub mod diagnostics;
pub mod entities;
pub mod enums;
pub mod report;
pub mod summary;
pub mod tracker;

pub use diagnostics::{Diagnostics, Warning};
pub use report::{PageMeta, SituationReport};
pub use summary::Summary;
