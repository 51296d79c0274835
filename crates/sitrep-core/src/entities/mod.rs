//! Entity structs for the five record kinds extracted from a situation page.
//!
//! `external_key` is identity for every tracked entity. Sprints are identified
//! by their number. All structs derive `Serialize`, `Deserialize`, and
//! `JsonSchema` so the assembled report can be persisted and validated.

mod bug;
mod epic;
mod initiative;
mod risk;
mod sprint;

pub use bug::Bug;
pub use epic::Epic;
pub use initiative::Initiative;
pub use risk::Risk;
pub use sprint::Sprint;

/// Tracker URL for an issue key: `<base>/browse/<key>`.
#[must_use]
pub fn browse_url(base_url: &str, key: &str) -> String {
    format!("{}/browse/{key}", base_url.trim_end_matches('/'))
}
