mod head_markers;
mod jobs;
mod mitigation_effects;
mod zones;

pub use head_markers::{HEAD_MARKER_NAMES, head_marker_name};
pub use jobs::{JOB_NAMES, job_name};
pub use mitigation_effects::*;
pub use zones::{NON_COMBAT_ZONES, PLAYER_PET_NAMES, is_combat_zone, is_player_pet};
