//! Target platform predicate.

use crate::models::Id;

/// PlayStation 4.
pub const PLAYSTATION_4: Id = 48;
/// PlayStation VR.
pub const PLAYSTATION_VR: Id = 165;

/// Returns true when `id` is one of the platforms descriptions are produced for.
pub fn is_target_platform(id: Id) -> bool {
    matches!(id, PLAYSTATION_4 | PLAYSTATION_VR)
}
