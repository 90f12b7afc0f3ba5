//! Input - Control intent snapshot
//!
//! The frontend collapses keyboard and touch state into four boolean
//! intents and sends one snapshot per tick, so the simulation never
//! observes input changing mid-step.

use serde::{Deserialize, Serialize};

/// Player control intents for one simulation step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputSnapshot {
    pub accelerating: bool,
    pub braking: bool,
    pub turning_left: bool,
    pub turning_right: bool,
}

impl InputSnapshot {
    /// Whether any steering intent is active.
    ///
    /// The steering speed penalty keys off this, so holding left and
    /// right together still scrubs speed even though the turns cancel.
    pub fn steering(&self) -> bool {
        self.turning_left || self.turning_right
    }
}
