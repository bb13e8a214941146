// ranked results per race and timing point

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The ordered ranking for one (race, timing point) pair. The sequence
/// holds time-event ids in rank order; insertion order is authoritative
/// and stable under later insertions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    pub id: Uuid,
    pub race_id: Uuid,
    pub timing_point: String,
    pub no_of_contestants: u32,
    pub ranking_sequence: Vec<Uuid>,
}

impl RaceResult {
    pub fn new(race_id: Uuid, timing_point: impl Into<String>) -> Self {
        RaceResult {
            id: Uuid::new_v4(),
            race_id,
            timing_point: timing_point.into(),
            no_of_contestants: 0,
            ranking_sequence: Vec::new(),
        }
    }
}
