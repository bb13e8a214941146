// raceplans and their generation

mod individual_sprint;
mod interval_start;

pub use individual_sprint::plan_individual_sprint;
pub use interval_start::plan_interval_start;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The totally-ordered, time-stamped list of races of one event.
/// Exactly one raceplan per event; generation refuses to run twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Raceplan {
    pub id: Uuid,
    pub event_id: Uuid,
    /// contestants counted once each, summed over the raceclasses planned
    pub no_of_contestants: u32,
    /// ids of every race in this plan, in schedule order
    pub races: Vec<Uuid>,
}
