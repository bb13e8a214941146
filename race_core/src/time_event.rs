// timing registrations

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single timing registration from a timing client: one bib passing one
/// timing point. Time events have a life cycle of their own and may exist
/// without belonging to any race result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEvent {
    pub id: Uuid,
    pub event_id: Uuid,
    /// None for registrations captured before races are known
    #[serde(default)]
    pub race_id: Option<Uuid>,
    pub bib: u32,
    /// contestant name as the timing client saw it
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub club: Option<String>,
    /// named capture location, e.g. "Start", "Finish", "Template"
    pub timing_point: String,
    pub registration_time: NaiveTime,
    /// 1-based position in the ranking sequence; 0 until ranked
    #[serde(default)]
    pub rank: u32,
    #[serde(default)]
    pub next_race_id: Option<Uuid>,
    #[serde(default)]
    pub next_race_position: Option<u32>,
    pub status: TimeEventStatus,
    #[serde(default)]
    pub changelog: Vec<ChangelogEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeEventStatus {
    #[serde(rename = "OK")]
    Ok,
    Error,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    pub timestamp: NaiveDateTime,
    pub user_id: String,
    pub comment: String,
}

/// Body of POST /time-events: a draft awaiting classification.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimeEventDraft {
    pub event_id: Uuid,
    #[serde(default)]
    pub race_id: Option<Uuid>,
    pub bib: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub club: Option<String>,
    pub timing_point: String,
    pub registration_time: NaiveTime,
    #[serde(default)]
    pub next_race_id: Option<Uuid>,
    #[serde(default)]
    pub next_race_position: Option<u32>,
}

impl TimeEventDraft {
    /// Lift the draft into a stored time event with the given id and
    /// classification.
    pub fn into_time_event(self, id: Uuid, status: TimeEventStatus) -> TimeEvent {
        TimeEvent {
            id,
            event_id: self.event_id,
            race_id: self.race_id,
            bib: self.bib,
            name: self.name,
            club: self.club,
            timing_point: self.timing_point,
            registration_time: self.registration_time,
            rank: 0,
            next_race_id: self.next_race_id,
            next_race_position: self.next_race_position,
            status,
            changelog: Vec::new(),
        }
    }
}
