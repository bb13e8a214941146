// startlist and its start entries

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// All start entries of one event. Exactly one per event; generation
/// refuses to run twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Startlist {
    pub id: Uuid,
    pub event_id: Uuid,
    pub no_of_contestants: u32,
    /// ids of every start entry in this startlist
    pub start_entries: Vec<Uuid>,
}

/// One contestant's slot at the start of one race.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartEntry {
    pub id: Uuid,
    pub startlist_id: Uuid,
    pub race_id: Uuid,
    pub bib: u32,
    pub name: String,
    pub club: String,
    pub scheduled_start_time: NaiveDateTime,
    /// 1-based slot at the start; contiguous within a race
    pub starting_position: u32,
}

/// Body of POST /races/{id}/start-entries.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StartEntryDraft {
    pub startlist_id: Uuid,
    pub race_id: Uuid,
    pub bib: u32,
    pub name: String,
    #[serde(default)]
    pub club: String,
    pub scheduled_start_time: NaiveDateTime,
    pub starting_position: u32,
}

impl StartEntryDraft {
    pub fn into_start_entry(self, id: Uuid) -> StartEntry {
        StartEntry {
            id,
            startlist_id: self.startlist_id,
            race_id: self.race_id,
            bib: self.bib,
            name: self.name,
            club: self.club,
            scheduled_start_time: self.scheduled_start_time,
            starting_position: self.starting_position,
        }
    }
}
