// races of a raceplan

use crate::ProgressionRule;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Fields shared by every race regardless of competition format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceCommon {
    pub id: Uuid,
    /// name of the raceclass racing here
    pub raceclass: String,
    /// 1-based position in the raceplan
    pub order: u32,
    pub start_time: NaiveDateTime,
    pub no_of_contestants: u32,
    pub max_no_of_contestants: u32,
    pub event_id: Uuid,
    pub raceplan_id: Uuid,
    /// ids of start entries, sorted by starting position
    pub start_entries: Vec<Uuid>,
    /// timing point name -> race result id
    pub results: HashMap<String, Uuid>,
}

impl RaceCommon {
    pub fn has_capacity(&self) -> bool {
        (self.start_entries.len() as u32) < self.max_no_of_contestants
    }
}

/// A race on the schedule. The serialized form carries the competition
/// format in the `datatype` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "datatype")]
pub enum Race {
    #[serde(rename = "interval_start")]
    IntervalStart(IntervalStartRace),
    #[serde(rename = "individual_sprint")]
    IndividualSprint(IndividualSprintRace),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalStartRace {
    #[serde(flatten)]
    pub common: RaceCommon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualSprintRace {
    #[serde(flatten)]
    pub common: RaceCommon,
    /// Q, S, F for ranked classes; R1, R2 for non-ranked
    pub round: String,
    /// heat letter (A/B/C), empty when the round runs a single letter
    pub index: String,
    /// 1-based heat number within round and letter
    pub heat: u32,
    /// progression out of this heat, copied from the format table
    #[serde(default)]
    pub rule: ProgressionRule,
}

impl Race {
    pub fn common(&self) -> &RaceCommon {
        match self {
            Race::IntervalStart(race) => &race.common,
            Race::IndividualSprint(race) => &race.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut RaceCommon {
        match self {
            Race::IntervalStart(race) => &mut race.common,
            Race::IndividualSprint(race) => &mut race.common,
        }
    }

    pub fn id(&self) -> Uuid {
        self.common().id
    }

    pub fn order(&self) -> u32 {
        self.common().order
    }

    pub fn raceclass(&self) -> &str {
        &self.common().raceclass
    }

    pub fn event_id(&self) -> Uuid {
        self.common().event_id
    }

    /// round name for sprint races; interval-start races have none
    pub fn round(&self) -> Option<&str> {
        match self {
            Race::IntervalStart(_) => None,
            Race::IndividualSprint(race) => Some(&race.round),
        }
    }

    pub fn is_sprint_first_round(&self) -> bool {
        matches!(self.round(), Some("Q") | Some("R1"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprint_race() -> Race {
        Race::IndividualSprint(IndividualSprintRace {
            common: RaceCommon {
                id: Uuid::new_v4(),
                raceclass: "G16".to_string(),
                order: 1,
                start_time: "2021-08-31T09:00:00".parse().unwrap(),
                no_of_contestants: 8,
                max_no_of_contestants: 10,
                event_id: Uuid::new_v4(),
                raceplan_id: Uuid::new_v4(),
                start_entries: vec![],
                results: HashMap::new(),
            },
            round: "Q".to_string(),
            index: "".to_string(),
            heat: 1,
            rule: ProgressionRule::new(),
        })
    }

    #[test]
    fn test_serde_race_carries_datatype_tag() {
        let race = sprint_race();
        let json = serde_json::to_value(&race).unwrap();
        assert_eq!(json["datatype"], "individual_sprint");
        assert_eq!(json["round"], "Q");
        assert_eq!(json["raceclass"], "G16");

        let back: Race = serde_json::from_value(json).unwrap();
        assert_eq!(back, race);
    }

    #[test]
    fn test_capacity_tracks_start_entries() {
        let mut race = sprint_race();
        assert!(race.common().has_capacity());
        race.common_mut().start_entries = (0..10).map(|_| Uuid::new_v4()).collect();
        assert!(!race.common().has_capacity());
    }
}
