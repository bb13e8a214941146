// entities owned by the remote events and competition-format services

use crate::utils::{
    hhmmss,
    validation::{FieldError, ValidationErrors, ValidationResult},
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// a dated competition, as served by the events service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    /// name of event
    pub name: String,
    /// name of the competition format ("Interval Start", "Individual Sprint")
    pub competition_format: String,
    pub date_of_event: NaiveDate,
    pub time_of_event: NaiveTime,
    /// IANA name; schedule times are wall clock in this zone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl Event {
    /// wall-clock start of the first race
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date_of_event.and_time(self.time_of_event)
    }
}

/// an aggregated bracket of one or more ageclasses competing together
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Raceclass {
    pub id: Uuid,
    pub name: String,
    pub ageclasses: Vec<String>,
    pub event_id: Uuid,
    pub no_of_contestants: u32,
    /// false for the youngest classes, which race without a ranking
    #[serde(default = "default_ranking")]
    pub ranking: bool,
    /// ordering bucket; a gap separates groups on the schedule
    #[serde(default)]
    pub group: u32,
    /// position within the group
    #[serde(default)]
    pub order: u32,
}

fn default_ranking() -> bool {
    true
}

impl Raceclass {
    pub fn covers_ageclass(&self, ageclass: &str) -> bool {
        self.ageclasses.iter().any(|a| a == ageclass)
    }
}

/// Raceplan generation needs every raceclass placed on the schedule grid:
/// group and order must be set, and no two raceclasses may share a slot.
pub fn validate_raceclasses(raceclasses: &[Raceclass]) -> ValidationResult<()> {
    let mut errs = ValidationErrors::new();
    let mut seen_slots: Vec<(u32, u32)> = Vec::new();
    for raceclass in raceclasses {
        if raceclass.group == 0 {
            errs.add(
                FieldError::builder()
                    .set_field(format!("raceclass {}: group", raceclass.name))
                    .add_required()
                    .build(),
            );
        }
        if raceclass.order == 0 {
            errs.add(
                FieldError::builder()
                    .set_field(format!("raceclass {}: order", raceclass.name))
                    .add_required()
                    .build(),
            );
        }
        let slot = (raceclass.group, raceclass.order);
        if raceclass.group > 0 && seen_slots.contains(&slot) {
            errs.add(
                FieldError::builder()
                    .set_field(format!("raceclass {}: order", raceclass.name))
                    .add_user_defined_code("duplicate")
                    .add_message(format!(
                        "raceclass {} shares group {} order {} with another raceclass",
                        raceclass.name, raceclass.group, raceclass.order
                    ))
                    .build(),
            );
        }
        seen_slots.push(slot);
    }
    errs.into_result()
}

/// a registered participant, as served by the events service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contestant {
    #[serde(default)]
    pub bib: Option<u32>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub club: String,
    pub ageclass: String,
    pub event_id: Uuid,
}

impl Contestant {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// parameter bundle for one competition format, keyed by format name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "datatype")]
pub enum CompetitionFormat {
    #[serde(rename = "interval_start")]
    IntervalStart(IntervalStartFormat),
    #[serde(rename = "individual_sprint")]
    IndividualSprint(IndividualSprintFormat),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalStartFormat {
    pub name: String,
    /// gap between adjacent start times within a race
    #[serde(with = "hhmmss")]
    pub intervals: TimeDelta,
    #[serde(with = "hhmmss")]
    pub time_between_groups: TimeDelta,
    pub max_no_of_contestants_in_race: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndividualSprintFormat {
    pub name: String,
    #[serde(with = "hhmmss")]
    pub time_between_groups: TimeDelta,
    #[serde(with = "hhmmss")]
    pub time_between_rounds: TimeDelta,
    #[serde(with = "hhmmss")]
    pub time_between_heats: TimeDelta,
    pub max_no_of_contestants_in_raceclass: u32,
    pub max_no_of_contestants_in_race: u32,
    /// round tables for classes raced with a ranking (Q/S/F)
    #[serde(default)]
    pub race_config_ranked: Option<Vec<RaceConfig>>,
    /// round tables for classes raced without one (R1/R2)
    #[serde(default)]
    pub race_config_non_ranked: Option<Vec<RaceConfig>>,
}

impl IndividualSprintFormat {
    /// The applicable template for a raceclass: smallest threshold in the
    /// matching table that still fits its number of contestants.
    pub fn template_for(&self, raceclass: &Raceclass) -> Option<&RaceConfig> {
        let table = if raceclass.ranking {
            self.race_config_ranked.as_deref()
        } else {
            self.race_config_non_ranked.as_deref()
        };
        if raceclass.no_of_contestants > self.max_no_of_contestants_in_raceclass {
            return None;
        }
        table?
            .iter()
            .filter(|config| config.max_no_of_contestants >= raceclass.no_of_contestants)
            .min_by_key(|config| config.max_no_of_contestants)
    }
}

/// One row of a sprint round table, loaded verbatim from the
/// competition-format service and interpreted by the planner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceConfig {
    /// threshold this row applies up to
    pub max_no_of_contestants: u32,
    /// rounds in running order, e.g. ["Q", "S", "F"] or ["R1", "R2"]
    pub rounds: Vec<String>,
    /// round -> heat letter -> number of heats
    pub no_of_heats: BTreeMap<String, BTreeMap<String, u32>>,
    /// round -> heat letter -> progression into later rounds
    #[serde(default)]
    pub from_to: BTreeMap<String, BTreeMap<String, ProgressionRule>>,
}

/// next round -> next heat letter -> quota out of one upstream heat
pub type ProgressionRule = BTreeMap<String, BTreeMap<String, HeatQuota>>;

/// How many contestants one heat passes on: a fixed count, all of them,
/// or everyone not already passed on by a numeric quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeatQuota {
    Count(u32),
    Keyword(QuotaKeyword),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuotaKeyword {
    #[serde(rename = "ALL")]
    All,
    #[serde(rename = "REST")]
    Rest,
}
