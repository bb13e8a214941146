// document store port

use crate::{Race, RaceResult, Raceplan, StartEntry, Startlist, TimeEvent};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// store port trait, one subtrait per collection
pub trait StorePort:
    SpRaceplans + SpRaces + SpStartlists + SpStartEntries + SpTimeEvents + SpRaceResults
{
}

/// store port trait for the raceplans collection
#[async_trait]
pub trait SpRaceplans: Send + Sync {
    async fn insert_raceplan(&self, raceplan: &Raceplan) -> StoreResult<Uuid>;
    async fn get_raceplan_by_id(&self, id: Uuid) -> StoreResult<Option<Raceplan>>;
    async fn get_raceplan_by_event_id(&self, event_id: Uuid) -> StoreResult<Option<Raceplan>>;
    async fn get_all_raceplans(&self) -> StoreResult<Vec<Raceplan>>;
    /// replace on an unknown id is a no-op returning false
    async fn replace_raceplan(&self, id: Uuid, raceplan: &Raceplan) -> StoreResult<bool>;
    async fn delete_raceplan(&self, id: Uuid) -> StoreResult<bool>;
}

/// store port trait for the races collection
#[async_trait]
pub trait SpRaces: Send + Sync {
    async fn insert_race(&self, race: &Race) -> StoreResult<Uuid>;
    async fn get_race_by_id(&self, id: Uuid) -> StoreResult<Option<Race>>;
    async fn get_all_races(&self) -> StoreResult<Vec<Race>>;
    async fn get_races_by_event_id(&self, event_id: Uuid) -> StoreResult<Vec<Race>>;
    async fn get_races_by_raceplan_id(&self, raceplan_id: Uuid) -> StoreResult<Vec<Race>>;
    async fn replace_race(&self, id: Uuid, race: &Race) -> StoreResult<bool>;
    async fn delete_race(&self, id: Uuid) -> StoreResult<bool>;
}

/// store port trait for the startlists collection
#[async_trait]
pub trait SpStartlists: Send + Sync {
    async fn insert_startlist(&self, startlist: &Startlist) -> StoreResult<Uuid>;
    async fn get_startlist_by_id(&self, id: Uuid) -> StoreResult<Option<Startlist>>;
    async fn get_startlist_by_event_id(&self, event_id: Uuid) -> StoreResult<Option<Startlist>>;
    async fn get_all_startlists(&self) -> StoreResult<Vec<Startlist>>;
    async fn replace_startlist(&self, id: Uuid, startlist: &Startlist) -> StoreResult<bool>;
    async fn delete_startlist(&self, id: Uuid) -> StoreResult<bool>;
}

/// store port trait for the start_entries collection
#[async_trait]
pub trait SpStartEntries: Send + Sync {
    async fn insert_start_entry(&self, start_entry: &StartEntry) -> StoreResult<Uuid>;
    async fn get_start_entry_by_id(&self, id: Uuid) -> StoreResult<Option<StartEntry>>;
    async fn get_start_entries_by_startlist_id(
        &self,
        startlist_id: Uuid,
    ) -> StoreResult<Vec<StartEntry>>;
    async fn replace_start_entry(&self, id: Uuid, start_entry: &StartEntry) -> StoreResult<bool>;
    async fn delete_start_entry(&self, id: Uuid) -> StoreResult<bool>;
}

/// store port trait for the time_events collection
#[async_trait]
pub trait SpTimeEvents: Send + Sync {
    async fn insert_time_event(&self, time_event: &TimeEvent) -> StoreResult<Uuid>;
    async fn get_time_event_by_id(&self, id: Uuid) -> StoreResult<Option<TimeEvent>>;
    async fn get_all_time_events(&self) -> StoreResult<Vec<TimeEvent>>;
    async fn get_time_events_by_event_id(&self, event_id: Uuid) -> StoreResult<Vec<TimeEvent>>;
    async fn get_time_events_by_race_id(&self, race_id: Uuid) -> StoreResult<Vec<TimeEvent>>;
    async fn replace_time_event(&self, id: Uuid, time_event: &TimeEvent) -> StoreResult<bool>;
    async fn delete_time_event(&self, id: Uuid) -> StoreResult<bool>;
}

/// store port trait for the race_results collection
#[async_trait]
pub trait SpRaceResults: Send + Sync {
    async fn insert_race_result(&self, race_result: &RaceResult) -> StoreResult<Uuid>;
    async fn get_race_result_by_id(&self, id: Uuid) -> StoreResult<Option<RaceResult>>;
    async fn get_race_results_by_race_id(&self, race_id: Uuid) -> StoreResult<Vec<RaceResult>>;
    async fn get_race_result_by_race_id_and_timing_point(
        &self,
        race_id: Uuid,
        timing_point: &str,
    ) -> StoreResult<Option<RaceResult>>;
    async fn replace_race_result(&self, id: Uuid, race_result: &RaceResult) -> StoreResult<bool>;
    async fn delete_race_result(&self, id: Uuid) -> StoreResult<bool>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// ID does not exist
    #[error("document not found")]
    NotFound,

    // connection, backend, or serialization errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
