// implementation of the races collection

use crate::MemStore;
use async_trait::async_trait;
use race_core::{Race, SpRaces, StoreResult};
use tracing::{debug, instrument};
use uuid::Uuid;

#[async_trait]
impl SpRaces for MemStore {
    #[instrument(name = "db.races.insert", skip(self, race), fields(id = %race.id()))]
    async fn insert_race(&self, race: &Race) -> StoreResult<Uuid> {
        self.races.insert(race.id(), race.clone());
        Ok(race.id())
    }

    #[instrument(name = "db.races.get", skip(self), fields(id = %id))]
    async fn get_race_by_id(&self, id: Uuid) -> StoreResult<Option<Race>> {
        let row = self.races.get(id);
        debug!(found = row.is_some(), "lookup");
        Ok(row)
    }

    async fn get_all_races(&self) -> StoreResult<Vec<Race>> {
        Ok(self.races.all())
    }

    async fn get_races_by_event_id(&self, event_id: Uuid) -> StoreResult<Vec<Race>> {
        Ok(self.races.find_where(|race| race.event_id() == event_id))
    }

    async fn get_races_by_raceplan_id(&self, raceplan_id: Uuid) -> StoreResult<Vec<Race>> {
        Ok(self
            .races
            .find_where(|race| race.common().raceplan_id == raceplan_id))
    }

    #[instrument(name = "db.races.replace", skip(self, race), fields(id = %id))]
    async fn replace_race(&self, id: Uuid, race: &Race) -> StoreResult<bool> {
        Ok(self.races.replace(id, race.clone()))
    }

    #[instrument(name = "db.races.delete", skip(self), fields(id = %id))]
    async fn delete_race(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.races.delete(id))
    }
}
