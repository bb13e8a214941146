// implementation of the race_results collection

use crate::MemStore;
use async_trait::async_trait;
use race_core::{RaceResult, SpRaceResults, StoreResult};
use tracing::instrument;
use uuid::Uuid;

#[async_trait]
impl SpRaceResults for MemStore {
    #[instrument(name = "db.race_results.insert", skip(self, race_result), fields(id = %race_result.id))]
    async fn insert_race_result(&self, race_result: &RaceResult) -> StoreResult<Uuid> {
        self.race_results
            .insert(race_result.id, race_result.clone());
        Ok(race_result.id)
    }

    async fn get_race_result_by_id(&self, id: Uuid) -> StoreResult<Option<RaceResult>> {
        Ok(self.race_results.get(id))
    }

    async fn get_race_results_by_race_id(&self, race_id: Uuid) -> StoreResult<Vec<RaceResult>> {
        Ok(self
            .race_results
            .find_where(|result| result.race_id == race_id))
    }

    async fn get_race_result_by_race_id_and_timing_point(
        &self,
        race_id: Uuid,
        timing_point: &str,
    ) -> StoreResult<Option<RaceResult>> {
        Ok(self
            .race_results
            .find_where(|result| result.race_id == race_id && result.timing_point == timing_point)
            .into_iter()
            .next())
    }

    #[instrument(name = "db.race_results.replace", skip(self, race_result), fields(id = %id))]
    async fn replace_race_result(&self, id: Uuid, race_result: &RaceResult) -> StoreResult<bool> {
        Ok(self.race_results.replace(id, race_result.clone()))
    }

    #[instrument(name = "db.race_results.delete", skip(self), fields(id = %id))]
    async fn delete_race_result(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.race_results.delete(id))
    }
}
