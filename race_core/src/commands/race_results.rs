// race-result use cases

use crate::{Core, CoreError, CoreResult, RaceResult, SpRaceResults, SpRaces};
use tracing::instrument;
use uuid::Uuid;

/// API of race results
impl Core {
    pub async fn get_race_result(&self, id: Uuid) -> CoreResult<RaceResult> {
        self.store
            .get_race_result_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("race result {id}")))
    }

    /// Results of a race, optionally narrowed to one timing point.
    pub async fn get_race_results_for_race(
        &self,
        race_id: Uuid,
        timing_point: Option<&str>,
    ) -> CoreResult<Vec<RaceResult>> {
        match timing_point {
            Some(timing_point) => Ok(self
                .store
                .get_race_result_by_race_id_and_timing_point(race_id, timing_point)
                .await?
                .into_iter()
                .collect()),
            None => Ok(self.store.get_race_results_by_race_id(race_id).await?),
        }
    }

    pub async fn update_race_result(&self, id: Uuid, race_result: &RaceResult) -> CoreResult<()> {
        if self.store.replace_race_result(id, race_result).await? {
            Ok(())
        } else {
            Err(CoreError::NotFound(format!("race result {id}")))
        }
    }

    /// Delete a race result and unhook it from its race. The ranked time
    /// events keep their own life cycle.
    #[instrument(name = "core.race_result.delete", skip(self))]
    pub async fn delete_race_result(&self, id: Uuid) -> CoreResult<()> {
        let result = self.get_race_result(id).await?;
        if let Some(mut race) = self.store.get_race_by_id(result.race_id).await? {
            race.common_mut().results.remove(&result.timing_point);
            self.store.replace_race(race.id(), &race).await?;
        }
        self.store.delete_race_result(id).await?;
        Ok(())
    }
}
