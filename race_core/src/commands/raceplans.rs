// raceplan and race use cases

use crate::{
    CompetitionFormat, Core, CoreError, CoreResult, Race, Raceplan, SpRaceResults, SpRaceplans,
    SpRaces, plan_individual_sprint, plan_interval_start, validate_raceclasses,
};
use tracing::{info, instrument};
use uuid::Uuid;

/// API of raceplans and their races
impl Core {
    /// Derive the raceplan of an event from its raceclasses and
    /// competition-format parameters and persist it. Refuses to run twice
    /// for the same event.
    #[instrument(name = "core.raceplan.generate", skip(self, token))]
    pub async fn generate_raceplan_for_event(
        &self,
        token: &str,
        event_id: Uuid,
    ) -> CoreResult<Uuid> {
        let event = self.events.get_event(token, event_id).await?;
        let format = self
            .events
            .get_competition_format(token, event_id, &event.competition_format)
            .await?;
        let raceclasses = self.events.get_raceclasses(token, event_id).await?;
        validate_raceclasses(&raceclasses).map_err(|errs| {
            CoreError::BadRequest(format!("raceclasses are not ready for planning: {errs}"))
        })?;

        if self
            .store
            .get_raceplan_by_event_id(event_id)
            .await?
            .is_some()
        {
            return Err(CoreError::AlreadyExists(format!(
                "event {event_id} already has a raceplan"
            )));
        }

        let (mut raceplan, races) = match &format {
            CompetitionFormat::IntervalStart(interval) => {
                plan_interval_start(&event, interval, &raceclasses)?
            }
            CompetitionFormat::IndividualSprint(sprint) => {
                plan_individual_sprint(&event, sprint, &raceclasses)?
            }
        };

        // parent entity first, children next, back-references last
        let race_ids = std::mem::take(&mut raceplan.races);
        let raceplan_id = self.store.insert_raceplan(&raceplan).await?;
        for race in &races {
            self.store.insert_race(race).await?;
        }
        raceplan.races = race_ids;
        self.store.replace_raceplan(raceplan_id, &raceplan).await?;
        info!(no_of_races = races.len(), "raceplan_generated");
        Ok(raceplan_id)
    }

    pub async fn get_raceplan(&self, id: Uuid) -> CoreResult<Raceplan> {
        self.store
            .get_raceplan_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("raceplan {id}")))
    }

    pub async fn list_raceplans(&self, event_id: Option<Uuid>) -> CoreResult<Vec<Raceplan>> {
        match event_id {
            Some(event_id) => Ok(self
                .store
                .get_raceplan_by_event_id(event_id)
                .await?
                .into_iter()
                .collect()),
            None => Ok(self.store.get_all_raceplans().await?),
        }
    }

    pub async fn update_raceplan(&self, id: Uuid, raceplan: &Raceplan) -> CoreResult<()> {
        if self.store.replace_raceplan(id, raceplan).await? {
            Ok(())
        } else {
            Err(CoreError::NotFound(format!("raceplan {id}")))
        }
    }

    /// Delete a raceplan and cascade to every race it owns.
    #[instrument(name = "core.raceplan.delete", skip(self))]
    pub async fn delete_raceplan(&self, id: Uuid) -> CoreResult<()> {
        let raceplan = self.get_raceplan(id).await?;
        // children go before the parent
        let races = self.store.get_races_by_raceplan_id(raceplan.id).await?;
        for race in races {
            self.delete_race(race.id()).await?;
        }
        self.store.delete_raceplan(id).await?;
        Ok(())
    }

    pub async fn get_race(&self, id: Uuid) -> CoreResult<Race> {
        self.store
            .get_race_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("race {id}")))
    }

    /// Races of an event (or all races), in schedule order.
    pub async fn list_races(&self, event_id: Option<Uuid>) -> CoreResult<Vec<Race>> {
        let mut races = match event_id {
            Some(event_id) => self.store.get_races_by_event_id(event_id).await?,
            None => self.store.get_all_races().await?,
        };
        races.sort_by_key(Race::order);
        Ok(races)
    }

    pub async fn update_race(&self, id: Uuid, race: &Race) -> CoreResult<()> {
        if self.store.replace_race(id, race).await? {
            Ok(())
        } else {
            Err(CoreError::NotFound(format!("race {id}")))
        }
    }

    /// Delete a race and the race results it owns, and drop the race from
    /// its raceplan.
    #[instrument(name = "core.race.delete", skip(self))]
    pub async fn delete_race(&self, id: Uuid) -> CoreResult<()> {
        let race = self.get_race(id).await?;
        for result in self.store.get_race_results_by_race_id(id).await? {
            self.store.delete_race_result(result.id).await?;
        }
        if let Some(mut raceplan) = self
            .store
            .get_raceplan_by_id(race.common().raceplan_id)
            .await?
        {
            raceplan.races.retain(|race_id| *race_id != id);
            self.store.replace_raceplan(raceplan.id, &raceplan).await?;
        }
        self.store.delete_race(id).await?;
        Ok(())
    }
}
