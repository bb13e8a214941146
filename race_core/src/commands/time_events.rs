// time-event ingestion and the ranking it drives

use crate::{
    ChangelogEntry, Core, CoreError, CoreResult, Race, RaceResult, SpRaceResults, SpRaces,
    SpTimeEvents, TimeEvent, TimeEventDraft, TimeEventStatus,
    utils::validation::FieldError,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Control registrations with this timing point are administrative and
/// bypass the start-entry check and the ranking.
const TEMPLATE_TIMING_POINT: &str = "Template";

/// API of time events and the race results they rank
impl Core {
    /// Validate, classify and persist one timing registration, then update
    /// the targeted race result. Returns the persisted time event; a
    /// rejected registration comes back with status `Error` and the reason
    /// in its changelog.
    #[instrument(
        name = "core.time_event.create",
        skip(self, draft),
        fields(bib = draft.bib, timing_point = %draft.timing_point)
    )]
    pub async fn create_time_event(&self, draft: TimeEventDraft) -> CoreResult<TimeEvent> {
        if draft.bib == 0 {
            return Err(CoreError::Validation(
                FieldError::builder()
                    .set_field("bib")
                    .add_required()
                    .add_message("bib must be a positive contestant number")
                    .build()
                    .into(),
            ));
        }
        if draft.timing_point.is_empty() {
            return Err(CoreError::Validation(
                FieldError::builder()
                    .set_field("timing_point")
                    .add_required()
                    .build()
                    .into(),
            ));
        }

        // a second OK registration for the same passing is a duplicate
        let prior = self
            .store
            .get_time_events_by_event_id(draft.event_id)
            .await?;
        let duplicate = prior.iter().any(|event| {
            event.status == TimeEventStatus::Ok
                && event.bib == draft.bib
                && event.race_id == draft.race_id
                && event.timing_point == draft.timing_point
        });
        if duplicate {
            return self
                .reject_time_event(draft, "duplicate of an already registered time event")
                .await;
        }

        let race = match draft.race_id {
            Some(race_id) => match self.store.get_race_by_id(race_id).await? {
                Some(race) => Some(race),
                None => {
                    return self
                        .reject_time_event(draft, "race does not exist")
                        .await;
                }
            },
            None => None,
        };

        let is_template = draft.timing_point == TEMPLATE_TIMING_POINT;
        if let Some(race) = &race
            && !is_template
        {
            let entries = self.get_start_entries_for_race(race.id()).await?;
            if !entries.iter().any(|entry| entry.bib == draft.bib) {
                return self
                    .reject_time_event(draft, "bib has no start entry in the race")
                    .await;
            }
        }

        let mut time_event = draft.into_time_event(Uuid::new_v4(), TimeEventStatus::Ok);
        time_event.changelog.push(changelog_entry("accepted"));
        self.store.insert_time_event(&time_event).await?;

        if let Some(race) = race
            && !is_template
        {
            self.rank_time_event(race, &time_event).await?;
            // pick up the rank the sequence gave it
            time_event = self
                .store
                .get_time_event_by_id(time_event.id)
                .await?
                .ok_or_else(|| {
                    CoreError::Inconsistent(format!(
                        "time event {} vanished while being ranked",
                        time_event.id
                    ))
                })?;
        }
        info!(time_event_id = %time_event.id, "time_event_registered");
        Ok(time_event)
    }

    /// Persist a refused registration for the audit trail and hand it back
    /// with status `Error`.
    async fn reject_time_event(
        &self,
        draft: TimeEventDraft,
        reason: &str,
    ) -> CoreResult<TimeEvent> {
        warn!(reason, "time_event_rejected");
        let mut time_event = draft.into_time_event(Uuid::new_v4(), TimeEventStatus::Error);
        time_event.changelog.push(changelog_entry(reason));
        self.store.insert_time_event(&time_event).await?;
        Ok(time_event)
    }

    /// Append an OK time event to the race result of its (race, timing
    /// point) pair, creating the result on first use. First across the
    /// line wins; earlier entries keep their rank.
    async fn rank_time_event(&self, mut race: Race, time_event: &TimeEvent) -> CoreResult<()> {
        let race_id = race.id();
        let timing_point = time_event.timing_point.clone();
        let mut result = match self
            .store
            .get_race_result_by_race_id_and_timing_point(race_id, &timing_point)
            .await?
        {
            Some(result) => result,
            None => {
                let result = RaceResult::new(race_id, &timing_point);
                self.store.insert_race_result(&result).await?;
                race.common_mut()
                    .results
                    .insert(timing_point.clone(), result.id);
                self.store.replace_race(race_id, &race).await?;
                result
            }
        };
        result.ranking_sequence.push(time_event.id);
        result.no_of_contestants = result.ranking_sequence.len() as u32;
        self.store.replace_race_result(result.id, &result).await?;
        self.refresh_ranks(&result).await
    }

    /// Rewrite each ranked time event's rank as its 1-based position in
    /// the sequence. Only events whose rank actually changed are written.
    pub(crate) async fn refresh_ranks(&self, result: &RaceResult) -> CoreResult<()> {
        for (position, time_event_id) in result.ranking_sequence.iter().enumerate() {
            let mut time_event = self
                .store
                .get_time_event_by_id(*time_event_id)
                .await?
                .ok_or_else(|| {
                    CoreError::Inconsistent(format!(
                        "race result {} references missing time event {time_event_id}",
                        result.id
                    ))
                })?;
            let rank = position as u32 + 1;
            if time_event.rank != rank {
                time_event.rank = rank;
                self.store
                    .replace_time_event(time_event.id, &time_event)
                    .await?;
            }
        }
        Ok(())
    }

    pub async fn get_time_event(&self, id: Uuid) -> CoreResult<TimeEvent> {
        self.store
            .get_time_event_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("time event {id}")))
    }

    pub async fn list_time_events(
        &self,
        event_id: Option<Uuid>,
        timing_point: Option<&str>,
        race_id: Option<Uuid>,
    ) -> CoreResult<Vec<TimeEvent>> {
        let mut events = match (race_id, event_id) {
            (Some(race_id), _) => self.store.get_time_events_by_race_id(race_id).await?,
            (None, Some(event_id)) => self.store.get_time_events_by_event_id(event_id).await?,
            (None, None) => self.store.get_all_time_events().await?,
        };
        if let Some(event_id) = event_id {
            events.retain(|event| event.event_id == event_id);
        }
        if let Some(timing_point) = timing_point {
            events.retain(|event| event.timing_point == timing_point);
        }
        Ok(events)
    }

    pub async fn update_time_event(&self, id: Uuid, time_event: &TimeEvent) -> CoreResult<()> {
        if self.store.replace_time_event(id, time_event).await? {
            Ok(())
        } else {
            Err(CoreError::NotFound(format!("time event {id}")))
        }
    }

    /// Delete a time event, pulling it out of the race result that ranks
    /// it. An emptied race result is deleted and unhooked from its race.
    #[instrument(name = "core.time_event.delete", skip(self))]
    pub async fn delete_time_event(&self, id: Uuid) -> CoreResult<()> {
        let time_event = self.get_time_event(id).await?;
        if let Some(race_id) = time_event.race_id
            && let Some(mut result) = self
                .store
                .get_race_result_by_race_id_and_timing_point(race_id, &time_event.timing_point)
                .await?
            && result.ranking_sequence.contains(&id)
        {
            result.ranking_sequence.retain(|ranked| *ranked != id);
            result.no_of_contestants = result.ranking_sequence.len() as u32;
            if result.ranking_sequence.is_empty() {
                self.store.delete_race_result(result.id).await?;
                if let Some(mut race) = self.store.get_race_by_id(race_id).await? {
                    race.common_mut().results.remove(&time_event.timing_point);
                    self.store.replace_race(race_id, &race).await?;
                }
            } else {
                self.store.replace_race_result(result.id, &result).await?;
                self.refresh_ranks(&result).await?;
            }
        }
        self.store.delete_time_event(id).await?;
        Ok(())
    }
}

fn changelog_entry(comment: &str) -> ChangelogEntry {
    ChangelogEntry {
        timestamp: chrono::Utc::now().naive_utc(),
        user_id: "race-service".to_string(),
        comment: comment.to_string(),
    }
}
