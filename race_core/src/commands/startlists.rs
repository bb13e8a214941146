// startlist use cases

use crate::{
    Core, CoreError, CoreResult, SpRaceplans, SpRaces, SpStartEntries, SpStartlists, Startlist,
    generate_startlist,
};
use tracing::{info, instrument};
use uuid::Uuid;

/// API of startlists
impl Core {
    /// Assign every contestant of an event to a race and persist the
    /// startlist. Requires a raceplan and refuses to run twice.
    #[instrument(name = "core.startlist.generate", skip(self, token))]
    pub async fn generate_startlist_for_event(
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
        let contestants = self.events.get_contestants(token, event_id).await?;

        if self
            .store
            .get_startlist_by_event_id(event_id)
            .await?
            .is_some()
        {
            return Err(CoreError::AlreadyExists(format!(
                "event {event_id} already has a startlist"
            )));
        }
        let raceplan = self
            .store
            .get_raceplan_by_event_id(event_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("no raceplan for event {event_id}")))?;
        let races = self.store.get_races_by_raceplan_id(raceplan.id).await?;

        let (mut startlist, entries, updated_races) = generate_startlist(
            &event,
            &format,
            &raceclasses,
            &contestants,
            &raceplan,
            &races,
        )?;

        // parent entity first, children next, back-references last
        let entry_ids = std::mem::take(&mut startlist.start_entries);
        let startlist_id = self.store.insert_startlist(&startlist).await?;
        for entry in &entries {
            self.store.insert_start_entry(entry).await?;
        }
        startlist.start_entries = entry_ids;
        self.store
            .replace_startlist(startlist_id, &startlist)
            .await?;
        for race in &updated_races {
            self.store.replace_race(race.id(), race).await?;
        }
        info!(no_of_contestants = startlist.no_of_contestants, "startlist_generated");
        Ok(startlist_id)
    }

    pub async fn get_startlist(&self, id: Uuid) -> CoreResult<Startlist> {
        self.store
            .get_startlist_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("startlist {id}")))
    }

    pub async fn list_startlists(&self, event_id: Option<Uuid>) -> CoreResult<Vec<Startlist>> {
        match event_id {
            Some(event_id) => Ok(self
                .store
                .get_startlist_by_event_id(event_id)
                .await?
                .into_iter()
                .collect()),
            None => Ok(self.store.get_all_startlists().await?),
        }
    }

    /// Delete a startlist, its start entries, and the references every
    /// affected race keeps to them.
    #[instrument(name = "core.startlist.delete", skip(self))]
    pub async fn delete_startlist(&self, id: Uuid) -> CoreResult<()> {
        let startlist = self.get_startlist(id).await?;
        let entries = self.store.get_start_entries_by_startlist_id(id).await?;

        // back-references first: empty the affected races
        let mut race_ids: Vec<Uuid> = entries.iter().map(|entry| entry.race_id).collect();
        race_ids.sort_unstable();
        race_ids.dedup();
        for race_id in race_ids {
            if let Some(mut race) = self.store.get_race_by_id(race_id).await? {
                race.common_mut().start_entries.clear();
                self.store.replace_race(race_id, &race).await?;
            }
        }
        for entry in &entries {
            self.store.delete_start_entry(entry.id).await?;
        }
        self.store.delete_startlist(startlist.id).await?;
        Ok(())
    }
}
