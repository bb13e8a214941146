// start-entry use cases

use crate::{
    Core, CoreError, CoreResult, SpRaces, SpStartEntries, SpStartlists, StartEntry, StartEntryDraft,
};
use tracing::instrument;
use uuid::Uuid;

/// API of start entries
impl Core {
    /// Start entries of a race in starting-position order.
    pub async fn get_start_entries_for_race(&self, race_id: Uuid) -> CoreResult<Vec<StartEntry>> {
        let race = self.get_race(race_id).await?;
        let mut entries = Vec::with_capacity(race.common().start_entries.len());
        for entry_id in &race.common().start_entries {
            let entry = self
                .store
                .get_start_entry_by_id(*entry_id)
                .await?
                .ok_or_else(|| {
                    CoreError::Inconsistent(format!(
                        "race {race_id} references missing start entry {entry_id}"
                    ))
                })?;
            entries.push(entry);
        }
        entries.sort_by_key(|entry| entry.starting_position);
        Ok(entries)
    }

    /// Add one start entry to a race, keeping race and startlist in step.
    #[instrument(name = "core.start_entry.add", skip(self, draft), fields(bib = draft.bib))]
    pub async fn add_start_entry(&self, race_id: Uuid, draft: StartEntryDraft) -> CoreResult<Uuid> {
        if draft.race_id != race_id {
            return Err(CoreError::BadRequest(
                "race_id in body does not match the race in the path".into(),
            ));
        }
        let mut race = self.get_race(race_id).await?;
        if !race.common().has_capacity() {
            return Err(CoreError::BadRequest(format!(
                "race {} is already at its maximum of {} contestants",
                race.order(),
                race.common().max_no_of_contestants
            )));
        }
        let mut entries = self.get_start_entries_for_race(race_id).await?;
        if entries.iter().any(|entry| entry.bib == draft.bib) {
            return Err(CoreError::AlreadyExists(format!(
                "bib {} already has a start entry in race {}",
                draft.bib,
                race.order()
            )));
        }
        if entries
            .iter()
            .any(|entry| entry.starting_position == draft.starting_position)
        {
            return Err(CoreError::AlreadyExists(format!(
                "starting position {} is already taken in race {}",
                draft.starting_position,
                race.order()
            )));
        }

        let entry = draft.into_start_entry(Uuid::new_v4());
        self.store.insert_start_entry(&entry).await?;

        entries.push(entry.clone());
        entries.sort_by_key(|entry| entry.starting_position);
        race.common_mut().start_entries = entries.iter().map(|entry| entry.id).collect();
        race.common_mut().no_of_contestants = entries.len() as u32;
        self.store.replace_race(race_id, &race).await?;

        if let Some(mut startlist) = self.store.get_startlist_by_id(entry.startlist_id).await? {
            startlist.start_entries.push(entry.id);
            startlist.no_of_contestants += 1;
            self.store
                .replace_startlist(startlist.id, &startlist)
                .await?;
        }
        Ok(entry.id)
    }

    /// Remove one start entry, pulling its id from the race and the
    /// startlist before the entry itself goes.
    #[instrument(name = "core.start_entry.remove", skip(self))]
    pub async fn remove_start_entry(&self, race_id: Uuid, start_entry_id: Uuid) -> CoreResult<()> {
        let entry = self
            .store
            .get_start_entry_by_id(start_entry_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("start entry {start_entry_id}")))?;
        let mut race = self.get_race(race_id).await?;

        let common = race.common_mut();
        common.start_entries.retain(|id| *id != start_entry_id);
        common.no_of_contestants = common.start_entries.len() as u32;
        self.store.replace_race(race_id, &race).await?;

        if let Some(mut startlist) = self.store.get_startlist_by_id(entry.startlist_id).await? {
            startlist.start_entries.retain(|id| *id != start_entry_id);
            startlist.no_of_contestants = startlist.no_of_contestants.saturating_sub(1);
            self.store
                .replace_startlist(startlist.id, &startlist)
                .await?;
        }
        self.store.delete_start_entry(start_entry_id).await?;
        Ok(())
    }
}
