// implementation of the start_entries collection

use crate::MemStore;
use async_trait::async_trait;
use race_core::{SpStartEntries, StartEntry, StoreResult};
use tracing::instrument;
use uuid::Uuid;

#[async_trait]
impl SpStartEntries for MemStore {
    #[instrument(name = "db.start_entries.insert", skip(self, start_entry), fields(id = %start_entry.id))]
    async fn insert_start_entry(&self, start_entry: &StartEntry) -> StoreResult<Uuid> {
        self.start_entries
            .insert(start_entry.id, start_entry.clone());
        Ok(start_entry.id)
    }

    async fn get_start_entry_by_id(&self, id: Uuid) -> StoreResult<Option<StartEntry>> {
        Ok(self.start_entries.get(id))
    }

    async fn get_start_entries_by_startlist_id(
        &self,
        startlist_id: Uuid,
    ) -> StoreResult<Vec<StartEntry>> {
        Ok(self
            .start_entries
            .find_where(|entry| entry.startlist_id == startlist_id))
    }

    #[instrument(name = "db.start_entries.replace", skip(self, start_entry), fields(id = %id))]
    async fn replace_start_entry(&self, id: Uuid, start_entry: &StartEntry) -> StoreResult<bool> {
        Ok(self.start_entries.replace(id, start_entry.clone()))
    }

    #[instrument(name = "db.start_entries.delete", skip(self), fields(id = %id))]
    async fn delete_start_entry(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.start_entries.delete(id))
    }
}
