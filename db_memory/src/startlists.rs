// implementation of the startlists collection

use crate::MemStore;
use async_trait::async_trait;
use race_core::{SpStartlists, Startlist, StoreResult};
use tracing::instrument;
use uuid::Uuid;

#[async_trait]
impl SpStartlists for MemStore {
    #[instrument(name = "db.startlists.insert", skip(self, startlist), fields(id = %startlist.id))]
    async fn insert_startlist(&self, startlist: &Startlist) -> StoreResult<Uuid> {
        self.startlists.insert(startlist.id, startlist.clone());
        Ok(startlist.id)
    }

    async fn get_startlist_by_id(&self, id: Uuid) -> StoreResult<Option<Startlist>> {
        Ok(self.startlists.get(id))
    }

    async fn get_startlist_by_event_id(&self, event_id: Uuid) -> StoreResult<Option<Startlist>> {
        Ok(self
            .startlists
            .find_where(|startlist| startlist.event_id == event_id)
            .into_iter()
            .next())
    }

    async fn get_all_startlists(&self) -> StoreResult<Vec<Startlist>> {
        Ok(self.startlists.all())
    }

    #[instrument(name = "db.startlists.replace", skip(self, startlist), fields(id = %id))]
    async fn replace_startlist(&self, id: Uuid, startlist: &Startlist) -> StoreResult<bool> {
        Ok(self.startlists.replace(id, startlist.clone()))
    }

    #[instrument(name = "db.startlists.delete", skip(self), fields(id = %id))]
    async fn delete_startlist(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.startlists.delete(id))
    }
}
