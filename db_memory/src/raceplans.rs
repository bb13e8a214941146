// implementation of the raceplans collection

use crate::MemStore;
use async_trait::async_trait;
use race_core::{Raceplan, SpRaceplans, StoreResult};
use tracing::{debug, instrument};
use uuid::Uuid;

#[async_trait]
impl SpRaceplans for MemStore {
    #[instrument(name = "db.raceplans.insert", skip(self, raceplan), fields(id = %raceplan.id))]
    async fn insert_raceplan(&self, raceplan: &Raceplan) -> StoreResult<Uuid> {
        self.raceplans.insert(raceplan.id, raceplan.clone());
        Ok(raceplan.id)
    }

    #[instrument(name = "db.raceplans.get", skip(self), fields(id = %id))]
    async fn get_raceplan_by_id(&self, id: Uuid) -> StoreResult<Option<Raceplan>> {
        let row = self.raceplans.get(id);
        debug!(found = row.is_some(), "lookup");
        Ok(row)
    }

    async fn get_raceplan_by_event_id(&self, event_id: Uuid) -> StoreResult<Option<Raceplan>> {
        Ok(self
            .raceplans
            .find_where(|raceplan| raceplan.event_id == event_id)
            .into_iter()
            .next())
    }

    async fn get_all_raceplans(&self) -> StoreResult<Vec<Raceplan>> {
        Ok(self.raceplans.all())
    }

    #[instrument(name = "db.raceplans.replace", skip(self, raceplan), fields(id = %id))]
    async fn replace_raceplan(&self, id: Uuid, raceplan: &Raceplan) -> StoreResult<bool> {
        Ok(self.raceplans.replace(id, raceplan.clone()))
    }

    #[instrument(name = "db.raceplans.delete", skip(self), fields(id = %id))]
    async fn delete_raceplan(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.raceplans.delete(id))
    }
}
