// implementation of the time_events collection

use crate::MemStore;
use async_trait::async_trait;
use race_core::{SpTimeEvents, StoreResult, TimeEvent};
use tracing::instrument;
use uuid::Uuid;

#[async_trait]
impl SpTimeEvents for MemStore {
    #[instrument(name = "db.time_events.insert", skip(self, time_event), fields(id = %time_event.id))]
    async fn insert_time_event(&self, time_event: &TimeEvent) -> StoreResult<Uuid> {
        self.time_events.insert(time_event.id, time_event.clone());
        Ok(time_event.id)
    }

    async fn get_time_event_by_id(&self, id: Uuid) -> StoreResult<Option<TimeEvent>> {
        Ok(self.time_events.get(id))
    }

    async fn get_all_time_events(&self) -> StoreResult<Vec<TimeEvent>> {
        Ok(self.time_events.all())
    }

    async fn get_time_events_by_event_id(&self, event_id: Uuid) -> StoreResult<Vec<TimeEvent>> {
        Ok(self
            .time_events
            .find_where(|event| event.event_id == event_id))
    }

    async fn get_time_events_by_race_id(&self, race_id: Uuid) -> StoreResult<Vec<TimeEvent>> {
        Ok(self
            .time_events
            .find_where(|event| event.race_id == Some(race_id)))
    }

    #[instrument(name = "db.time_events.replace", skip(self, time_event), fields(id = %id))]
    async fn replace_time_event(&self, id: Uuid, time_event: &TimeEvent) -> StoreResult<bool> {
        Ok(self.time_events.replace(id, time_event.clone()))
    }

    #[instrument(name = "db.time_events.delete", skip(self), fields(id = %id))]
    async fn delete_time_event(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.time_events.delete(id))
    }
}
