// events service port

use crate::{CompetitionFormat, Contestant, Event, Raceclass};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Read-only client for the remote events and competition-format services.
/// The bearer token of the incoming request is forwarded on every call.
#[async_trait]
pub trait EventClientPort: Send + Sync {
    async fn get_event(&self, token: &str, event_id: Uuid) -> EventClientResult<Event>;
    async fn get_competition_format(
        &self,
        token: &str,
        event_id: Uuid,
        format_name: &str,
    ) -> EventClientResult<CompetitionFormat>;
    async fn get_raceclasses(&self, token: &str, event_id: Uuid)
    -> EventClientResult<Vec<Raceclass>>;
    async fn get_contestants(
        &self,
        token: &str,
        event_id: Uuid,
    ) -> EventClientResult<Vec<Contestant>>;
}

#[derive(Debug, Error)]
pub enum EventClientError {
    /// event does not exist upstream
    #[error("event {0} not found")]
    EventNotFound(Uuid),

    /// no format configuration under that name
    #[error("competition format {0:?} not found")]
    FormatNotFound(String),

    /// upstream answered outside its contract
    #[error("got unknown status {0} from events service")]
    UnknownStatus(u16),

    // transport or decoding errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type EventClientResult<T> = Result<T, EventClientError>;
