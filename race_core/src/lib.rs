// contains core functionality

mod commands;
mod errors;
mod event;
mod ports;
mod race;
mod race_result;
mod raceplan;
mod startlist;
mod startlist_generator;
mod time_event;
pub mod utils;

pub use errors::*;
pub use event::*;
pub use ports::*;
pub use race::*;
pub use race_result::*;
pub use raceplan::*;
pub use startlist::*;
pub use startlist_generator::*;
pub use time_event::*;

use std::sync::Arc;

/// Core provides the use cases of the race service:
/// - generate a raceplan for an event and maintain its races
/// - generate a startlist for an event and maintain its start entries
/// - ingest time events and maintain the race results they rank
///
/// Core holds connections to all required ports (document store, events
/// service, users service). Handlers construct one Core per process and
/// share it; all state lives behind the ports.
pub struct Core {
    pub store: Arc<dyn StorePort>,
    pub events: Arc<dyn EventClientPort>,
    pub auth: Arc<dyn AuthPort>,
}

pub struct NoStore {}
pub struct NoEvents {}
pub struct NoAuth {}

pub struct DynStore(Arc<dyn StorePort>);
pub struct DynEvents(Arc<dyn EventClientPort>);
pub struct DynAuth(Arc<dyn AuthPort>);

/// Builder forcing all three ports to be wired before a Core can be built.
pub struct CoreBuilder<ST, EV, AU> {
    state_store: ST,
    state_events: EV,
    state_auth: AU,
}

impl CoreBuilder<NoStore, NoEvents, NoAuth> {
    pub fn new() -> Self {
        CoreBuilder {
            state_store: NoStore {},
            state_events: NoEvents {},
            state_auth: NoAuth {},
        }
    }
}

impl Default for CoreBuilder<NoStore, NoEvents, NoAuth> {
    fn default() -> Self {
        Self::new()
    }
}

impl<ST, EV, AU> CoreBuilder<ST, EV, AU> {
    pub fn set_store(self, store: Arc<dyn StorePort>) -> CoreBuilder<DynStore, EV, AU> {
        CoreBuilder {
            state_store: DynStore(store),
            state_events: self.state_events,
            state_auth: self.state_auth,
        }
    }

    pub fn set_events(self, events: Arc<dyn EventClientPort>) -> CoreBuilder<ST, DynEvents, AU> {
        CoreBuilder {
            state_store: self.state_store,
            state_events: DynEvents(events),
            state_auth: self.state_auth,
        }
    }

    pub fn set_auth(self, auth: Arc<dyn AuthPort>) -> CoreBuilder<ST, EV, DynAuth> {
        CoreBuilder {
            state_store: self.state_store,
            state_events: self.state_events,
            state_auth: DynAuth(auth),
        }
    }
}

impl CoreBuilder<DynStore, DynEvents, DynAuth> {
    pub fn build(self) -> Core {
        Core {
            store: self.state_store.0,
            events: self.state_events.0,
            auth: self.state_auth.0,
        }
    }
}
