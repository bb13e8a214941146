// trait fakes for the remote collaborators, plus fixture builders

use async_trait::async_trait;
use db_memory::MemStore;
use race_core::{
    AuthError, AuthPort, AuthResult, CompetitionFormat, Contestant, Core, CoreBuilder, Event,
    EventClientError, EventClientPort, EventClientResult, Raceclass,
};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// In-memory events service fake. Seed it with the documents a command
/// should see; unseeded lookups answer like upstream 404s.
#[derive(Default)]
pub struct FakeEventsClient {
    event: Mutex<Option<Event>>,
    format: Mutex<Option<CompetitionFormat>>,
    raceclasses: Mutex<Vec<Raceclass>>,
    contestants: Mutex<Vec<Contestant>>,
}

impl FakeEventsClient {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn seed_event(&self, event: Event) {
        *self.event.lock().unwrap() = Some(event);
    }
    pub fn seed_format(&self, format: CompetitionFormat) {
        *self.format.lock().unwrap() = Some(format);
    }
    pub fn seed_raceclasses(&self, raceclasses: Vec<Raceclass>) {
        *self.raceclasses.lock().unwrap() = raceclasses;
    }
    pub fn seed_contestants(&self, contestants: Vec<Contestant>) {
        *self.contestants.lock().unwrap() = contestants;
    }
}

#[async_trait]
impl EventClientPort for FakeEventsClient {
    async fn get_event(&self, _token: &str, event_id: Uuid) -> EventClientResult<Event> {
        self.event
            .lock()
            .unwrap()
            .clone()
            .filter(|event| event.id == event_id)
            .ok_or(EventClientError::EventNotFound(event_id))
    }

    async fn get_competition_format(
        &self,
        _token: &str,
        _event_id: Uuid,
        format_name: &str,
    ) -> EventClientResult<CompetitionFormat> {
        self.format
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| EventClientError::FormatNotFound(format_name.to_string()))
    }

    async fn get_raceclasses(
        &self,
        _token: &str,
        _event_id: Uuid,
    ) -> EventClientResult<Vec<Raceclass>> {
        Ok(self.raceclasses.lock().unwrap().clone())
    }

    async fn get_contestants(
        &self,
        _token: &str,
        _event_id: Uuid,
    ) -> EventClientResult<Vec<Contestant>> {
        Ok(self.contestants.lock().unwrap().clone())
    }
}

/// Users service fake answering every call with a canned status.
pub struct FakeAuthClient {
    status: Mutex<u16>,
    asked_roles: Mutex<Vec<Vec<String>>>,
}

impl Default for FakeAuthClient {
    fn default() -> Self {
        FakeAuthClient {
            status: Mutex::new(204),
            asked_roles: Mutex::new(Vec::new()),
        }
    }
}

impl FakeAuthClient {
    pub fn new() -> Self {
        Self::default()
    }
    /// answer the next calls with this users-service status
    pub fn respond_with(&self, status: u16) {
        *self.status.lock().unwrap() = status;
    }
    pub fn asked_roles(&self) -> Vec<Vec<String>> {
        self.asked_roles.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthPort for FakeAuthClient {
    async fn authorize(&self, _token: Option<&str>, roles: &[&str]) -> AuthResult<()> {
        self.asked_roles
            .lock()
            .unwrap()
            .push(roles.iter().map(|role| role.to_string()).collect());
        match *self.status.lock().unwrap() {
            204 => Ok(()),
            401 => Err(AuthError::Unauthorized),
            403 => Err(AuthError::Forbidden),
            status => Err(AuthError::UnknownStatus(status)),
        }
    }
}

/// Helper: build a Core wired with the store adapter and our trait fakes.
pub fn make_core_with_fakes() -> (
    Arc<Core>,
    Arc<MemStore>,
    Arc<FakeEventsClient>,
    Arc<FakeAuthClient>,
) {
    let store = Arc::new(MemStore::new());
    let events = Arc::new(FakeEventsClient::new());
    let auth = Arc::new(FakeAuthClient::new());
    let core = CoreBuilder::new()
        .set_store(store.clone())
        .set_events(events.clone())
        .set_auth(auth.clone())
        .build();
    (Arc::new(core), store, events, auth)
}

// --- fixture builders ---

pub const EVENT_ID: &str = "290e70d5-0933-4af0-bb53-1d705ba7eb95";

pub fn event_id() -> Uuid {
    EVENT_ID.parse().unwrap()
}

pub fn interval_event() -> Event {
    serde_json::from_value(serde_json::json!({
        "id": EVENT_ID,
        "name": "Oslo Skagen langrenn",
        "competition_format": "Interval Start",
        "date_of_event": "2021-08-31",
        "time_of_event": "09:00:00"
    }))
    .unwrap()
}

pub fn sprint_event() -> Event {
    serde_json::from_value(serde_json::json!({
        "id": EVENT_ID,
        "name": "Oslo Skagen sprint",
        "competition_format": "Individual Sprint",
        "date_of_event": "2021-08-31",
        "time_of_event": "09:00:00"
    }))
    .unwrap()
}

pub fn interval_format() -> CompetitionFormat {
    serde_json::from_value(serde_json::json!({
        "datatype": "interval_start",
        "name": "Interval Start",
        "intervals": "00:00:30",
        "time_between_groups": "00:10:00",
        "max_no_of_contestants_in_race": 10000
    }))
    .unwrap()
}

pub fn sprint_format() -> CompetitionFormat {
    serde_json::from_value(serde_json::json!({
        "datatype": "individual_sprint",
        "name": "Individual Sprint",
        "time_between_groups": "00:15:00",
        "time_between_rounds": "00:10:00",
        "time_between_heats": "00:02:30",
        "max_no_of_contestants_in_raceclass": 80,
        "max_no_of_contestants_in_race": 10,
        "race_config_ranked": [
            {
                "max_no_of_contestants": 7,
                "rounds": ["Q", "F"],
                "no_of_heats": {"Q": {"A": 1}, "F": {"A": 1, "B": 0, "C": 0}},
                "from_to": {"Q": {"A": {"F": {"A": "ALL", "B": 0}}, "C": {"F": {"C": 0}}}}
            },
            {
                "max_no_of_contestants": 16,
                "rounds": ["Q", "F"],
                "no_of_heats": {"Q": {"A": 2}, "F": {"A": 1, "B": 1, "C": 0}},
                "from_to": {"Q": {"A": {"F": {"A": 4, "B": "REST"}}, "C": {"F": {"C": 0}}}}
            },
            {
                "max_no_of_contestants": 24,
                "rounds": ["Q", "S", "F"],
                "no_of_heats": {"Q": {"A": 3}, "S": {"A": 2, "C": 0}, "F": {"A": 1, "B": 1, "C": 1}},
                "from_to": {
                    "Q": {"A": {"S": {"A": 5, "C": 0}, "F": {"C": "REST"}}},
                    "S": {"A": {"F": {"A": 4, "B": "REST"}}, "C": {"F": {"C": 0}}}
                }
            }
        ],
        "race_config_non_ranked": [
            {
                "max_no_of_contestants": 16,
                "rounds": ["R1", "R2"],
                "no_of_heats": {"R1": {"A": 2}, "R2": {"A": 2}},
                "from_to": {"R1": {"A": {"R2": {"A": "ALL"}}}}
            }
        ]
    }))
    .unwrap()
}

pub fn raceclass(name: &str, group: u32, order: u32, no_of_contestants: u32) -> Raceclass {
    Raceclass {
        id: Uuid::new_v4(),
        name: name.to_string(),
        ageclasses: vec![format!("{name} years")],
        event_id: event_id(),
        no_of_contestants,
        ranking: true,
        group,
        order,
    }
}

pub fn contestant(bib: u32, ageclass: &str) -> Contestant {
    Contestant {
        bib: Some(bib),
        first_name: format!("First{bib}"),
        last_name: format!("Last{bib}"),
        club: "Lyn Ski".to_string(),
        ageclass: ageclass.to_string(),
        event_id: event_id(),
    }
}
