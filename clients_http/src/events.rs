// implementation of the event client port against the events and
// competition-format services

use anyhow::Result;
use async_trait::async_trait;
use race_core::{
    CompetitionFormat, Contestant, Event, EventClientError, EventClientPort, EventClientResult,
    Raceclass,
};
use tracing::{debug, instrument};
use url::Url;
use uuid::Uuid;

pub struct HttpEventsClient {
    events_base: Url,
    format_base: Url,
    http: reqwest::Client,
}

impl HttpEventsClient {
    pub fn new(events_base: Url, format_base: Url) -> Self {
        HttpEventsClient {
            events_base,
            format_base,
            http: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            crate::service_url("EVENTS_HOST_SERVER", "EVENTS_HOST_PORT")?,
            crate::service_url(
                "COMPETITION_FORMAT_HOST_SERVER",
                "COMPETITION_FORMAT_HOST_PORT",
            )?,
        ))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        token: &str,
        url: Url,
    ) -> EventClientResult<Option<T>> {
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport)?;
        match response.status().as_u16() {
            200 => Ok(Some(response.json().await.map_err(transport)?)),
            404 => Ok(None),
            status => Err(EventClientError::UnknownStatus(status)),
        }
    }
}

#[async_trait]
impl EventClientPort for HttpEventsClient {
    #[instrument(name = "events.get_event", skip(self, token))]
    async fn get_event(&self, token: &str, event_id: Uuid) -> EventClientResult<Event> {
        let url = join(&self.events_base, &format!("/events/{event_id}"))?;
        self.get_json(token, url)
            .await?
            .ok_or(EventClientError::EventNotFound(event_id))
    }

    /// An event-scoped format configuration wins; otherwise the global
    /// register of the competition-format service is consulted by name.
    #[instrument(name = "events.get_format", skip(self, token))]
    async fn get_competition_format(
        &self,
        token: &str,
        event_id: Uuid,
        format_name: &str,
    ) -> EventClientResult<CompetitionFormat> {
        let url = join(&self.events_base, &format!("/events/{event_id}/format"))?;
        if let Some(format) = self.get_json(token, url).await? {
            return Ok(format);
        }
        debug!("falling_back_to_global_format");

        let mut url = join(&self.format_base, "/competition-formats")?;
        url.query_pairs_mut().append_pair("name", format_name);
        let formats: Option<Vec<CompetitionFormat>> = self.get_json(token, url).await?;
        formats
            .and_then(|formats| formats.into_iter().next())
            .ok_or_else(|| EventClientError::FormatNotFound(format_name.to_string()))
    }

    #[instrument(name = "events.get_raceclasses", skip(self, token))]
    async fn get_raceclasses(
        &self,
        token: &str,
        event_id: Uuid,
    ) -> EventClientResult<Vec<Raceclass>> {
        let url = join(&self.events_base, &format!("/events/{event_id}/raceclasses"))?;
        self.get_json(token, url)
            .await?
            .ok_or(EventClientError::EventNotFound(event_id))
    }

    #[instrument(name = "events.get_contestants", skip(self, token))]
    async fn get_contestants(
        &self,
        token: &str,
        event_id: Uuid,
    ) -> EventClientResult<Vec<Contestant>> {
        let url = join(&self.events_base, &format!("/events/{event_id}/contestants"))?;
        self.get_json(token, url)
            .await?
            .ok_or(EventClientError::EventNotFound(event_id))
    }
}

fn join(base: &Url, path: &str) -> EventClientResult<Url> {
    base.join(path)
        .map_err(|error| EventClientError::Other(error.into()))
}

fn transport(error: reqwest::Error) -> EventClientError {
    EventClientError::Other(error.into())
}
