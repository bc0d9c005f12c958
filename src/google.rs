//! Thin Google Calendar v3 REST client.
//!
//! One value per authorized account; implements the listing side and the
//! `EventSink` create/delete operations the migration engine drives.

use calmove_core::{CalMoveError, CalMoveResult, Event, EventSink};
use serde::Deserialize;

const API_BASE: &str = "https://www.googleapis.com/calendar/v3";

pub struct GoogleCalendar {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
    calendar_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventPage {
    #[serde(default)]
    items: Vec<Event>,
    #[serde(default)]
    next_page_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarListPage {
    #[serde(default)]
    items: Vec<CalendarListEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarListEntry {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    primary: bool,
}

impl GoogleCalendar {
    pub fn new(access_token: String, calendar_id: String) -> Self {
        Self::with_base_url(API_BASE.to_string(), access_token, calendar_id)
    }

    pub fn with_base_url(base_url: String, access_token: String, calendar_id: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            access_token,
            calendar_id,
        }
    }

    /// The complete ordered list of non-deleted events on this calendar,
    /// with pagination resolved. Any page error fails the whole listing;
    /// there is no partial-list fallback.
    pub async fn list_events(&self) -> CalMoveResult<Vec<Event>> {
        let mut events = Vec::new();
        let mut page_token = String::new();

        loop {
            let page = self.fetch_page(&page_token).await?;
            events.extend(page.items);

            if page.next_page_token.is_empty() {
                return Ok(events);
            }
            page_token = page.next_page_token;
        }
    }

    async fn fetch_page(&self, page_token: &str) -> CalMoveResult<EventPage> {
        let url = format!("{}/calendars/{}/events", self.base_url, self.calendar_id);

        let mut request = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("showDeleted", "false"),
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
            ]);
        if !page_token.is_empty() {
            request = request.query(&[("pageToken", page_token)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CalMoveError::Listing(e.to_string()))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| CalMoveError::Listing(format!("Failed to parse events page: {e}")))
    }

    /// Email of the account behind this token (i.e. its primary calendar).
    pub async fn account_email(&self) -> CalMoveResult<String> {
        let url = format!("{}/users/me/calendarList", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| CalMoveError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let page: CalendarListPage = response
            .json()
            .await
            .map_err(|e| CalMoveError::Serialization(e.to_string()))?;

        page.items
            .into_iter()
            .find(|cal| cal.primary)
            .map(|cal| cal.summary)
            .ok_or_else(|| CalMoveError::Provider("No primary calendar found".into()))
    }
}

impl EventSink for GoogleCalendar {
    async fn create_event(&self, payload: &Event) -> CalMoveResult<()> {
        let url = format!("{}/calendars/{}/events", self.base_url, self.calendar_id);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(payload)
            .send()
            .await
            .map_err(|e| CalMoveError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(())
    }

    async fn delete_event(&self, event_id: &str) -> CalMoveResult<()> {
        let url = format!(
            "{}/calendars/{}/events/{}",
            self.base_url, self.calendar_id, event_id
        );

        let response = self
            .http
            .delete(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| CalMoveError::Http(e.to_string()))?;

        let status = response.status();
        // An event that is already gone counts as deleted.
        if status == reqwest::StatusCode::GONE {
            return Ok(());
        }
        if !status.is_success() {
            return Err(api_error(response).await);
        }

        Ok(())
    }
}

async fn api_error(response: reqwest::Response) -> CalMoveError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    CalMoveError::Api { status, message }
}
