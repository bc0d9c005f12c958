//! Google Calendar wire-level event types.
//!
//! These map directly onto the Calendar v3 JSON representation (camelCase
//! on the wire), carrying the fields the migration touches plus the
//! ordinary payload fields that survive a re-create. Date values are kept
//! as provider-formatted strings so an event round-trips without its
//! offsets being rewritten.

use serde::{Deserialize, Serialize};

/// A calendar event as returned by the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub etag: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub summary: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub location: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub color_id: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub html_link: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hangout_link: String,
    #[serde(rename = "iCalUID", skip_serializing_if = "String::is_empty")]
    pub ical_uid: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub recurring_event_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<EventActor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer: Option<EventActor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<EventDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<EventDateTime>,

    /// RRULE, EXDATE lines for master events
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recurrence: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attendees: Vec<EventAttendee>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminders: Option<EventReminders>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub transparency: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub visibility: String,
}

/// Creator/organizer identity on an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventActor {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(rename = "self")]
    pub self_: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventAttendee {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub response_status: String,
}

/// Start/end of an event: either a full timestamp or a date-only value
/// for all-day events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventDateTime {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub date_time: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub time_zone: String,
}

/// Reminder configuration on an event. The provider rejects creation
/// payloads that carry overrides while `useDefault` is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventReminders {
    pub use_default: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<ReminderOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReminderOverride {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub method: String,
    pub minutes: i64,
}

impl Event {
    /// Derive a payload that is acceptable as a brand new event on any
    /// account: every identity and provider-assigned field is cleared and
    /// the attendee list emptied, so the copy never references the source
    /// account. Reminder overrides are dropped when the event uses default
    /// reminders.
    pub fn creation_payload(&self) -> Event {
        let mut copy = self.clone();
        copy.id = String::new();
        copy.etag = String::new();
        copy.html_link = String::new();
        copy.hangout_link = String::new();
        copy.ical_uid = String::new();
        copy.recurring_event_id = String::new();
        copy.creator = None;
        copy.organizer = None;
        copy.attendees = Vec::new();
        if let Some(reminders) = &mut copy.reminders {
            if reminders.use_default {
                reminders.overrides = Vec::new();
            }
        }
        copy
    }

    /// Start columns for the failure report: the timestamp for timed
    /// events, the date for all-day events. The column that does not
    /// apply stays empty.
    pub fn start_parts(&self) -> (String, String) {
        match &self.start {
            Some(start) => (start.date_time.clone(), start.date.clone()),
            None => (String::new(), String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_event() -> Event {
        Event {
            id: "evt-123".to_string(),
            etag: "\"3333\"".to_string(),
            status: "confirmed".to_string(),
            summary: "Team Standup".to_string(),
            description: "Daily sync".to_string(),
            location: "Room 2".to_string(),
            html_link: "https://www.google.com/calendar/event?eid=abc".to_string(),
            hangout_link: "https://meet.google.com/abc-defg-hij".to_string(),
            ical_uid: "evt-123@google.com".to_string(),
            recurring_event_id: "master-1".to_string(),
            creator: Some(EventActor {
                email: "alice@example.com".to_string(),
                display_name: "Alice".to_string(),
                self_: true,
            }),
            organizer: Some(EventActor {
                email: "alice@example.com".to_string(),
                ..EventActor::default()
            }),
            start: Some(EventDateTime {
                date_time: "2025-03-20T15:00:00+01:00".to_string(),
                time_zone: "Europe/Stockholm".to_string(),
                ..EventDateTime::default()
            }),
            end: Some(EventDateTime {
                date_time: "2025-03-20T15:30:00+01:00".to_string(),
                time_zone: "Europe/Stockholm".to_string(),
                ..EventDateTime::default()
            }),
            attendees: vec![EventAttendee {
                email: "bob@example.com".to_string(),
                response_status: "accepted".to_string(),
                ..EventAttendee::default()
            }],
            reminders: Some(EventReminders {
                use_default: true,
                overrides: vec![ReminderOverride {
                    method: "popup".to_string(),
                    minutes: 10,
                }],
            }),
            ..Event::default()
        }
    }

    #[test]
    fn creation_payload_clears_identity_fields() {
        let copy = make_test_event().creation_payload();

        assert_eq!(copy.id, "");
        assert_eq!(copy.etag, "");
        assert_eq!(copy.html_link, "");
        assert_eq!(copy.hangout_link, "");
        assert_eq!(copy.ical_uid, "");
        assert_eq!(copy.recurring_event_id, "");
        assert!(copy.creator.is_none());
        assert!(copy.organizer.is_none());
        assert!(copy.attendees.is_empty());
    }

    #[test]
    fn creation_payload_keeps_the_actual_payload() {
        let copy = make_test_event().creation_payload();

        assert_eq!(copy.summary, "Team Standup");
        assert_eq!(copy.description, "Daily sync");
        assert_eq!(copy.location, "Room 2");
        assert_eq!(copy.status, "confirmed");
        assert_eq!(copy.start.unwrap().date_time, "2025-03-20T15:00:00+01:00");
    }

    #[test]
    fn creation_payload_drops_overrides_when_defaults_are_used() {
        let copy = make_test_event().creation_payload();
        let reminders = copy.reminders.unwrap();

        assert!(reminders.use_default);
        assert!(reminders.overrides.is_empty());
    }

    #[test]
    fn creation_payload_keeps_explicit_reminder_overrides() {
        let mut event = make_test_event();
        event.reminders = Some(EventReminders {
            use_default: false,
            overrides: vec![ReminderOverride {
                method: "email".to_string(),
                minutes: 30,
            }],
        });

        let reminders = event.creation_payload().reminders.unwrap();
        assert_eq!(reminders.overrides.len(), 1);
        assert_eq!(reminders.overrides[0].minutes, 30);
    }

    #[test]
    fn creation_payload_serializes_without_cleared_fields() {
        let value = serde_json::to_value(make_test_event().creation_payload()).unwrap();
        let object = value.as_object().unwrap();

        for key in [
            "id",
            "etag",
            "htmlLink",
            "hangoutLink",
            "iCalUID",
            "recurringEventId",
            "creator",
            "organizer",
            "attendees",
        ] {
            assert!(!object.contains_key(key), "payload still carries {key}");
        }
        assert_eq!(object["summary"], "Team Standup");
    }

    #[test]
    fn wire_field_names_round_trip() {
        let event: Event = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "iCalUID": "abc@google.com",
            "htmlLink": "https://example.com",
            "recurringEventId": "master",
            "start": { "date": "2025-03-20" },
            "reminders": { "useDefault": false, "overrides": [{ "method": "popup", "minutes": 5 }] },
            "attendees": [{ "email": "bob@example.com", "responseStatus": "accepted" }]
        }))
        .unwrap();

        assert_eq!(event.ical_uid, "abc@google.com");
        assert_eq!(event.recurring_event_id, "master");
        assert_eq!(event.start.as_ref().unwrap().date, "2025-03-20");
        assert_eq!(event.attendees[0].response_status, "accepted");
        assert_eq!(event.reminders.unwrap().overrides[0].minutes, 5);
    }

    #[test]
    fn start_parts_pick_the_column_that_applies() {
        let timed = make_test_event();
        assert_eq!(
            timed.start_parts(),
            ("2025-03-20T15:00:00+01:00".to_string(), String::new())
        );

        let mut all_day = make_test_event();
        all_day.start = Some(EventDateTime {
            date: "2025-03-20".to_string(),
            ..EventDateTime::default()
        });
        assert_eq!(all_day.start_parts(), (String::new(), "2025-03-20".to_string()));

        let mut missing = make_test_event();
        missing.start = None;
        assert_eq!(missing.start_parts(), (String::new(), String::new()));
    }
}
