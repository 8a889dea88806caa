use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use crate::models::calendar::CalendarDay;

/// Volunteer profile as stored in the profiles collection
///
/// Optional collections default to empty sets so the matcher always works over
/// total data; a profile missing skills or availability simply fails those
/// checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProfileDocument")]
pub struct Profile {
    #[serde(rename = "accountId")]
    pub account_id: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub city: String,
    pub state: String,
    pub skills: BTreeSet<String>,
    pub preferences: Option<String>,
    #[serde(rename = "availableDates")]
    pub available_dates: BTreeSet<CalendarDay>,
}

/// Volunteering event
///
/// `state`, `skills_required` and `date` stay optional here; the matcher
/// rejects an event missing any of them instead of guessing. A requirement
/// present with the wrong type is left unset and listed in `malformed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EventDocument")]
pub struct Event {
    #[serde(rename = "eventId")]
    pub event_id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub urgency: Option<String>,
    pub state: Option<String>,
    #[serde(rename = "skillsRequired")]
    pub skills_required: Option<BTreeSet<String>>,
    pub date: Option<CalendarDay>,
    #[serde(rename = "maxVolunteers")]
    pub max_volunteers: u32,
    #[serde(rename = "assignedVolunteers")]
    pub assigned_volunteers: Vec<String>,
    #[serde(skip)]
    pub malformed: Vec<MalformedField>,
}

/// A requirement field stored with the wrong type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedField {
    pub field: &'static str,
    pub reason: String,
}

/// Partial update sent to the event store
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventPatch {
    #[serde(rename = "assignedVolunteers", skip_serializing_if = "Option::is_none")]
    pub assigned_volunteers: Option<Vec<String>>,
}

/// One finalized assignment of a volunteer to an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentRecord {
    #[serde(rename = "eventId")]
    pub event_id: String,
    #[serde(rename = "accountId")]
    pub account_id: String,
    #[serde(rename = "eventTitle")]
    pub event_title: String,
    #[serde(rename = "eventDate")]
    pub event_date: CalendarDay,
    #[serde(rename = "assignedAt")]
    pub assigned_at: chrono::DateTime<chrono::Utc>,
}

/// Profile as written by the account service, which may carry the owner id
/// as `accountId`, `credentialId`, or both
#[derive(Deserialize)]
struct ProfileDocument {
    #[serde(rename = "accountId", default)]
    account_id: Option<String>,
    #[serde(rename = "credentialId", default)]
    credential_id: Option<String>,
    #[serde(rename = "fullName", default)]
    full_name: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default, deserialize_with = "deserialize_state_code")]
    state: String,
    #[serde(default, deserialize_with = "deserialize_nullable_set")]
    skills: BTreeSet<String>,
    #[serde(default)]
    preferences: Option<String>,
    #[serde(rename = "availableDates", default, deserialize_with = "deserialize_nullable_set")]
    available_dates: BTreeSet<CalendarDay>,
}

impl TryFrom<ProfileDocument> for Profile {
    type Error = String;

    fn try_from(doc: ProfileDocument) -> Result<Self, Self::Error> {
        let account_id = non_empty(doc.account_id)
            .or_else(|| non_empty(doc.credential_id))
            .ok_or_else(|| "missing field `accountId`".to_string())?;

        Ok(Self {
            account_id,
            full_name: doc.full_name.unwrap_or_default(),
            city: doc.city.unwrap_or_default(),
            state: doc.state,
            skills: doc.skills,
            preferences: doc.preferences,
            available_dates: doc.available_dates,
        })
    }
}

/// Event document; `$id` is the store's own key and only backs a missing
/// `eventId`
#[derive(Deserialize)]
struct EventDocument {
    #[serde(rename = "eventId", default)]
    event_id: Option<String>,
    #[serde(rename = "$id", default)]
    document_id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    urgency: Option<String>,
    #[serde(default)]
    state: Value,
    #[serde(rename = "skillsRequired", default)]
    skills_required: Value,
    #[serde(default)]
    date: Value,
    #[serde(rename = "maxVolunteers", default)]
    max_volunteers: Option<u32>,
    #[serde(rename = "assignedVolunteers", default, deserialize_with = "deserialize_nullable_vec")]
    assigned_volunteers: Vec<String>,
}

impl From<EventDocument> for Event {
    fn from(doc: EventDocument) -> Self {
        let mut malformed = Vec::new();
        let state = requirement("state", doc.state, &mut malformed);
        let skills_required = requirement("skillsRequired", doc.skills_required, &mut malformed);
        let date = requirement("date", doc.date, &mut malformed);

        Self {
            event_id: non_empty(doc.event_id)
                .or_else(|| non_empty(doc.document_id))
                .unwrap_or_default(),
            title: doc.title.unwrap_or_default(),
            description: doc.description,
            location: doc.location,
            urgency: doc.urgency,
            state,
            skills_required,
            date,
            max_volunteers: doc.max_volunteers.unwrap_or_default(),
            assigned_volunteers: doc.assigned_volunteers,
            malformed,
        }
    }
}

fn non_empty(id: Option<String>) -> Option<String> {
    id.filter(|id| !id.trim().is_empty())
}

/// Decode a requirement field, recording a type mismatch instead of failing
fn requirement<T: DeserializeOwned>(
    field: &'static str,
    value: Value,
    malformed: &mut Vec<MalformedField>,
) -> Option<T> {
    if value.is_null() {
        return None;
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            malformed.push(MalformedField {
                field,
                reason: e.to_string(),
            });
            None
        }
    }
}

/// State stored either as a bare code or as a reference to a State entity
#[derive(Deserialize)]
#[serde(untagged)]
enum StateField {
    Code(String),
    Entity {
        #[serde(alias = "abbreviation", alias = "stateCode")]
        code: String,
    },
}

fn deserialize_state_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let field = Option::<StateField>::deserialize(deserializer)?;
    Ok(match field {
        Some(StateField::Code(code)) | Some(StateField::Entity { code }) => {
            code.trim().to_ascii_uppercase()
        }
        None => String::new(),
    })
}

fn deserialize_nullable_set<'de, D, T>(deserializer: D) -> Result<BTreeSet<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Ord,
{
    Ok(Option::<BTreeSet<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_nullable_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let ids = Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(ids.into_iter().filter(|id| !id.is_empty()).collect())
}
