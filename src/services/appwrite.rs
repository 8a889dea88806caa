use crate::models::{Event, EventPatch, Profile};
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Appwrite
#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Appwrite API client
///
/// Acts as both the profile store and the event store:
/// - Listing volunteer profiles
/// - Fetching a single event
/// - Persisting an event's assigned volunteers
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
    page_size: usize,
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub profiles: String,
    pub events: String,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
        page_size: usize,
    ) -> Result<Self, AppwriteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
            page_size: page_size.max(1),
        })
    }

    fn documents_url(&self, collection: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            collection
        )
    }

    fn document_url(&self, collection: &str, document_id: &str) -> String {
        format!(
            "{}/{}",
            self.documents_url(collection),
            urlencoding::encode(document_id)
        )
    }

    /// List every volunteer profile, one page at a time
    ///
    /// Documents that do not parse as a profile are skipped.
    pub async fn list_profiles(&self) -> Result<Vec<Profile>, AppwriteError> {
        let url = self.documents_url(&self.collections.profiles);
        let mut profiles = Vec::new();
        let mut offset = 0usize;

        loop {
            let queries = vec![
                format!("limit({})", self.page_size),
                format!("offset({})", offset),
            ];
            let queries_json = serde_json::to_string(&queries)?;
            let full_url = format!("{}?query={}", url, urlencoding::encode(&queries_json));

            let response = self
                .client
                .get(&full_url)
                .header("X-Appwrite-Key", &self.api_key)
                .header("X-Appwrite-Project", &self.project_id)
                .send()
                .await?;

            let json: Value = Self::check_status(response, "list profiles")
                .await?
                .json()
                .await?;

            let documents = json
                .get("documents")
                .and_then(|d| d.as_array())
                .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

            let page_len = documents.len();
            profiles.extend(documents.iter().filter_map(|doc| {
                let data = doc.get("data").unwrap_or(doc);
                match serde_json::from_value::<Profile>(data.clone()) {
                    Ok(profile) => Some(profile),
                    Err(e) => {
                        tracing::warn!(
                            "Skipping unparseable profile document {:?}: {}",
                            doc.get("$id").and_then(|id| id.as_str()),
                            e
                        );
                        None
                    }
                }
            }));

            if page_len < self.page_size {
                break;
            }
            offset += page_len;
        }

        tracing::debug!("Listed {} profiles", profiles.len());

        Ok(profiles)
    }

    /// Fetch a single event by its document ID
    pub async fn get_event(&self, event_id: &str) -> Result<Event, AppwriteError> {
        let url = self.document_url(&self.collections.events, event_id);

        tracing::debug!("Fetching event: {}", event_id);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        let json: Value = Self::check_status(response, &format!("event {}", event_id))
            .await?
            .json()
            .await?;

        Self::parse_event(&json, event_id)
    }

    /// Apply a partial update to an event and return the stored result
    pub async fn update_event(
        &self,
        event_id: &str,
        patch: &EventPatch,
    ) -> Result<Event, AppwriteError> {
        let url = self.document_url(&self.collections.events, event_id);

        let response = self
            .client
            .patch(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .json(&json!({ "data": patch }))
            .send()
            .await?;

        let json: Value = Self::check_status(response, &format!("event {}", event_id))
            .await?
            .json()
            .await?;

        tracing::debug!("Updated event {}: {:?}", event_id, patch);

        Self::parse_event(&json, event_id)
    }

    async fn check_status(response: Response, what: &str) -> Result<Response, AppwriteError> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(AppwriteError::NotFound(what.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppwriteError::Unauthorized),
            status => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unable to read body".to_string());
                tracing::error!("Appwrite request for {} failed: {} - {}", what, status, body);
                Err(AppwriteError::ApiError(format!("Request for {} failed: {}", what, status)))
            }
        }
    }

    fn parse_event(json: &Value, event_id: &str) -> Result<Event, AppwriteError> {
        let data = json.get("data").unwrap_or(json);

        let mut event: Event = serde_json::from_value(data.clone())
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to parse event: {}", e)))?;

        if event.event_id.is_empty() {
            event.event_id = event_id.to_string();
        }

        Ok(event)
    }
}

impl From<serde_json::Error> for AppwriteError {
    fn from(value: serde_json::Error) -> Self {
        AppwriteError::InvalidResponse(value.to_string())
    }
}
