//! Book model

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Book record as stored and returned by `GET /books/{bookId}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: Option<i64>,
    pub read_page: Option<i64>,
    /// Derived: true when `readPage == pageCount` at the last write
    pub finished: bool,
    pub reading: bool,
    pub inserted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create / update book request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_page_progress"))]
pub struct BookPayload {
    #[validate(
        required(message = "Book name is required"),
        length(min = 1, message = "Book name is required")
    )]
    pub name: Option<String>,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: Option<i64>,
    pub read_page: Option<i64>,
    #[serde(default)]
    pub reading: bool,
}

/// Payload rule that rejected a write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PayloadRule {
    #[error("Please provide the book name")]
    MissingName,
    #[error("readPage cannot be greater than pageCount")]
    ReadPageExceedsPageCount,
}

fn validate_page_progress(payload: &BookPayload) -> Result<(), ValidationError> {
    match (payload.read_page, payload.page_count) {
        (Some(read), Some(total)) if read > total => {
            let mut error = ValidationError::new("read_page_exceeds_page_count");
            error.message = Some("readPage cannot be greater than pageCount".into());
            Err(error)
        }
        _ => Ok(()),
    }
}

impl BookPayload {
    /// Run the payload rules. A missing name is reported before page progress.
    pub fn check(&self) -> Result<(), PayloadRule> {
        match self.validate() {
            Ok(()) => Ok(()),
            Err(errors) if errors.field_errors().contains_key("name") => {
                Err(PayloadRule::MissingName)
            }
            Err(_) => Err(PayloadRule::ReadPageExceedsPageCount),
        }
    }

    /// Two absent values compare equal
    pub fn is_finished(&self) -> bool {
        self.page_count == self.read_page
    }
}

impl Book {
    /// Build a new record from a payload that already passed [`BookPayload::check`]
    pub fn new(id: String, payload: BookPayload, now: DateTime<Utc>) -> Self {
        let finished = payload.is_finished();
        Self {
            id,
            name: payload.name.unwrap_or_default(),
            year: payload.year,
            author: payload.author,
            summary: payload.summary,
            publisher: payload.publisher,
            page_count: payload.page_count,
            read_page: payload.read_page,
            finished,
            reading: payload.reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Replace every mutable field. `id` and `inserted_at` are kept.
    pub fn apply(&mut self, payload: BookPayload, now: DateTime<Utc>) {
        self.finished = payload.is_finished();
        self.name = payload.name.unwrap_or_default();
        self.year = payload.year;
        self.author = payload.author;
        self.summary = payload.summary;
        self.publisher = payload.publisher;
        self.page_count = payload.page_count;
        self.read_page = payload.read_page;
        self.reading = payload.reading;
        self.updated_at = now.max(self.updated_at);
    }
}

/// Projection returned by `GET /books`
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: Option<String>,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// Boolean query flag, accepted as `0`/`1` or `false`/`true`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flag(pub bool);

impl TryFrom<String> for Flag {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" => Ok(Flag(true)),
            "0" | "false" => Ok(Flag(false)),
            _ => Err(format!("invalid flag value '{}', expected 0 or 1", value)),
        }
    }
}

/// `?reading=` with no value is the same as leaving the filter out
fn empty_flag_as_none<'de, D>(deserializer: D) -> Result<Option<Flag>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) if !value.trim().is_empty() => {
            Flag::try_from(value).map(Some).map_err(de::Error::custom)
        }
        _ => Ok(None),
    }
}

/// Book list filters. Absent filters match everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookQuery {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_flag_as_none")]
    pub reading: Option<Flag>,
    #[serde(default, deserialize_with = "empty_flag_as_none")]
    pub finished: Option<Flag>,
}

impl BookQuery {
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(ref name) = self.name {
            if !book.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        if let Some(Flag(reading)) = self.reading {
            if book.reading != reading {
                return false;
            }
        }
        if let Some(Flag(finished)) = self.finished {
            if book.finished != finished {
                return false;
            }
        }
        true
    }
}
