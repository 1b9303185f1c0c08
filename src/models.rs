use crate::errors::AppError;
use chrono::{DateTime, NaiveDate, Utc};
use phonenumber::country::Id as CountryId;
use phonenumber::Mode;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// ============ Lead Model ============

/// Pipeline status of a lead.
///
/// Closed set. Values arriving from the backend that fall outside it are
/// flagged and dropped to `None` at deserialization (see [`Lead`]), so a
/// single bad record can never poison a fetch or an aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Contacted,
    Booked,
}

impl LeadStatus {
    /// Every member of the closed set, in pipeline order.
    pub const ALL: [LeadStatus; 3] = [LeadStatus::New, LeadStatus::Contacted, LeadStatus::Booked];

    pub fn as_str(self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Booked => "booked",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = AppError;

    /// Strict parse for operator input: unknown statuses are rejected,
    /// unlike backend ingestion which flags and drops them.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(LeadStatus::New),
            "contacted" => Ok(LeadStatus::Contacted),
            "booked" => Ok(LeadStatus::Booked),
            other => Err(AppError::InvalidInput(format!(
                "unknown lead status {:?} (expected new, contacted or booked)",
                other
            ))),
        }
    }
}

/// Channel a lead was captured from.
///
/// Closed set with the same ingestion rules as [`LeadStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadSource {
    Voice,
    Sms,
    Web,
}

impl LeadSource {
    pub fn as_str(self) -> &'static str {
        match self {
            LeadSource::Voice => "voice",
            LeadSource::Sms => "sms",
            LeadSource::Web => "web",
        }
    }
}

impl fmt::Display for LeadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadSource {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "voice" => Ok(LeadSource::Voice),
            "sms" => Ok(LeadSource::Sms),
            "web" => Ok(LeadSource::Web),
            other => Err(AppError::InvalidInput(format!(
                "unknown lead source {:?} (expected voice, sms or web)",
                other
            ))),
        }
    }
}

/// A lead record as served by the backend.
///
/// Only `id` is mandatory on the wire; everything else is tolerated as
/// missing so a sparse record degrades to blanks instead of failing the
/// whole fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    /// Unique identifier, assigned by the backend.
    pub id: i64,
    /// Contact number, E.164-like free text as captured by the backend.
    #[serde(default)]
    pub phone_number: String,
    /// Display name, when the backend has one.
    pub name: Option<String>,
    /// Free-text event category (e.g. "Wedding", "Corporate"). Open set.
    pub event_type: Option<String>,
    /// Date the event is planned for.
    pub event_date: Option<NaiveDate>,
    /// Expected number of guests.
    pub guest_count: Option<u32>,
    /// Stated budget.
    pub budget: Option<f64>,
    /// Pipeline status; `None` when missing or outside the closed set.
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<LeadStatus>,
    /// Capture channel; `None` when missing or outside the closed set.
    #[serde(default, deserialize_with = "lenient_source")]
    pub source: Option<LeadSource>,
    /// When the lead was captured.
    pub timestamp: Option<DateTime<Utc>>,
}

fn lenient_variant<'de, D, T>(deserializer: D, field: &'static str) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => match s.parse::<T>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring unknown lead {}: {:?}", field, s);
                None
            }
        },
        Some(other) => {
            tracing::warn!("ignoring non-string lead {}: {}", field, other);
            None
        }
        None => None,
    })
}

fn lenient_status<'de, D>(deserializer: D) -> Result<Option<LeadStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_variant(deserializer, "status")
}

fn lenient_source<'de, D>(deserializer: D) -> Result<Option<LeadSource>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_variant(deserializer, "source")
}

// ============ API Request/Response Models ============

/// Body for `POST /api/leads` (manual lead entry).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLead {
    /// Display name for the lead.
    pub name: String,
    /// Contact number; normalized to E.164 before dispatch.
    pub phone_number: String,
    /// Free-text event category.
    pub event_type: String,
    /// Initial pipeline status.
    pub status: LeadStatus,
}

/// Body for `POST /api/sms/bulk`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkSmsRequest {
    /// Message text sent to every recipient.
    pub message: String,
    /// E.164 phone numbers to deliver to.
    pub recipients: Vec<String>,
}

/// Backend-computed summary served by `GET /api/stats`.
///
/// `Default` is the documented first-load fallback: all counters zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    /// Count of all captured leads.
    #[serde(default)]
    pub total_leads: u64,
    /// Leads still in the `new` status.
    #[serde(default)]
    pub new_leads: u64,
    /// Leads that reached `booked`; name kept for wire parity.
    #[serde(default)]
    pub converted_leads: u64,
    /// Upcoming events, as the backend counts them. Never derived locally.
    #[serde(default)]
    pub active_events: u64,
}

// ============ Phone Normalization ============

/// Validate and normalize a phone number to E.164.
///
/// Bare national numbers are interpreted against the US region (the
/// backend's home market); anything carrying a `+` country prefix is
/// validated against its own country. Only applied to operator-entered
/// numbers; values read back from the backend stay untouched.
pub fn normalize_phone(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if trimmed.len() < 8 {
        return Err(AppError::InvalidInput(format!(
            "phone number too short: {:?}",
            raw
        )));
    }

    // The parser misreads +-prefixed numbers when handed a region hint;
    // only bare national input gets the US default.
    let region = if trimmed.starts_with('+') {
        None
    } else {
        Some(CountryId::US)
    };

    let number = phonenumber::parse(region, trimmed).map_err(|e| {
        AppError::InvalidInput(format!("could not parse phone number {:?}: {:?}", raw, e))
    })?;

    if !phonenumber::is_valid(&number) {
        return Err(AppError::InvalidInput(format!(
            "not a valid phone number: {:?}",
            raw
        )));
    }

    Ok(number.format().mode(Mode::E164).to_string())
}
