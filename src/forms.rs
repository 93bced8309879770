//! Shared form plumbing: per-field validation issues and the lenient
//! deserializers that coerce text inputs into numbers and dates.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::fmt;

/// A single rejected field with a client-facing message.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldIssue {
    pub field: &'static str,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validation failure carrying every rejected field at once.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DraftRejected {
    pub issues: Vec<FieldIssue>,
}

impl DraftRejected {
    pub fn from_issues(issues: Vec<FieldIssue>) -> Option<Self> {
        if issues.is_empty() {
            None
        } else {
            Some(Self { issues })
        }
    }
}

impl fmt::Display for DraftRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid draft:")?;
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                write!(f, ";")?;
            }
            write!(f, " {}: {}", issue.field, issue.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for DraftRejected {}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn coerce_f64<E: serde::de::Error>(value: Option<NumberOrText>) -> Result<Option<f64>, E> {
    match value {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| E::custom(format!("'{trimmed}' is not a number")))
        }
    }
}

/// Accepts a JSON number or a numeric string; blank strings count as absent.
pub fn flexible_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrText>::deserialize(deserializer)?;
    match coerce_f64::<D::Error>(value)? {
        None => Ok(None),
        Some(n) if n < 0.0 => Err(serde::de::Error::custom("must not be negative")),
        Some(n) => Ok(Some(n as u64)),
    }
}

pub fn flexible_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrText>::deserialize(deserializer)?;
    coerce_f64::<D::Error>(value)
}

pub fn flexible_u16<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrText>::deserialize(deserializer)?;
    match coerce_f64::<D::Error>(value)? {
        None => Ok(None),
        Some(n) if !(0.0..=f64::from(u16::MAX)).contains(&n) => {
            Err(serde::de::Error::custom("out of range"))
        }
        Some(n) => Ok(Some(n as u16)),
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Optional `YYYY-MM-DD` field; blank strings count as absent.
pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_date(&raw).map(Some).map_err(serde::de::Error::custom),
    }
}
