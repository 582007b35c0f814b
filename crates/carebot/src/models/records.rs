//! Records carried in tool results. They only exist while a result is being
//! rendered; persistence belongs to the backend.
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    #[default]
    Unknown,
}

impl<'de> Deserialize<'de> for AppointmentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = lenient_string(deserializer)?;
        Ok(raw
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(AppointmentStatus::Unknown))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(deserialize_with = "required_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub patient_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub reason: Option<String>,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default, deserialize_with = "lenient_string")]
    pub room: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub doctor: Option<String>,
}

impl Appointment {
    /// Whether an untyped element can be shown as an appointment at all
    pub fn has_identity(value: &Value) -> bool {
        crate::payload::has_identity(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicalHistoryRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub diagnosis: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub doctor: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub notes: Option<String>,
}

impl MedicalHistoryRecord {
    /// Initials of the attending doctor, e.g. "Sarah Connor" -> "SC"
    pub fn doctor_initials(&self) -> Option<String> {
        let initials: String = self
            .doctor
            .as_deref()?
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect();
        (!initials.is_empty()).then_some(initials)
    }
}

/// Accept strings, numbers and booleans as text; everything else is absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Identifiers keep their text as sent; only an empty string is refused.
fn required_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(serde::de::Error::custom("empty identifier")),
    }
}
