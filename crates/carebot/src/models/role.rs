use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Who is using the assistant
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    Doctor,
    Nurse,
    #[default]
    Patient,
}

impl Role {
    /// Parse a role the way component props are read: case-insensitive,
    /// anything unrecognised is treated as a patient.
    pub fn from_loose(raw: Option<&str>) -> Self {
        raw.and_then(|r| r.trim().parse().ok()).unwrap_or_default()
    }
}
