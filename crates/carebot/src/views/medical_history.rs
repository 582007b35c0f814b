use serde::Serialize;
use serde_json::Value;
use std::fmt;

use super::{count_label, NOT_AVAILABLE};
use crate::models::records::MedicalHistoryRecord;
use crate::payload;

pub const EMPTY_NOTICE: &str = "No medical history records found for this patient.";
pub const NO_DIAGNOSIS: &str = "No Diagnosis Recorded";
pub const UNKNOWN_PATIENT: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub date: String,
    pub diagnosis: String,
    pub doctor: String,
    pub doctor_initials: Option<String>,
    pub notes: String,
}

impl From<MedicalHistoryRecord> for HistoryEntry {
    fn from(record: MedicalHistoryRecord) -> Self {
        let doctor_initials = record.doctor_initials();
        let or_na = |field: Option<String>| field.unwrap_or_else(|| NOT_AVAILABLE.to_string());
        Self {
            doctor_initials,
            date: or_na(record.date),
            diagnosis: record.diagnosis.unwrap_or_else(|| NO_DIAGNOSIS.to_string()),
            doctor: or_na(record.doctor),
            notes: or_na(record.notes),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalHistoryView {
    pub patient_name: String,
    pub count_label: String,
    pub entries: Vec<HistoryEntry>,
    pub empty_notice: Option<&'static str>,
    pub rejected: usize,
}

impl MedicalHistoryView {
    /// `history` may be the record array or the whole tool result
    pub fn render(patient_name: Option<&str>, history: &Value) -> Self {
        tracing::debug!(?patient_name, payload = %history, "rendering medical history");
        let patient_name = patient_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .or_else(|| history.get("patientName").and_then(Value::as_str))
            .unwrap_or(UNKNOWN_PATIENT)
            .to_string();

        let validated = payload::collect::<MedicalHistoryRecord, _>(history, |_| true);
        let entries: Vec<HistoryEntry> =
            validated.records.into_iter().map(HistoryEntry::from).collect();

        Self {
            patient_name,
            count_label: count_label(entries.len()),
            empty_notice: entries.is_empty().then_some(EMPTY_NOTICE),
            entries,
            rejected: validated.rejected,
        }
    }
}

impl fmt::Display for MedicalHistoryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Medical History")?;
        writeln!(f, "Patient: {}", self.patient_name)?;
        writeln!(f)?;
        if let Some(notice) = self.empty_notice {
            return writeln!(f, "_{}_", notice);
        }
        for entry in &self.entries {
            writeln!(f, "### {} ({})", entry.diagnosis, entry.date)?;
            match &entry.doctor_initials {
                Some(initials) => writeln!(f, "Attending Physician: {} [{}]", entry.doctor, initials)?,
                None => writeln!(f, "Attending Physician: {}", entry.doctor)?,
            }
            writeln!(f)?;
            writeln!(f, "> {}", entry.notes)?;
            writeln!(f)?;
        }
        Ok(())
    }
}
