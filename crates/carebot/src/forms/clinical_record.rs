use serde::Serialize;

use super::{Confirmation, Draft, FieldSpec, FormContext};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("patientName", "Patient Name", "e.g. John Doe").required(),
    FieldSpec::text("diagnosis", "Diagnosis", "e.g. Chronic Hypertension").required(),
    FieldSpec::text("doctor", "Attending Physician", "Dr. Sarah").required(),
    FieldSpec::text(
        "notes",
        "Clinical Notes",
        "Detailed notes on patient condition, symptoms, and plan...",
    )
    .required()
    .multiline(),
];

/// A new entry for a patient's medical history
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalRecordDraft {
    pub patient_name: String,
    pub diagnosis: String,
    pub doctor: String,
    pub notes: String,
}

impl Draft for ClinicalRecordDraft {
    const COMPONENT: &'static str = "MedicalRecordForm";
    const TITLE: &'static str = "Add Clinical Entry";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn from_context(context: &FormContext) -> Self {
        Self {
            patient_name: context.patient_name.clone(),
            doctor: context.doctor_name.clone(),
            ..Default::default()
        }
    }

    fn value(&self, field: &str) -> Option<&str> {
        match field {
            "patientName" => Some(&self.patient_name),
            "diagnosis" => Some(&self.diagnosis),
            "doctor" => Some(&self.doctor),
            "notes" => Some(&self.notes),
            _ => None,
        }
    }

    fn value_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "patientName" => Some(&mut self.patient_name),
            "diagnosis" => Some(&mut self.diagnosis),
            "doctor" => Some(&mut self.doctor),
            "notes" => Some(&mut self.notes),
            _ => None,
        }
    }

    fn confirmation(&self, _context: &FormContext) -> Confirmation {
        Confirmation {
            title: "Record Saved",
            message: format!(
                "New clinical history entry for **{}** has been saved successfully.",
                self.patient_name
            ),
            reset_label: "Add Another Entry",
        }
    }

    fn subtitle(_context: &FormContext) -> Option<String> {
        Some("Clinical Note Interface".to_string())
    }
}
