use serde::Serialize;

use super::{Confirmation, Draft, FieldSpec, FormContext};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("bp", "Blood Pressure", "120/80"),
    FieldSpec::text("temp", "Temperature", "98.6"),
    FieldSpec::text("weight", "Weight", "70"),
    FieldSpec::text("heartRate", "Heart Rate", "72"),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalsDraft {
    pub bp: String,
    pub temp: String,
    pub heart_rate: String,
    pub weight: String,
}

impl Draft for VitalsDraft {
    const COMPONENT: &'static str = "VitalsForm";
    const TITLE: &'static str = "Record Vitals";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn from_context(_context: &FormContext) -> Self {
        Self::default()
    }

    fn value(&self, field: &str) -> Option<&str> {
        match field {
            "bp" => Some(&self.bp),
            "temp" => Some(&self.temp),
            "heartRate" => Some(&self.heart_rate),
            "weight" => Some(&self.weight),
            _ => None,
        }
    }

    fn value_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "bp" => Some(&mut self.bp),
            "temp" => Some(&mut self.temp),
            "heartRate" => Some(&mut self.heart_rate),
            "weight" => Some(&mut self.weight),
            _ => None,
        }
    }

    fn confirmation(&self, context: &FormContext) -> Confirmation {
        Confirmation {
            title: "Vitals Recorded",
            message: format!(
                "Medical record for **{}** has been updated successfully.",
                context.patient_name
            ),
            reset_label: "Record Another",
        }
    }

    fn subtitle(context: &FormContext) -> Option<String> {
        Some(format!("Patient: {}", context.patient_name))
    }
}
