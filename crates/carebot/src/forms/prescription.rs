use serde::Serialize;

use super::{Confirmation, Draft, FieldSpec, FormContext};

pub const FREQUENCIES: &[&str] = &["Once daily", "Twice daily", "Three times daily", "As needed"];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("medication", "Medication", "e.g. Amoxicillin").required(),
    FieldSpec::text("dosage", "Dosage", "500mg").required(),
    FieldSpec::text("frequency", "Frequency", "Once daily").choices(FREQUENCIES),
    FieldSpec::text("instructions", "Instructions", "Take with food, avoid alcohol...").multiline(),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionDraft {
    pub medication: String,
    pub dosage: String,
    pub frequency: String,
    pub instructions: String,
}

impl Draft for PrescriptionDraft {
    const COMPONENT: &'static str = "PrescriptionForm";
    const TITLE: &'static str = "New Prescription";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn from_context(_context: &FormContext) -> Self {
        Self {
            medication: String::new(),
            dosage: String::new(),
            frequency: FREQUENCIES[0].to_string(),
            instructions: String::new(),
        }
    }

    fn value(&self, field: &str) -> Option<&str> {
        match field {
            "medication" => Some(&self.medication),
            "dosage" => Some(&self.dosage),
            "frequency" => Some(&self.frequency),
            "instructions" => Some(&self.instructions),
            _ => None,
        }
    }

    fn value_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "medication" => Some(&mut self.medication),
            "dosage" => Some(&mut self.dosage),
            "frequency" => Some(&mut self.frequency),
            "instructions" => Some(&mut self.instructions),
            _ => None,
        }
    }

    fn confirmation(&self, context: &FormContext) -> Confirmation {
        Confirmation {
            title: "Prescription Sent",
            message: format!(
                "Prescription for **{}** has been sent to the pharmacy for **{}**.",
                self.medication, context.patient_name
            ),
            reset_label: "Write Another",
        }
    }

    fn subtitle(context: &FormContext) -> Option<String> {
        let patient = match &context.patient_id {
            Some(id) => format!("{} ({})", context.patient_name, id),
            None => context.patient_name.clone(),
        };
        Some(format!("Dr. {}, Patient: {}", context.doctor_name, patient))
    }

    fn notice() -> Option<&'static str> {
        Some("CRITICAL: Verify medication, dosage, and patient allergies before authorization. This action is recorded.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FormError;
    use crate::forms::Form;

    #[test]
    fn test_frequency_defaults_and_is_optional() {
        let mut form = Form::<PrescriptionDraft>::new(FormContext::for_patient("John Doe"));
        assert_eq!(form.draft().frequency, "Once daily");
        assert_eq!(
            form.submit().unwrap_err(),
            FormError::MissingFields(vec!["medication".into(), "dosage".into()])
        );

        form.set("medication", "Amoxicillin").unwrap();
        form.set("dosage", "500mg").unwrap();
        let draft = form.submit().unwrap().clone();
        assert_eq!(draft.instructions, "");

        let confirmation = form.confirmation().unwrap();
        assert!(confirmation.message.contains("**Amoxicillin**"));
        assert!(confirmation.message.contains("**John Doe**"));
    }

    #[test]
    fn test_subtitle_includes_patient_id() {
        let context = FormContext {
            patient_id: Some("p-17".into()),
            ..FormContext::for_patient("John Doe")
        };
        assert_eq!(
            PrescriptionDraft::subtitle(&context).unwrap(),
            "Dr. Sarah, Patient: John Doe (p-17)"
        );
    }
}
