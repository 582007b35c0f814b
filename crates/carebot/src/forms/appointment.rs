use serde::Serialize;

use super::{Confirmation, Draft, FieldSpec, FormContext};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("patientName", "Patient Name", "e.g. John Doe").required(),
    FieldSpec::text("date", "Date", "YYYY-MM-DD").required(),
    FieldSpec::text("time", "Time", "HH:MM").required(),
    FieldSpec::text("reason", "Reason for Visit", "Consultation details...")
        .required()
        .multiline(),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDraft {
    pub patient_name: String,
    pub date: String,
    pub time: String,
    pub reason: String,
}

impl Draft for AppointmentDraft {
    const COMPONENT: &'static str = "AppointmentForm";
    const TITLE: &'static str = "Schedule Appointment";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn from_context(context: &FormContext) -> Self {
        Self {
            patient_name: context.patient_name.clone(),
            ..Default::default()
        }
    }

    fn value(&self, field: &str) -> Option<&str> {
        match field {
            "patientName" => Some(&self.patient_name),
            "date" => Some(&self.date),
            "time" => Some(&self.time),
            "reason" => Some(&self.reason),
            _ => None,
        }
    }

    fn value_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "patientName" => Some(&mut self.patient_name),
            "date" => Some(&mut self.date),
            "time" => Some(&mut self.time),
            "reason" => Some(&mut self.reason),
            _ => None,
        }
    }

    fn confirmation(&self, _context: &FormContext) -> Confirmation {
        Confirmation {
            title: "Appointment Scheduled",
            message: format!(
                "A new session has been booked for **{}** on {} at {}.",
                self.patient_name, self.date, self.time
            ),
            reset_label: "Schedule Another",
        }
    }

    fn subtitle(context: &FormContext) -> Option<String> {
        Some(format!("Care Coordinator Interface, Dr. {}", context.doctor_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{Form, FormState};

    #[test]
    fn test_prefilled_patient_counts_as_filled() {
        let mut form = Form::<AppointmentDraft>::new(FormContext::for_patient("John Doe"));
        assert_eq!(form.missing_fields(), vec!["date", "time", "reason"]);

        form.set("date", "2026-10-20").unwrap();
        form.set("time", "14:30").unwrap();
        form.set("reason", "Annual check-up").unwrap();
        form.submit().unwrap();

        assert_eq!(form.state(), FormState::Submitted);
        let confirmation = form.confirmation().unwrap();
        assert_eq!(
            confirmation.message,
            "A new session has been booked for **John Doe** on 2026-10-20 at 14:30."
        );
        assert_eq!(confirmation.reset_label, "Schedule Another");
    }
}
