use serde::Serialize;

use super::{Confirmation, Draft, FieldSpec, FormContext};

pub const GENDERS: &[&str] = &["Male", "Female", "Other"];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("name", "Full Name", "e.g. Jane Doe").required(),
    FieldSpec::text("dob", "Date of Birth", "YYYY-MM-DD").required(),
    FieldSpec::text("gender", "Gender", "Male").choices(GENDERS),
    FieldSpec::text(
        "notes",
        "Initial Notes",
        "Describe initial symptoms or reason for visit...",
    )
    .multiline(),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientRegistrationDraft {
    pub name: String,
    pub dob: String,
    pub gender: String,
    pub notes: String,
}

impl Draft for PatientRegistrationDraft {
    const COMPONENT: &'static str = "NewPatientForm";
    const TITLE: &'static str = "Register New Patient";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn from_context(_context: &FormContext) -> Self {
        Self {
            name: String::new(),
            dob: String::new(),
            gender: GENDERS[0].to_string(),
            notes: String::new(),
        }
    }

    fn value(&self, field: &str) -> Option<&str> {
        match field {
            "name" => Some(&self.name),
            "dob" => Some(&self.dob),
            "gender" => Some(&self.gender),
            "notes" => Some(&self.notes),
            _ => None,
        }
    }

    fn value_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "name" => Some(&mut self.name),
            "dob" => Some(&mut self.dob),
            "gender" => Some(&mut self.gender),
            "notes" => Some(&mut self.notes),
            _ => None,
        }
    }

    fn confirmation(&self, _context: &FormContext) -> Confirmation {
        Confirmation {
            title: "Patient Registered",
            message: format!("Patient **{}** added successfully.", self.name),
            reset_label: "Register Another",
        }
    }
}
