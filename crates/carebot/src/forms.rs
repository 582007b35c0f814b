//! Data-entry forms.
//!
//! Every form is a two-state machine. It starts in [`FormState::Editing`]
//! and moves to [`FormState::Submitted`] only through a successful
//! [`Form::submit`], which calls the completion callback exactly once.
//! [`Form::reset`] starts a fresh entry from the original context.
use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::errors::{FormError, FormResult};

pub mod appointment;
pub mod clinical_record;
pub mod patient_registration;
pub mod prescription;
pub mod vitals;

pub use appointment::AppointmentDraft;
pub use clinical_record::ClinicalRecordDraft;
pub use patient_registration::PatientRegistrationDraft;
pub use prescription::PrescriptionDraft;
pub use vitals::VitalsDraft;

pub const DEFAULT_DOCTOR_NAME: &str = "Sarah";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormState {
    Editing,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub placeholder: &'static str,
    pub choices: &'static [&'static str],
    pub multiline: bool,
}

impl FieldSpec {
    pub const fn text(name: &'static str, label: &'static str, placeholder: &'static str) -> Self {
        Self {
            name,
            label,
            required: false,
            placeholder,
            choices: &[],
            multiline: false,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    pub const fn choices(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = choices;
        self
    }

    /// Canonical spelling of `value` if this field restricts its input
    fn accept(&self, value: &str) -> Option<String> {
        if self.choices.is_empty() {
            return Some(value.to_string());
        }
        self.choices
            .iter()
            .find(|choice| choice.eq_ignore_ascii_case(value.trim()))
            .map(|choice| choice.to_string())
    }
}

/// Context supplied by whoever opens the form
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormContext {
    pub patient_name: String,
    pub patient_id: Option<String>,
    pub doctor_name: String,
}

impl Default for FormContext {
    fn default() -> Self {
        Self {
            patient_name: String::new(),
            patient_id: None,
            doctor_name: DEFAULT_DOCTOR_NAME.to_string(),
        }
    }
}

impl FormContext {
    pub fn for_patient<S: Into<String>>(patient_name: S) -> Self {
        Self {
            patient_name: patient_name.into(),
            ..Default::default()
        }
    }

    /// Read the context out of component props (`patientName`, `patientId`,
    /// `doctorName`), keeping defaults for anything missing or blank.
    pub fn from_props(props: &Value) -> Self {
        let text = |key: &str| {
            props
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        };
        let defaults = Self::default();
        Self {
            patient_name: text("patientName").unwrap_or(defaults.patient_name),
            patient_id: text("patientId"),
            doctor_name: text("doctorName").unwrap_or(defaults.doctor_name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Confirmation {
    pub title: &'static str,
    pub message: String,
    pub reset_label: &'static str,
}

/// The values a form collects
pub trait Draft: Clone + Serialize + Send + 'static {
    /// Component name the form is registered under
    const COMPONENT: &'static str;
    const TITLE: &'static str;

    fn fields() -> &'static [FieldSpec];

    /// A fresh draft seeded from the context
    fn from_context(context: &FormContext) -> Self;

    fn value(&self, field: &str) -> Option<&str>;

    fn value_mut(&mut self, field: &str) -> Option<&mut String>;

    fn confirmation(&self, context: &FormContext) -> Confirmation;

    fn subtitle(_context: &FormContext) -> Option<String> {
        None
    }

    fn notice() -> Option<&'static str> {
        None
    }
}

pub type SubmitCallback<D> = Box<dyn FnMut(&D) + Send>;

pub struct Form<D: Draft> {
    context: FormContext,
    draft: D,
    state: FormState,
    on_submit: SubmitCallback<D>,
}

impl<D: Draft> Form<D> {
    pub fn new(context: FormContext) -> Self {
        Self {
            draft: D::from_context(&context),
            context,
            state: FormState::Editing,
            on_submit: Box::new(|_| {}),
        }
    }

    pub fn with_callback<F>(mut self, on_submit: F) -> Self
    where
        F: FnMut(&D) + Send + 'static,
    {
        self.on_submit = Box::new(on_submit);
        self
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn set(&mut self, field: &str, value: &str) -> FormResult<()> {
        if self.state == FormState::Submitted {
            return Err(FormError::AlreadySubmitted);
        }
        let spec = D::fields()
            .iter()
            .find(|spec| spec.name == field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?;
        let accepted = spec.accept(value).ok_or_else(|| FormError::InvalidChoice {
            field: field.to_string(),
            value: value.to_string(),
        })?;
        let slot = self
            .draft
            .value_mut(field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?;
        *slot = accepted;
        Ok(())
    }

    /// Required fields that are still blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        D::fields()
            .iter()
            .filter(|spec| spec.required)
            .filter(|spec| {
                self.draft
                    .value(spec.name)
                    .map_or(true, |value| value.trim().is_empty())
            })
            .map(|spec| spec.name)
            .collect()
    }

    pub fn submit(&mut self) -> FormResult<&D> {
        if self.state == FormState::Submitted {
            return Err(FormError::AlreadySubmitted);
        }
        let missing = self.missing_fields();
        if !missing.is_empty() {
            tracing::debug!(form = D::COMPONENT, ?missing, "submission rejected");
            return Err(FormError::MissingFields(
                missing.into_iter().map(String::from).collect(),
            ));
        }
        (self.on_submit)(&self.draft);
        self.state = FormState::Submitted;
        tracing::info!(form = D::COMPONENT, "form submitted");
        Ok(&self.draft)
    }

    /// Start another entry with the original context
    pub fn reset(&mut self) {
        self.draft = D::from_context(&self.context);
        self.state = FormState::Editing;
    }

    /// Throw away the current draft. A submitted form stays submitted.
    pub fn cancel(&mut self) {
        if self.state == FormState::Editing {
            self.draft = D::from_context(&self.context);
        }
    }

    pub fn confirmation(&self) -> Option<Confirmation> {
        (self.state == FormState::Submitted).then(|| self.draft.confirmation(&self.context))
    }

    pub fn view(&self) -> FormView {
        let missing = self.missing_fields();
        FormView {
            component: D::COMPONENT,
            title: D::TITLE,
            subtitle: D::subtitle(&self.context),
            notice: D::notice(),
            state: self.state,
            fields: D::fields()
                .iter()
                .map(|spec| FieldView {
                    spec: *spec,
                    value: self.draft.value(spec.name).unwrap_or_default().to_string(),
                    missing: missing.contains(&spec.name),
                })
                .collect(),
            confirmation: self.confirmation(),
        }
    }
}

/// Object-safe view of a form, so forms of different kinds can be handed
/// out by the component registry.
pub trait LiveForm: Send {
    fn component(&self) -> &'static str;
    fn state(&self) -> FormState;
    fn fields(&self) -> &'static [FieldSpec];
    fn value(&self, field: &str) -> Option<String>;
    fn set(&mut self, field: &str, value: &str) -> FormResult<()>;
    /// Submit and return the submitted draft as JSON
    fn submit(&mut self) -> FormResult<Value>;
    fn reset(&mut self);
    fn cancel(&mut self);
    fn view(&self) -> FormView;
}

impl<D: Draft> LiveForm for Form<D> {
    fn component(&self) -> &'static str {
        D::COMPONENT
    }

    fn state(&self) -> FormState {
        Form::state(self)
    }

    fn fields(&self) -> &'static [FieldSpec] {
        D::fields()
    }

    fn value(&self, field: &str) -> Option<String> {
        self.draft.value(field).map(String::from)
    }

    fn set(&mut self, field: &str, value: &str) -> FormResult<()> {
        Form::set(self, field, value)
    }

    fn submit(&mut self) -> FormResult<Value> {
        let draft = Form::submit(self)?;
        // Drafts are flat string structs, serialization cannot fail
        Ok(serde_json::to_value(draft).unwrap_or(Value::Null))
    }

    fn reset(&mut self) {
        Form::reset(self)
    }

    fn cancel(&mut self) {
        Form::cancel(self)
    }

    fn view(&self) -> FormView {
        Form::view(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    #[serde(flatten)]
    pub spec: FieldSpec,
    pub value: String,
    pub missing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    pub component: &'static str,
    pub title: &'static str,
    pub subtitle: Option<String>,
    pub notice: Option<&'static str>,
    pub state: FormState,
    pub fields: Vec<FieldView>,
    pub confirmation: Option<Confirmation>,
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(confirmation) = &self.confirmation {
            writeln!(f, "## {}", confirmation.title)?;
            writeln!(f)?;
            writeln!(f, "{}", confirmation.message)?;
            writeln!(f)?;
            return writeln!(f, "_{}_", confirmation.reset_label);
        }

        writeln!(f, "## {}", self.title)?;
        if let Some(subtitle) = &self.subtitle {
            writeln!(f, "{}", subtitle)?;
        }
        writeln!(f)?;
        for field in &self.fields {
            let marker = if field.spec.required { "*" } else { "" };
            let value = if field.value.is_empty() {
                format!("_{}_", field.spec.placeholder)
            } else {
                field.value.clone()
            };
            writeln!(f, "- **{}{}**: {}", field.spec.label, marker, value)?;
        }
        if let Some(notice) = self.notice {
            writeln!(f)?;
            writeln!(f, "> {}", notice)?;
        }
        Ok(())
    }
}
