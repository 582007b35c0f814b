//! Components the agent runtime can choose to render.
//!
//! The runtime decides which component to show and passes props, usually a
//! tool result verbatim. Each entry declares a default for every optional
//! prop and accepts anything it is handed.
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fmt;

use crate::errors::{ComponentError, ComponentResult};
use crate::forms::{
    AppointmentDraft, ClinicalRecordDraft, Draft, Form, FormContext, LiveForm,
    PatientRegistrationDraft, PrescriptionDraft, VitalsDraft, DEFAULT_DOCTOR_NAME,
};
use crate::models::role::Role;
use crate::session::SessionContext;
use crate::views::{AppointmentListView, MedicalHistoryView};

pub type Renderer = fn(&Value, &SessionContext) -> Rendered;

/// Output of a component
pub enum Rendered {
    AppointmentList(AppointmentListView),
    MedicalHistory(MedicalHistoryView),
    Form(Box<dyn LiveForm>),
}

impl Rendered {
    pub fn as_form_mut(&mut self) -> Option<&mut (dyn LiveForm + 'static)> {
        match self {
            Rendered::Form(form) => Some(form.as_mut()),
            _ => None,
        }
    }

    pub fn into_form(self) -> Option<Box<dyn LiveForm>> {
        match self {
            Rendered::Form(form) => Some(form),
            _ => None,
        }
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendered::AppointmentList(view) => fmt::Display::fmt(view, f),
            Rendered::MedicalHistory(view) => fmt::Display::fmt(view, f),
            Rendered::Form(form) => fmt::Display::fmt(&form.view(), f),
        }
    }
}

impl fmt::Debug for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendered::AppointmentList(view) => f.debug_tuple("AppointmentList").field(view).finish(),
            Rendered::MedicalHistory(view) => f.debug_tuple("MedicalHistory").field(view).finish(),
            Rendered::Form(form) => f.debug_tuple("Form").field(&form.view()).finish(),
        }
    }
}

/// What the agent runtime is told about a component
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub props_schema: Value,
}

pub struct ComponentSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub props_schema: Value,
    /// Prop that receives the payload when props are not an object
    pub payload_prop: Option<&'static str>,
    renderer: Renderer,
}

impl ComponentSpec {
    pub fn new(
        name: &'static str,
        description: &'static str,
        props_schema: Value,
        renderer: Renderer,
    ) -> Self {
        Self {
            name,
            description,
            props_schema,
            payload_prop: None,
            renderer,
        }
    }

    pub fn with_payload_prop(mut self, prop: &'static str) -> Self {
        self.payload_prop = Some(prop);
        self
    }

    pub fn definition(&self) -> ComponentDefinition {
        ComponentDefinition {
            name: self.name,
            description: self.description,
            props_schema: self.props_schema.clone(),
        }
    }

    /// Declared defaults, read from the schema's `default` entries
    pub fn defaults(&self) -> Map<String, Value> {
        self.props_schema
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| {
                props
                    .iter()
                    .filter_map(|(key, schema)| {
                        schema.get("default").map(|d| (key.clone(), d.clone()))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Fill in defaults for missing or null props. Non-object props are
    /// treated as the payload itself.
    pub fn resolve_props(&self, props: &Value) -> Value {
        let mut resolved = match (props, self.payload_prop) {
            (Value::Object(obj), _) => obj.clone(),
            (Value::Null, _) | (_, None) => Map::new(),
            (payload, Some(key)) => {
                let mut obj = Map::new();
                obj.insert(key.to_string(), payload.clone());
                obj
            }
        };
        for (key, default) in self.defaults() {
            let slot = resolved.entry(key).or_insert(Value::Null);
            if slot.is_null() {
                *slot = default;
            }
        }
        Value::Object(resolved)
    }

    pub fn render(&self, props: &Value, session: &SessionContext) -> Rendered {
        let resolved = self.resolve_props(props);
        tracing::debug!(component = self.name, props = %resolved, "rendering component");
        (self.renderer)(&resolved, session)
    }
}

#[derive(Default)]
pub struct ComponentRegistry {
    specs: Vec<ComponentSpec>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(appointment_list());
        registry.register(medical_history());
        registry.register(form_component::<AppointmentDraft>(
            "A form to schedule a new appointment for a patient.",
            json!({
                "patientName": {"type": "string", "default": ""},
                "doctorName": {"type": "string", "default": DEFAULT_DOCTOR_NAME}
            }),
        ));
        registry.register(form_component::<PrescriptionDraft>(
            "A form for doctors to write a new prescription.",
            json!({
                "patientId": {"type": "string", "default": ""},
                "patientName": {"type": "string", "default": ""},
                "doctorName": {"type": "string", "default": DEFAULT_DOCTOR_NAME}
            }),
        ));
        registry.register(form_component::<VitalsDraft>(
            "A form for nurses to record a patient's vital signs.",
            json!({
                "patientId": {"type": "string", "default": ""},
                "patientName": {"type": "string", "default": ""}
            }),
        ));
        registry.register(form_component::<ClinicalRecordDraft>(
            "A form to add a new clinical entry to a patient's medical history.",
            json!({
                "patientName": {"type": "string", "default": ""},
                "doctorName": {"type": "string", "default": DEFAULT_DOCTOR_NAME}
            }),
        ));
        registry.register(form_component::<PatientRegistrationDraft>(
            "A form to register a patient who is new to the clinic.",
            json!({}),
        ));
        registry
    }

    /// Add a component, replacing any earlier one with the same name
    pub fn register(&mut self, spec: ComponentSpec) {
        self.specs.retain(|existing| existing.name != spec.name);
        self.specs.push(spec);
    }

    pub fn get(&self, name: &str) -> Option<&ComponentSpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    pub fn definitions(&self) -> Vec<ComponentDefinition> {
        self.specs.iter().map(ComponentSpec::definition).collect()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.specs.iter().map(|spec| spec.name).collect()
    }

    pub fn render(
        &self,
        name: &str,
        props: &Value,
        session: &SessionContext,
    ) -> ComponentResult<Rendered> {
        let spec = self
            .get(name)
            .ok_or_else(|| ComponentError::ComponentNotFound(name.to_string()))?;
        Ok(spec.render(props, session))
    }
}

fn appointment_list() -> ComponentSpec {
    ComponentSpec::new(
        "AppointmentList",
        "Displays a list of appointments with actions depending on the viewer's role.",
        json!({
            "type": "object",
            "properties": {
                "appointments": {"type": "array", "items": {}, "default": []},
                "role": {
                    "type": "string",
                    "enum": ["doctor", "nurse", "patient"],
                    "description": "Viewer role. Defaults to the active session role when absent."
                }
            }
        }),
        |props, session| {
            // An explicit role prop wins; otherwise the session decides
            let role = match props.get("role") {
                Some(Value::String(raw)) => Role::from_loose(Some(raw.as_str())),
                _ => session.role(),
            };
            let appointments = props.get("appointments").cloned().unwrap_or_default();
            Rendered::AppointmentList(AppointmentListView::render(&appointments, role))
        },
    )
    .with_payload_prop("appointments")
}

fn medical_history() -> ComponentSpec {
    ComponentSpec::new(
        "MedicalHistory",
        "Displays the medical history records of a patient.",
        json!({
            "type": "object",
            "properties": {
                "patientName": {"type": "string", "default": ""},
                "history": {"type": "array", "items": {}, "default": []}
            }
        }),
        |props, _session| {
            let patient_name = props.get("patientName").and_then(Value::as_str);
            let history = props.get("history").cloned().unwrap_or_default();
            Rendered::MedicalHistory(MedicalHistoryView::render(patient_name, &history))
        },
    )
    .with_payload_prop("history")
}

fn form_component<D: Draft>(description: &'static str, properties: Value) -> ComponentSpec {
    ComponentSpec::new(
        D::COMPONENT,
        description,
        json!({"type": "object", "properties": properties}),
        |props, _session| Rendered::Form(Box::new(Form::<D>::new(FormContext::from_props(props)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FormState;

    fn doctor() -> SessionContext {
        SessionContext::new(Role::Doctor)
    }

    #[test]
    fn test_registered_components() {
        let registry = ComponentRegistry::with_defaults();
        assert_eq!(
            registry.names(),
            vec![
                "AppointmentList",
                "MedicalHistory",
                "AppointmentForm",
                "PrescriptionForm",
                "VitalsForm",
                "MedicalRecordForm",
                "NewPatientForm"
            ]
        );
    }

    #[test]
    fn test_defaults_fill_missing_and_null_props() {
        let registry = ComponentRegistry::with_defaults();
        let spec = registry.get("MedicalRecordForm").unwrap();

        let resolved = spec.resolve_props(&json!({"patientName": "John Doe", "doctorName": null}));
        assert_eq!(
            resolved,
            json!({"patientName": "John Doe", "doctorName": "Sarah"})
        );
        assert_eq!(
            spec.resolve_props(&Value::Null),
            json!({"patientName": "", "doctorName": "Sarah"})
        );
    }

    #[test]
    fn test_bare_payload_goes_to_payload_prop() {
        let registry = ComponentRegistry::with_defaults();
        let spec = registry.get("AppointmentList").unwrap();
        assert_eq!(
            spec.resolve_props(&json!([{"id": "1"}])),
            json!({"appointments": [{"id": "1"}]})
        );
    }

    #[test]
    fn test_role_prop_is_left_for_the_session() {
        let registry = ComponentRegistry::with_defaults();
        let spec = registry.get("AppointmentList").unwrap();

        let role_schema = &spec.props_schema["properties"]["role"];
        assert!(role_schema.get("default").is_none());
        assert!(role_schema["description"]
            .as_str()
            .unwrap()
            .contains("session role"));
        assert_eq!(
            spec.resolve_props(&json!({})),
            json!({"appointments": []})
        );
    }

    #[test]
    fn test_list_uses_session_role_when_prop_absent() {
        let registry = ComponentRegistry::with_defaults();
        let props = json!({"appointments": {"appointments": [{"id": "1", "status": "scheduled"}]}});

        let rendered = registry.render("AppointmentList", &props, &doctor()).unwrap();
        match rendered {
            Rendered::AppointmentList(view) => {
                assert_eq!(view.role, Role::Doctor);
                assert!(view.entries[0].has_action("Prescribe"));
            }
            other => panic!("Expected appointment list, got {:?}", other),
        }

        let props = json!({"appointments": [{"id": "1"}], "role": "NURSE"});
        match registry.render("AppointmentList", &props, &doctor()).unwrap() {
            Rendered::AppointmentList(view) => assert_eq!(view.role, Role::Nurse),
            other => panic!("Expected appointment list, got {:?}", other),
        }
    }

    #[test]
    fn test_history_accepts_whole_tool_result() {
        let registry = ComponentRegistry::with_defaults();
        let tool_output = json!({"patientName": "John Doe", "history": [{"diagnosis": "Flu"}]});

        match registry.render("MedicalHistory", &tool_output, &doctor()).unwrap() {
            Rendered::MedicalHistory(view) => {
                assert_eq!(view.patient_name, "John Doe");
                assert_eq!(view.entries.len(), 1);
            }
            other => panic!("Expected history, got {:?}", other),
        }
    }

    #[test]
    fn test_form_components_start_editing() {
        let registry = ComponentRegistry::with_defaults();
        let mut rendered = registry
            .render("AppointmentForm", &json!({"patientName": "John Doe"}), &doctor())
            .unwrap();

        let form = rendered.as_form_mut().unwrap();
        assert_eq!(form.state(), FormState::Editing);
        assert_eq!(form.value("patientName").as_deref(), Some("John Doe"));
        assert!(rendered.to_string().contains("Care Coordinator Interface, Dr. Sarah"));
    }

    #[test]
    fn test_unknown_component() {
        let registry = ComponentRegistry::with_defaults();
        let err = registry
            .render("Dashboard", &json!({}), &doctor())
            .unwrap_err();
        assert_eq!(err, ComponentError::ComponentNotFound("Dashboard".into()));
    }

    #[test]
    fn test_definitions_serialize_props_schema() {
        let registry = ComponentRegistry::with_defaults();
        let definitions = serde_json::to_value(registry.definitions()).unwrap();
        assert_eq!(definitions[0]["name"], json!("AppointmentList"));
        assert!(definitions[0]["propsSchema"]["properties"]["appointments"].is_object());
    }
}
