use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::models::role::Role;

/// The person behind a role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Persona {
    pub id: &'static str,
    pub name: &'static str,
    pub role: Role,
}

impl Persona {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Doctor => Persona {
                id: "doctor",
                name: "Dr. Sarah",
                role,
            },
            Role::Nurse => Persona {
                id: "nurse",
                name: "Nurse Mike",
                role,
            },
            Role::Patient => Persona {
                id: "patient",
                name: "John Doe",
                role,
            },
        }
    }
}

/// A canned prompt offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub label: &'static str,
    pub prompt: &'static str,
}

const DOCTOR_SUGGESTIONS: &[Suggestion] = &[
    Suggestion {
        label: "Check my schedule",
        prompt: "Show me my schedule for today",
    },
    Suggestion {
        label: "Medical history",
        prompt: "View medical history for John Doe",
    },
    Suggestion {
        label: "New prescription",
        prompt: "I need to write a new prescription",
    },
];

const NURSE_SUGGESTIONS: &[Suggestion] = &[
    Suggestion {
        label: "Pending tasks",
        prompt: "Show me my pending tasks for today",
    },
    Suggestion {
        label: "Record vitals",
        prompt: "I need to record patient vitals",
    },
    Suggestion {
        label: "Add patient",
        prompt: "Register a new patient in the system",
    },
];

const PATIENT_SUGGESTIONS: &[Suggestion] = &[
    Suggestion {
        label: "My appointments",
        prompt: "See my upcoming appointments",
    },
    Suggestion {
        label: "Medical advice",
        prompt: "I have a question about my medication",
    },
    Suggestion {
        label: "Talk to assistant",
        prompt: "Connect me with a health assistant",
    },
];

pub fn suggestions(role: Role) -> &'static [Suggestion] {
    match role {
        Role::Doctor => DOCTOR_SUGGESTIONS,
        Role::Nurse => NURSE_SUGGESTIONS,
        Role::Patient => PATIENT_SUGGESTIONS,
    }
}

/// Who the session is acting for. Never mutated; a role switch builds a
/// new context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionContext {
    pub persona: Persona,
    pub started_at: DateTime<Utc>,
}

impl SessionContext {
    pub fn new(role: Role) -> Self {
        Self {
            persona: Persona::for_role(role),
            started_at: Utc::now(),
        }
    }

    pub fn role(&self) -> Role {
        self.persona.role
    }

    pub fn suggestions(&self) -> &'static [Suggestion] {
        suggestions(self.role())
    }

    /// The user description handed to the agent runtime
    pub fn user_context(&self) -> Value {
        json!({
            "role": self.persona.role,
            "name": self.persona.name,
            "id": self.persona.id,
        })
    }
}

/// Holds the active context for one user session
#[derive(Debug, Clone)]
pub struct Session {
    context: Arc<SessionContext>,
}

impl Session {
    pub fn new(role: Role) -> Self {
        Self {
            context: Arc::new(SessionContext::new(role)),
        }
    }

    pub fn context(&self) -> Arc<SessionContext> {
        self.context.clone()
    }

    pub fn role(&self) -> Role {
        self.context.role()
    }

    /// Replace the context wholesale. Holders of the previous context keep
    /// seeing the old role.
    pub fn switch_role(&mut self, role: Role) -> Arc<SessionContext> {
        tracing::info!(from = %self.context.role(), to = %role, "switching role");
        self.context = Arc::new(SessionContext::new(role));
        self.context.clone()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Role::Doctor)
    }
}
