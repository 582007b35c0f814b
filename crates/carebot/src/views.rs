//! Display components for tool results.
//!
//! Renderers accept whatever the agent runtime passes through from a tool,
//! normalize it, and produce plain view structs. Views print as Markdown.
use serde::Serialize;

pub mod appointment_list;
pub mod medical_history;

pub use appointment_list::{AppointmentEntry, AppointmentListView};
pub use medical_history::{HistoryEntry, MedicalHistoryView};

pub const NOT_AVAILABLE: &str = "N/A";

/// Something the viewer can do with an entry, opening another component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Action {
    pub label: &'static str,
    pub component: &'static str,
}

impl Action {
    pub const CHECK_HISTORY: Action = Action {
        label: "Check History",
        component: "MedicalHistory",
    };
    pub const PRESCRIBE: Action = Action {
        label: "Prescribe",
        component: "PrescriptionForm",
    };
    pub const RECORD_VITALS: Action = Action {
        label: "Record Vitals",
        component: "VitalsForm",
    };
}

/// "1 Entry", "3 Entries"
pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 Entry".to_string()
    } else {
        format!("{} Entries", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_label() {
        assert_eq!(count_label(0), "0 Entries");
        assert_eq!(count_label(1), "1 Entry");
        assert_eq!(count_label(12), "12 Entries");
    }
}
