use serde::Serialize;
use serde_json::Value;
use std::fmt;

use super::{count_label, Action, NOT_AVAILABLE};
use crate::models::records::{Appointment, AppointmentStatus};
use crate::models::role::Role;
use crate::payload;

pub const EMPTY_NOTICE: &str = "No appointments found.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentEntry {
    pub id: String,
    pub patient_name: String,
    pub time: String,
    pub reason: String,
    pub status: AppointmentStatus,
    pub room: Option<String>,
    pub doctor: Option<String>,
    pub actions: Vec<Action>,
}

impl AppointmentEntry {
    pub fn has_action(&self, label: &str) -> bool {
        self.actions.iter().any(|action| action.label == label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentListView {
    pub role: Role,
    pub title: &'static str,
    pub count_label: String,
    pub entries: Vec<AppointmentEntry>,
    pub empty_notice: Option<&'static str>,
    pub rejected: usize,
}

pub fn title_for(role: Role) -> &'static str {
    match role {
        Role::Doctor => "Today's Schedule",
        Role::Nurse => "Pending Tasks",
        Role::Patient => "My Appointments",
    }
}

/// Which actions a role gets for an appointment
pub fn actions_for(role: Role, status: AppointmentStatus) -> Vec<Action> {
    match role {
        Role::Doctor => vec![Action::CHECK_HISTORY, Action::PRESCRIBE],
        Role::Nurse if status != AppointmentStatus::Completed => vec![Action::RECORD_VITALS],
        Role::Nurse | Role::Patient => Vec::new(),
    }
}

impl AppointmentListView {
    pub fn render(raw: &Value, role: Role) -> Self {
        tracing::debug!(%role, payload = %raw, "rendering appointment list");
        let validated = payload::collect::<Appointment, _>(raw, Appointment::has_identity);

        let entries: Vec<AppointmentEntry> = validated
            .records
            .into_iter()
            .map(|appt| AppointmentEntry {
                actions: actions_for(role, appt.status),
                id: appt.id,
                patient_name: appt.patient_name.unwrap_or_else(|| "Unknown".to_string()),
                time: appt.time.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                reason: appt.reason.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                status: appt.status,
                room: appt.room,
                doctor: appt.doctor,
            })
            .collect();

        Self {
            role,
            title: title_for(role),
            count_label: count_label(entries.len()),
            empty_notice: entries.is_empty().then_some(EMPTY_NOTICE),
            entries,
            rejected: validated.rejected,
        }
    }
}

impl fmt::Display for AppointmentListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} ({})", self.title, self.count_label)?;
        writeln!(f)?;
        if let Some(notice) = self.empty_notice {
            return writeln!(f, "_{}_", notice);
        }
        for entry in &self.entries {
            write!(f, "- **{}**", entry.patient_name)?;
            if let Some(room) = &entry.room {
                write!(f, " `Room {}`", room)?;
            }
            writeln!(f)?;
            writeln!(f, "  {} | _{}_", entry.time, entry.reason)?;
            if let Some(doctor) = &entry.doctor {
                writeln!(f, "  Doctor: {}", doctor)?;
            }
            if !entry.actions.is_empty() {
                let labels: Vec<String> = entry
                    .actions
                    .iter()
                    .map(|action| format!("[{}]", action.label))
                    .collect();
                writeln!(f, "  {}", labels.join(" "))?;
            }
        }
        Ok(())
    }
}
