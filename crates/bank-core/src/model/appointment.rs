//! # Appointment
//!
//! A meeting scheduled with an advisor and/or a manager. The advisor and
//! manager associations are boxed because those shapes in turn carry their
//! appointment lists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{merge_required, Entity, MergePatch};
use crate::identity::{AdvisorId, AppointmentId, ManagerId};
use crate::model::advisor::Advisor;
use crate::model::manager::Manager;
use crate::nullable::Nullable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AppointmentId>,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    #[schema(value_type = Option<String>)]
    pub reason: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    #[schema(value_type = Option<Object>)]
    pub advisor: Nullable<Box<Advisor>>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    #[schema(value_type = Option<Object>)]
    pub manager: Nullable<Box<Manager>>,
}

impl Appointment {
    pub fn new(
        id: Option<AppointmentId>,
        date: DateTime<Utc>,
        reason: Nullable<String>,
        advisor: Nullable<Advisor>,
        manager: Nullable<Manager>,
    ) -> Self {
        Self {
            id,
            date,
            reason,
            advisor: advisor.map(Box::new),
            manager: manager.map(Box::new),
        }
    }

    /// Identifier of the linked advisor, if one is linked and persisted.
    pub fn advisor_id(&self) -> Option<AdvisorId> {
        self.advisor.value().and_then(|a| a.id)
    }

    /// Identifier of the linked manager, if one is linked and persisted.
    pub fn manager_id(&self) -> Option<ManagerId> {
        self.manager.value().and_then(|m| m.id)
    }
}

/// Merge-patch body for [`Appointment`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPatch {
    #[serde(default)]
    pub id: Option<AppointmentId>,
    #[serde(default)]
    pub date: Nullable<DateTime<Utc>>,
    #[serde(default)]
    pub reason: Nullable<String>,
    #[serde(default)]
    pub advisor: Nullable<Box<Advisor>>,
    #[serde(default)]
    pub manager: Nullable<Box<Manager>>,
}

impl Entity for Appointment {
    type Id = AppointmentId;
    const NAME: &'static str = "appointment";

    fn identifier(&self) -> Option<AppointmentId> {
        self.id
    }

    fn set_identifier(&mut self, id: AppointmentId) {
        self.id = Some(id);
    }
}

impl MergePatch for Appointment {
    type Patch = AppointmentPatch;

    fn patch_identifier(patch: &AppointmentPatch) -> Option<AppointmentId> {
        patch.id
    }

    fn merge(&mut self, patch: AppointmentPatch) {
        merge_required(&mut self.date, patch.date);
        self.reason.merge(patch.reason);
        self.advisor.merge(patch.advisor);
        self.manager.merge(patch.manager);
    }
}
