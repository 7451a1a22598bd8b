//! Manager shape: an agency manager staff record, shaped like an advisor.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{merge_required, Entity, MergePatch};
use crate::gender::Gender;
use crate::identity::ManagerId;
use crate::model::agency::Agency;
use crate::model::appointment::Appointment;
use crate::model::user::User;
use crate::nullable::Nullable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Manager {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ManagerId>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    #[schema(value_type = Option<Gender>)]
    pub gender: Nullable<Gender>,
    pub telephone: String,
    pub user: User,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    #[schema(value_type = Option<Agency>)]
    pub agency: Nullable<Agency>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    #[schema(value_type = Option<Vec<Appointment>>)]
    pub appointments: Nullable<Vec<Appointment>>,
}

impl Manager {
    pub fn new(
        id: Option<ManagerId>,
        gender: Nullable<Gender>,
        telephone: impl Into<String>,
        user: User,
        agency: Nullable<Agency>,
        appointments: Nullable<Vec<Appointment>>,
    ) -> Self {
        Self {
            id,
            gender,
            telephone: telephone.into(),
            user,
            agency,
            appointments,
        }
    }
}

/// Merge-patch body for [`Manager`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerPatch {
    #[serde(default)]
    pub id: Option<ManagerId>,
    #[serde(default)]
    pub gender: Nullable<Gender>,
    #[serde(default)]
    pub telephone: Nullable<String>,
    #[serde(default)]
    pub user: Nullable<User>,
    #[serde(default)]
    pub agency: Nullable<Agency>,
    #[serde(default)]
    pub appointments: Nullable<Vec<Appointment>>,
}

impl Entity for Manager {
    type Id = ManagerId;
    const NAME: &'static str = "manager";

    fn identifier(&self) -> Option<ManagerId> {
        self.id
    }

    fn set_identifier(&mut self, id: ManagerId) {
        self.id = Some(id);
    }
}

impl MergePatch for Manager {
    type Patch = ManagerPatch;

    fn patch_identifier(patch: &ManagerPatch) -> Option<ManagerId> {
        patch.id
    }

    fn merge(&mut self, patch: ManagerPatch) {
        self.gender.merge(patch.gender);
        merge_required(&mut self.telephone, patch.telephone);
        merge_required(&mut self.user, patch.user);
        self.agency.merge(patch.agency);
        self.appointments.merge(patch.appointments);
    }
}
