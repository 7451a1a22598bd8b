//! # Advisor
//!
//! A bank advisor staff record. An advisor value is built either from data
//! read off the persistence collaborator (has an `id`) or fresh for a
//! creation request (no `id`). Nothing here validates or mutates it.
//!
//! ## Fields
//!
//! | Field          | Presence                                   |
//! |----------------|--------------------------------------------|
//! | `id`           | absent until persisted, then immutable     |
//! | `gender`       | absent, `null`, or a [`Gender`]            |
//! | `telephone`    | required                                   |
//! | `user`         | required, exactly one [`User`]             |
//! | `agency`       | absent, `null` (unassigned), or an agency  |
//! | `appointments` | absent (not loaded), `null` (none), or list |

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{merge_required, Entity, MergePatch};
use crate::gender::Gender;
use crate::identity::AdvisorId;
use crate::model::agency::Agency;
use crate::model::appointment::Appointment;
use crate::model::user::User;
use crate::nullable::Nullable;

/// A bank advisor staff record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Advisor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AdvisorId>,
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

impl Advisor {
    /// Build an advisor holding exactly the given fields. Never fails.
    pub fn new(
        id: Option<AdvisorId>,
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

/// The identifier of an advisor, `None` when it was never persisted.
pub fn advisor_identifier(advisor: &Advisor) -> Option<AdvisorId> {
    advisor.id
}

/// Merge-patch body for [`Advisor`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorPatch {
    #[serde(default)]
    pub id: Option<AdvisorId>,
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

impl Entity for Advisor {
    type Id = AdvisorId;
    const NAME: &'static str = "advisor";

    fn identifier(&self) -> Option<AdvisorId> {
        advisor_identifier(self)
    }

    fn set_identifier(&mut self, id: AdvisorId) {
        self.id = Some(id);
    }
}

impl MergePatch for Advisor {
    type Patch = AdvisorPatch;

    fn patch_identifier(patch: &AdvisorPatch) -> Option<AdvisorId> {
        patch.id
    }

    fn merge(&mut self, patch: AdvisorPatch) {
        self.gender.merge(patch.gender);
        merge_required(&mut self.telephone, patch.telephone);
        merge_required(&mut self.user, patch.user);
        self.agency.merge(patch.agency);
        self.appointments.merge(patch.appointments);
    }
}
