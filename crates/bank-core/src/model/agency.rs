//! Agency shape: a bank branch advisors and managers are assigned to.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{merge_required, Entity, MergePatch};
use crate::identity::AgencyId;
use crate::model::enterprise::Enterprise;
use crate::nullable::Nullable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Agency {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AgencyId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    #[schema(value_type = Option<String>)]
    pub address: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    #[schema(value_type = Option<String>)]
    pub telephone: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    #[schema(value_type = Option<Enterprise>)]
    pub enterprise: Nullable<Enterprise>,
}

impl Agency {
    pub fn new(
        id: Option<AgencyId>,
        name: impl Into<String>,
        address: Nullable<String>,
        telephone: Nullable<String>,
        enterprise: Nullable<Enterprise>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            address,
            telephone,
            enterprise,
        }
    }
}

/// Merge-patch body for [`Agency`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgencyPatch {
    #[serde(default)]
    pub id: Option<AgencyId>,
    #[serde(default)]
    pub name: Nullable<String>,
    #[serde(default)]
    pub address: Nullable<String>,
    #[serde(default)]
    pub telephone: Nullable<String>,
    #[serde(default)]
    pub enterprise: Nullable<Enterprise>,
}

impl Entity for Agency {
    type Id = AgencyId;
    const NAME: &'static str = "agency";

    fn identifier(&self) -> Option<AgencyId> {
        self.id
    }

    fn set_identifier(&mut self, id: AgencyId) {
        self.id = Some(id);
    }
}

impl MergePatch for Agency {
    type Patch = AgencyPatch;

    fn patch_identifier(patch: &AgencyPatch) -> Option<AgencyId> {
        patch.id
    }

    fn merge(&mut self, patch: AgencyPatch) {
        merge_required(&mut self.name, patch.name);
        self.address.merge(patch.address);
        self.telephone.merge(patch.telephone);
        self.enterprise.merge(patch.enterprise);
    }
}
