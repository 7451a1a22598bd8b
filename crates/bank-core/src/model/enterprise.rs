//! Enterprise shape: the legal entity agencies belong to.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{merge_required, Entity, MergePatch};
use crate::identity::EnterpriseId;
use crate::nullable::Nullable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Enterprise {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EnterpriseId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    #[schema(value_type = Option<String>)]
    pub address: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    #[schema(value_type = Option<String>)]
    pub telephone: Nullable<String>,
}

impl Enterprise {
    pub fn new(
        id: Option<EnterpriseId>,
        name: impl Into<String>,
        address: Nullable<String>,
        telephone: Nullable<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            address,
            telephone,
        }
    }
}

/// Merge-patch body for [`Enterprise`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterprisePatch {
    #[serde(default)]
    pub id: Option<EnterpriseId>,
    #[serde(default)]
    pub name: Nullable<String>,
    #[serde(default)]
    pub address: Nullable<String>,
    #[serde(default)]
    pub telephone: Nullable<String>,
}

impl Entity for Enterprise {
    type Id = EnterpriseId;
    const NAME: &'static str = "enterprise";

    fn identifier(&self) -> Option<EnterpriseId> {
        self.id
    }

    fn set_identifier(&mut self, id: EnterpriseId) {
        self.id = Some(id);
    }
}

impl MergePatch for Enterprise {
    type Patch = EnterprisePatch;

    fn patch_identifier(patch: &EnterprisePatch) -> Option<EnterpriseId> {
        patch.id
    }

    fn merge(&mut self, patch: EnterprisePatch) {
        merge_required(&mut self.name, patch.name);
        self.address.merge(patch.address);
        self.telephone.merge(patch.telephone);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_name_on_null() {
        let mut e = Enterprise::new(
            Some(EnterpriseId(1)),
            "Baamtu",
            Nullable::Present("Dakar".to_string()),
            Nullable::Absent,
        );
        let patch: EnterprisePatch =
            serde_json::from_str(r#"{"id":1,"name":null,"address":null,"telephone":"33 800 00 00"}"#)
                .unwrap();
        e.merge(patch);
        assert_eq!(e.name, "Baamtu");
        assert_eq!(e.address, Nullable::Null);
        assert_eq!(e.telephone, Nullable::Present("33 800 00 00".to_string()));
    }
}
