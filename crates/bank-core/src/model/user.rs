//! User account shape owning the login of an advisor or manager.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::identity::UserId;

/// Identity/login information shared by advisors and managers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub login: String,
}

impl User {
    pub fn new(id: Option<UserId>, login: impl Into<String>) -> Self {
        Self {
            id,
            login: login.into(),
        }
    }
}
