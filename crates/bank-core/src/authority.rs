//! # Authorities
//!
//! Role names granted to authenticated accounts, as listed in the accounts
//! file.

use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::error::BankError;

/// A role granted to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Authority {
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
    #[serde(rename = "ROLE_USER")]
    User,
    #[serde(rename = "ROLE_ANONYMOUS")]
    Anonymous,
    #[serde(rename = "ROLE_ADVISOR")]
    Advisor,
    #[serde(rename = "ROLE_MANAGER")]
    Manager,
}

impl Authority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ROLE_ADMIN",
            Self::User => "ROLE_USER",
            Self::Anonymous => "ROLE_ANONYMOUS",
            Self::Advisor => "ROLE_ADVISOR",
            Self::Manager => "ROLE_MANAGER",
        }
    }
}

impl std::fmt::Display for Authority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Authority {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROLE_ADMIN" => Ok(Self::Admin),
            "ROLE_USER" => Ok(Self::User),
            "ROLE_ANONYMOUS" => Ok(Self::Anonymous),
            "ROLE_ADVISOR" => Ok(Self::Advisor),
            "ROLE_MANAGER" => Ok(Self::Manager),
            other => Err(BankError::UnknownAuthority(other.to_string())),
        }
    }
}

/// Wire values are parsed with [`FromStr`], so unknown names surface as
/// [`BankError`].
impl<'de> Deserialize<'de> for Authority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_agree() {
        for name in [
            "ROLE_ADMIN",
            "ROLE_USER",
            "ROLE_ANONYMOUS",
            "ROLE_ADVISOR",
            "ROLE_MANAGER",
        ] {
            let authority: Authority = name.parse().unwrap();
            assert_eq!(authority.to_string(), name);
            assert_eq!(serde_json::to_string(&authority).unwrap(), format!("\"{name}\""));
        }
    }

    #[test]
    fn unknown_authority_is_rejected() {
        assert!("ROLE_ROOT".parse::<Authority>().is_err());
        let err = serde_json::from_str::<Vec<Authority>>(r#"["ROLE_USER", "ROLE_ROOT"]"#)
            .unwrap_err();
        assert!(err.to_string().contains("unknown authority: \"ROLE_ROOT\""), "{err}");
    }
}
