//! # Authentication Middleware
//!
//! Bearer-token authentication for `/api/*` endpoints. Tokens map to
//! accounts (login plus authorities) loaded from the accounts file. When no
//! accounts are configured, authentication is disabled and every request
//! runs as the built-in `system` identity.
//!
//! Health probes and `/metrics` are mounted outside this middleware.

use axum::extract::{FromRequestParts, Request};
use axum::http::request::Parts;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use bank_core::Authority;
use subtle::ConstantTimeEq;

use crate::config::Account;
use crate::error::AppError;

/// The authenticated caller, injected into request extensions by
/// [`auth_middleware`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub login: String,
    pub authorities: Vec<Authority>,
}

impl CallerIdentity {
    /// Identity used for every request while authentication is disabled.
    pub fn system() -> Self {
        Self {
            login: "system".to_string(),
            authorities: vec![Authority::Admin, Authority::User],
        }
    }
}

impl From<&Account> for CallerIdentity {
    fn from(account: &Account) -> Self {
        Self {
            login: account.login.clone(),
            authorities: account.authorities.clone(),
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CallerIdentity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CallerIdentity>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("no authenticated caller".to_string()))
    }
}

/// Accounts accepted by [`auth_middleware`], shared through an `Extension`.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    pub accounts: Vec<Account>,
}

impl AuthConfig {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    pub fn enabled(&self) -> bool {
        !self.accounts.is_empty()
    }

    /// Find the account owning `token`. Every account is compared so the
    /// time taken does not depend on which one matched.
    fn authenticate(&self, token: &str) -> Option<&Account> {
        let mut found = None;
        for account in &self.accounts {
            if bool::from(account.token.as_bytes().ct_eq(token.as_bytes())) {
                found = Some(account);
            }
        }
        found
    }
}

/// Extract the credentials of an `Authorization: Bearer <token>` header.
/// The scheme name is matched case-insensitively.
fn bearer_token(request: &Request) -> Option<&str> {
    let value = request.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim_start().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Resolve the caller from the `Authorization: Bearer <token>` header and
/// insert a [`CallerIdentity`] into the request extensions.
pub async fn auth_middleware(mut request: Request, next: Next) -> Response {
    let config = request
        .extensions()
        .get::<AuthConfig>()
        .cloned()
        .unwrap_or_default();

    if !config.enabled() {
        request.extensions_mut().insert(CallerIdentity::system());
        return next.run(request).await;
    }

    let identity = match bearer_token(&request) {
        Some(token) => config.authenticate(token).map(CallerIdentity::from),
        None => {
            return AppError::Unauthorized("missing bearer token".to_string()).into_response();
        }
    };

    match identity {
        Some(identity) => {
            tracing::debug!(
                login = %identity.login,
                authorities = ?identity.authorities,
                "authenticated request"
            );
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        None => {
            tracing::warn!(path = %request.uri().path(), "rejected unknown bearer token");
            AppError::Unauthorized("invalid bearer token".to_string()).into_response()
        }
    }
}
