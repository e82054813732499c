use axum::http::HeaderMap;

use backend_domain::{RuntimeConfig, UserId};

use crate::error::HttpError;

/// Resolves the calling user from a bearer token. Every data operation is
/// scoped to the identity returned here; an unknown or absent token is a
/// hard failure before any work happens.
pub fn authenticate(config: &RuntimeConfig, headers: &HeaderMap) -> Result<UserId, HttpError> {
    let token = extract_bearer(headers).ok_or(HttpError::Unauthorized)?;
    config
        .auth_tokens
        .get(&token)
        .map(|user| UserId(user.clone()))
        .ok_or(HttpError::Unauthorized)
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let prefix = "Bearer ";
    if !value.starts_with(prefix) {
        return None;
    }
    let token = value[prefix.len()..].trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
