use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;

use crate::domain::{Credential, MissingCredential};

/// Reads `Authorization: Bearer <key>`. Anything else counts as no key at all.
pub fn bearer_credential(headers: &HeaderMap) -> Result<Credential, MissingCredential> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(MissingCredential)?;

    let (scheme, key) = value.trim().split_once(' ').ok_or(MissingCredential)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(MissingCredential);
    }

    Credential::parse(key)
}
