//! Caller identity for REST handlers.
//!
//! Authentication happens in front of this server (a gateway or identity
//! proxy). It forwards the verified subject in `x-auth-subject`, plus the
//! display name and email it knows about. Handlers take [`AuthSubject`] as an
//! extractor and pass it explicitly to the domain services.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::api::problem::{unauthorized, ProblemResponse};

pub const SUBJECT_HEADER: &str = "x-auth-subject";
pub const NAME_HEADER: &str = "x-auth-name";
pub const EMAIL_HEADER: &str = "x-auth-email";

/// The authenticated caller: stable subject id plus the identity provider's
/// display name and email (both may be empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSubject {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl AuthSubject {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

fn header_str<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
}

impl<S: Send + Sync> FromRequestParts<S> for AuthSubject {
    type Rejection = ProblemResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(id) = header_str(parts, SUBJECT_HEADER).filter(|s| !s.is_empty()) else {
            let mut problem = unauthorized("missing or empty authenticated subject");
            problem.0.instance = parts.uri.path().to_string();
            problem.0.code = "UNAUTHENTICATED".to_string();
            return Err(problem);
        };

        Ok(AuthSubject {
            id: id.to_string(),
            name: header_str(parts, NAME_HEADER).unwrap_or_default().to_string(),
            email: header_str(parts, EMAIL_HEADER).unwrap_or_default().to_string(),
        })
    }
}
