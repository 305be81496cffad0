use axum::http::StatusCode;
use modkit::{Problem, ProblemResponse};
use profiles::error::ProfilesError;

use crate::domain::error::DomainError;

fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
) -> ProblemResponse {
    Problem::new(status, title, detail)
        .with_type(format!("urn:syncup:error:{}", code.to_lowercase()))
        .with_code(code)
        .with_instance(instance)
        .into()
}

/// Map a domain error to RFC 9457 Problem Details.
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::SuggestionNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "HANGOUTS_NOT_FOUND",
            "Suggestion not found",
            format!("Suggestion {id} does not exist"),
            instance,
        ),
        DomainError::NotParticipant { id, .. } => from_parts(
            StatusCode::FORBIDDEN,
            "HANGOUTS_NOT_PARTICIPANT",
            "Not a participant",
            format!("You are not a participant of suggestion {id}"),
            instance,
        ),
        DomainError::AlreadyResolved { .. } => from_parts(
            StatusCode::CONFLICT,
            "HANGOUTS_ALREADY_RESOLVED",
            "Suggestion already resolved",
            e.to_string(),
            instance,
        ),
        DomainError::Profiles(ProfilesError::NotFound { id }) => from_parts(
            StatusCode::NOT_FOUND,
            "PROFILES_NOT_FOUND",
            "Profile not found",
            format!("No profile for user '{id}'"),
            instance,
        ),
        DomainError::Profiles(ProfilesError::Validation { message }) => from_parts(
            StatusCode::BAD_REQUEST,
            "PROFILES_VALIDATION",
            "Validation failed",
            message.clone(),
            instance,
        ),
        DomainError::Profiles(ProfilesError::Internal) | DomainError::Database { .. } => {
            tracing::error!(error = ?e, "hangouts internal error");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "HANGOUTS_INTERNAL",
                "Internal Server Error",
                "An internal error occurred",
                instance,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::model::SuggestionStatus;
    use uuid::Uuid;

    #[test]
    fn lifecycle_errors_have_distinct_statuses() {
        let id = Uuid::new_v4();
        let cases = [
            (DomainError::SuggestionNotFound { id }, 404, "HANGOUTS_NOT_FOUND"),
            (
                DomainError::NotParticipant {
                    id,
                    user_id: "u9".into(),
                },
                403,
                "HANGOUTS_NOT_PARTICIPANT",
            ),
            (
                DomainError::AlreadyResolved {
                    id,
                    status: SuggestionStatus::Accepted,
                },
                409,
                "HANGOUTS_ALREADY_RESOLVED",
            ),
        ];
        for (err, status, code) in cases {
            let ProblemResponse(p) = map_domain_error(&err, "/suggestions/x");
            assert_eq!(p.status, status);
            assert_eq!(p.code, code);
            assert_eq!(p.type_url, format!("urn:syncup:error:{}", code.to_lowercase()));
        }
    }

    #[test]
    fn storage_detail_is_not_leaked() {
        let ProblemResponse(p) =
            map_domain_error(&DomainError::database("no such table: suggestions"), "/suggestions");
        assert_eq!(p.status, 500);
        assert!(!p.detail.contains("no such table"));
    }
}
