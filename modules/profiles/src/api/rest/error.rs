use axum::http::StatusCode;
use modkit::{Problem, ProblemResponse, ValidationError};

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
        DomainError::ProfileNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "PROFILES_NOT_FOUND",
            "Profile not found",
            format!("No profile for user '{id}'"),
            instance,
        ),
        DomainError::BuddyNotFound { email } => from_parts(
            StatusCode::NOT_FOUND,
            "PROFILES_BUDDY_NOT_FOUND",
            "Buddy not found",
            format!("No user registered with email '{email}'"),
            instance,
        ),
        DomainError::InvalidWeekday { index, .. } => {
            let ProblemResponse(problem) = from_parts(
                StatusCode::BAD_REQUEST,
                "PROFILES_VALIDATION",
                "Validation failed",
                e.to_string(),
                instance,
            );
            problem
                .with_errors(vec![ValidationError {
                    detail: "must be between 0 (Sunday) and 6 (Saturday)".to_string(),
                    pointer: format!("/schedule/{index}/day_of_week"),
                }])
                .into()
        }
        DomainError::Database { .. } => {
            tracing::error!(error = ?e, "profiles database error");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "PROFILES_INTERNAL",
                "Internal Server Error",
                "An internal database error occurred",
                instance,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_error_points_at_the_field() {
        let ProblemResponse(p) = map_domain_error(&DomainError::invalid_weekday(2, 7), "/profile");
        assert_eq!(p.status, 400);
        assert_eq!(p.code, "PROFILES_VALIDATION");
        assert_eq!(p.instance, "/profile");
        let errors = p.errors.unwrap();
        assert_eq!(errors[0].pointer, "/schedule/2/day_of_week");
    }

    #[test]
    fn database_detail_is_not_leaked() {
        let ProblemResponse(p) =
            map_domain_error(&DomainError::database("UNIQUE constraint failed"), "/users");
        assert_eq!(p.status, 500);
        assert!(!p.detail.contains("UNIQUE"));
    }
}
