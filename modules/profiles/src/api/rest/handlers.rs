use std::sync::Arc;

use axum::{extract::Path, http::Uri, response::Json, Extension};
use modkit::{AuthSubject, ProblemResponse};
use tracing::info;

use crate::api::rest::dto::{AddBuddyReq, ProfileDto, UpdateProfileReq, UserSummaryDto};
use crate::api::rest::error::map_domain_error;
use crate::domain::service::Service;

/// Fetch the caller's profile, creating it on first access
#[utoipa::path(
    get,
    path = "/profile",
    tag = "profiles",
    operation_id = "profiles.get_profile",
    responses(
        (status = 200, description = "Caller's profile", body = ProfileDto),
        (status = 401, description = "Missing identity", body = modkit::Problem),
        (status = 500, description = "Internal Server Error", body = modkit::Problem)
    )
)]
pub async fn get_profile(
    subject: AuthSubject,
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
) -> Result<Json<ProfileDto>, ProblemResponse> {
    let profile = svc
        .get_or_create(&subject)
        .await
        .map_err(|e| map_domain_error(&e, uri.path()))?;
    Ok(Json(ProfileDto::from(profile)))
}

/// Partially update the caller's profile
#[utoipa::path(
    put,
    path = "/profile",
    tag = "profiles",
    operation_id = "profiles.update_profile",
    request_body = UpdateProfileReq,
    responses(
        (status = 200, description = "Updated profile", body = ProfileDto),
        (status = 400, description = "Invalid schedule", body = modkit::Problem),
        (status = 404, description = "Profile not found", body = modkit::Problem),
        (status = 500, description = "Internal Server Error", body = modkit::Problem)
    )
)]
pub async fn update_profile(
    subject: AuthSubject,
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<UpdateProfileReq>,
) -> Result<Json<ProfileDto>, ProblemResponse> {
    info!(user_id = %subject.id, "updating profile");
    let profile = svc
        .update(&subject.id, req.into())
        .await
        .map_err(|e| map_domain_error(&e, uri.path()))?;
    Ok(Json(ProfileDto::from(profile)))
}

/// Add a buddy by email address
#[utoipa::path(
    post,
    path = "/profile/buddies",
    tag = "profiles",
    operation_id = "profiles.add_buddy",
    request_body = AddBuddyReq,
    responses(
        (status = 200, description = "Updated profile", body = ProfileDto),
        (status = 404, description = "No user with that email", body = modkit::Problem),
        (status = 500, description = "Internal Server Error", body = modkit::Problem)
    )
)]
pub async fn add_buddy(
    subject: AuthSubject,
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<AddBuddyReq>,
) -> Result<Json<ProfileDto>, ProblemResponse> {
    let profile = svc
        .add_buddy_by_email(&subject.id, &req.email)
        .await
        .map_err(|e| map_domain_error(&e, uri.path()))?;
    Ok(Json(ProfileDto::from(profile)))
}

#[utoipa::path(
    delete,
    path = "/profile/buddies/{id}",
    tag = "profiles",
    operation_id = "profiles.remove_buddy",
    params(("id" = String, Path, description = "Buddy user id")),
    responses(
        (status = 200, description = "Updated profile", body = ProfileDto),
        (status = 404, description = "Profile not found", body = modkit::Problem)
    )
)]
pub async fn remove_buddy(
    subject: AuthSubject,
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(buddy_id): Path<String>,
) -> Result<Json<ProfileDto>, ProblemResponse> {
    let profile = svc
        .remove_buddy(&subject.id, &buddy_id)
        .await
        .map_err(|e| map_domain_error(&e, uri.path()))?;
    Ok(Json(ProfileDto::from(profile)))
}

/// User directory, used to pick hangout participants
#[utoipa::path(
    get,
    path = "/users",
    tag = "profiles",
    operation_id = "profiles.list_users",
    responses(
        (status = 200, description = "Registered users", body = [UserSummaryDto]),
        (status = 401, description = "Missing identity", body = modkit::Problem)
    )
)]
pub async fn list_users(
    _subject: AuthSubject,
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
) -> Result<Json<Vec<UserSummaryDto>>, ProblemResponse> {
    let users = svc
        .list_users()
        .await
        .map_err(|e| map_domain_error(&e, uri.path()))?;
    Ok(Json(users.into_iter().map(UserSummaryDto::from).collect()))
}
