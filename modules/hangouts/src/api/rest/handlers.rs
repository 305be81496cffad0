use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, http::Uri, response::Json, Extension};
use modkit::{AuthSubject, ProblemResponse};
use tracing::info;
use uuid::Uuid;

use crate::api::rest::dto::{
    ActivityDto, CreateSuggestionReq, DashboardDto, SuggestionActionReq, SuggestionDto,
};
use crate::api::rest::error::map_domain_error;
use crate::contract::model::HangoutSuggestion;
use crate::domain::service::Service;

fn to_dtos(suggestions: Vec<HangoutSuggestion>) -> Vec<SuggestionDto> {
    suggestions.into_iter().map(SuggestionDto::from).collect()
}

/// Suggestions created by or involving the caller
#[utoipa::path(
    get,
    path = "/suggestions",
    tag = "hangouts",
    operation_id = "hangouts.list_suggestions",
    responses(
        (status = 200, description = "Caller's suggestions, earliest first", body = [SuggestionDto]),
        (status = 401, description = "Missing identity", body = modkit::Problem),
        (status = 500, description = "Internal Server Error", body = modkit::Problem)
    )
)]
pub async fn list_suggestions(
    subject: AuthSubject,
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
) -> Result<Json<Vec<SuggestionDto>>, ProblemResponse> {
    let list = svc
        .list_for(&subject)
        .await
        .map_err(|e| map_domain_error(&e, uri.path()))?;
    Ok(Json(to_dtos(list)))
}

#[utoipa::path(
    post,
    path = "/suggestions",
    tag = "hangouts",
    operation_id = "hangouts.create_suggestion",
    request_body = CreateSuggestionReq,
    responses(
        (status = 201, description = "Created suggestion", body = SuggestionDto),
        (status = 401, description = "Missing identity", body = modkit::Problem),
        (status = 500, description = "Internal Server Error", body = modkit::Problem)
    )
)]
pub async fn create_suggestion(
    subject: AuthSubject,
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<CreateSuggestionReq>,
) -> Result<(StatusCode, Json<SuggestionDto>), ProblemResponse> {
    info!(user_id = %subject.id, activity = %req.activity, "creating suggestion");
    let created = svc
        .create(&subject, req.into())
        .await
        .map_err(|e| map_domain_error(&e, uri.path()))?;
    Ok((StatusCode::CREATED, Json(SuggestionDto::from(created))))
}

/// Generate a suggestion for the caller and their buddies
#[utoipa::path(
    post,
    path = "/suggestions/generate",
    tag = "hangouts",
    operation_id = "hangouts.generate_suggestion",
    responses(
        (status = 201, description = "Generated suggestion", body = SuggestionDto),
        (status = 401, description = "Missing identity", body = modkit::Problem),
        (status = 500, description = "Internal Server Error", body = modkit::Problem)
    )
)]
pub async fn generate_suggestion(
    subject: AuthSubject,
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
) -> Result<(StatusCode, Json<SuggestionDto>), ProblemResponse> {
    let generated = svc
        .generate(&subject)
        .await
        .map_err(|e| map_domain_error(&e, uri.path()))?;
    Ok((StatusCode::CREATED, Json(SuggestionDto::from(generated))))
}

/// Respond to, or withdraw a response from, a suggestion
#[utoipa::path(
    put,
    path = "/suggestions/{id}",
    tag = "hangouts",
    operation_id = "hangouts.update_suggestion",
    params(("id" = Uuid, Path, description = "Suggestion id")),
    request_body = SuggestionActionReq,
    responses(
        (status = 200, description = "Caller's suggestions after the action", body = [SuggestionDto]),
        (status = 403, description = "Caller is not a participant", body = modkit::Problem),
        (status = 404, description = "Suggestion not found", body = modkit::Problem),
        (status = 409, description = "Suggestion already resolved", body = modkit::Problem)
    )
)]
pub async fn update_suggestion(
    subject: AuthSubject,
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    Json(req): Json<SuggestionActionReq>,
) -> Result<Json<Vec<SuggestionDto>>, ProblemResponse> {
    let result = match req {
        SuggestionActionReq::Respond { response } => {
            svc.respond(&subject, id, response.into()).await
        }
        SuggestionActionReq::Unaccept => svc.unaccept(&subject, id).await,
    };
    let list = result.map_err(|e| map_domain_error(&e, uri.path()))?;
    Ok(Json(to_dtos(list)))
}

#[utoipa::path(
    delete,
    path = "/suggestions/{id}",
    tag = "hangouts",
    operation_id = "hangouts.delete_suggestion",
    params(("id" = Uuid, Path, description = "Suggestion id")),
    responses(
        (status = 200, description = "Caller's suggestions after removal", body = [SuggestionDto]),
        (status = 403, description = "Caller is not a participant", body = modkit::Problem),
        (status = 404, description = "Suggestion not found", body = modkit::Problem)
    )
)]
pub async fn delete_suggestion(
    subject: AuthSubject,
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<SuggestionDto>>, ProblemResponse> {
    let list = svc
        .delete(&subject, id)
        .await
        .map_err(|e| map_domain_error(&e, uri.path()))?;
    Ok(Json(to_dtos(list)))
}

/// Built-in activity catalog
#[utoipa::path(
    get,
    path = "/activities",
    tag = "hangouts",
    operation_id = "hangouts.list_activities",
    responses(
        (status = 200, description = "Activity catalog", body = [ActivityDto]),
        (status = 401, description = "Missing identity", body = modkit::Problem)
    )
)]
pub async fn list_activities(
    _subject: AuthSubject,
    Extension(svc): Extension<Arc<Service>>,
) -> Json<Vec<ActivityDto>> {
    Json(svc.activities().into_iter().map(ActivityDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "hangouts",
    operation_id = "hangouts.dashboard",
    responses(
        (status = 200, description = "Home-screen summary", body = DashboardDto),
        (status = 401, description = "Missing identity", body = modkit::Problem),
        (status = 500, description = "Internal Server Error", body = modkit::Problem)
    )
)]
pub async fn dashboard(
    subject: AuthSubject,
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
) -> Result<Json<DashboardDto>, ProblemResponse> {
    let summary = svc
        .dashboard(&subject)
        .await
        .map_err(|e| map_domain_error(&e, uri.path()))?;
    Ok(Json(DashboardDto::from(summary)))
}
