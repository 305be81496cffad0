use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Extension, Router,
};
use modkit::OpenApiRegistry;
use utoipa::OpenApi;

use crate::api::rest::{dto, handlers};
use crate::domain::service::Service;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_suggestions,
        handlers::create_suggestion,
        handlers::generate_suggestion,
        handlers::update_suggestion,
        handlers::delete_suggestion,
        handlers::list_activities,
        handlers::dashboard
    ),
    components(schemas(
        dto::SuggestionDto,
        dto::SuggestionStatusDto,
        dto::ResponseDto,
        dto::CreateSuggestionReq,
        dto::SuggestionActionReq,
        dto::ActivityDto,
        dto::ClassDto,
        dto::DashboardDto,
        modkit::Problem
    )),
    tags((name = "hangouts", description = "Hangout suggestions and their lifecycle"))
)]
pub struct HangoutsApiDoc;

pub fn register_routes(
    router: Router,
    openapi: &dyn OpenApiRegistry,
    service: Arc<Service>,
) -> anyhow::Result<Router> {
    let routes = Router::new()
        .route(
            "/suggestions",
            get(handlers::list_suggestions).post(handlers::create_suggestion),
        )
        .route("/suggestions/generate", post(handlers::generate_suggestion))
        .route(
            "/suggestions/{id}",
            put(handlers::update_suggestion).delete(handlers::delete_suggestion),
        )
        .route("/activities", get(handlers::list_activities))
        .route("/dashboard", get(handlers::dashboard))
        .layer(Extension(service));

    openapi.register_doc(HangoutsApiDoc::openapi());

    Ok(router.merge(routes))
}
