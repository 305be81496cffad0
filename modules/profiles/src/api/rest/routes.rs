use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Extension, Router,
};
use modkit::OpenApiRegistry;
use utoipa::OpenApi;

use crate::api::rest::{dto, handlers};
use crate::domain::service::Service;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::get_profile,
        handlers::update_profile,
        handlers::add_buddy,
        handlers::remove_buddy,
        handlers::list_users
    ),
    components(schemas(
        dto::ProfileDto,
        dto::ClassScheduleDto,
        dto::UpdateProfileReq,
        dto::AddBuddyReq,
        dto::UserSummaryDto,
        modkit::Problem,
        modkit::ValidationError
    )),
    tags((name = "profiles", description = "Student profiles, schedules and buddies"))
)]
pub struct ProfilesApiDoc;

pub fn register_routes(
    router: Router,
    openapi: &dyn OpenApiRegistry,
    service: Arc<Service>,
) -> anyhow::Result<Router> {
    let routes = Router::new()
        .route(
            "/profile",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        .route("/profile/buddies", post(handlers::add_buddy))
        .route("/profile/buddies/{id}", delete(handlers::remove_buddy))
        .route("/users", get(handlers::list_users))
        .layer(Extension(service));

    openapi.register_doc(ProfilesApiDoc::openapi());

    Ok(router.merge(routes))
}
