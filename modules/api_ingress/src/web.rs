use axum::{extract::Extension, http::Uri, response::Json};
use modkit::ProblemResponse;
use serde_json::{json, Value};

use crate::request_id::XRequestId;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Unknown routes answer with Problem Details like every other error.
pub async fn not_found_fallback(
    uri: Uri,
    rid: Option<Extension<XRequestId>>,
) -> ProblemResponse {
    let mut problem = modkit::not_found(format!("no route for {}", uri.path()));
    problem.0 = problem
        .0
        .with_instance(uri.path())
        .with_code("ROUTE_NOT_FOUND");
    if let Some(Extension(XRequestId(id))) = rid {
        problem.0 = problem.0.with_request_id(id);
    }
    problem
}
